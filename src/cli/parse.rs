//! CLI parse: clap types for Plinth. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plinth CLI - management commands for Plinth-based applications
#[derive(Parser)]
#[command(name = "plinth")]
#[command(about = "Management commands for Plinth-based web applications")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable logging entirely
    #[arg(long)]
    pub quiet: bool,

    /// Enable verbose logging (default: off)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ping Google with an updated sitemap
    #[command(name = "ping_google")]
    PingGoogle {
        /// Sitemap URL (defaults to the configured [sitemap] url)
        sitemap_url: Option<String>,
    },
    /// Run registered test suites and exit non-zero on any failure
    Test {
        /// Suite labels to run (all suites if omitted)
        labels: Vec<String>,

        /// Do not prompt for input of any kind
        #[arg(long)]
        noinput: bool,

        /// Stop running tests after the first failed test
        #[arg(long)]
        failfast: bool,

        /// Output verbosity (0-3)
        #[arg(long, default_value = "1")]
        verbosity: u8,
    },
}
