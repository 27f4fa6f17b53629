//! Error types for the Plinth rendering and management surfaces.

use thiserror::Error;

/// Sitemap ping errors
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("No sitemap URL provided and none configured under [sitemap]")]
    SitemapNotFound,

    #[error("Invalid sitemap URL: {0}")]
    InvalidUrl(String),

    #[error("Ping failed: {0}")]
    PingFailed(String),
}

/// Management command errors
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Unknown test runner: {0}. Register it or set test_runner = \"default\"")]
    UnknownRunner(String),

    #[error("Unknown suite label: {0}")]
    UnknownLabel(String),

    #[error("Test run aborted: {0}")]
    RunAborted(String),

    #[error("{failures} of {executed} test(s) failed\n{details}")]
    TestsFailed {
        failures: usize,
        executed: usize,
        details: String,
    },

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for CommandError {
    fn from(err: config::ConfigError) -> Self {
        CommandError::ConfigError(err.to_string())
    }
}
