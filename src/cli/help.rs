//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string for log fields (e.g. "ping_google", "test").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::PingGoogle { .. } => "ping_google",
        Commands::Test { .. } => "test",
    }
}
