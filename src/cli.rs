//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; the route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{format_failures, format_ping_result, format_run_report};
pub use route::RunContext;
