//! CLI presentation: result formatters for the management commands.

use crate::runner::RunReport;
use crate::sitemap::PingResult;
use owo_colors::OwoColorize;

pub fn format_ping_result(result: &PingResult) -> String {
    format!(
        "Pinging {}\n✓ Sitemap announced: {} (status {})",
        result.endpoint, result.sitemap_url, result.status
    )
}

/// Summary for a run without failures. Verbosity 2+ adds a per-suite table.
pub fn format_run_report(report: &RunReport, verbosity: u8) -> String {
    let mut output = format!("Ran {} test(s): {}", report.executed, "OK".green());
    if verbosity >= 2 && !report.suites.is_empty() {
        output.push('\n');
        output.push_str(&suite_table(report));
    }
    output
}

/// Failure detail embedded in the TestsFailed error.
pub fn format_failures(report: &RunReport) -> String {
    let mut lines: Vec<String> = report
        .failures
        .iter()
        .map(|f| format!("  ✗ {}::{}: {}", f.suite, f.case, f.message))
        .collect();
    lines.push(format!(
        "Ran {} test(s): {}",
        report.executed,
        "FAILED".red()
    ));
    lines.join("\n")
}

fn suite_table(report: &RunReport) -> String {
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["Suite", "Cases", "Failed"]);
    for suite in &report.suites {
        table.add_row(vec![
            suite.name.clone(),
            suite.executed.to_string(),
            suite.failed.to_string(),
        ]);
    }
    table.to_string()
}
