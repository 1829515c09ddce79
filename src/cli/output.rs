//! Output formatting utilities for CLI commands

use is_terminal::IsTerminal;
use std::io::{self, Write};

use crate::Verdict;

/// Format error message for display
pub fn format_error(operation: &str, details: &str) -> String {
    format!("{} - {}", operation, details)
}

/// Log info message (respects quiet flag)
pub fn log_info(msg: &str, quiet: bool) {
    if !quiet {
        eprintln!("{}", msg);
    }
}

/// Write output to file or stdout
pub fn write_output(content: &str, path: Option<&str>) -> Result<(), String> {
    if let Some(path) = path {
        std::fs::write(path, content).map_err(|e| format!("Failed to write to {}: {}", path, e))?;
    } else {
        print!("{}", content);
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {}", e))?;
    }
    Ok(())
}

/// Colorize text with ANSI escape codes (only if stdout is a terminal)
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Get color code for a verdict
pub fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Candidate => "1;33",
        Verdict::NonHabitual => "32",
        Verdict::NoOpinion => "37",
    }
}

/// Format a feature count: 0 in green, anything to review in yellow
pub fn count_colored(count: usize) -> String {
    let code = if count == 0 { "1;32" } else { "1;33" };
    color(code, &count.to_string())
}
