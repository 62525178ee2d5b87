//! CLI theme and styling.

use colored::Colorize;
use wrapr_core::ResolutionResult;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }
}

/// Color a resolution result by outcome.
pub(crate) fn outcome(result: &ResolutionResult) -> String {
    let text = result.to_string();
    match result {
        ResolutionResult::Package(..) | ResolutionResult::Wrapper(..) => text.green().to_string(),
        ResolutionResult::Uri(_) => text.cyan().to_string(),
        ResolutionResult::NotFound => text.yellow().to_string(),
    }
}
