//! Leveled console output
//!
//! All pipeline components report through the [`Reporter`] trait instead of
//! printing directly, so tests (and non-interactive callers) can run silently.

use console::style;

/// Output sink for pipeline components
pub trait Reporter {
    /// Informational progress message
    fn info(&self, message: &str);

    /// A step completed successfully
    fn success(&self, message: &str);

    /// Non-fatal condition worth surfacing
    fn warn(&self, message: &str);

    /// Low-importance detail (skipped files, raw commands)
    fn debug(&self, message: &str);
}

/// Reporter printing `[LEVEL]`-tagged lines to the terminal
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, message: &str) {
        // Tags are padded to a fixed width so messages line up in a column
        println!("{} {}", style(format!("{:<10}", "[INFO]")).cyan(), message);
    }

    fn success(&self, message: &str) {
        println!(
            "{} {}",
            style(format!("{:<10}", "[SUCCESS]")).green().bold(),
            message
        );
    }

    fn warn(&self, message: &str) {
        println!(
            "{} {}",
            style(format!("{:<10}", "[WARN]")).yellow().bold(),
            message
        );
    }

    fn debug(&self, message: &str) {
        println!("{} {}", style(format!("{:<10}", "[DEBUG]")).dim(), message);
    }
}

/// Reporter that discards everything; used by tests
#[allow(dead_code)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn info(&self, _message: &str) {}
    fn success(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn debug(&self, _message: &str) {}
}
