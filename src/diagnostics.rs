//! Colored stderr lines for the CLI: validation warnings, notes about
//! fallbacks, and the `ERROR` tag put on every failing step's context.

use colored::Colorize;

/// Report a problem that does not stop the export (off-image pin, empty title).
pub fn warn(message: impl AsRef<str>) {
    eprintln!("{} {}", "WARN".yellow().bold(), message.as_ref());
}

/// Report a choice made on the user's behalf, such as the built-in categories.
pub fn note(message: impl AsRef<str>) {
    eprintln!("{} {}", "NOTE".cyan().bold(), message.as_ref());
}

/// Context line for a failed step; `anyhow` prints it above the cause.
pub fn error_message(message: impl AsRef<str>) -> String {
    format!("{} {}", "ERROR".red().bold(), message.as_ref())
}
