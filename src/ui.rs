//! Display helpers for CLI output.
//!
//! Pure formatting over stderr; the resolved version itself goes to stdout
//! from `main` so it stays pipeable.

use crate::boundary::ResolverWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a resolver warning in yellow.
pub fn display_warning(warning: &ResolverWarning) {
    eprintln!("\x1b[33mWARNING:\x1b[0m {}", warning);
}

/// Print every collected resolver warning.
pub fn display_warnings(warnings: &[ResolverWarning]) {
    for warning in warnings {
        display_warning(warning);
    }
}
