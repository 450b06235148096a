//! Pure formatting functions for UI output.
//!
//! Coloured messages for humans. Command traces are not formatted here; they
//! go through [`crate::runner::Tracer`] untouched.

use console::style;
use rand::seq::IndexedRandom;

/// First warning printed before a tag is moved.
pub const CAUTION_MESSAGE: &str = "CAUTION!!! History may be rewritten!";

/// Flavour text printed alongside [`CAUTION_MESSAGE`].
pub const SAFETY_MESSAGES: &[&str] = &[
    "Make sure there are sufficient parallel universes available.",
    "Are you wearing your paradox protection headgear?",
    "Commit log may turn into a big ball of wibbly-wobbly, timey-wimey stuff.",
    "1.21 Gigawatts?! Great Scott!",
    "Avoid gate addresses that cause wormhole to pass through solar flares.",
    "Reconfiguring sensor array to generate inverse tachyon pulse.",
    "Time to learn how to speak Heptapod.",
    "Alerting Time Enforcement Commission...",
    "Is the drive plate sealed?  Only You Can Prevent Radiation Leaks!",
    "Safety not guaranteed.",
];

/// A random entry from [`SAFETY_MESSAGES`].
pub fn safety_message() -> &'static str {
    SAFETY_MESSAGES
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or("Safety not guaranteed.")
}

/// Format an error message the way the tools report failures: `prog: error: message`.
pub fn format_error(prog: Option<&str>, message: &str) -> String {
    let label = style("error:").for_stderr().red().bold();
    match prog {
        Some(prog) => format!("{}: {} {}", prog, label, message),
        None => format!("{} {}", label, message),
    }
}

/// Format and print an error message in red.
pub fn display_error(prog: Option<&str>, message: &str) {
    eprintln!("{}", format_error(prog, message));
}

/// Print a complete, already-worded error line in red.
pub fn display_failure(message: &str) {
    eprintln!("{}", style(message).for_stderr().red());
}

/// Format and print a warning in yellow.
pub fn display_warning(message: &str) {
    eprintln!("{}", style(message).for_stderr().yellow());
}
