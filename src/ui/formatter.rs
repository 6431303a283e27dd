//! Pure formatting functions for UI output.
//!
//! Each `format_*` function returns the styled line; the matching `display_*`
//! function prints it. Styling goes through `console`, which drops colors when
//! the stream is not a terminal or `NO_COLOR` is set.

use console::style;

use crate::domain::TrackKind;
use crate::transition::Flow;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_warning(message: &str) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), message)
}

/// Headline for the flow taken, e.g. "Hotfix flow on stable track".
pub fn format_flow(flow: Flow, track: TrackKind) -> String {
    let name = flow.name();
    let mut headline = name[..1].to_uppercase();
    headline.push_str(&name[1..]);
    format!(
        "{} {} flow on {} track",
        style("→").yellow(),
        style(headline).bold(),
        track
    )
}

/// Old → new version summary.
pub fn format_version_change(previous: &str, next: &str) -> String {
    format!(
        "  From: {}\n  To:   {}",
        style(previous).red(),
        style(next).green()
    )
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Format and print a non-fatal warning to stderr.
pub fn display_warning(message: &str) {
    eprintln!("{}", format_warning(message));
}

pub fn display_flow(flow: Flow, track: TrackKind) {
    println!("{}", format_flow(flow, track));
}

pub fn display_version_change(previous: &str, next: &str) {
    println!("{}", format_version_change(previous, next));
}
