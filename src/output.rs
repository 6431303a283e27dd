//! Publishing the computed version as a named pipeline output

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::{NextVersionError, Result};

/// Formats a `name=value` output line after validating both parts.
pub fn format_output(name: &str, value: &str) -> Result<String> {
    if name.is_empty() {
        return Err(NextVersionError::output("output name must not be empty"));
    }
    if name.contains(['=', '\n', '\r']) {
        return Err(NextVersionError::output(format!(
            "invalid output name '{}'",
            name.escape_debug()
        )));
    }
    if value.contains(['\n', '\r']) {
        return Err(NextVersionError::output(format!(
            "output value for '{}' must be a single line",
            name
        )));
    }
    Ok(format!("{}={}", name, value))
}

/// Publishes `name=value`.
///
/// Appends to `target` when given (the file named by `GITHUB_OUTPUT`),
/// otherwise prints the line on stdout.
pub fn publish(name: &str, value: &str, target: Option<&Path>) -> Result<()> {
    let line = format_output(name, value)?;

    match target {
        Some(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    NextVersionError::output(format!("Cannot open {}: {}", path.display(), e))
                })?;
            writeln!(file, "{}", line)?;
        }
        None => println!("{}", line),
    }
    Ok(())
}
