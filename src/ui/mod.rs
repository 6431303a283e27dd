//! User interface module - log lines for a non-interactive pipeline run.
//!
//! - `formatter` - Pure formatting functions
//! - [`Reporter`] - Applies `--quiet` on top of the formatter

pub mod formatter;

use crate::domain::TrackKind;
use crate::transition::Flow;

// Re-export formatter functions for convenience
pub use formatter::{
    display_error, display_flow, display_status, display_success, display_version_change,
    display_warning,
};

/// Routes informational output through the formatter unless quiet.
///
/// Errors and warnings are never suppressed. With `with_stderr(true)` the
/// informational lines go to stderr so stdout only carries published output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reporter {
    quiet: bool,
    stderr: bool,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter {
            quiet,
            stderr: false,
        }
    }

    pub fn with_stderr(mut self, stderr: bool) -> Self {
        self.stderr = stderr;
        self
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn logs_to_stderr(&self) -> bool {
        self.stderr
    }

    fn info(&self, line: String) {
        if self.quiet {
            return;
        }
        if self.stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn status(&self, message: &str) {
        self.info(formatter::format_status(message));
    }

    pub fn success(&self, message: &str) {
        self.info(formatter::format_success(message));
    }

    pub fn flow(&self, flow: Flow, track: TrackKind) {
        self.info(formatter::format_flow(flow, track));
    }

    pub fn version_change(&self, previous: &str, next: &str) {
        self.info(formatter::format_version_change(previous, next));
    }

    pub fn warning(&self, message: &str) {
        display_warning(message);
    }

    pub fn error(&self, message: &str) {
        display_error(message);
    }
}
