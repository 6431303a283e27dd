pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git_ops;
pub mod manifest;
pub mod output;
pub mod transition;
pub mod ui;

pub use domain::{TrackKind, Version};
pub use error::{NextVersionError, Result};
pub use transition::next_version;
