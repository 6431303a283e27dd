use thiserror::Error;

/// Unified error type for next-version operations
#[derive(Error, Debug)]
pub enum NextVersionError {
    #[error("Unrecognized version format: '{input}' - expected X.Y.Z or X.Y.Z-rc.N")]
    Parse { input: String },

    #[error("Version overflow: cannot increment '{0}'")]
    VersionOverflow(String),

    #[error("Manifest error: {0}")]
    Manifest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ref resolution failed: {0}")]
    Ref(String),

    #[error("Output error: {0}")]
    Output(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in next-version
pub type Result<T> = std::result::Result<T, NextVersionError>;

impl NextVersionError {
    /// Create a parse error capturing the offending input
    pub fn parse(input: impl Into<String>) -> Self {
        NextVersionError::Parse {
            input: input.into(),
        }
    }

    /// Create a manifest error with context
    pub fn manifest(msg: impl Into<String>) -> Self {
        NextVersionError::Manifest(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        NextVersionError::Config(msg.into())
    }

    /// Create a ref resolution error with context
    pub fn reference(msg: impl Into<String>) -> Self {
        NextVersionError::Ref(msg.into())
    }

    /// Create an output error with context
    pub fn output(msg: impl Into<String>) -> Self {
        NextVersionError::Output(msg.into())
    }

    /// Returns the rejected input when this is a parse error
    pub fn parse_input(&self) -> Option<&str> {
        match self {
            NextVersionError::Parse { input } => Some(input),
            _ => None,
        }
    }
}
