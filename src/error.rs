use thiserror::Error;

/// Unified error type for version-query operations
#[derive(Error, Debug)]
pub enum VersionQueryError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Version parsing error: {0}")]
    Parse(String),

    #[error("Cannot increment version component: {0}")]
    InvalidComponent(String),

    #[error("No parsable release tags found in repository")]
    NoVersionsFound,

    #[error("Reached max commit distance {0} without finding the latest release tag")]
    CommitDistanceExceeded(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-query
pub type Result<T> = std::result::Result<T, VersionQueryError>;

impl VersionQueryError {
    /// Create a version parsing error with context
    pub fn parse(msg: impl Into<String>) -> Self {
        VersionQueryError::Parse(msg.into())
    }

    /// Create an invalid-component error with context
    pub fn invalid_component(msg: impl Into<String>) -> Self {
        VersionQueryError::InvalidComponent(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionQueryError::Config(msg.into())
    }
}
