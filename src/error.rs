//! Error types for the outer surfaces of split-text
//!
//! The splitting pass itself never fails: bad delimiters, bad tags and degenerate
//! trees are recovered from by substitution. Errors only come from loading
//! configuration, reading input and serializing the rewritten tree.

use thiserror::Error;

/// Errors raised while configuring, loading or serializing
#[derive(Error, Debug)]
pub enum SplitError {
    /// Delimiter name not in the supported set (strict parsing only)
    #[error("Unknown delimiter: {0}")]
    UnknownDelimiter(String),

    /// Configuration could not be built or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The DOM could not be written back out as HTML
    #[error("HTML serialization failed: {0}")]
    Serialization(String),

    /// No element matched the requested target
    #[error("No <{0}> element found in document")]
    TargetNotFound(String),
}

/// Result type alias for split-text operations
pub type Result<T> = std::result::Result<T, SplitError>;
