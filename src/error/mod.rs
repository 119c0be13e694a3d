//! Error handling for descriptor loading and lookups
//!
//! Every failure is either a load-time error (the descriptor never comes into
//! existence) or a `NotFound` from a lookup on an already loaded descriptor.

use std::fmt;

/// Result type alias for descriptor operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Error types for loading and querying a descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No target with this name exists in the descriptor
    NotFound(String),
    /// The source could not be parsed into the descriptor shape
    Parse(String),
    /// The source parsed but a field violates an invariant
    Invalid(String),
    /// Unsupported source or environment setup
    Config(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotFound(name) => write!(f, "Target not found: {name}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid descriptor: {msg}"),
            ConfigError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
