//! Error types for configuration loading.
//!
//! Covers reading and writing configuration files and template placeholder
//! substitution. Structural problems in an otherwise readable configuration
//! are reported as [`ValidationError`](crate::ValidationError) values
//! instead.

use thiserror::Error;

/// Errors that can occur while loading or preparing a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing or serialization failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing or serialization failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A `@NAME@` placeholder had no value during substitution.
    #[error("unresolved placeholder: @{0}@")]
    UnresolvedPlaceholder(String),

    /// A substitution variable was given in an unusable form.
    #[error("invalid variable: {0}")]
    InvalidVariable(String),
}

/// Convenience alias for results with [`ConfigError`].
pub type Result<T> = std::result::Result<T, ConfigError>;
