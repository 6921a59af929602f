//! Error types for configuration loading.

use thiserror::Error;

/// Errors that can occur while loading client settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        /// Path of the settings file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The settings document is not valid TOML for `ClientSettings`.
    #[error("Invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A setting holds a value outside its allowed range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue {
        /// Name of the offending setting.
        field: &'static str,
        /// Error message.
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid value error.
    pub fn invalid_value<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::InvalidValue {
            field,
            message: message.into(),
        }
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
