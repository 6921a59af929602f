//! Core error types.

use thiserror::Error;

/// Errors raised while encoding, constructing or signing transactions.
///
/// None of these involve the network: they are all detected locally before
/// anything is submitted to a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A caller-supplied value failed validation.
    #[error("Invalid parameter '{field}': {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        field: &'static str,
        /// Error message.
        message: String,
    },

    /// The asset symbol does not name a native asset.
    #[error("Unknown asset: {symbol}")]
    UnknownAsset {
        /// The symbol as supplied by the caller.
        symbol: String,
    },

    /// Arguments do not match the shape a native method expects.
    #[error("Encoding error: {message}")]
    Encoding {
        /// Error message.
        message: String,
    },

    /// A payload or query result could not be decoded.
    #[error("Decode error: {message}")]
    Decode {
        /// Error message.
        message: String,
    },

    /// A signing account failed to produce a signature.
    #[error("Signing error: {message}")]
    Signing {
        /// Error message.
        message: String,
    },
}

impl CoreError {
    /// Create an invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(field: &'static str, message: S) -> Self {
        Self::InvalidParameter {
            field,
            message: message.into(),
        }
    }

    /// Create an unknown asset error.
    pub fn unknown_asset<S: Into<String>>(symbol: S) -> Self {
        Self::UnknownAsset {
            symbol: symbol.into(),
        }
    }

    /// Create an encoding error.
    pub fn encoding<S: Into<String>>(message: S) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a signing error.
    pub fn signing<S: Into<String>>(message: S) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    /// Name of the offending field for `InvalidParameter`, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidParameter { field, .. } => Some(field),
            _ => None,
        }
    }
}

/// Result type for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
