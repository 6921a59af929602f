//! Error types for node access and the asset facade.

use ont_config::ConfigError;
use ont_core::CoreError;
use thiserror::Error;

/// Failures reported by, or while talking to, a node.
///
/// These are passed through to the caller unchanged and never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The paying or sending account cannot cover the transaction.
    #[error("Insufficient balance: {message}")]
    InsufficientBalance {
        /// Node message.
        message: String,
    },

    /// The node could not be reached in time.
    #[error("Timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The same transaction is already waiting in the node's pool.
    #[error("Transaction already pending: {message}")]
    AlreadyPending {
        /// Node message.
        message: String,
    },

    /// Any other error reported by the node.
    #[error("RPC error {code}: {message}")]
    Rpc {
        /// Node error code.
        code: i64,
        /// Node message.
        message: String,
    },

    /// The HTTP request failed.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The node answered with something that is not a valid response.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Error message.
        message: String,
    },
}

impl GatewayError {
    /// Classifies an error reported by a node by its message text.
    pub fn from_node_error<S: Into<String>>(code: i64, message: S) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();

        if lower.contains("balance insufficient") || lower.contains("insufficient balance") {
            Self::InsufficientBalance { message }
        } else if lower.contains("already in the tx pool") || lower.contains("duplicated transaction") {
            Self::AlreadyPending { message }
        } else if lower.contains("connecttimeout") || lower.contains("timeout") {
            Self::Timeout { message }
        } else {
            Self::Rpc { code, message }
        }
    }

    /// Create a transport error.
    pub fn transport<S: Into<String>>(message: S) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response<S: Into<String>>(message: S) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::invalid_response(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

/// Any failure of a facade operation.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Local validation, encoding or decoding failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The node or the connection to it failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Client settings are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// The core error, if this failed locally.
    pub fn as_core(&self) -> Option<&CoreError> {
        match self {
            Self::Core(err) => Some(err),
            _ => None,
        }
    }

    /// The gateway error, if the node or connection failed.
    pub fn as_gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for facade operations.
pub type ClientResult<T> = std::result::Result<T, ClientError>;
