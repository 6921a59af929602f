//! Client settings
//!
//! Settings are read from a TOML document. Every field has a default so an
//! empty document yields a usable TestNet configuration:
//!
//! ```toml
//! network = "mainnet"
//! rpc_url = "http://127.0.0.1:20336"
//! request_timeout_ms = 5000
//! default_gas_limit = 20000
//! default_gas_price = 500
//! ```

use crate::constants::{DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE, DEFAULT_REQUEST_TIMEOUT_MS};
use crate::error::{ConfigError, ConfigResult};
use crate::network::NetworkType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Settings for talking to an Ontology node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Network type
    #[serde(default)]
    pub network: NetworkType,

    /// Custom JSON-RPC endpoint (overrides the network default if set)
    #[serde(default)]
    pub rpc_url: Option<String>,

    /// JSON-RPC request timeout in milliseconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Gas limit used when a caller does not supply one
    #[serde(default = "default_gas_limit")]
    pub default_gas_limit: u64,

    /// Gas price used when a caller does not supply one
    #[serde(default = "default_gas_price")]
    pub default_gas_price: u64,
}

const fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

const fn default_gas_limit() -> u64 {
    DEFAULT_GAS_LIMIT
}

const fn default_gas_price() -> u64 {
    DEFAULT_GAS_PRICE
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::for_network(NetworkType::default())
    }
}

impl ClientSettings {
    /// Create settings for a specific network type
    #[must_use]
    pub const fn for_network(network: NetworkType) -> Self {
        Self {
            network,
            rpc_url: None,
            request_timeout_ms: default_request_timeout(),
            default_gas_limit: default_gas_limit(),
            default_gas_price: default_gas_price(),
        }
    }

    /// Parse settings from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::InvalidValue` when a value fails validation.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, otherwise the
    /// errors of [`Self::from_toml_str`].
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), network = %settings.network, "loaded client settings");
        Ok(settings)
    }

    /// Get the effective JSON-RPC endpoint
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the override is not a valid URL.
    pub fn effective_rpc_url(&self) -> ConfigResult<Url> {
        let raw = self
            .rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url());
        Url::parse(raw).map_err(|e| ConfigError::invalid_value("rpc_url", e.to_string()))
    }

    /// Get the request timeout as a `Duration`
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "request_timeout_ms",
                "must be greater than zero",
            ));
        }
        self.effective_rpc_url()?;
        Ok(())
    }
}
