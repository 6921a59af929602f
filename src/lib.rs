//! # ont-rs: Ontology native asset client
//!
//! Builds, signs and submits calls to Ontology's two native tokens, ONT and
//! ONG, and decodes what the node returns.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ont_rs::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     ont_rs::init_tracing("info");
//!
//!     let settings = ClientSettings::for_network(NetworkType::TestNet);
//!     let api = AssetApi::new(Arc::new(RpcClient::from_settings(&settings)?));
//!
//!     let sender = KeyPairAccount::generate();
//!     let balance = api.query_balance("ong", &sender.address().to_base58()).await?;
//!     println!("{balance}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - protocol constants and client settings
//! - [`core`] - addresses, invocation encoding, transactions and signing
//! - [`rpc`] - node gateway, result decoding and the [`AssetApi`](rpc::AssetApi) facade

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use tracing_subscriber::{fmt, EnvFilter};

pub use ont_config as config;
pub use ont_core as core;
pub use ont_rpc_client as rpc;

/// Commonly used types.
pub mod prelude {
    pub use crate::config::{ClientSettings, NetworkType};
    pub use crate::core::{
        Address, Asset, AssetTransactions, CoreError, KeyPairAccount, SigningAccount,
        SigningCoordinator, Transaction, TransactionFactory, TxHash,
    };
    pub use crate::rpc::{
        AssetApi, ClientError, ClientResult, GatewayError, ResultDecoder, RpcClient, RpcGateway,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Installs a `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over `default_filter`. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_twice() {
        init_tracing("debug");
        init_tracing("info");
        tracing::info!("tracing initialised");
    }

    #[test]
    fn test_prelude_reexports() {
        use prelude::*;
        let settings = ClientSettings::default();
        assert!(settings.effective_rpc_url().is_ok());
        assert_eq!(Asset::from_symbol("gas").unwrap(), Asset::Ong);
    }
}
