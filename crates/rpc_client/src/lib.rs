//! # Ontology RPC Client
//!
//! Submits native asset transactions to an Ontology node and decodes the
//! results.
//!
//! [`AssetApi`] is the entry point. It builds transactions with `ont-core`
//! and talks to the node only through the [`RpcGateway`] trait, for which
//! [`RpcClient`] is the JSON-RPC over HTTP implementation.
//!
//! ```rust,no_run
//! use ont_rpc_client::{AssetApi, RpcClient};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RpcClient::new("http://127.0.0.1:20336".parse()?, Duration::from_secs(10))?;
//! let api = AssetApi::new(Arc::new(client));
//! let balance = api.query_balance("ont", "AQf4Mzu1YJrhz9f3aRkkwSm9n3qhXGSh4p").await?;
//! println!("{balance}");
//! # Ok(())
//! # }
//! ```

pub mod asset_api;
pub mod error;
pub mod gateway;
pub mod models;
pub mod result_decoder;
pub mod rpc_client;

pub use asset_api::AssetApi;
pub use error::{ClientError, ClientResult, GatewayError};
pub use gateway::RpcGateway;
pub use models::{RpcPreExecResult, RpcRequest, RpcResponse};
pub use result_decoder::ResultDecoder;
pub use rpc_client::RpcClient;
