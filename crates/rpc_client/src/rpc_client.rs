//! HTTP JSON-RPC client for an Ontology node.

use crate::error::{ClientResult, GatewayError};
use crate::gateway::RpcGateway;
use crate::models::{RpcPreExecResult, RpcRequest, RpcResponse};
use async_trait::async_trait;
use ont_config::ClientSettings;
use ont_core::Transaction;
use reqwest::{Client, Url};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

const SEND_RAW_TRANSACTION: &str = "sendrawtransaction";

/// The RPC client to call Ontology node methods
pub struct RpcClient {
    base_address: Url,
    http_client: Client,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a new RPC client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Transport` if the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, GatewayError> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(http_client, url))
    }

    /// Creates a new RPC client with an existing HTTP client
    pub fn with_client(client: Client, url: Url) -> Self {
        Self {
            base_address: url,
            http_client: client,
            next_id: AtomicU64::new(1),
        }
    }

    /// Creates a client for the endpoint and timeout in `settings`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` for an invalid endpoint URL and
    /// `ClientError::Gateway` if the HTTP client cannot be built.
    pub fn from_settings(settings: &ClientSettings) -> ClientResult<Self> {
        let url = settings.effective_rpc_url()?;
        Ok(Self::new(url, settings.request_timeout())?)
    }

    /// The endpoint requests are posted to.
    pub fn base_address(&self) -> &Url {
        &self.base_address
    }

    fn as_rpc_request(&self, method: &str, params: Vec<Value>) -> RpcRequest {
        RpcRequest::new(self.next_id.fetch_add(1, Ordering::Relaxed), method, params)
    }

    fn as_rpc_response(content: &str) -> Result<RpcResponse, GatewayError> {
        let response: RpcResponse = serde_json::from_str(content)
            .map_err(|e| GatewayError::invalid_response(format!("parse error: {e}")))?;

        if !response.is_success() {
            return Err(GatewayError::from_node_error(
                response.error,
                response.error_message(),
            ));
        }
        Ok(response)
    }

    /// Sends a request and returns the node's successful response.
    ///
    /// # Errors
    ///
    /// Returns a classified `GatewayError` for transport failures and for
    /// errors reported by the node.
    pub async fn send_async(&self, request: RpcRequest) -> Result<RpcResponse, GatewayError> {
        trace!(method = %request.method, id = request.id, "sending rpc request");

        let content = self
            .http_client
            .post(self.base_address.clone())
            .json(&request)
            .send()
            .await?
            .text()
            .await?;

        Self::as_rpc_response(&content)
    }

    /// Sends a request and returns its `result` field.
    ///
    /// # Errors
    ///
    /// Same as [`Self::send_async`].
    pub async fn rpc_send_async(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<Value, GatewayError> {
        let request = self.as_rpc_request(method, params);
        Ok(self.send_async(request).await?.result)
    }
}

#[async_trait]
impl RpcGateway for RpcClient {
    async fn pre_execute(&self, tx: &Transaction) -> Result<String, GatewayError> {
        let result = self
            .rpc_send_async(SEND_RAW_TRANSACTION, vec![json!(tx.to_hex()), json!(1)])
            .await?;
        let result: RpcPreExecResult = serde_json::from_value(result)
            .map_err(|e| GatewayError::invalid_response(format!("pre-execution result: {e}")))?;

        if !result.succeeded() {
            return Err(GatewayError::Rpc {
                code: -1,
                message: format!("pre-execution faulted: {}", result.result_text()),
            });
        }
        let text = result.result_text();
        debug!(hash = %tx.hash(), result = %text, "pre-executed transaction");
        Ok(text)
    }

    async fn broadcast(&self, tx: &Transaction) -> Result<String, GatewayError> {
        let result = self
            .rpc_send_async(SEND_RAW_TRANSACTION, vec![json!(tx.to_hex())])
            .await?;
        match result {
            Value::String(hash) => Ok(hash),
            other => Err(GatewayError::invalid_response(format!(
                "expected a transaction hash, got {other}"
            ))),
        }
    }
}
