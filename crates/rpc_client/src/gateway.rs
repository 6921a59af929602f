//! The seam between the asset facade and a node.

use crate::error::GatewayError;
use async_trait::async_trait;
use ont_core::Transaction;

/// Submits transactions to a node.
///
/// [`RpcClient`](crate::RpcClient) is the HTTP implementation; tests plug in
/// in-memory doubles.
#[async_trait]
pub trait RpcGateway: Send + Sync {
    /// Executes `tx` without committing it and returns the raw result text.
    async fn pre_execute(&self, tx: &Transaction) -> Result<String, GatewayError>;

    /// Submits signed `tx` to the network and returns its hash as reported
    /// by the node.
    async fn broadcast(&self, tx: &Transaction) -> Result<String, GatewayError>;
}
