//! JSON-RPC wire models.

mod rpc_preexec_result;
mod rpc_request;
mod rpc_response;

pub use rpc_preexec_result::RpcPreExecResult;
pub use rpc_request::RpcRequest;
pub use rpc_response::RpcResponse;
