use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node's JSON-RPC reply.
///
/// Ontology nodes report failures in-band: `error` is `0` on success and
/// `desc` or `result` carry the message otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcResponse {
    /// Request ID echoed back
    #[serde(default)]
    pub id: Value,

    /// JSON-RPC version
    #[serde(rename = "jsonrpc", default)]
    pub json_rpc: String,

    /// Error code, `0` on success
    #[serde(default)]
    pub error: i64,

    /// Short status text such as `SUCCESS`
    #[serde(default)]
    pub desc: String,

    /// Method result, or error detail on failure
    #[serde(default)]
    pub result: Value,
}

impl RpcResponse {
    /// Whether the node reported success.
    pub fn is_success(&self) -> bool {
        self.error == 0
    }

    /// The most descriptive error text the node gave.
    pub fn error_message(&self) -> String {
        match &self.result {
            Value::String(detail) if !detail.is_empty() => {
                if self.desc.is_empty() {
                    detail.clone()
                } else {
                    format!("{}: {}", self.desc, detail)
                }
            }
            _ => self.desc.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_joins_desc_and_result() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"desc":"INTERNAL ERROR","error":43001,"id":1,"jsonrpc":"2.0","result":"[Transfer] balance insufficient"}"#,
        )
        .unwrap();
        assert!(!response.is_success());
        assert_eq!(
            response.error_message(),
            "INTERNAL ERROR: [Transfer] balance insufficient"
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let response: RpcResponse = serde_json::from_str(r#"{"result":"ab"}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(response.result, Value::String("ab".to_string()));
    }
}
