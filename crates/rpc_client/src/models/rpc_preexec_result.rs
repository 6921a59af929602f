use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of a dry-run execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcPreExecResult {
    /// `1` when execution succeeded, `0` when it faulted
    #[serde(rename = "State", default)]
    pub state: i64,

    /// Gas the execution would consume
    #[serde(rename = "Gas", default)]
    pub gas: Value,

    /// Raw return value, usually hex
    #[serde(rename = "Result", default)]
    pub result: Value,

    /// Events raised during execution
    #[serde(rename = "Notify", default)]
    pub notify: Vec<Value>,
}

impl RpcPreExecResult {
    /// Whether the dry run completed without faulting.
    pub fn succeeded(&self) -> bool {
        self.state != 0
    }

    /// The return value as text.
    ///
    /// Strings are returned as-is, a null result becomes empty and any other
    /// JSON value is rendered.
    pub fn result_text(&self) -> String {
        match &self.result {
            Value::String(text) => text.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
