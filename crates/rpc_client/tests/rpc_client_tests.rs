//! RPC Client Tests
//!
//! Runs the JSON-RPC client against a local mock node.

use mockito::{Matcher, Server};
use ont_config::ClientSettings;
use ont_core::{Address, Asset, AssetTransactions, TransactionFactory};
use ont_rpc_client::{ClientError, GatewayError, RpcClient, RpcGateway};
use serde_json::json;
use std::time::Duration;

fn client(server: &Server) -> RpcClient {
    RpcClient::new(server.url().parse().unwrap(), Duration::from_secs(5)).unwrap()
}

fn query() -> ont_core::Transaction {
    AssetTransactions::new(TransactionFactory::with_timestamp(1))
        .balance_of(Asset::Ont, &Address::new([1u8; 20]))
        .unwrap()
}

#[tokio::test]
async fn test_pre_execute_returns_result_field() {
    let mut server = Server::new_async().await;
    let tx = query();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "jsonrpc": "2.0",
            "method": "sendrawtransaction",
            "params": [tx.to_hex(), 1]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "desc": "SUCCESS",
                "error": 0,
                "id": 1,
                "jsonrpc": "2.0",
                "result": {"State": 1, "Gas": 20000, "Result": "0a00", "Notify": []}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let result = client(&server).pre_execute(&tx).await.unwrap();
    assert_eq!(result, "0a00");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_pre_execute_fault() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body(
            json!({
                "desc": "SUCCESS",
                "error": 0,
                "id": 1,
                "jsonrpc": "2.0",
                "result": {"State": 0, "Gas": 20000, "Result": "", "Notify": []}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server).pre_execute(&query()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Rpc { code: -1, .. }));
}

#[tokio::test]
async fn test_broadcast_returns_hash() {
    let mut server = Server::new_async().await;
    let tx = query();
    let hash = tx.hash().to_hex_string();
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({
            "method": "sendrawtransaction",
            "params": [tx.to_hex()]
        })))
        .with_status(200)
        .with_body(
            json!({"desc": "SUCCESS", "error": 0, "id": 1, "jsonrpc": "2.0", "result": hash})
                .to_string(),
        )
        .create_async()
        .await;

    assert_eq!(client(&server).broadcast(&tx).await.unwrap(), hash);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_node_errors_are_classified() {
    let cases = [
        ("[Transfer] balance insufficient", "insufficient"),
        ("transaction is already in the tx pool", "pending"),
        ("INVALID PARAMS", "rpc"),
    ];
    for (detail, kind) in cases {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/")
            .with_status(200)
            .with_body(
                json!({
                    "desc": "INTERNAL ERROR",
                    "error": 43001,
                    "id": 1,
                    "jsonrpc": "2.0",
                    "result": detail
                })
                .to_string(),
            )
            .create_async()
            .await;

        let err = client(&server).broadcast(&query()).await.unwrap_err();
        match kind {
            "insufficient" => assert!(matches!(err, GatewayError::InsufficientBalance { .. })),
            "pending" => assert!(matches!(err, GatewayError::AlreadyPending { .. })),
            _ => assert!(matches!(err, GatewayError::Rpc { code: 43001, .. })),
        }
    }
}

#[tokio::test]
async fn test_invalid_json_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/")
        .with_status(200)
        .with_body("<html>bad gateway</html>")
        .create_async()
        .await;

    let err = client(&server).broadcast(&query()).await.unwrap_err();
    assert!(matches!(err, GatewayError::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_unreachable_node_is_transport_error() {
    let client = RpcClient::new(
        "http://127.0.0.1:1".parse().unwrap(),
        Duration::from_secs(2),
    )
    .unwrap();
    let err = client.broadcast(&query()).await.unwrap_err();
    assert!(matches!(
        err,
        GatewayError::Transport { .. } | GatewayError::Timeout { .. }
    ));
}

#[test]
fn test_from_settings() {
    let settings = ClientSettings::from_toml_str(
        r#"
        network = "mainnet"
        rpc_url = "http://127.0.0.1:20336"
        "#,
    )
    .unwrap();
    let client = RpcClient::from_settings(&settings).unwrap();
    assert_eq!(client.base_address().as_str(), "http://127.0.0.1:20336/");

    let bad = ClientSettings {
        rpc_url: Some("not a url".to_string()),
        ..ClientSettings::default()
    };
    assert!(matches!(
        RpcClient::from_settings(&bad),
        Err(ClientError::Config(_))
    ));
}
