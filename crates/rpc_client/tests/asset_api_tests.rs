//! Asset API Tests
//!
//! Drives the facade against an in-memory gateway that records every
//! transaction it is handed.

use async_trait::async_trait;
use num_bigint::{BigInt, BigUint};
use ont_core::{
    Address, CoreError, KeyPairAccount, SigningAccount, Transaction, TransactionFactory, VmValue,
    ONG_CONTRACT, ONT_CONTRACT,
};
use ont_rpc_client::{AssetApi, ClientError, GatewayError, RpcGateway};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingGateway {
    pre_exec_response: Mutex<Option<Result<String, GatewayError>>>,
    broadcast_error: Mutex<Option<GatewayError>>,
    reported_hash: Mutex<Option<String>>,
    queries: Mutex<Vec<Transaction>>,
    broadcasts: Mutex<Vec<Transaction>>,
}

impl RecordingGateway {
    fn answering(response: &str) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.pre_exec_response.lock().unwrap() = Some(Ok(response.to_string()));
        Arc::new(gateway)
    }

    fn failing_broadcast(error: GatewayError) -> Arc<Self> {
        let gateway = Self::default();
        *gateway.broadcast_error.lock().unwrap() = Some(error);
        Arc::new(gateway)
    }

    fn queries(&self) -> Vec<Transaction> {
        self.queries.lock().unwrap().clone()
    }

    fn broadcasts(&self) -> Vec<Transaction> {
        self.broadcasts.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.queries().len() + self.broadcasts().len()
    }
}

#[async_trait]
impl RpcGateway for RecordingGateway {
    async fn pre_execute(&self, tx: &Transaction) -> Result<String, GatewayError> {
        self.queries.lock().unwrap().push(tx.clone());
        self.pre_exec_response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Ok(String::new()))
    }

    async fn broadcast(&self, tx: &Transaction) -> Result<String, GatewayError> {
        self.broadcasts.lock().unwrap().push(tx.clone());
        if let Some(err) = self.broadcast_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self
            .reported_hash
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| tx.hash().to_hex_string()))
    }
}

fn api(gateway: &Arc<RecordingGateway>) -> AssetApi {
    AssetApi::with_factory(gateway.clone(), TransactionFactory::with_timestamp(1_700_000_000))
}

fn base58(byte: u8) -> String {
    Address::new([byte; 20]).to_base58()
}

fn invalid_field(err: ClientError) -> Option<&'static str> {
    match err {
        ClientError::Core(core) => core.field(),
        _ => None,
    }
}

// ============================================================================
// Queries
// ============================================================================

#[tokio::test]
async fn test_query_balance_decodes_little_endian() {
    let gateway = RecordingGateway::answering("0a00");
    let balance = api(&gateway).query_balance("gas", &base58(7)).await.unwrap();
    assert_eq!(balance, BigUint::from(10u32));

    let queries = gateway.queries();
    assert_eq!(queries.len(), 1);
    assert!(queries[0].is_query());
    let call = queries[0].decode_payload().unwrap();
    assert_eq!(call.contract, ONG_CONTRACT);
    assert_eq!(call.method, "balanceOf");
    assert_eq!(call.args.as_address(), Some(Address::new([7u8; 20])));
}

#[tokio::test]
async fn test_query_balance_symbol_is_case_insensitive() {
    let gateway = RecordingGateway::answering("01");
    let api = api(&gateway);
    assert_eq!(api.query_balance("ONT", &base58(1)).await.unwrap(), BigUint::from(1u32));
    assert_eq!(api.query_balance("primary", &base58(1)).await.unwrap(), BigUint::from(1u32));

    let queries = gateway.queries();
    assert_eq!(queries[0].payload(), queries[1].payload());
    assert_eq!(queries[0].decode_payload().unwrap().contract, ONT_CONTRACT);
}

#[tokio::test]
async fn test_empty_and_malformed_balances_are_zero() {
    for response in ["", "zz"] {
        let gateway = RecordingGateway::answering(response);
        let balance = api(&gateway).query_balance("ont", &base58(1)).await.unwrap();
        assert_eq!(balance, BigUint::default());
    }
}

#[tokio::test]
async fn test_query_allowance() {
    let gateway = RecordingGateway::answering("e803");
    let allowance = api(&gateway)
        .query_allowance("ont", &base58(1), &base58(2))
        .await
        .unwrap();
    assert_eq!(allowance, BigUint::from(1000u32));

    let call = gateway.queries()[0].decode_payload().unwrap();
    assert_eq!(call.method, "allowance");
    let fields = call.args.as_items().unwrap();
    assert_eq!(fields[0].as_address(), Some(Address::new([1u8; 20])));
    assert_eq!(fields[1].as_address(), Some(Address::new([2u8; 20])));
}

#[tokio::test]
async fn test_query_unbound_gas() {
    let gateway = RecordingGateway::answering("00ca9a3b");
    let unbound = api(&gateway).query_unbound_gas(&base58(5)).await.unwrap();
    assert_eq!(unbound, BigUint::from(1_000_000_000u32));

    let call = gateway.queries()[0].decode_payload().unwrap();
    assert_eq!(call.contract, ONG_CONTRACT);
    let fields = call.args.as_items().unwrap();
    assert_eq!(fields[0].as_address(), Some(ONT_CONTRACT));
    assert_eq!(fields[1].as_address(), Some(Address::new([5u8; 20])));
}

#[tokio::test]
async fn test_query_name_and_symbol() {
    let gateway = RecordingGateway::answering("4f4e5420546f6b656e");
    assert_eq!(api(&gateway).query_name("ont").await.unwrap(), "ONT Token");

    let gateway = RecordingGateway::answering("4f4e47");
    assert_eq!(api(&gateway).query_symbol("ong").await.unwrap(), "ONG");
    assert_eq!(gateway.queries()[0].decode_payload().unwrap().method, "symbol");
}

#[tokio::test]
async fn test_query_name_invalid_utf8() {
    let gateway = RecordingGateway::answering("c328");
    let err = api(&gateway).query_name("ont").await.unwrap_err();
    assert!(matches!(err, ClientError::Core(CoreError::Decode { .. })));
}

#[tokio::test]
async fn test_query_decimals_is_decimal_text() {
    let gateway = RecordingGateway::answering("9");
    assert_eq!(api(&gateway).query_decimals("ong").await.unwrap(), 9);

    let gateway = RecordingGateway::answering("0");
    assert_eq!(api(&gateway).query_decimals("ont").await.unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_asset() {
    let gateway = RecordingGateway::answering("00");
    let err = api(&gateway).query_name("btc").await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Core(CoreError::UnknownAsset { ref symbol }) if symbol == "btc"
    ));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_malformed_address() {
    let gateway = RecordingGateway::answering("00");
    let err = api(&gateway).query_balance("ont", "not-an-address").await.unwrap_err();
    assert_eq!(invalid_field(err), Some("address"));
    assert_eq!(gateway.calls(), 0);
}

// ============================================================================
// Sends
// ============================================================================

#[tokio::test]
async fn test_transfer_with_sender_as_payer() {
    let gateway = Arc::new(RecordingGateway::default());
    let sender = KeyPairAccount::generate();
    let recipient = KeyPairAccount::generate().address();

    let hash = api(&gateway)
        .transfer(
            "primary",
            &sender,
            &recipient.to_base58(),
            &BigInt::from(5),
            &sender,
            20_000,
            500,
        )
        .await
        .unwrap();

    let sent = gateway.broadcasts();
    assert_eq!(sent.len(), 1);
    let tx = &sent[0];
    assert_eq!(hash, tx.hash());
    assert_eq!(tx.signer_addresses(), vec![sender.address()]);
    assert_eq!(*tx.payer(), sender.address());
    assert_eq!(tx.gas_limit(), 20_000);
    assert_eq!(tx.gas_price(), 500);

    let call = tx.decode_payload().unwrap();
    assert_eq!(call.contract, ONT_CONTRACT);
    assert_eq!(call.method, "transfer");
    let records = call.args.as_items().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0],
        VmValue::Struct(vec![
            VmValue::Bytes(sender.address().to_array().to_vec()),
            VmValue::Bytes(recipient.to_array().to_vec()),
            VmValue::Integer(BigInt::from(5)),
        ])
    );
}

#[tokio::test]
async fn test_transfer_from_with_distinct_payer() {
    let gateway = Arc::new(RecordingGateway::default());
    let sender = KeyPairAccount::generate();
    let payer = KeyPairAccount::generate();

    api(&gateway)
        .transfer_from(
            "ong",
            &sender,
            &base58(1),
            &base58(2),
            &BigInt::from(300),
            &payer,
            20_000,
            500,
        )
        .await
        .unwrap();

    let tx = &gateway.broadcasts()[0];
    assert_eq!(tx.signer_addresses(), vec![sender.address(), payer.address()]);
    assert_eq!(*tx.payer(), payer.address());
    for (witness, account) in tx.signers().iter().zip([&sender, &payer]) {
        assert!(KeyPairAccount::verify(
            &account.public_key(),
            &tx.sign_data(),
            witness.signature()
        ));
    }

    let call = tx.decode_payload().unwrap();
    assert_eq!(call.method, "transferFrom");
    let fields = call.args.as_items().unwrap();
    assert_eq!(fields[0].as_address(), Some(sender.address()));
    assert_eq!(fields[1].as_address(), Some(Address::new([1u8; 20])));
    assert_eq!(fields[2].as_address(), Some(Address::new([2u8; 20])));
    assert_eq!(fields[3].as_integer(), Some(BigInt::from(300)));
}

#[tokio::test]
async fn test_approve_and_revoke() {
    let gateway = Arc::new(RecordingGateway::default());
    let owner = KeyPairAccount::generate();
    let api = api(&gateway);

    for amount in [100, 0] {
        api.approve("ont", &owner, &base58(9), &BigInt::from(amount), &owner, 20_000, 500)
            .await
            .unwrap();
    }

    let sent = gateway.broadcasts();
    assert_eq!(sent.len(), 2);
    let revoke = sent[1].decode_payload().unwrap();
    assert_eq!(revoke.method, "approve");
    assert_eq!(
        revoke.args.as_items().unwrap()[2].as_integer(),
        Some(BigInt::from(0))
    );
}

#[tokio::test]
async fn test_claim_unbound_gas() {
    let gateway = Arc::new(RecordingGateway::default());
    let claimer = KeyPairAccount::generate();

    api(&gateway)
        .claim_unbound_gas(&claimer, &claimer.address().to_base58(), &BigInt::from(42), &claimer, 20_000, 500)
        .await
        .unwrap();

    let tx = &gateway.broadcasts()[0];
    assert_eq!(tx.signers().len(), 1);
    let call = tx.decode_payload().unwrap();
    assert_eq!(call.contract, ONG_CONTRACT);
    assert_eq!(call.method, "transferFrom");
    let fields = call.args.as_items().unwrap();
    assert_eq!(fields[0].as_address(), Some(claimer.address()));
    assert_eq!(fields[1].as_address(), Some(ONT_CONTRACT));
    assert_eq!(fields[2].as_address(), Some(claimer.address()));
    assert_eq!(fields[3].as_integer(), Some(BigInt::from(42)));
}

#[tokio::test]
async fn test_invalid_parameters_never_reach_the_gateway() {
    let gateway = Arc::new(RecordingGateway::default());
    let sender = KeyPairAccount::generate();
    let api = api(&gateway);
    let to = base58(2);

    let cases = [
        (BigInt::from(0), 20_000, 500, "amount"),
        (BigInt::from(-1), 20_000, 500, "amount"),
        (BigInt::from(5), -1, 500, "gas_limit"),
        (BigInt::from(5), 20_000, -1, "gas_price"),
    ];
    for (amount, gas_limit, gas_price, field) in cases {
        let err = api
            .transfer("ont", &sender, &to, &amount, &sender, gas_limit, gas_price)
            .await
            .unwrap_err();
        assert_eq!(invalid_field(err), Some(field));
    }

    let err = api
        .transfer("ont", &sender, "bogus", &BigInt::from(5), &sender, 20_000, 500)
        .await
        .unwrap_err();
    assert_eq!(invalid_field(err), Some("recipient"));

    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_gateway_errors_pass_through() {
    let errors = [
        GatewayError::from_node_error(43001, "balance insufficient"),
        GatewayError::from_node_error(-1, "ConnectTimeout"),
        GatewayError::from_node_error(43001, "already in the tx pool"),
    ];
    for expected in errors {
        let gateway = RecordingGateway::failing_broadcast(expected.clone());
        let sender = KeyPairAccount::generate();
        let err = api(&gateway)
            .transfer("ont", &sender, &base58(2), &BigInt::from(1), &sender, 20_000, 500)
            .await
            .unwrap_err();
        assert_eq!(err.as_gateway(), Some(&expected));
        assert_eq!(gateway.broadcasts().len(), 1);
    }
}

#[tokio::test]
async fn test_unparseable_broadcast_hash() {
    let gateway = Arc::new(RecordingGateway::default());
    *gateway.reported_hash.lock().unwrap() = Some("not a hash".to_string());
    let sender = KeyPairAccount::generate();

    let err = api(&gateway)
        .transfer("ont", &sender, &base58(2), &BigInt::from(1), &sender, 20_000, 500)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ClientError::Gateway(GatewayError::InvalidResponse { .. })
    ));
}
