//! Asset Transaction Tests
//!
//! Builds every native asset transaction and checks what actually lands in
//! the payload by decoding it again.

use num_bigint::BigInt;
use ont_core::{
    Address, Asset, AssetTransactions, CoreError, KeyPairAccount, NativeMethod, SigningAccount,
    SigningCoordinator, Transaction, TransactionFactory, VmValue, ONG_CONTRACT, ONT_CONTRACT,
};

fn builder() -> AssetTransactions {
    AssetTransactions::new(TransactionFactory::with_timestamp(1_700_000_000))
}

fn addr(byte: u8) -> Address {
    Address::new([byte; 20])
}

fn struct_fields(value: &VmValue) -> Vec<VmValue> {
    value.as_items().expect("struct argument").to_vec()
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_balance_of_query() {
    let tx = builder().balance_of(Asset::Ong, &addr(3)).unwrap();
    assert!(tx.is_query());

    let call = tx.decode_payload().unwrap();
    assert_eq!(call.contract, ONG_CONTRACT);
    assert_eq!(call.method, "balanceOf");
    assert_eq!(call.version, 0);
    assert_eq!(call.args.as_address(), Some(addr(3)));
}

#[test]
fn test_allowance_query() {
    let tx = builder().allowance(Asset::Ont, &addr(1), &addr(2)).unwrap();
    let call = tx.decode_payload().unwrap();
    assert_eq!(call.method, NativeMethod::Allowance.name());
    let fields = struct_fields(&call.args);
    assert_eq!(fields[0].as_address(), Some(addr(1)));
    assert_eq!(fields[1].as_address(), Some(addr(2)));
}

#[test]
fn test_metadata_queries() {
    let b = builder();
    for (tx, method) in [
        (b.name(Asset::Ont).unwrap(), "name"),
        (b.symbol(Asset::Ong).unwrap(), "symbol"),
        (b.decimals(Asset::Ont).unwrap(), "decimals"),
    ] {
        let call = tx.decode_payload().unwrap();
        assert_eq!(call.method, method);
        assert_eq!(call.args, VmValue::Bytes(Vec::new()));
    }
}

#[test]
fn test_unbound_gas_query() {
    let tx = builder().unbound_gas(&addr(4)).unwrap();
    let call = tx.decode_payload().unwrap();
    assert_eq!(call.contract, ONG_CONTRACT);
    assert_eq!(call.method, "allowance");
    let fields = struct_fields(&call.args);
    assert_eq!(fields[0].as_address(), Some(ONT_CONTRACT));
    assert_eq!(fields[1].as_address(), Some(addr(4)));
}

// ============================================================================
// Calls
// ============================================================================

#[test]
fn test_transfer_payload() {
    let tx = builder()
        .new_transfer(Asset::Ont, &addr(1), &addr(2), &BigInt::from(5), &addr(1), 20_000, 500)
        .unwrap();
    assert_eq!(tx.gas_limit(), 20_000);
    assert_eq!(tx.gas_price(), 500);

    let call = tx.decode_payload().unwrap();
    assert_eq!(call.contract, ONT_CONTRACT);
    assert_eq!(call.method, "transfer");
    let records = call.args.as_items().unwrap();
    assert_eq!(records.len(), 1);
    let record = struct_fields(&records[0]);
    assert_eq!(record[0].as_address(), Some(addr(1)));
    assert_eq!(record[1].as_address(), Some(addr(2)));
    assert_eq!(record[2].as_integer(), Some(BigInt::from(5)));
}

#[test]
fn test_large_amount_is_preserved() {
    let amount = BigInt::parse_bytes(b"1000000000000000000000", 10).unwrap();
    let tx = builder()
        .new_transfer(Asset::Ong, &addr(1), &addr(2), &amount, &addr(1), 0, 0)
        .unwrap();
    let call = tx.decode_payload().unwrap();
    let record = struct_fields(&call.args.as_items().unwrap()[0]);
    assert_eq!(record[2].as_integer(), Some(amount));
}

#[test]
fn test_approve_payload() {
    let tx = builder()
        .new_approve(Asset::Ong, &addr(1), &addr(2), &BigInt::from(300), &addr(9), 20_000, 500)
        .unwrap();
    assert_eq!(*tx.payer(), addr(9));
    let call = tx.decode_payload().unwrap();
    assert_eq!(call.method, "approve");
    let fields = struct_fields(&call.args);
    assert_eq!(fields.len(), 3);
    assert_eq!(fields[2].as_integer(), Some(BigInt::from(300)));
}

#[test]
fn test_transfer_from_field_order() {
    let tx = builder()
        .new_transfer_from(
            Asset::Ont,
            &addr(1),
            &addr(2),
            &addr(3),
            &BigInt::from(7),
            &addr(1),
            20_000,
            500,
        )
        .unwrap();
    let call = tx.decode_payload().unwrap();
    assert_eq!(call.method, "transferFrom");
    let fields = struct_fields(&call.args);
    assert_eq!(fields[0].as_address(), Some(addr(1)));
    assert_eq!(fields[1].as_address(), Some(addr(2)));
    assert_eq!(fields[2].as_address(), Some(addr(3)));
    assert_eq!(fields[3].as_integer(), Some(BigInt::from(7)));
}

#[test]
fn test_claim_is_transfer_from_the_primary_contract() {
    let tx = builder()
        .new_claim_unbound_gas(&addr(1), &addr(2), &BigInt::from(11), &addr(1), 20_000, 500)
        .unwrap();
    let call = tx.decode_payload().unwrap();
    assert_eq!(call.contract, ONG_CONTRACT);
    assert_eq!(call.method, "transferFrom");
    let fields = struct_fields(&call.args);
    assert_eq!(fields[0].as_address(), Some(addr(1)));
    assert_eq!(fields[1].as_address(), Some(ONT_CONTRACT));
    assert_eq!(fields[2].as_address(), Some(addr(2)));
}

#[test]
fn test_invalid_parameters() {
    let b = builder();
    let zero = BigInt::from(0);
    let negative = BigInt::from(-1);
    let five = BigInt::from(5);

    let cases = [
        (b.new_transfer(Asset::Ont, &addr(1), &addr(2), &zero, &addr(1), 0, 0), "amount"),
        (b.new_transfer(Asset::Ont, &addr(1), &addr(2), &negative, &addr(1), 0, 0), "amount"),
        (b.new_transfer(Asset::Ont, &addr(1), &addr(2), &five, &addr(1), -1, 0), "gas_limit"),
        (b.new_transfer(Asset::Ont, &addr(1), &addr(2), &five, &addr(1), 0, -1), "gas_price"),
        (b.new_claim_unbound_gas(&addr(1), &addr(2), &zero, &addr(1), 0, 0), "amount"),
        (b.new_approve(Asset::Ont, &addr(1), &addr(2), &negative, &addr(1), 0, 0), "amount"),
        (b.new_transfer(Asset::Ont, &addr(1), &addr(2), &five, &Address::ZERO, 0, 0), "payer"),
    ];

    for (result, field) in cases {
        match result {
            Err(CoreError::InvalidParameter { field: actual, .. }) => assert_eq!(actual, field),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }
}

// ============================================================================
// Signing end to end
// ============================================================================

#[test]
fn test_signed_transfer_round_trips_through_hex() {
    let sender = KeyPairAccount::generate();
    let payer = KeyPairAccount::generate();
    let recipient = KeyPairAccount::generate().address();

    let mut tx = builder()
        .new_transfer_from(
            Asset::Ong,
            &sender.address(),
            &sender.address(),
            &recipient,
            &BigInt::from(1),
            &payer.address(),
            20_000,
            500,
        )
        .unwrap();
    SigningCoordinator::sign_with_payer(&mut tx, &sender, &payer).unwrap();

    let parsed = Transaction::from_hex(&tx.to_hex()).unwrap();
    assert_eq!(parsed.hash(), tx.hash());
    assert_eq!(parsed.signer_addresses(), vec![sender.address(), payer.address()]);
    for witness in parsed.signers() {
        assert!(KeyPairAccount::verify(
            witness.public_key(),
            &parsed.sign_data(),
            witness.signature()
        ));
    }
}
