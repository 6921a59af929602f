//! Offline decoding of transactions and invocation payloads.

use super::CommandResult;
use crate::console::ConsoleHelper;
use anyhow::{Context, Result};
use ont_core::{decode_invocation, DecodedInvocation, Transaction};

/// Prints what a hex transaction or payload does.
///
/// Input is tried as a full transaction first unless `payload_only` is set.
pub fn inspect(hex: &str, payload_only: bool) -> CommandResult {
    for line in describe(hex, payload_only)? {
        ConsoleHelper::info([line]);
    }
    Ok(())
}

fn describe(hex: &str, payload_only: bool) -> Result<Vec<String>> {
    let hex = hex.trim().trim_start_matches("0x");
    if !payload_only {
        if let Ok(tx) = Transaction::from_hex(hex) {
            return describe_transaction(&tx);
        }
    }

    let payload = hex::decode(hex).context("input is not hex")?;
    let call = decode_invocation(&payload).context("input is neither a transaction nor a payload")?;
    Ok(describe_call(&call))
}

fn describe_transaction(tx: &Transaction) -> Result<Vec<String>> {
    let mut lines = vec![
        format!("Hash: {}", tx.hash()),
        format!("Timestamp: {}", tx.timestamp()),
        format!("Gas limit: {}", tx.gas_limit()),
        format!("Gas price: {}", tx.gas_price()),
        format!("Payer: {}", tx.payer()),
    ];
    for (index, address) in tx.signer_addresses().iter().enumerate() {
        lines.push(format!("Signer {index}: {address}"));
    }
    let call = tx.decode_payload().context("transaction payload is not a native invocation")?;
    lines.extend(describe_call(&call));
    Ok(lines)
}

fn describe_call(call: &DecodedInvocation) -> Vec<String> {
    vec![
        format!("Contract: {}", call.contract.to_hex_string()),
        format!("Method: {}", call.method),
        format!("Arguments: {}", call.args),
    ]
}
