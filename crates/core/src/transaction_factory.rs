//! Assembling unsigned query and call transactions.

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use crate::invocation::{encode_native_invocation, InvocationArgs, NativeMethod};
use crate::transaction::Transaction;
use chrono::Utc;
use num_bigint::BigInt;
use num_traits::Signed;
use ont_config::NATIVE_CONTRACT_VERSION;
use tracing::debug;

/// Checks that both gas values are non-negative.
///
/// # Errors
///
/// Returns `CoreError::InvalidParameter` naming `gas_limit` or `gas_price`.
pub fn validate_gas(gas_limit: i64, gas_price: i64) -> CoreResult<(u64, u64)> {
    let gas_limit = u64::try_from(gas_limit).map_err(|_| {
        CoreError::invalid_parameter("gas_limit", format!("must not be negative, got {gas_limit}"))
    })?;
    let gas_price = u64::try_from(gas_price).map_err(|_| {
        CoreError::invalid_parameter("gas_price", format!("must not be negative, got {gas_price}"))
    })?;
    Ok((gas_limit, gas_price))
}

/// Checks that a transferred amount is strictly positive.
///
/// # Errors
///
/// Returns `CoreError::InvalidParameter` naming `amount`.
pub fn validate_amount(amount: &BigInt) -> CoreResult<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(CoreError::invalid_parameter(
            "amount",
            format!("must be greater than zero, got {amount}"),
        ))
    }
}

fn validate_amounts(method: NativeMethod, args: &InvocationArgs) -> CoreResult<()> {
    for amount in args.amounts() {
        if method.is_transfer() {
            validate_amount(amount)?;
        } else if amount.is_negative() {
            return Err(CoreError::invalid_parameter(
                "amount",
                format!("must not be negative, got {amount}"),
            ));
        }
    }
    Ok(())
}

/// Builds unsigned invoke transactions for native contracts.
///
/// Transactions are stamped with the current wall-clock second unless the
/// factory was created with a fixed timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransactionFactory {
    fixed_timestamp: Option<u32>,
}

impl TransactionFactory {
    /// Creates a factory stamping transactions with the current time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fixed_timestamp: None,
        }
    }

    /// Creates a factory that always uses `timestamp`.
    #[must_use]
    pub const fn with_timestamp(timestamp: u32) -> Self {
        Self {
            fixed_timestamp: Some(timestamp),
        }
    }

    fn timestamp(&self) -> u32 {
        self.fixed_timestamp
            .unwrap_or_else(|| u32::try_from(Utc::now().timestamp()).unwrap_or(u32::MAX))
    }

    /// Builds a dry-run query: zero payer, zero gas.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Encoding` if `method` changes state or `args` do
    /// not fit `method`.
    pub fn build_query(
        &self,
        contract: &Address,
        method: NativeMethod,
        args: &InvocationArgs,
    ) -> CoreResult<Transaction> {
        if !method.is_read_only() {
            return Err(CoreError::encoding(format!(
                "{method} changes state and cannot be sent as a query"
            )));
        }
        let payload = encode_native_invocation(contract, NATIVE_CONTRACT_VERSION, method, args)?;
        let tx = Transaction::new(self.timestamp(), 0, 0, Address::ZERO, payload);
        debug!(
            %method,
            contract = %contract.to_hex_string(),
            payload_len = tx.payload().len(),
            hash = %tx.hash(),
            "built query transaction"
        );
        Ok(tx)
    }

    /// Builds a state-changing call paid for by `payer`.
    ///
    /// All validation happens before encoding.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` for negative gas values, a zero
    /// payer, a non-positive transfer amount or a negative approval, and
    /// `CoreError::Encoding` if `args` do not fit `method`.
    pub fn build_call(
        &self,
        contract: &Address,
        method: NativeMethod,
        args: &InvocationArgs,
        payer: &Address,
        gas_limit: i64,
        gas_price: i64,
    ) -> CoreResult<Transaction> {
        let (gas_limit, gas_price) = validate_gas(gas_limit, gas_price)?;
        if payer.is_zero() {
            return Err(CoreError::invalid_parameter(
                "payer",
                "the zero address cannot pay for a call",
            ));
        }
        validate_amounts(method, args)?;

        let payload = encode_native_invocation(contract, NATIVE_CONTRACT_VERSION, method, args)?;
        let tx = Transaction::new(self.timestamp(), gas_price, gas_limit, *payer, payload);
        debug!(
            %method,
            contract = %contract.to_hex_string(),
            payer = %payer,
            gas_limit,
            gas_price,
            payload_len = tx.payload().len(),
            hash = %tx.hash(),
            "built call transaction"
        );
        Ok(tx)
    }
}
