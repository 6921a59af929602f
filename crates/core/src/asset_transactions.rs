//! Ready-made transactions for the native asset methods.
//!
//! These build unsigned transactions only. Signing and submission are left
//! to the caller, which keeps everything here usable without a node.

use crate::address::Address;
use crate::asset::{Asset, ONT_CONTRACT};
use crate::error::CoreResult;
use crate::invocation::{InvocationArgs, NamedField, NativeMethod};
use crate::transaction::Transaction;
use crate::transaction_factory::{validate_amount, TransactionFactory};
use num_bigint::BigInt;

/// Builds query and call transactions against the two native assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AssetTransactions {
    factory: TransactionFactory,
}

impl AssetTransactions {
    #[must_use]
    pub const fn new(factory: TransactionFactory) -> Self {
        Self { factory }
    }

    #[must_use]
    pub const fn factory(&self) -> &TransactionFactory {
        &self.factory
    }

    /// Query for the balance of `owner`.
    pub fn balance_of(&self, asset: Asset, owner: &Address) -> CoreResult<Transaction> {
        self.factory.build_query(
            &asset.contract_address(),
            NativeMethod::BalanceOf,
            &InvocationArgs::Address(*owner),
        )
    }

    /// Query for how much `to` may still move out of `from`.
    pub fn allowance(&self, asset: Asset, from: &Address, to: &Address) -> CoreResult<Transaction> {
        self.factory.build_query(
            &asset.contract_address(),
            NativeMethod::Allowance,
            &InvocationArgs::NamedFields(vec![
                NamedField::address("from", *from),
                NamedField::address("to", *to),
            ]),
        )
    }

    pub fn name(&self, asset: Asset) -> CoreResult<Transaction> {
        self.metadata(asset, NativeMethod::Name)
    }

    pub fn symbol(&self, asset: Asset) -> CoreResult<Transaction> {
        self.metadata(asset, NativeMethod::Symbol)
    }

    pub fn decimals(&self, asset: Asset) -> CoreResult<Transaction> {
        self.metadata(asset, NativeMethod::Decimals)
    }

    /// Query for the gas token `owner` has accrued but not yet claimed.
    ///
    /// Unclaimed gas is held as an allowance from the primary token contract.
    pub fn unbound_gas(&self, owner: &Address) -> CoreResult<Transaction> {
        self.allowance(Asset::Ong, &ONT_CONTRACT, owner)
    }

    fn metadata(&self, asset: Asset, method: NativeMethod) -> CoreResult<Transaction> {
        self.factory
            .build_query(&asset.contract_address(), method, &InvocationArgs::Empty)
    }

    /// Unsigned transfer of `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` for a non-positive amount,
    /// negative gas or a zero payer.
    #[allow(clippy::too_many_arguments)]
    pub fn new_transfer(
        &self,
        asset: Asset,
        from: &Address,
        to: &Address,
        amount: &BigInt,
        payer: &Address,
        gas_limit: i64,
        gas_price: i64,
    ) -> CoreResult<Transaction> {
        validate_amount(amount)?;
        let record = vec![
            NamedField::address("from", *from),
            NamedField::address("to", *to),
            NamedField::amount("amount", amount.clone()),
        ];
        self.factory.build_call(
            &asset.contract_address(),
            NativeMethod::Transfer,
            &InvocationArgs::RecordList(vec![record]),
            payer,
            gas_limit,
            gas_price,
        )
    }

    /// Unsigned approval letting `recipient` move `amount` out of `sender`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` for a negative amount,
    /// negative gas or a zero payer.
    #[allow(clippy::too_many_arguments)]
    pub fn new_approve(
        &self,
        asset: Asset,
        sender: &Address,
        recipient: &Address,
        amount: &BigInt,
        payer: &Address,
        gas_limit: i64,
        gas_price: i64,
    ) -> CoreResult<Transaction> {
        self.factory.build_call(
            &asset.contract_address(),
            NativeMethod::Approve,
            &InvocationArgs::NamedFields(vec![
                NamedField::address("from", *sender),
                NamedField::address("to", *recipient),
                NamedField::amount("amount", amount.clone()),
            ]),
            payer,
            gas_limit,
            gas_price,
        )
    }

    /// Unsigned transfer by `sender` of tokens `from` has approved for it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` for a non-positive amount,
    /// negative gas or a zero payer.
    #[allow(clippy::too_many_arguments)]
    pub fn new_transfer_from(
        &self,
        asset: Asset,
        sender: &Address,
        from: &Address,
        recipient: &Address,
        amount: &BigInt,
        payer: &Address,
        gas_limit: i64,
        gas_price: i64,
    ) -> CoreResult<Transaction> {
        validate_amount(amount)?;
        self.factory.build_call(
            &asset.contract_address(),
            NativeMethod::TransferFrom,
            &InvocationArgs::NamedFields(vec![
                NamedField::address("sender", *sender),
                NamedField::address("from", *from),
                NamedField::address("to", *recipient),
                NamedField::amount("amount", amount.clone()),
            ]),
            payer,
            gas_limit,
            gas_price,
        )
    }

    /// Unsigned claim of accrued gas: a `transferFrom` on the gas token
    /// funded by the primary token contract.
    ///
    /// # Errors
    ///
    /// Same as [`new_transfer_from`](Self::new_transfer_from).
    pub fn new_claim_unbound_gas(
        &self,
        claimer: &Address,
        recipient: &Address,
        amount: &BigInt,
        payer: &Address,
        gas_limit: i64,
        gas_price: i64,
    ) -> CoreResult<Transaction> {
        self.new_transfer_from(
            Asset::Ong,
            claimer,
            &ONT_CONTRACT,
            recipient,
            amount,
            payer,
            gas_limit,
            gas_price,
        )
    }
}
