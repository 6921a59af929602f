//! Balance queries and token operations against a node.

use crate::error::{ClientResult, GatewayError};
use crate::gateway::RpcGateway;
use crate::result_decoder::ResultDecoder;
use num_bigint::{BigInt, BigUint};
use ont_core::{
    Address, Asset, AssetTransactions, SigningAccount, SigningCoordinator, Transaction,
    TransactionFactory, TxHash,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Native asset facade.
///
/// Every call builds a fresh transaction, so one instance can serve
/// concurrent callers. Assets are named by symbol (`ont`/`primary` or
/// `ong`/`gas`, any case) and accounts by base58 address.
#[derive(Clone)]
pub struct AssetApi {
    gateway: Arc<dyn RpcGateway>,
    builder: AssetTransactions,
}

impl AssetApi {
    /// Creates a facade over `gateway` stamping transactions with the
    /// current time.
    pub fn new(gateway: Arc<dyn RpcGateway>) -> Self {
        Self::with_factory(gateway, TransactionFactory::new())
    }

    /// Creates a facade building transactions with `factory`.
    pub fn with_factory(gateway: Arc<dyn RpcGateway>, factory: TransactionFactory) -> Self {
        Self {
            gateway,
            builder: AssetTransactions::new(factory),
        }
    }

    async fn pre_execute(&self, tx: Transaction) -> ClientResult<String> {
        Ok(self.gateway.pre_execute(&tx).await?)
    }

    /// Balance of `address` in the smallest unit of `asset`.
    pub async fn query_balance(&self, asset: &str, address: &str) -> ClientResult<BigUint> {
        let asset = Asset::from_symbol(asset)?;
        let owner = Address::from_base58_field(address, "address")?;
        let result = self.pre_execute(self.builder.balance_of(asset, &owner)?).await?;
        Ok(ResultDecoder::decode_unsigned_int(&result))
    }

    /// Amount `to` may still transfer out of `from`.
    pub async fn query_allowance(
        &self,
        asset: &str,
        from: &str,
        to: &str,
    ) -> ClientResult<BigUint> {
        let asset = Asset::from_symbol(asset)?;
        let from = Address::from_base58_field(from, "from")?;
        let to = Address::from_base58_field(to, "to")?;
        let result = self.pre_execute(self.builder.allowance(asset, &from, &to)?).await?;
        Ok(ResultDecoder::decode_unsigned_int(&result))
    }

    pub async fn query_name(&self, asset: &str) -> ClientResult<String> {
        let asset = Asset::from_symbol(asset)?;
        let result = self.pre_execute(self.builder.name(asset)?).await?;
        Ok(ResultDecoder::decode_utf8(&result)?)
    }

    pub async fn query_symbol(&self, asset: &str) -> ClientResult<String> {
        let asset = Asset::from_symbol(asset)?;
        let result = self.pre_execute(self.builder.symbol(asset)?).await?;
        Ok(ResultDecoder::decode_utf8(&result)?)
    }

    /// Number of decimal places of `asset`, returned by the contract as
    /// plain decimal text.
    pub async fn query_decimals(&self, asset: &str) -> ClientResult<u32> {
        let asset = Asset::from_symbol(asset)?;
        let result = self.pre_execute(self.builder.decimals(asset)?).await?;
        Ok(ResultDecoder::decode_decimal_text(&result)?)
    }

    /// Gas accrued to `address` and not yet claimed.
    pub async fn query_unbound_gas(&self, address: &str) -> ClientResult<BigUint> {
        let owner = Address::from_base58_field(address, "address")?;
        let result = self.pre_execute(self.builder.unbound_gas(&owner)?).await?;
        Ok(ResultDecoder::decode_unsigned_int(&result))
    }

    /// Transfers `amount` from `sender` to `recipient`, with fees charged to
    /// `payer`.
    ///
    /// # Errors
    ///
    /// Local validation failures are reported before anything is sent.
    /// Node failures are returned unchanged as `ClientError::Gateway`.
    #[allow(clippy::too_many_arguments)]
    pub async fn transfer(
        &self,
        asset: &str,
        sender: &dyn SigningAccount,
        recipient: &str,
        amount: &BigInt,
        payer: &dyn SigningAccount,
        gas_limit: i64,
        gas_price: i64,
    ) -> ClientResult<TxHash> {
        let asset = Asset::from_symbol(asset)?;
        let recipient = Address::from_base58_field(recipient, "recipient")?;
        let tx = self.builder.new_transfer(
            asset,
            &sender.address(),
            &recipient,
            amount,
            &payer.address(),
            gas_limit,
            gas_price,
        )?;
        self.sign_and_send(tx, sender, payer).await
    }

    /// Lets `recipient` spend up to `amount` of `sender`'s tokens.
    ///
    /// An amount of zero revokes an earlier approval.
    #[allow(clippy::too_many_arguments)]
    pub async fn approve(
        &self,
        asset: &str,
        sender: &dyn SigningAccount,
        recipient: &str,
        amount: &BigInt,
        payer: &dyn SigningAccount,
        gas_limit: i64,
        gas_price: i64,
    ) -> ClientResult<TxHash> {
        let asset = Asset::from_symbol(asset)?;
        let recipient = Address::from_base58_field(recipient, "recipient")?;
        let tx = self.builder.new_approve(
            asset,
            &sender.address(),
            &recipient,
            amount,
            &payer.address(),
            gas_limit,
            gas_price,
        )?;
        self.sign_and_send(tx, sender, payer).await
    }

    /// Moves `amount` that `from` approved for `sender` on to `recipient`.
    #[allow(clippy::too_many_arguments)]
    pub async fn transfer_from(
        &self,
        asset: &str,
        sender: &dyn SigningAccount,
        from: &str,
        recipient: &str,
        amount: &BigInt,
        payer: &dyn SigningAccount,
        gas_limit: i64,
        gas_price: i64,
    ) -> ClientResult<TxHash> {
        let asset = Asset::from_symbol(asset)?;
        let from = Address::from_base58_field(from, "from")?;
        let recipient = Address::from_base58_field(recipient, "recipient")?;
        let tx = self.builder.new_transfer_from(
            asset,
            &sender.address(),
            &from,
            &recipient,
            amount,
            &payer.address(),
            gas_limit,
            gas_price,
        )?;
        self.sign_and_send(tx, sender, payer).await
    }

    /// Claims `amount` of accrued gas for `claimer`, paying it to `recipient`.
    pub async fn claim_unbound_gas(
        &self,
        claimer: &dyn SigningAccount,
        recipient: &str,
        amount: &BigInt,
        payer: &dyn SigningAccount,
        gas_limit: i64,
        gas_price: i64,
    ) -> ClientResult<TxHash> {
        let recipient = Address::from_base58_field(recipient, "recipient")?;
        let tx = self.builder.new_claim_unbound_gas(
            &claimer.address(),
            &recipient,
            amount,
            &payer.address(),
            gas_limit,
            gas_price,
        )?;
        self.sign_and_send(tx, claimer, payer).await
    }

    async fn sign_and_send(
        &self,
        mut tx: Transaction,
        sender: &dyn SigningAccount,
        payer: &dyn SigningAccount,
    ) -> ClientResult<TxHash> {
        SigningCoordinator::sign_with_payer(&mut tx, sender, payer)?;

        let local = tx.hash();
        let reported = self.gateway.broadcast(&tx).await?;
        let hash = TxHash::from_hex_string(&reported).map_err(|e| {
            GatewayError::invalid_response(format!("broadcast returned {reported:?}: {e}"))
        })?;
        if hash != local {
            warn!(local = %local, reported = %hash, "node reported a different transaction hash");
        }
        info!(
            hash = %hash,
            signers = tx.signers().len(),
            payer = %tx.payer(),
            "broadcast transaction"
        );
        Ok(hash)
    }
}
