//! Native asset commands backed by a node.

use super::CommandResult;
use crate::args::SendArgs;
use crate::console::ConsoleHelper;
use anyhow::{anyhow, Context, Result};
use num_bigint::BigInt;
use ont_config::ClientSettings;
use ont_core::{KeyPairAccount, SigningAccount};
use ont_rpc_client::{AssetApi, RpcClient};
use std::sync::Arc;
use tracing::debug;

/// Asset queries and transfers (`balance`, `transfer`, ...).
pub struct AssetCommands {
    api: AssetApi,
    settings: ClientSettings,
}

/// Accounts and fees for one sending command.
struct Signers {
    sender: KeyPairAccount,
    payer: KeyPairAccount,
    gas_limit: i64,
    gas_price: i64,
}

impl AssetCommands {
    pub fn connect(settings: ClientSettings) -> Result<Self> {
        let client = RpcClient::from_settings(&settings)?;
        debug!(endpoint = %client.base_address(), "using rpc endpoint");
        Ok(Self::new(AssetApi::new(Arc::new(client)), settings))
    }

    pub fn new(api: AssetApi, settings: ClientSettings) -> Self {
        Self { api, settings }
    }

    pub async fn balance(&self, asset: &str, address: &str) -> CommandResult {
        let balance = self.api.query_balance(asset, address).await?;
        ConsoleHelper::info(["Balance: ", &balance.to_string()]);
        Ok(())
    }

    pub async fn allowance(&self, asset: &str, from: &str, to: &str) -> CommandResult {
        let allowance = self.api.query_allowance(asset, from, to).await?;
        ConsoleHelper::info(["Allowance: ", &allowance.to_string()]);
        Ok(())
    }

    pub async fn info(&self, asset: &str) -> CommandResult {
        let name = self.api.query_name(asset).await?;
        let symbol = self.api.query_symbol(asset).await?;
        let decimals = self.api.query_decimals(asset).await?;
        ConsoleHelper::info(["Name: ", &name]);
        ConsoleHelper::info(["Symbol: ", &symbol]);
        ConsoleHelper::info(["Decimals: ", &decimals.to_string()]);
        Ok(())
    }

    pub async fn unbound(&self, address: &str) -> CommandResult {
        let unbound = self.api.query_unbound_gas(address).await?;
        ConsoleHelper::info(["Unbound ONG: ", &unbound.to_string()]);
        Ok(())
    }

    pub async fn transfer(&self, asset: &str, to: &str, amount: &BigInt, send: &SendArgs) -> CommandResult {
        let s = self.signers(send)?;
        let hash = self
            .api
            .transfer(asset, &s.sender, to, amount, &s.payer, s.gas_limit, s.gas_price)
            .await?;
        ConsoleHelper::info(["TXID: ", &hash.to_string()]);
        Ok(())
    }

    pub async fn approve(&self, asset: &str, to: &str, amount: &BigInt, send: &SendArgs) -> CommandResult {
        let s = self.signers(send)?;
        let hash = self
            .api
            .approve(asset, &s.sender, to, amount, &s.payer, s.gas_limit, s.gas_price)
            .await?;
        ConsoleHelper::info(["TXID: ", &hash.to_string()]);
        Ok(())
    }

    pub async fn transfer_from(
        &self,
        asset: &str,
        from: &str,
        to: &str,
        amount: &BigInt,
        send: &SendArgs,
    ) -> CommandResult {
        let s = self.signers(send)?;
        let hash = self
            .api
            .transfer_from(asset, &s.sender, from, to, amount, &s.payer, s.gas_limit, s.gas_price)
            .await?;
        ConsoleHelper::info(["TXID: ", &hash.to_string()]);
        Ok(())
    }

    pub async fn claim(&self, to: Option<&str>, amount: &BigInt, send: &SendArgs) -> CommandResult {
        let s = self.signers(send)?;
        let recipient = match to {
            Some(to) => to.to_string(),
            None => s.sender.address().to_base58(),
        };
        let hash = self
            .api
            .claim_unbound_gas(&s.sender, &recipient, amount, &s.payer, s.gas_limit, s.gas_price)
            .await?;
        ConsoleHelper::info(["TXID: ", &hash.to_string()]);
        Ok(())
    }

    fn signers(&self, send: &SendArgs) -> Result<Signers> {
        let sender = account_from_env(&send.key_env)?;
        let payer = match &send.payer_key_env {
            Some(var) => account_from_env(var)?,
            None => sender.clone(),
        };
        let gas_limit = match send.gas_limit {
            Some(limit) => limit,
            None => i64::try_from(self.settings.default_gas_limit)
                .context("configured default_gas_limit is too large")?,
        };
        let gas_price = match send.gas_price {
            Some(price) => price,
            None => i64::try_from(self.settings.default_gas_price)
                .context("configured default_gas_price is too large")?,
        };
        Ok(Signers {
            sender,
            payer,
            gas_limit,
            gas_price,
        })
    }
}

fn account_from_env(var: &str) -> Result<KeyPairAccount> {
    let key = std::env::var(var)
        .map_err(|_| anyhow!("environment variable {var} must hold a hex private key"))?;
    KeyPairAccount::from_hex(&key).with_context(|| format!("invalid private key in {var}"))
}
