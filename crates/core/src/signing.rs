//! Attaching the sender and payer signatures to a transaction.

use crate::account::SigningAccount;
use crate::error::{CoreError, CoreResult};
use crate::transaction::{Transaction, MAX_SIGNERS};
use crate::witness::Witness;
use tracing::debug;

/// Applies one or two signatures to a transaction.
///
/// The signer list keeps append order: the primary signer first and the
/// payer second when it is a different account. An address never appears
/// twice, and a transaction holds at most [`MAX_SIGNERS`] entries.
pub struct SigningCoordinator;

impl SigningCoordinator {
    /// Signs `tx` as its primary signer.
    ///
    /// If `signer` already has an entry, that entry is replaced in place so
    /// its position does not change.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Signing` if a new entry would exceed
    /// [`MAX_SIGNERS`], and propagates any error from the account.
    pub fn sign(tx: &mut Transaction, signer: &dyn SigningAccount) -> CoreResult<()> {
        let address = signer.address();
        let position = tx.signers().iter().position(|w| w.address() == address);
        if position.is_none() {
            Self::ensure_capacity(tx)?;
        }

        let witness = Self::witness_for(tx, signer)?;
        match position {
            Some(index) => tx.signers_mut()[index] = witness,
            None => tx.signers_mut().push(witness),
        }
        debug!(signer = %address, hash = %tx.hash(), "signed transaction");
        Ok(())
    }

    /// Adds `payer` as a cosigner unless its address already signed.
    ///
    /// Returns whether a new entry was appended.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Signing` if the transaction already has
    /// [`MAX_SIGNERS`] entries, and propagates any error from the account.
    pub fn add_cosigner(tx: &mut Transaction, payer: &dyn SigningAccount) -> CoreResult<bool> {
        let address = payer.address();
        if tx.signers().iter().any(|w| w.address() == address) {
            debug!(payer = %address, "payer already signed, skipping cosignature");
            return Ok(false);
        }
        Self::ensure_capacity(tx)?;

        let witness = Self::witness_for(tx, payer)?;
        tx.signers_mut().push(witness);
        debug!(payer = %address, hash = %tx.hash(), "added cosigner");
        Ok(true)
    }

    /// Signs with `sender`, then cosigns with `payer` if it is another account.
    ///
    /// # Errors
    ///
    /// Propagates any `CoreError::Signing` from either account.
    pub fn sign_with_payer(
        tx: &mut Transaction,
        sender: &dyn SigningAccount,
        payer: &dyn SigningAccount,
    ) -> CoreResult<()> {
        Self::sign(tx, sender)?;
        Self::add_cosigner(tx, payer)?;
        Ok(())
    }

    fn ensure_capacity(tx: &Transaction) -> CoreResult<()> {
        if tx.signers().len() >= MAX_SIGNERS {
            return Err(CoreError::signing(format!(
                "a transaction takes at most {MAX_SIGNERS} signers"
            )));
        }
        Ok(())
    }

    fn witness_for(tx: &Transaction, account: &dyn SigningAccount) -> CoreResult<Witness> {
        let signature = account.sign(&tx.sign_data())?;
        Ok(Witness::new(account.public_key(), signature))
    }
}
