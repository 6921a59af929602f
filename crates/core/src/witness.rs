//! Signer entries attached to a transaction.

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use crate::vm::{OpCode, ScriptBuilder};

/// One signature over a transaction, with the key that produced it.
///
/// On the wire each entry is an invocation script pushing the signature and
/// a verification script checking it against the public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Witness {
    public_key: Vec<u8>,
    signature: Vec<u8>,
}

impl Witness {
    /// Creates a witness from a public key and the signature it verifies.
    pub fn new(public_key: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            public_key,
            signature,
        }
    }

    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The account this witness signs for.
    #[must_use]
    pub fn address(&self) -> Address {
        Address::from_public_key(&self.public_key)
    }

    /// Script pushing the signature.
    #[must_use]
    pub fn invocation_script(&self) -> Vec<u8> {
        let mut sb = ScriptBuilder::new();
        sb.emit_push_bytes(&self.signature);
        sb.into_bytes()
    }

    /// Script checking the signature against the public key.
    #[must_use]
    pub fn verification_script(&self) -> Vec<u8> {
        ScriptBuilder::verification_script(&self.public_key)
    }

    /// Rebuilds a witness from its two scripts.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` unless the scripts are a single signature
    /// push and a single-key `CHECKSIG` verification.
    pub fn from_scripts(invocation: &[u8], verification: &[u8]) -> CoreResult<Self> {
        let signature = single_push(invocation)
            .ok_or_else(|| CoreError::decode("invocation script is not a single push"))?;

        let public_key = match verification.split_last() {
            Some((&last, body)) if last == OpCode::CHECKSIG as u8 => single_push(body),
            _ => None,
        }
        .ok_or_else(|| CoreError::decode("verification script is not a single-key CHECKSIG"))?;

        Ok(Self::new(public_key.to_vec(), signature.to_vec()))
    }
}

/// Returns the data of a script that is exactly one direct push.
fn single_push(script: &[u8]) -> Option<&[u8]> {
    let (&len, data) = script.split_first()?;
    (len as usize <= OpCode::MAX_DIRECT_PUSH && data.len() == len as usize).then_some(data)
}
