//! Accounts able to sign transactions.

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use ont_config::SIGNATURE_SCHEME_SHA256_ECDSA;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::sec1::ToEncodedPoint;
use std::fmt;

/// Length of a raw P-256 private key.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Something that holds a key and can sign on behalf of an address.
///
/// Key storage and signature production live behind this trait so that
/// hardware or remote signers can stand in for [`KeyPairAccount`].
pub trait SigningAccount: Send + Sync {
    /// Serialized public key, as placed in the verification script.
    fn public_key(&self) -> Vec<u8>;

    /// Address controlled by this account.
    fn address(&self) -> Address {
        Address::from_public_key(&self.public_key())
    }

    /// Signs `message`, returning the signature as it goes on the wire.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Signing` if no signature could be produced.
    fn sign(&self, message: &[u8]) -> CoreResult<Vec<u8>>;
}

/// An in-memory ECDSA P-256 key pair signing with SHA-256.
#[derive(Clone)]
pub struct KeyPairAccount {
    signing_key: SigningKey,
    public_key: Vec<u8>,
    address: Address,
}

impl KeyPairAccount {
    /// Generates a fresh random key pair.
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::random(&mut rand::rngs::OsRng))
    }

    /// Loads a key pair from a raw 32-byte private key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` if the bytes are not a valid scalar.
    pub fn from_private_key(private_key: &[u8]) -> CoreResult<Self> {
        if private_key.len() != PRIVATE_KEY_SIZE {
            return Err(CoreError::invalid_parameter(
                "private_key",
                format!("expected {PRIVATE_KEY_SIZE} bytes, got {}", private_key.len()),
            ));
        }
        let signing_key = SigningKey::from_slice(private_key)
            .map_err(|e| CoreError::invalid_parameter("private_key", e.to_string()))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Loads a key pair from a hex-encoded private key.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` for invalid hex or an invalid key.
    pub fn from_hex(private_key: &str) -> CoreResult<Self> {
        let bytes = hex::decode(private_key.trim())
            .map_err(|e| CoreError::invalid_parameter("private_key", format!("invalid hex: {e}")))?;
        Self::from_private_key(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let public_key = p256::PublicKey::from(signing_key.verifying_key())
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();
        let address = Address::from_public_key(&public_key);
        Self {
            signing_key,
            public_key,
            address,
        }
    }

    /// Checks a wire signature made by the holder of `public_key`.
    #[must_use]
    pub fn verify(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
        let Some((&scheme, raw)) = signature.split_first() else {
            return false;
        };
        if scheme != SIGNATURE_SCHEME_SHA256_ECDSA {
            return false;
        }
        let (Ok(key), Ok(signature)) = (
            VerifyingKey::from_sec1_bytes(public_key),
            Signature::from_slice(raw),
        ) else {
            return false;
        };
        key.verify(message, &signature).is_ok()
    }
}

impl SigningAccount for KeyPairAccount {
    fn public_key(&self) -> Vec<u8> {
        self.public_key.clone()
    }

    fn address(&self) -> Address {
        self.address
    }

    fn sign(&self, message: &[u8]) -> CoreResult<Vec<u8>> {
        let signature: Signature = self
            .signing_key
            .try_sign(message)
            .map_err(|e| CoreError::signing(e.to_string()))?;

        let mut out = Vec::with_capacity(65);
        out.push(SIGNATURE_SCHEME_SHA256_ECDSA);
        out.extend_from_slice(&signature.to_bytes());
        Ok(out)
    }
}

impl fmt::Debug for KeyPairAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPairAccount")
            .field("address", &self.address)
            .field("public_key", &hex::encode(&self.public_key))
            .finish_non_exhaustive()
    }
}
