//! The invoke transaction envelope, its wire format and hash.

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use crate::io::{BinaryWriter, MemoryReader};
use crate::vm::{decode_invocation, DecodedInvocation};
use crate::witness::Witness;
use once_cell::sync::OnceCell;
use ont_config::{HASH_SIZE, TRANSACTION_VERSION, TX_TYPE_INVOKE};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Maximum number of signer entries a transaction may carry.
pub const MAX_SIGNERS: usize = 16;

/// Maximum size of a serialized transaction in bytes.
pub const MAX_TRANSACTION_SIZE: usize = 1024 * 1024;

/// Maximum size of a single script inside a transaction.
const MAX_SCRIPT_SIZE: usize = 1024;

/// A transaction hash: double SHA-256 of the unsigned transaction.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TxHash([u8; HASH_SIZE]);

impl TxHash {
    #[must_use]
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    #[must_use]
    pub const fn to_array(&self) -> [u8; HASH_SIZE] {
        self.0
    }

    /// The form used by nodes and explorers: byte-reversed hex.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let mut reversed = self.0;
        reversed.reverse();
        hex::encode(reversed)
    }

    /// Parses the byte-reversed hex form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` unless `s` is 64 hex characters.
    pub fn from_hex_string(s: &str) -> CoreResult<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes: [u8; HASH_SIZE] = hex::decode(s)
            .map_err(|e| CoreError::decode(format!("invalid transaction hash: {e}")))?
            .try_into()
            .map_err(|_| CoreError::decode(format!("invalid transaction hash length: '{s}'")))?;
        bytes.reverse();
        Ok(Self(bytes))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

impl fmt::Debug for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxHash({})", self.to_hex_string())
    }
}

impl FromStr for TxHash {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex_string(s)
    }
}

impl Serialize for TxHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex_string())
    }
}

impl<'de> Deserialize<'de> for TxHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_hex_string(&text).map_err(serde::de::Error::custom)
    }
}

/// A native invoke transaction.
///
/// Everything except the signer list is fixed at construction, so the hash
/// is computed once on first use. Signing through
/// [`SigningCoordinator`](crate::signing::SigningCoordinator) mutates the
/// signer list in place; a transaction must not be signed from two threads
/// at once.
#[derive(Debug, Clone)]
pub struct Transaction {
    version: u8,
    tx_type: u8,
    timestamp: u32,
    gas_price: u64,
    gas_limit: u64,
    payer: Address,
    payload: Vec<u8>,
    witnesses: Vec<Witness>,
    hash: OnceCell<TxHash>,
}

impl Transaction {
    /// Creates an unsigned invoke transaction.
    pub fn new(
        timestamp: u32,
        gas_price: u64,
        gas_limit: u64,
        payer: Address,
        payload: Vec<u8>,
    ) -> Self {
        Self {
            version: TRANSACTION_VERSION,
            tx_type: TX_TYPE_INVOKE,
            timestamp,
            gas_price,
            gas_limit,
            payer,
            payload,
            witnesses: Vec::new(),
            hash: OnceCell::new(),
        }
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn tx_type(&self) -> u8 {
        self.tx_type
    }

    /// Construction time in unix seconds, sent as the nonce.
    pub fn timestamp(&self) -> u32 {
        self.timestamp
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    pub fn payer(&self) -> &Address {
        &self.payer
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Signer entries in append order.
    pub fn signers(&self) -> &[Witness] {
        &self.witnesses
    }

    pub(crate) fn signers_mut(&mut self) -> &mut Vec<Witness> {
        &mut self.witnesses
    }

    /// Addresses of the signers in append order.
    #[must_use]
    pub fn signer_addresses(&self) -> Vec<Address> {
        self.witnesses.iter().map(Witness::address).collect()
    }

    /// Whether this is a dry-run query: zero payer and zero gas.
    #[must_use]
    pub fn is_query(&self) -> bool {
        self.payer.is_zero() && self.gas_price == 0 && self.gas_limit == 0
    }

    /// Decodes the native call carried in the payload.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the payload is not a native invocation.
    pub fn decode_payload(&self) -> CoreResult<DecodedInvocation> {
        decode_invocation(&self.payload)
    }

    /// Gets the transaction hash, computing it on first use.
    pub fn hash(&self) -> TxHash {
        *self.hash.get_or_init(|| {
            let first = Sha256::digest(self.serialize_unsigned());
            let second = Sha256::digest(first);
            let mut bytes = [0u8; HASH_SIZE];
            bytes.copy_from_slice(&second);
            TxHash(bytes)
        })
    }

    /// The bytes every signer signs.
    pub fn sign_data(&self) -> [u8; HASH_SIZE] {
        self.hash().to_array()
    }

    /// Serializes everything but the signer list.
    #[must_use]
    pub fn serialize_unsigned(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(54 + self.payload.len());
        let mut writer = BinaryWriter::new(&mut buffer);
        writer.write_u8(self.version);
        writer.write_u8(self.tx_type);
        writer.write_u32(self.timestamp);
        writer.write_u64(self.gas_price);
        writer.write_u64(self.gas_limit);
        writer.write_bytes(self.payer.as_bytes());
        writer.write_var_bytes(&self.payload);
        // attributes
        writer.write_var_int(0);
        buffer
    }

    /// Serializes the full transaction including signers.
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        let mut buffer = self.serialize_unsigned();
        let mut writer = BinaryWriter::new(&mut buffer);
        writer.write_var_int(self.witnesses.len() as u64);
        for witness in &self.witnesses {
            writer.write_var_bytes(&witness.invocation_script());
            writer.write_var_bytes(&witness.verification_script());
        }
        buffer
    }

    /// Hex of [`serialize`](Self::serialize), as submitted over RPC.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.serialize())
    }

    /// Parses a serialized invoke transaction.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` for truncated input, a transaction type
    /// other than invoke, attributes, trailing bytes, or signer entries that
    /// are not single-key signatures.
    pub fn from_bytes(data: &[u8]) -> CoreResult<Self> {
        if data.len() > MAX_TRANSACTION_SIZE {
            return Err(CoreError::decode("transaction is too large"));
        }
        let mut reader = MemoryReader::new(data);

        let version = reader.read_u8()?;
        let tx_type = reader.read_u8()?;
        if tx_type != TX_TYPE_INVOKE {
            return Err(CoreError::decode(format!(
                "unsupported transaction type 0x{tx_type:02x}"
            )));
        }
        let timestamp = reader.read_u32()?;
        let gas_price = reader.read_u64()?;
        let gas_limit = reader.read_u64()?;
        let payer = Address::new(reader.read_array()?);
        let payload = reader.read_var_bytes(MAX_TRANSACTION_SIZE)?.to_vec();
        if reader.read_var_int(u64::MAX)? != 0 {
            return Err(CoreError::decode("transaction attributes are not supported"));
        }

        let count = reader.read_var_int(MAX_SIGNERS as u64)? as usize;
        let mut witnesses = Vec::with_capacity(count);
        for _ in 0..count {
            let invocation = reader.read_var_bytes(MAX_SCRIPT_SIZE)?;
            let verification = reader.read_var_bytes(MAX_SCRIPT_SIZE)?;
            witnesses.push(Witness::from_scripts(invocation, verification)?);
        }

        if !reader.is_empty() {
            return Err(CoreError::decode(format!(
                "{} trailing bytes after transaction",
                reader.remaining()
            )));
        }

        Ok(Self {
            version,
            tx_type,
            timestamp,
            gas_price,
            gas_limit,
            payer,
            payload,
            witnesses,
            hash: OnceCell::new(),
        })
    }

    /// Parses the hex form produced by [`to_hex`](Self::to_hex).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` for invalid hex or an invalid transaction.
    pub fn from_hex(s: &str) -> CoreResult<Self> {
        let bytes = hex::decode(s.trim())
            .map_err(|e| CoreError::decode(format!("invalid transaction hex: {e}")))?;
        Self::from_bytes(&bytes)
    }
}
