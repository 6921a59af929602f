//! Implementation of `Address`, the 20-byte account and contract identifier.

use crate::error::{CoreError, CoreResult};
use ont_config::{ADDRESS_SIZE, ADDRESS_VERSION, CHECKSUM_SIZE};
use ripemd::Ripemd160;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Length of a decoded base58check address: version byte, hash, checksum.
const ENCODED_LENGTH: usize = 1 + ADDRESS_SIZE + CHECKSUM_SIZE;

/// A 20-byte identifier for an account or a contract.
///
/// The bytes are kept exactly as they appear on the wire. Native contracts
/// use small well-known values (`00..01` for the primary token).
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_SIZE]);

impl Address {
    /// The reserved all-zero address, used as payer for dry runs.
    pub const ZERO: Self = Self([0u8; ADDRESS_SIZE]);

    /// Alias for the address length in bytes.
    pub const LENGTH: usize = ADDRESS_SIZE;

    /// Creates an address from its raw bytes.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; ADDRESS_SIZE]) -> Self {
        Self(bytes)
    }

    /// Checks if this is the reserved zero address.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_SIZE]
    }

    /// Creates an address from a byte slice.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` if the input length is not exactly 20 bytes.
    pub fn from_bytes(value: &[u8]) -> CoreResult<Self> {
        let bytes: [u8; ADDRESS_SIZE] = value.try_into().map_err(|_| {
            CoreError::invalid_parameter("address", format!("invalid length: {}", value.len()))
        })?;
        Ok(Self(bytes))
    }

    /// Gets the raw bytes of the address.
    #[inline]
    #[must_use]
    pub const fn to_array(&self) -> [u8; ADDRESS_SIZE] {
        self.0
    }

    /// Borrows the raw bytes of the address.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_SIZE] {
        &self.0
    }

    /// Computes the address of a script: RIPEMD-160 over SHA-256.
    #[must_use]
    pub fn from_script(script: &[u8]) -> Self {
        let sha256_hash = Sha256::digest(script);
        let hash160 = Ripemd160::digest(sha256_hash);

        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes.copy_from_slice(&hash160);
        Self(bytes)
    }

    /// Computes the address controlled by a single public key.
    #[must_use]
    pub fn from_public_key(public_key: &[u8]) -> Self {
        Self::from_script(&crate::vm::ScriptBuilder::verification_script(public_key))
    }

    /// Parses an address from a 40-character hexadecimal string of the raw bytes.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` for non-hex input or a wrong length.
    pub fn parse_hex(s: &str) -> CoreResult<Self> {
        let s = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(s)
            .map_err(|e| CoreError::invalid_parameter("address", format!("invalid hex: {e}")))?;
        Self::from_bytes(&bytes)
    }

    /// Converts the address to its hexadecimal form.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        hex::encode(self.0)
    }

    /// Converts this address to its base58check string.
    #[must_use]
    pub fn to_base58(&self) -> String {
        let mut data = Vec::with_capacity(ENCODED_LENGTH);
        data.push(ADDRESS_VERSION);
        data.extend_from_slice(&self.0);
        let checksum = checksum(&data);
        data.extend_from_slice(&checksum);

        bs58::encode(data).into_string()
    }

    /// Parses a base58check address string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` if the address is not valid Base58,
    /// has an incorrect length, has an invalid version byte, or has an invalid checksum.
    pub fn from_base58(address: &str) -> CoreResult<Self> {
        let decoded = bs58::decode(address)
            .into_vec()
            .map_err(|_| CoreError::invalid_parameter("address", "invalid base58 address"))?;

        if decoded.len() != ENCODED_LENGTH {
            return Err(CoreError::invalid_parameter(
                "address",
                "invalid address length",
            ));
        }

        if decoded[0] != ADDRESS_VERSION {
            return Err(CoreError::invalid_parameter(
                "address",
                "invalid address version",
            ));
        }

        let (data, expected) = decoded.split_at(1 + ADDRESS_SIZE);
        if checksum(data).as_slice() != expected {
            return Err(CoreError::invalid_parameter(
                "address",
                "invalid address checksum",
            ));
        }

        Self::from_bytes(&data[1..])
    }

    /// Parses a base58check address, reporting failures against `field`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidParameter` naming `field`.
    pub fn from_base58_field(address: &str, field: &'static str) -> CoreResult<Self> {
        Self::from_base58(address).map_err(|e| match e {
            CoreError::InvalidParameter { message, .. } => {
                CoreError::invalid_parameter(field, format!("{message}: '{address}'"))
            }
            other => other,
        })
    }
}

fn checksum(data: &[u8]) -> [u8; CHECKSUM_SIZE] {
    let hash = Sha256::digest(Sha256::digest(data));
    let mut out = [0u8; CHECKSUM_SIZE];
    out.copy_from_slice(&hash[..CHECKSUM_SIZE]);
    out
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex_string())
    }
}

impl From<[u8; ADDRESS_SIZE]> for Address {
    fn from(data: [u8; ADDRESS_SIZE]) -> Self {
        Self(data)
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = CoreError;

    fn try_from(data: &[u8]) -> std::result::Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl AsRef<[u8]> for Address {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_base58(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        let mut bytes = [0u8; ADDRESS_SIZE];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8 + 1;
        }
        Address::new(bytes)
    }

    #[test]
    fn test_address_from_bytes() {
        let mut bytes = [0u8; ADDRESS_SIZE];
        bytes[19] = 1;
        let address = Address::from_bytes(&bytes).unwrap();
        assert_eq!(address.to_array(), bytes);
        assert!(!address.is_zero());
        assert!(Address::ZERO.is_zero());
    }

    #[test]
    fn test_address_from_bytes_wrong_length() {
        let err = Address::from_bytes(&[0u8; 19]).unwrap_err();
        assert_eq!(err.field(), Some("address"));
        assert!(Address::from_bytes(&[0u8; 21]).is_err());
    }

    #[test]
    fn test_base58_round_trip() {
        let address = sample();
        let encoded = address.to_base58();
        assert!(encoded.starts_with('A'));
        assert_eq!(Address::from_base58(&encoded).unwrap(), address);
        assert_eq!(encoded.parse::<Address>().unwrap(), address);
    }

    #[test]
    fn test_base58_rejects_corruption() {
        let encoded = sample().to_base58();
        let mut chars: Vec<char> = encoded.chars().collect();
        let last = chars.len() - 1;
        chars[last] = if chars[last] == 'z' { 'y' } else { 'z' };
        let corrupted: String = chars.into_iter().collect();
        assert!(Address::from_base58(&corrupted).is_err());

        assert!(Address::from_base58("0OIl").is_err());
        assert!(Address::from_base58("").is_err());
    }

    #[test]
    fn test_base58_field_error_names_field() {
        let err = Address::from_base58_field("not-an-address", "payer").unwrap_err();
        assert_eq!(err.field(), Some("payer"));
    }

    #[test]
    fn test_parse_hex() {
        let address = Address::parse_hex("0x0000000000000000000000000000000000000001").unwrap();
        assert_eq!(address.to_array()[19], 1);
        assert_eq!(address.to_hex_string(), "0000000000000000000000000000000000000001");
        assert!(Address::parse_hex("zz").is_err());
    }

    #[test]
    fn test_from_script_is_hash160() {
        // RIPEMD160(SHA256("")) is a well-known vector.
        let address = Address::from_script(&[]);
        assert_eq!(address.to_hex_string(), "b472a266d0bd89c13706a4132ccfb16f7c3b9fcb");
    }

    #[test]
    fn test_serde_uses_base58() {
        let address = sample();
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", address.to_base58()));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
    }
}
