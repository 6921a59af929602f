//! Interpreting dry-run results.
//!
//! Integers come back as little-endian hex, names and symbols as hex-encoded
//! UTF-8, and decimals as plain decimal text.

use num_bigint::BigUint;
use ont_core::{CoreError, CoreResult};
use tracing::warn;

/// Converts raw pre-execution output into typed values.
pub struct ResultDecoder;

impl ResultDecoder {
    /// Decodes a little-endian hex integer, yielding zero for anything that
    /// does not parse.
    ///
    /// Prefer [`Self::try_decode_unsigned_int`] where a malformed response
    /// must not be mistaken for a zero balance.
    pub fn decode_unsigned_int(hex: &str) -> BigUint {
        Self::try_decode_unsigned_int(hex).unwrap_or_else(|| {
            warn!(response = %hex, "unparseable integer result, defaulting to zero");
            BigUint::default()
        })
    }

    /// Decodes a little-endian hex integer.
    ///
    /// An empty response is zero, since that is how zero is stored. Returns
    /// `None` when the response is not hex.
    pub fn try_decode_unsigned_int(hex: &str) -> Option<BigUint> {
        let bytes = hex::decode(hex.trim()).ok()?;
        Some(BigUint::from_bytes_le(&bytes))
    }

    /// Decodes hex-encoded UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` for invalid hex or invalid UTF-8.
    pub fn decode_utf8(hex: &str) -> CoreResult<String> {
        let bytes = hex::decode(hex.trim())
            .map_err(|e| CoreError::decode(format!("invalid hex in text result: {e}")))?;
        String::from_utf8(bytes)
            .map_err(|e| CoreError::decode(format!("invalid UTF-8 in text result: {e}")))
    }

    /// Parses a decimal-text result such as a token's decimals.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Decode` if the text is not a decimal number.
    pub fn decode_decimal_text(text: &str) -> CoreResult<u32> {
        let trimmed = text.trim();
        trimmed
            .parse::<u32>()
            .map_err(|e| CoreError::decode(format!("invalid decimal result {trimmed:?}: {e}")))
    }
}
