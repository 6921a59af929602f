//! Protocol constants for native contract invocation.

/// Size of an address (script hash) in bytes
pub const ADDRESS_SIZE: usize = 20;
/// Size of a transaction hash in bytes
pub const HASH_SIZE: usize = 32;
/// Size of the base58check checksum in bytes
pub const CHECKSUM_SIZE: usize = 4;

/// Version byte prepended to an address before base58check encoding ('A')
pub const ADDRESS_VERSION: u8 = 0x17;

/// Transaction envelope version
pub const TRANSACTION_VERSION: u8 = 0;
/// Transaction type tag for an invoke-code transaction
pub const TX_TYPE_INVOKE: u8 = 0xd1;

/// Version byte passed to native contract methods
pub const NATIVE_CONTRACT_VERSION: u8 = 0;
/// Interop service that dispatches into a native contract
pub const NATIVE_INVOKE_SYSCALL: &str = "Ontology.Native.Invoke";

/// Signature scheme tag for SHA256withECDSA
pub const SIGNATURE_SCHEME_SHA256_ECDSA: u8 = 0x01;

/// Default gas limit for state-changing calls
pub const DEFAULT_GAS_LIMIT: u64 = 20_000;
/// Default gas price for state-changing calls
pub const DEFAULT_GAS_PRICE: u64 = 500;

/// Default JSON-RPC request timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
