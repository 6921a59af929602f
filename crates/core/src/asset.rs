//! Registry of the two native assets and their contract addresses.

use crate::address::Address;
use crate::error::{CoreError, CoreResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

const fn native_contract(id: u8) -> Address {
    let mut bytes = [0u8; Address::LENGTH];
    bytes[Address::LENGTH - 1] = id;
    Address::new(bytes)
}

/// Contract address of the primary token.
pub const ONT_CONTRACT: Address = native_contract(0x01);

/// Contract address of the gas token.
pub const ONG_CONTRACT: Address = native_contract(0x02);

/// A native fungible token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    /// The primary token.
    Ont,
    /// The gas token, which accrues to primary token holders.
    Ong,
}

impl Asset {
    /// Every native asset.
    pub const ALL: [Asset; 2] = [Asset::Ont, Asset::Ong];

    /// Looks up an asset by symbol, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownAsset` for anything other than
    /// `ont`/`primary` or `ong`/`gas`.
    pub fn from_symbol(symbol: &str) -> CoreResult<Self> {
        AssetRegistry::global().resolve(symbol)
    }

    /// The native contract implementing this asset.
    #[must_use]
    pub const fn contract_address(&self) -> Address {
        match self {
            Self::Ont => ONT_CONTRACT,
            Self::Ong => ONG_CONTRACT,
        }
    }

    /// Canonical ticker symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Ont => "ONT",
            Self::Ong => "ONG",
        }
    }

    const fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Ont => &["ont", "primary"],
            Self::Ong => &["ong", "gas"],
        }
    }
}

impl FromStr for Asset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Immutable symbol table, built once on first use.
pub struct AssetRegistry {
    by_symbol: HashMap<&'static str, Asset>,
}

static REGISTRY: Lazy<AssetRegistry> = Lazy::new(|| {
    let by_symbol = Asset::ALL
        .iter()
        .flat_map(|asset| asset.aliases().iter().map(move |alias| (*alias, *asset)))
        .collect();
    AssetRegistry { by_symbol }
});

impl AssetRegistry {
    /// The process-wide registry.
    pub fn global() -> &'static Self {
        &REGISTRY
    }

    /// Resolves `symbol` case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UnknownAsset` if no asset answers to `symbol`.
    pub fn resolve(&self, symbol: &str) -> CoreResult<Asset> {
        self.by_symbol
            .get(symbol.to_ascii_lowercase().as_str())
            .copied()
            .ok_or_else(|| CoreError::unknown_asset(symbol))
    }
}

/// Resolves an asset symbol straight to its contract address.
///
/// # Errors
///
/// Returns `CoreError::UnknownAsset` for an unrecognized symbol.
pub fn resolve_asset_address(symbol: &str) -> CoreResult<Address> {
    Ok(Asset::from_symbol(symbol)?.contract_address())
}
