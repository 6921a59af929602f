//! Network type and default endpoints

use serde::{Deserialize, Serialize};

/// Ontology network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Ontology `MainNet`
    MainNet,
    /// Ontology `TestNet` (Polaris)
    #[default]
    TestNet,
    /// Private/local node
    Private,
}

impl NetworkType {
    /// Get the default JSON-RPC endpoint for this network
    #[must_use]
    pub const fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::MainNet => "http://dappnode1.ont.io:20336",
            Self::TestNet => "http://polaris1.ont.io:20336",
            Self::Private => "http://127.0.0.1:20336",
        }
    }
}

impl std::str::FromStr for NetworkType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::MainNet),
            "testnet" | "test" | "polaris" => Ok(Self::TestNet),
            "private" | "local" => Ok(Self::Private),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for NetworkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MainNet => write!(f, "mainnet"),
            Self::TestNet => write!(f, "testnet"),
            Self::Private => write!(f, "private"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_str() {
        assert_eq!(
            "mainnet".parse::<NetworkType>().ok(),
            Some(NetworkType::MainNet)
        );
        assert_eq!(
            "TESTNET".parse::<NetworkType>().ok(),
            Some(NetworkType::TestNet)
        );
        assert_eq!(
            "Polaris".parse::<NetworkType>().ok(),
            Some(NetworkType::TestNet)
        );
        assert_eq!(
            "local".parse::<NetworkType>().ok(),
            Some(NetworkType::Private)
        );
        assert!("unknown".parse::<NetworkType>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for network in [NetworkType::MainNet, NetworkType::TestNet, NetworkType::Private] {
            assert_eq!(network.to_string().parse::<NetworkType>(), Ok(network));
        }
    }

    #[test]
    fn test_default_endpoints() {
        assert_eq!(
            NetworkType::MainNet.default_rpc_url(),
            "http://dappnode1.ont.io:20336"
        );
        assert!(NetworkType::Private.default_rpc_url().ends_with(":20336"));
    }
}
