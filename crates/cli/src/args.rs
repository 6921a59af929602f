use clap::{Args, Parser, Subcommand};
use num_bigint::BigInt;
use ont_config::NetworkType;
use std::path::PathBuf;

/// Command-line arguments for ont-cli
#[derive(Parser, Debug, Clone)]
#[command(
    name = "ont-cli",
    version = env!("CARGO_PKG_VERSION"),
    about = "Query and move ONT and ONG through an Ontology node",
    long_about = "ont-cli builds native ONT/ONG contract calls, signs them with keys taken from environment variables and submits them to an Ontology node over JSON-RPC."
)]
pub struct CliArgs {
    /// Settings file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Network whose default endpoint is used
    #[arg(long = "network", value_parser = parse_network, value_name = "NETWORK")]
    pub network: Option<NetworkType>,

    /// JSON-RPC endpoint, overriding the network default
    #[arg(long = "rpc-url", env = "ONT_RPC_URL", value_name = "URL")]
    pub rpc_url: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long = "log", default_value = "warn", value_name = "FILTER")]
    pub log: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show the balance of an address
    Balance {
        /// ont, ong, primary or gas
        asset: String,
        address: String,
    },

    /// Show how much `to` may still spend from `from`
    Allowance {
        asset: String,
        from: String,
        to: String,
    },

    /// Show an asset's name, symbol and decimals
    Info { asset: String },

    /// Show ONG accrued to an address and not yet claimed
    Unbound { address: String },

    /// Transfer tokens to another address
    Transfer {
        asset: String,
        to: String,
        amount: BigInt,
        #[command(flatten)]
        send: SendArgs,
    },

    /// Allow another address to spend tokens on your behalf
    Approve {
        asset: String,
        to: String,
        amount: BigInt,
        #[command(flatten)]
        send: SendArgs,
    },

    /// Spend tokens another address has approved for you
    #[command(name = "transfer-from")]
    TransferFrom {
        asset: String,
        from: String,
        to: String,
        amount: BigInt,
        #[command(flatten)]
        send: SendArgs,
    },

    /// Claim accrued ONG
    Claim {
        amount: BigInt,
        /// Recipient, defaults to the claiming address
        #[arg(long)]
        to: Option<String>,
        #[command(flatten)]
        send: SendArgs,
    },

    /// Decode a transaction or invocation payload given as hex
    Inspect {
        hex: String,
        /// Treat the input as a bare payload
        #[arg(long)]
        payload: bool,
    },
}

/// Signing and fee options shared by every sending command.
#[derive(Args, Debug, Clone)]
pub struct SendArgs {
    /// Environment variable holding the sender's hex private key
    #[arg(long = "key-env", default_value = "ONT_PRIVATE_KEY", value_name = "VAR")]
    pub key_env: String,

    /// Environment variable holding the payer's hex private key
    #[arg(long = "payer-key-env", value_name = "VAR")]
    pub payer_key_env: Option<String>,

    /// Gas limit, defaults to the configured value
    #[arg(long = "gas-limit", allow_negative_numbers = true)]
    pub gas_limit: Option<i64>,

    /// Gas price, defaults to the configured value
    #[arg(long = "gas-price", allow_negative_numbers = true)]
    pub gas_price: Option<i64>,
}

fn parse_network(value: &str) -> Result<NetworkType, String> {
    value
        .parse::<NetworkType>()
        .map_err(|()| format!("unknown network '{value}', expected mainnet, testnet or private"))
}
