//! Ontology Configuration Module
//!
//! Protocol constants shared by every crate in the workspace, the network
//! selector and the client settings loaded from TOML.

pub mod constants;
pub mod error;
pub mod network;
pub mod settings;

pub use constants::*;
pub use error::{ConfigError, ConfigResult};
pub use network::NetworkType;
pub use settings::ClientSettings;
