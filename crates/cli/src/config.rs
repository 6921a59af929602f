use crate::args::CliArgs;
use anyhow::{Context, Result};
use ont_config::ClientSettings;

/// Resolves client settings from the settings file and command-line
/// overrides. Flags win over the file.
pub fn resolve_settings(args: &CliArgs) -> Result<ClientSettings> {
    let mut settings = match &args.config {
        Some(path) => ClientSettings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => ClientSettings::default(),
    };

    if let Some(network) = args.network {
        settings.network = network;
    }
    if let Some(url) = &args.rpc_url {
        settings.rpc_url = Some(url.clone());
    }
    Ok(settings)
}
