pub mod asset;
pub mod inspect;

use crate::args::Command;
use anyhow::Result;
use asset::AssetCommands;

pub type CommandResult = Result<()>;

/// Runs one command. Everything except `inspect` needs a node.
pub async fn execute(
    command: Command,
    assets: impl FnOnce() -> Result<AssetCommands>,
) -> CommandResult {
    match command {
        Command::Inspect { hex, payload } => inspect::inspect(&hex, payload),
        Command::Balance { asset, address } => assets()?.balance(&asset, &address).await,
        Command::Allowance { asset, from, to } => assets()?.allowance(&asset, &from, &to).await,
        Command::Info { asset } => assets()?.info(&asset).await,
        Command::Unbound { address } => assets()?.unbound(&address).await,
        Command::Transfer {
            asset,
            to,
            amount,
            send,
        } => assets()?.transfer(&asset, &to, &amount, &send).await,
        Command::Approve {
            asset,
            to,
            amount,
            send,
        } => assets()?.approve(&asset, &to, &amount, &send).await,
        Command::TransferFrom {
            asset,
            from,
            to,
            amount,
            send,
        } => assets()?.transfer_from(&asset, &from, &to, &amount, &send).await,
        Command::Claim { amount, to, send } => {
            assets()?.claim(to.as_deref(), &amount, &send).await
        }
    }
}
