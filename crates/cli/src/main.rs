mod args;
mod commands;
mod config;
mod console;

use anyhow::Result;
use args::CliArgs;
use clap::Parser;
use commands::asset::AssetCommands;
use console::ConsoleHelper;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    ont_rs::init_tracing(&args.log);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ConsoleHelper::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: CliArgs) -> Result<()> {
    let settings = config::resolve_settings(&args)?;
    commands::execute(args.command, move || AssetCommands::connect(settings)).await
}
