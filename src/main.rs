use std::process::ExitCode;

use clap::Parser;

use crossedge::adapter::inbound::cli::command::Cli;
use crossedge::adapter::inbound::cli::{execute, output};

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(&err.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    execute(cli).await?;
    Ok(())
}
