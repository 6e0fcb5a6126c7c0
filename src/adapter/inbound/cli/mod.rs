//! Command-line inbound adapter.

pub mod command;
pub mod config;
pub mod output;
pub mod paths;
pub mod run;
pub mod serve;

use command::{Cli, Commands, ConfigCommand};
use output::OutputConfig;

use crate::error::Result;

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns whatever the selected command fails with.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(false, cli.quiet, cli.color));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Serve(args) => serve::execute(&args).await,
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
