//! Command-line interface definitions.
//!
//! Defines the CLI structure for crossedge using `clap`: a one-shot `run`,
//! the long-lived `serve` reporting endpoint, and `config` utilities.

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

use super::paths;

/// Cross-venue prediction market arbitrage detection
#[derive(Parser, Debug)]
#[command(name = "crossedge")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run detection once and print the opportunities
    Run(RunArgs),

    /// Serve opportunities over HTTP
    Serve(ServeArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `crossedge config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a documented configuration file.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file.
    Validate(ConfigPathArg),
}

/// Shared argument for commands that only need a configuration path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `config init`.
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Configuration file; defaults to ~/.crossedge/config.toml when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the minimum edge in basis points.
    #[arg(long)]
    pub min_edge_bps: Option<Decimal>,

    /// Override the matcher confidence floor (0 to 1).
    #[arg(long)]
    pub min_confidence: Option<f64>,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Configuration file; defaults to ~/.crossedge/config.toml when present.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the listen address, e.g. 0.0.0.0:8080.
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "crossedge",
            "run",
            "--min-edge-bps",
            "75",
            "--min-confidence",
            "0.8",
            "--json",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.min_edge_bps, Some(Decimal::from(75)));
        assert_eq!(args.min_confidence, Some(0.8));
        assert!(args.json);
        assert!(args.config.is_none());
    }

    #[test]
    fn serve_accepts_bind() {
        let cli = Cli::try_parse_from(["crossedge", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0:9000"));
    }

    #[test]
    fn config_validate_defaults_path() {
        let cli = Cli::try_parse_from(["crossedge", "config", "validate"]).unwrap();
        let Commands::Config(ConfigCommand::Validate(arg)) = cli.command else {
            panic!("expected config validate");
        };
        assert!(arg.config.ends_with("config.toml"));
    }
}
