//! Wrapr CLI - resolve wrap URIs against a client configuration.
//!
//! `wrapr resolve <uri>` prints the terminal result and every resolution
//! step taken; `wrapr config show` prints what a config file expands to.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod formatter;
mod theme;

use commands::{config, resolve};
use formatter::OutputFormat;

/// Wrapr - wrap URI resolution
#[derive(Parser)]
#[command(name = "wrapr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,

    /// Path to a TOML client configuration (defaults to ./wrapr.toml if present)
    #[arg(short, long, global = true, env = "WRAPR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URI and print its resolution history
    Resolve {
        /// URI to resolve, e.g. `wrap://ens/example.eth` or `ens/example.eth`
        uri: String,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective client configuration
    Show,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    let log_config =
        wrapr_telemetry::LogConfig::new(level).with_format(wrapr_telemetry::LogFormat::Compact);
    if let Err(e) = wrapr_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    match cli.command {
        Commands::Resolve { uri } => {
            if !resolve::run_resolve(&uri, cli.config.as_deref(), cli.format).await? {
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show => config::show_config(cli.config.as_deref(), cli.format)?,
        },
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_resolve_with_global_flags() {
        let cli = Cli::try_parse_from([
            "wrapr",
            "resolve",
            "ens/a.eth",
            "--format",
            "json",
            "--config",
            "custom.toml",
            "-v",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Resolve { ref uri } if uri == "ens/a.eth"));
    }

    #[test]
    fn test_parse_config_show_defaults_to_pretty() {
        let cli = Cli::try_parse_from(["wrapr", "config", "show"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Pretty);
        assert!(matches!(
            cli.command,
            Commands::Config {
                command: ConfigCommands::Show
            }
        ));
    }
}
