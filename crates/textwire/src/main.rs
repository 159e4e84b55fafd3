// SPDX-FileCopyrightText: 2026 Textwire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textwire - an SMS-over-email relay assistant.
//!
//! Binary entry point. With no arguments the process performs exactly one
//! fetch-classify-log-reply pass and exits; subcommands cover the operator
//! paths (manual send, database init, environment checks).

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use textwire_config::TextwireConfig;
use tracing_subscriber::EnvFilter;

mod doctor;
mod run;
mod send;

/// Textwire - an SMS-over-email relay assistant.
#[derive(Parser, Debug)]
#[command(name = "textwire", version, about, long_about = None)]
struct Cli {
    /// Explicit configuration file path (env overrides still apply).
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Logging level override (trace, debug, info, warn, error).
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Perform one fetch-classify-log-reply pass (the default).
    Run,
    /// Send one message through a carrier gateway.
    Send {
        /// Destination phone number, digits only.
        #[arg(long)]
        to: String,
        /// Carrier identifier (a key of the `[carriers]` table).
        #[arg(long)]
        carrier: String,
        /// Message body.
        #[arg(long)]
        message: String,
        /// Optional subject line; blank is treated as absent.
        #[arg(long)]
        subject: Option<String>,
    },
    /// Create or migrate the database, then exit.
    InitDb,
    /// Run environment checks and report pass/warn/fail.
    Doctor,
}

/// Installs the tracing subscriber. `RUST_LOG` wins over the configured
/// level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("textwire={level},warn")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Loads configuration, rendering diagnostics and exiting on failure.
///
/// All configuration errors are fatal before any network I/O happens.
fn load_config_or_exit(path: Option<&Path>) -> TextwireConfig {
    let result = match path {
        Some(path) => textwire_config::load_and_validate_path(path),
        None => textwire_config::load_and_validate(),
    };
    match result {
        Ok(config) => config,
        Err(errors) => {
            textwire_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = load_config_or_exit(cli.config.as_deref());
    let level = cli.log_level.as_deref().unwrap_or(&config.relay.log_level);
    init_tracing(level);

    let outcome = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run::run_relay(&config).await,
        Commands::Send {
            to,
            carrier,
            message,
            subject,
        } => send::run_send(&config, &to, &carrier, &message, subject.as_deref()).await,
        Commands::InitDb => run::run_init_db(&config).await,
        Commands::Doctor => {
            let failed = doctor::run_doctor(&config, cli.config.as_deref()).await;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("textwire: {e}");
        std::process::exit(1);
    }
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
    fn send_requires_to_carrier_and_message() {
        let parsed = Cli::try_parse_from([
            "textwire", "send", "--to", "15052897944", "--carrier", "tmobile", "--message",
            "hello",
        ])
        .unwrap();
        assert!(matches!(parsed.command, Some(Commands::Send { .. })));

        assert!(Cli::try_parse_from(["textwire", "send", "--to", "15052897944"]).is_err());
    }

    #[test]
    fn bare_invocation_defaults_to_run() {
        let parsed = Cli::try_parse_from(["textwire"]).unwrap();
        assert!(parsed.command.is_none());
        assert!(parsed.config.is_none());
    }

    #[test]
    fn global_flags_apply_after_subcommand() {
        let parsed =
            Cli::try_parse_from(["textwire", "doctor", "--log-level", "debug"]).unwrap();
        assert_eq!(parsed.log_level.as_deref(), Some("debug"));
    }
}
