// cactus-rs: Multi-Checkout Git Tooling for Maven Trees
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> load_config() --> Logging --> Command Dispatch
//!   Checkouts | Merge | Docs | Codeflowers | FilterFamilies | Metadata | Options
//! ```

use std::process::ExitCode;

use cactus_rs::cli::{self, Cli, Command};
use cactus_rs::cmd::checkouts::run_checkouts_command;
use cactus_rs::cmd::codeflowers::run_codeflowers_command;
use cactus_rs::cmd::config::{run_options_command, run_version_command};
use cactus_rs::cmd::docs::run_docs_command;
use cactus_rs::cmd::families::run_filter_families_command;
use cactus_rs::cmd::load_config;
use cactus_rs::cmd::merge::run_merge_command;
use cactus_rs::cmd::metadata::run_metadata_command;
use cactus_rs::config::Config;
use cactus_rs::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&LogConfig::from(&config.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

async fn dispatch_command(cli: &Cli, config: &Config) -> ExitCode {
    let global = &cli.global;
    let result = match &cli.command {
        Some(Command::Version) => {
            run_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Checkouts(args)) => run_checkouts_command(args, global, config),
        Some(Command::Merge(args)) => run_merge_command(args, global, config),
        Some(Command::Docs(args)) => run_docs_command(args, global, config).await,
        Some(Command::Codeflowers(args)) => run_codeflowers_command(args, global, config),
        Some(Command::FilterFamilies(args)) => run_filter_families_command(args, global, config),
        Some(Command::Metadata(args)) => run_metadata_command(args, global, config),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
