// kicad-git: Git integration for KiCad libraries
//
// SPDX-FileCopyrightText: 2026 KiCad Git Integration Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Settings --> Command Dispatch
//!   status | fetch | pull | commit | push | sync | remote | ssh
//!   config | watch | plugin-info
//! ```

use std::process::ExitCode;

use anyhow::Context as _;
use kicad_git::cli::global::GlobalOptions;
use kicad_git::cli::{self, Command};
use kicad_git::cmd::ActionFailed;
use kicad_git::cmd::config::run_config_command;
use kicad_git::cmd::repo::{run_remote_command, run_repo_command};
use kicad_git::cmd::ssh::run_ssh_command;
use kicad_git::cmd::watch::{run_plugin_info_command, run_watch_command};
use kicad_git::config::Settings;
use kicad_git::config::paths::default_log_file;
use kicad_git::logging::init_logging;
use kicad_git::logging::{LogConfig, LogLevel};
use kicad_git::session::Action;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::DEBUG);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone().or_else(default_log_file))
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let global = &cli.global;
    let json = global.json;

    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Config(args)) => run_config_command(args, global),
        Some(Command::PluginInfo(args)) => run_plugin_info_command(args),
        Some(Command::Status) => run_repo(global, Action::Status).await,
        Some(Command::Fetch) => run_repo(global, Action::Fetch).await,
        Some(Command::Pull) => run_repo(global, Action::Pull).await,
        Some(Command::Commit(args)) => run_repo(global, Action::Commit(args.message.clone())).await,
        Some(Command::Push) => run_repo(global, Action::Push).await,
        Some(Command::Sync) => run_repo(global, Action::Sync).await,
        Some(Command::Remote(args)) => match load_settings(global) {
            Ok(settings) => run_remote_command(args, settings, json).await,
            Err(e) => Err(e),
        },
        Some(Command::Ssh(args)) => match load_settings(global) {
            Ok(settings) => run_ssh_command(args, settings, json).await,
            Err(e) => Err(e),
        },
        Some(Command::Watch) => match load_settings(global) {
            Ok(settings) => {
                run_watch_command(settings, json).await;
                Ok(())
            }
            Err(e) => Err(e),
        },
        None => Err(anyhow::anyhow!(
            "no command specified, use --help for usage information"
        )),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<ActionFailed>().is_some() => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

async fn run_repo(global: &GlobalOptions, action: Action) -> kicad_git::error::Result<()> {
    let settings = load_settings(global)?;
    run_repo_command(action, settings, global.json).await
}

fn load_settings(global: &GlobalOptions) -> kicad_git::error::Result<Settings> {
    global.load_settings().context("failed to load settings")
}
