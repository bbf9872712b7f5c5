//! Command-line orchestration for the `symbolon` binary.
//!
//! This module exposes the command-line interface and reusable helpers that
//! power the binary. `main` only installs logging and calls [`run`].

pub mod commands;

use std::ffi::OsString;

use anyhow::{Context, Result};
use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
pub use cli_defs::{AppConfig, BatchArgs, Cli, Commands, GenerateArgs};
use ortho_config::OrthoConfig;
use thiserror::Error;

pub use self::commands::{run_batch, run_command, run_generate};

/// Raised when no mode was selected on the command line.
#[derive(Debug, Error)]
#[error("no mode selected; run `symbolon generate --params '(n,n',t,t')'` or `symbolon batch`")]
pub struct UsageError;

/// Exit status reported for [`UsageError`].
pub const USAGE_EXIT_CODE: u8 = 2;

/// Program name used when loading layered configuration.
const PROGRAM: &str = "symbolon";

/// Parse CLI arguments and execute the requested mode.
///
/// # Errors
///
/// Returns any error emitted while merging configuration, generating models
/// or writing files. A missing mode yields [`UsageError`].
pub fn run() -> Result<()> {
    let matches = Cli::command().get_matches();
    run_with_matches(&matches)
}

/// Parse `args` and execute the requested mode.
///
/// # Errors
///
/// As [`run`], plus any argument parsing failure.
pub fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = Cli::command().try_get_matches_from(args)?;
    run_with_matches(&matches)
}

fn run_with_matches(matches: &ArgMatches) -> Result<()> {
    let Cli {
        config: flags,
        command,
    } = Cli::from_arg_matches(matches)?;
    let config = layered_config(flags, matches)?;
    run_with_cli(Cli { config, command })
}

/// Merge the shared configuration: flags given on the command line win over
/// `SYMBOLON_*` environment variables, which win over `.symbolon.toml`,
/// which wins over the built-in defaults.
///
/// # Errors
///
/// Fails when the environment or configuration file cannot be loaded.
pub fn layered_config(cli: AppConfig, matches: &ArgMatches) -> Result<AppConfig> {
    let mut config =
        AppConfig::load_from_iter([PROGRAM]).context("failed to load configuration")?;
    if given_on_command_line(matches, "output_dir") {
        config.output_dir = cli.output_dir;
    }
    if given_on_command_line(matches, "verifier") {
        config.verifier = cli.verifier;
    }
    Ok(config)
}

fn given_on_command_line(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Execute an already parsed [`Cli`]. Its configuration is used as given.
///
/// # Errors
///
/// Propagates failures from [`run_command`], or [`UsageError`] when no
/// subcommand was given.
pub fn run_with_cli(cli: Cli) -> Result<()> {
    let Cli { config, command } = cli;
    let Some(command) = command else {
        return Err(UsageError.into());
    };
    run_command(command, &config)
}
