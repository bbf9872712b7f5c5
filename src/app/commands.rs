//! Subcommand handlers.
//!
//! Subcommand arguments are merged with configuration files and environment
//! variables before use, so every flag can also be set persistently.

#![allow(
    clippy::shadow_reuse,
    reason = "intentional shadowing for config merging"
)]

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use ortho_config::load_and_merge_subcommand_for;
use tracing::info;

use super::{AppConfig, BatchArgs, Commands, GenerateArgs};
use crate::{
    batch::{SweepConfig, run_sweep},
    params::Parameters,
    synth::{synthesize, write_model_to_path},
};

/// Execute a subcommand.
///
/// # Errors
///
/// Propagates failures from configuration merging, generation or writing.
pub fn run_command(command: Commands, cfg: &AppConfig) -> Result<()> {
    match command {
        Commands::Generate(args) => {
            let args = load_and_merge_subcommand_for::<GenerateArgs>(&args)?;
            run_generate(args, cfg).map(|_| ())
        }
        Commands::Batch(args) => {
            let args = load_and_merge_subcommand_for::<BatchArgs>(&args)?;
            run_batch(args, cfg)
        }
    }
}

/// Generate one model and return the path it was written to.
///
/// # Errors
///
/// Fails when `--params` is missing or malformed, violates the parameter
/// invariants, or the file cannot be written.
pub fn run_generate(args: GenerateArgs, cfg: &AppConfig) -> Result<Utf8PathBuf> {
    let raw = args.params.ok_or_else(|| anyhow!("missing --params"))?;
    let params: Parameters = raw
        .parse()
        .with_context(|| format!("cannot use parameters {raw:?}"))?;
    let artifact = synthesize(&params)
        .with_context(|| format!("failed to generate model for {params}"))?;

    let file = args
        .output_file
        .unwrap_or_else(|| params.default_model_file());
    let path = Utf8PathBuf::from(&cfg.output_dir).join(file);
    write_model_to_path(&path, &artifact)
        .with_context(|| format!("failed to write model to {path}"))?;
    info!(%params, %path, "generated model");
    Ok(path)
}

/// Build the sweep configuration from merged arguments.
#[must_use]
pub fn sweep_config(args: BatchArgs, cfg: &AppConfig) -> SweepConfig {
    let defaults = SweepConfig::default();
    let n_min = args.n_min.unwrap_or(*defaults.n_range.start());
    let n_max = args.n_max.unwrap_or(*defaults.n_range.end());
    let inner_min = args.inner_min.unwrap_or(*defaults.inner_range.start());
    let inner_max = args.inner_max.unwrap_or(*defaults.inner_range.end());
    SweepConfig {
        n_range: n_min..=n_max,
        inner_range: inner_min..=inner_max,
        output_dir: Utf8PathBuf::from(&cfg.output_dir),
        driver_script: args.driver_script.unwrap_or(defaults.driver_script),
        log_dir: args.log_dir.unwrap_or(defaults.log_dir),
        verifier: cfg.verifier.clone(),
    }
}

/// Run a batch sweep.
///
/// # Errors
///
/// Propagates the first failure reported by [`run_sweep`].
pub fn run_batch(args: BatchArgs, cfg: &AppConfig) -> Result<()> {
    let config = sweep_config(args, cfg);
    let report = run_sweep(&config).context("batch sweep failed")?;
    info!(
        models = report.generated.len(),
        script = %report.driver_script,
        "batch finished"
    );
    Ok(())
}
