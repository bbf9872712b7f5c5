//! Shared CLI type definitions for symbolon build and runtime.
//!
//! This crate provides CLI argument and configuration types used by both the
//! `build.rs` script (for man page generation) and the runtime binary.
//! Extracting these types into a separate crate avoids brittle `#[path = ...]`
//! includes and keeps build-time and runtime dependencies cleanly separated.

// FIXME: File-wide suppressions are unavoidable here. Clap and OrthoConfig derive macros
// inject generated code throughout the module, and there is no mechanism to narrow
// the scope without restructuring the crate.
#![expect(
    non_snake_case,
    reason = "Clap/OrthoConfig derive macros generate helper modules with uppercase names"
)]
#![expect(
    missing_docs,
    reason = "OrthoConfig and Clap derive macros generate items that cannot be documented"
)]

use clap::{Args, Parser, Subcommand};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Batch sweep defaults
//
// The outer range bounds `n`, the total number of signers. The inner range is
// shared by n', t and t'. Models for n = 7 already take ProVerif a long time;
// n = 8 does not terminate in practice, so the default stays well below it.
// ────────────────────────────────────────────────────────────────────────────

/// Smallest signer count visited by a batch sweep.
pub const DEFAULT_N_MIN: usize = 1;
/// Largest signer count visited by a batch sweep.
pub const DEFAULT_N_MAX: usize = 5;
/// Lower bound shared by n', t and t' during a batch sweep.
pub const DEFAULT_INNER_MIN: usize = 1;
/// Upper bound shared by n', t and t' during a batch sweep.
pub const DEFAULT_INNER_MAX: usize = 8;
/// Name of the shell script listing one verifier invocation per model.
pub const DEFAULT_DRIVER_SCRIPT: &str = "run_proverif";
/// Directory, relative to the driver script, that receives verifier logs.
pub const DEFAULT_LOG_DIR: &str = "output";
/// Verifier executable invoked by the driver script.
pub const DEFAULT_VERIFIER: &str = "proverif";

/// Arguments for the `generate` subcommand.
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "SYMBOLON_")]
pub struct GenerateArgs {
    /// Parameter tuple `(n,n',t,t')`, for example `(5,2,3,1)`.
    #[arg(long)]
    pub params: Option<String>,
    /// Output file. Defaults to `symbolon_<n>_<n'>_<t>_<t'>.pv`.
    #[arg(long)]
    pub output_file: Option<String>,
}

/// Arguments for the `batch` subcommand.
#[derive(Parser, OrthoConfig, Deserialize, Serialize, Default, Debug, Clone)]
#[ortho_config(prefix = "SYMBOLON_")]
pub struct BatchArgs {
    /// Smallest total signer count `n` to sweep.
    #[arg(long)]
    pub n_min: Option<usize>,
    /// Largest total signer count `n` to sweep.
    #[arg(long)]
    pub n_max: Option<usize>,
    /// Lower bound for n', t and t'.
    #[arg(long)]
    pub inner_min: Option<usize>,
    /// Upper bound for n', t and t'.
    #[arg(long)]
    pub inner_max: Option<usize>,
    /// Driver script file name.
    #[arg(long)]
    pub driver_script: Option<String>,
    /// Directory the driver script writes verifier logs into.
    #[arg(long)]
    pub log_dir: Option<String>,
}

/// CLI subcommands exposed by `symbolon`.
#[derive(Subcommand, Deserialize, Serialize, Debug, Clone)]
pub enum Commands {
    /// Generate a single model for one parameter tuple.
    #[command(name = "generate")]
    Generate(GenerateArgs),
    /// Generate a model for every valid tuple in the configured ranges.
    #[command(name = "batch")]
    Batch(BatchArgs),
}

/// Runtime configuration shared by all subcommands.
///
/// Both flags are global, so they may appear before or after the subcommand.
#[derive(Args, OrthoConfig, Serialize, Deserialize, Default, Debug, Clone)]
#[ortho_config(prefix = "SYMBOLON_")]
pub struct AppConfig {
    /// Directory that receives generated models and the driver script.
    #[ortho_config(default = ".".to_owned())]
    #[arg(long, global = true, default_value_t = String::from("."))]
    pub output_dir: String,
    /// Verifier executable named in the driver script.
    #[ortho_config(default = DEFAULT_VERIFIER.to_owned())]
    #[arg(long, global = true, default_value_t = String::from(DEFAULT_VERIFIER))]
    pub verifier: String,
}

/// Top-level CLI entry point consumed by binaries.
#[derive(Parser, Deserialize, Serialize, Debug, Clone)]
#[command(
    name = "symbolon",
    about = "Generate ProVerif models of the Symbolon authentication system",
    after_help = "Example: symbolon generate --params '(5,2,3,1)' --output-file \
                  symbolon_5_2_3_1.pv"
)]
pub struct Cli {
    /// Application configuration.
    #[command(flatten)]
    pub config: AppConfig,
    /// Requested mode.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
