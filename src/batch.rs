//! Batch generation over a range of parameter tuples.
//!
//! A sweep visits `n` in the outer range and `n'`, `t`, `t'` in the shared
//! inner range, nested in that order. Tuples that violate the parameter
//! invariants are skipped. Each surviving tuple produces one model file and
//! one line in the driver script, in the same order.

use std::{io, io::Write as _, ops::RangeInclusive};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{
    ambient_authority,
    fs_utf8::{Dir, OpenOptions},
};
use cli_defs::{DEFAULT_DRIVER_SCRIPT, DEFAULT_LOG_DIR, DEFAULT_VERIFIER};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    model::ModelError,
    params::Parameters,
    synth::{synthesize, write_model},
};

/// Errors raised during a batch sweep.
#[derive(Debug, Error)]
pub enum BatchError {
    /// A range has its lower bound above its upper bound.
    #[error("empty {name} range {start}..={end}")]
    EmptyRange {
        /// Which range was empty.
        name: &'static str,
        /// Configured lower bound.
        start: usize,
        /// Configured upper bound.
        end: usize,
    },
    /// Model generation failed for a tuple.
    #[error("failed to generate model {params}")]
    Model {
        /// Tuple being generated.
        params: Parameters,
        /// Underlying failure.
        #[source]
        source: ModelError,
    },
    /// Filesystem access failed.
    #[error("failed to write {path}")]
    Io {
        /// File or directory being accessed.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
}

/// Bounds and output locations for a sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SweepConfig {
    /// Values of `n` to visit.
    pub n_range: RangeInclusive<usize>,
    /// Values of `n'`, `t` and `t'` to visit.
    pub inner_range: RangeInclusive<usize>,
    /// Directory receiving models and the driver script.
    pub output_dir: Utf8PathBuf,
    /// Driver script file name, relative to `output_dir`.
    pub driver_script: String,
    /// Log directory named in the driver script.
    pub log_dir: String,
    /// Verifier executable named in the driver script.
    pub verifier: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            n_range: cli_defs::DEFAULT_N_MIN..=cli_defs::DEFAULT_N_MAX,
            inner_range: cli_defs::DEFAULT_INNER_MIN..=cli_defs::DEFAULT_INNER_MAX,
            output_dir: Utf8PathBuf::from("."),
            driver_script: DEFAULT_DRIVER_SCRIPT.to_owned(),
            log_dir: DEFAULT_LOG_DIR.to_owned(),
            verifier: DEFAULT_VERIFIER.to_owned(),
        }
    }
}

impl SweepConfig {
    fn check_ranges(&self) -> Result<(), BatchError> {
        for (name, range) in [("n", &self.n_range), ("inner", &self.inner_range)] {
            if range.is_empty() {
                return Err(BatchError::EmptyRange {
                    name,
                    start: *range.start(),
                    end: *range.end(),
                });
            }
        }
        Ok(())
    }

    /// Valid tuples in sweep order.
    #[must_use]
    pub fn tuples(&self) -> Vec<Parameters> {
        let inner = self.inner_range.clone();
        let mut out = Vec::new();
        for n in self.n_range.clone() {
            for np in inner.clone() {
                for t in inner.clone() {
                    for tp in inner.clone() {
                        if let Ok(params) = Parameters::new(n, np, t, tp) {
                            out.push(params);
                        }
                    }
                }
            }
        }
        out
    }

    /// Driver script line for one model.
    #[must_use]
    pub fn driver_line(&self, params: &Parameters) -> String {
        format!(
            "{} {} | tee {}/{}\n",
            self.verifier,
            params.default_model_file(),
            self.log_dir,
            params.log_file_name()
        )
    }
}

/// What a sweep produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tuples generated, in sweep order.
    pub generated: Vec<Parameters>,
    /// Path of the driver script.
    pub driver_script: Utf8PathBuf,
}

fn io_err(path: &Utf8Path) -> impl FnOnce(io::Error) -> BatchError + '_ {
    move |source| BatchError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Generate every valid tuple in `config` and the matching driver script.
///
/// The driver script is truncated first and then appended to once per model,
/// so a failed sweep leaves a script that lists exactly the models written.
///
/// # Errors
///
/// Returns [`BatchError::EmptyRange`] for inverted ranges, or the first
/// generation or I/O failure.
pub fn run_sweep(config: &SweepConfig) -> Result<SweepReport, BatchError> {
    config.check_ranges()?;
    let dir = Dir::open_ambient_dir(&config.output_dir, ambient_authority())
        .map_err(io_err(&config.output_dir))?;
    let script_path = config.output_dir.join(&config.driver_script);
    dir.write(&config.driver_script, "")
        .map_err(io_err(&script_path))?;

    let mut report = SweepReport {
        generated: Vec::new(),
        driver_script: script_path.clone(),
    };
    for params in config.tuples() {
        info!(%params, "generating model");
        let artifact = synthesize(&params).map_err(|source| BatchError::Model { params, source })?;
        let model_file = params.default_model_file();
        write_model(&dir, Utf8Path::new(&model_file), &artifact)
            .map_err(io_err(&config.output_dir.join(&model_file)))?;

        let mut script = dir
            .open_with(&config.driver_script, OpenOptions::new().append(true))
            .map_err(io_err(&script_path))?;
        script
            .write_all(config.driver_line(&params).as_bytes())
            .map_err(io_err(&script_path))?;
        debug!(%params, file = %model_file, "appended driver line");
        report.generated.push(params);
    }
    info!(
        models = report.generated.len(),
        script = %report.driver_script,
        "sweep complete"
    );
    Ok(report)
}
