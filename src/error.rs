//! Errors that stop a sweep before any simulator process starts.
//! Per-run failures are not errors: they are carried in
//! [`RunResult`](crate::sweep::RunResult)s so the rest of the sweep keeps going.

use owo_colors::OwoColorize;
use thiserror::Error;

/// Problems found while resolving CLI flags and `bpsweep.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse '{}': {1}", .0.bright_blue())]
    BadConfigFile(String, toml::de::Error),

    #[error("The benchmark list is empty. Pass workloads with '{}'", "--benchmarks".bright_blue())]
    NoBenchmarks,

    #[error("The predictor list is empty. Pass variants with '{}'", "--predictors".bright_blue())]
    NoPredictors,

    #[error("'{}' must be at least 1", "--jobs".bright_yellow())]
    ZeroJobs,
}
