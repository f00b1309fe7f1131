//!
//! bpsweep batch-runs a gem5 binary over a set of control-flow microbenchmarks,
//! once per branch-predictor variant, and collects each run's exit status. It
//! owns no simulation logic itself: gem5 writes the stats files, bpsweep only
//! builds the command lines, bounds how many simulator processes run at once,
//! and reports which invocations failed.
//!
//! A failing run never aborts the sweep. Whatever exits non-zero (or never
//! starts at all) is reported at the end, next to the (workload, predictor)
//! pair that produced it.
//!

pub mod config;
pub mod error;
pub mod sweep;
