//!
//! Enumerates the (benchmark, predictor) product and drives one simulator
//! process per pair, either sequentially or through a bounded pool of worker
//! threads. Every pair yields exactly one [`RunResult`]; a failing run is
//! recorded and the sweep moves on.
//!

mod spawner;

pub use spawner::{ProcessSpawner, RunStatus, Spawner};

use crate::config::Config;
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::path::Path;
use std::thread;

/// How each run's output artifacts are named
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Naming {
    /// Embed the predictor in the stats filename, so runs of the same
    /// benchmark under different predictors don't overwrite each other.
    /// When false, those runs share "<benchmark>-stats.txt" and whichever
    /// process finishes last wins.
    pub tag_predictor: bool,
    /// Also ask the simulator for config.ini/config.json snapshots
    pub dump_config: bool,
}

/// Everything one sweep needs, free of process-wide state
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub simulator: String,
    pub benchmarks: Vec<String>,
    pub predictors: Vec<String>,
    pub jobs: usize,
    pub benchmarks_dir: String,
    pub config_script: String,
    pub outdir: String,
    pub naming: Naming,
}

impl From<&Config> for SweepPlan {
    fn from(config: &Config) -> Self {
        Self {
            simulator: config.simulator.clone(),
            benchmarks: config.benchmarks.clone(),
            predictors: config.predictors.clone(),
            jobs: config.jobs,
            benchmarks_dir: config.benchmarks_dir.clone(),
            config_script: config.config_script.clone(),
            outdir: config.outdir.clone(),
            naming: Naming {
                tag_predictor: !config.untagged_stats,
                dump_config: config.dump_config,
            },
        }
    }
}

impl SweepPlan {
    /// Benchmark-major, predictor-minor enumeration of the whole product
    pub fn specs(&self) -> Vec<RunSpec> {
        let mut specs = Vec::with_capacity(self.benchmarks.len() * self.predictors.len());
        for benchmark in &self.benchmarks {
            for predictor in &self.predictors {
                specs.push(RunSpec::new(self, benchmark, predictor));
            }
        }
        specs
    }
}

/// One fully-resolved simulator invocation for a (benchmark, predictor) pair.
/// Immutable once built; nothing is shared between specs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSpec {
    pub benchmark: String,
    pub predictor: String,
    pub stats_file: String,
    pub args: Vec<String>,
}

impl RunSpec {
    fn new(plan: &SweepPlan, benchmark: &str, predictor: &str) -> Self {
        let stats_file = if plan.naming.tag_predictor {
            format!("{benchmark}-{predictor}-stats.txt")
        } else {
            format!("{benchmark}-stats.txt")
        };

        let workload = Path::new(&plan.benchmarks_dir).join(benchmark).join("bench");

        let mut args = vec![
            format!("--outdir={}", plan.outdir),
            format!("--stats-file={stats_file}"),
        ];
        if plan.naming.dump_config {
            args.push(format!("--dump-config={benchmark}-{predictor}-config.ini"));
            args.push(format!("--json-config={benchmark}-{predictor}-config.json"));
        }
        args.push(plan.config_script.clone());
        args.push(format!("--cmd={}", workload.display()));
        args.push(format!("--bp-type={predictor}"));

        Self {
            benchmark: benchmark.into(),
            predictor: predictor.into(),
            stats_file,
            args,
        }
    }
}

/// What came back from one pair's simulator process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub spec: RunSpec,
    pub status: RunStatus,
}

/// Runs every (benchmark, predictor) pair of the plan through the spawner and
/// returns one result per pair, in submission order.
///
/// With `jobs == 1` each invocation finishes before the next one starts. With
/// `jobs > 1` that many worker threads pull pairs off a shared queue, each
/// blocking on one child process at a time; completion order across workers is
/// unconstrained, but the returned Vec is still in submission order.
pub fn run_sweep<S: Spawner>(plan: &SweepPlan, spawner: &S) -> Vec<RunResult> {
    let specs = plan.specs();

    if plan.jobs <= 1 {
        return specs
            .into_iter()
            .map(|spec| execute(plan, spawner, spec))
            .collect();
    }

    let queue: Mutex<VecDeque<_>> = Mutex::new(specs.into_iter().enumerate().collect());
    let results = Mutex::new(Vec::new());

    thread::scope(|scope| {
        for _ in 0..plan.jobs {
            scope.spawn(|| loop {
                let Some((index, spec)) = queue.lock().pop_front() else {
                    break;
                };
                let result = execute(plan, spawner, spec);
                results.lock().push((index, result));
            });
        }
    });

    let mut results = results.into_inner();
    results.sort_unstable_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, result)| result).collect()
}

fn execute<S: Spawner>(plan: &SweepPlan, spawner: &S, spec: RunSpec) -> RunResult {
    println!("workload {}, bp {} start", spec.benchmark, spec.predictor);
    let status = spawner.run(&plan.simulator, &spec.args);
    RunResult { spec, status }
}

/// Prints every failing run and returns how many there were
pub fn report(results: &[RunResult]) -> usize {
    let mut failures = 0;
    for result in results {
        let pair = format!("workload {}, bp {}", result.spec.benchmark, result.spec.predictor);
        match &result.status {
            RunStatus::Exited(0) => {}
            RunStatus::Exited(code) => {
                eprintln!("{pair}: simulator exited with code {}", code.bright_yellow());
                failures += 1;
            }
            RunStatus::Signaled => {
                eprintln!("{pair}: simulator was {}", "killed by a signal".bright_yellow());
                failures += 1;
            }
            RunStatus::SpawnFailed(reason) => {
                eprintln!("{pair}: failed to start simulator: {}", reason.bright_yellow());
                failures += 1;
            }
        }
    }

    if failures == 0 {
        println!("completed");
    } else {
        println!("completed, {} of {} runs failed", failures, results.len());
    }
    failures
}
