use bpsweep::config::Config;
use bpsweep::sweep::{self, ProcessSpawner, SweepPlan};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match Config::get() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let plan = SweepPlan::from(&config);
    let results = sweep::run_sweep(&plan, &ProcessSpawner);

    if sweep::report(&results) == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}
