//! The subprocess seam of the sweep runner. Production code launches real
//! OS processes through [`ProcessSpawner`]; tests substitute a fake.

use std::process::Command;

/// Outcome of one simulator invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    /// The process ran to completion and reported this exit code
    Exited(i32),
    /// The process was killed by a signal before reporting an exit code
    Signaled,
    /// The process could not be started at all
    SpawnFailed(String),
}

impl RunStatus {
    pub fn success(&self) -> bool {
        matches!(self, RunStatus::Exited(0))
    }
}

/// Launches one external process and blocks until it exits
pub trait Spawner: Sync {
    fn run(&self, program: &str, args: &[String]) -> RunStatus;
}

/// Spawns real processes. The child inherits stdio; nothing is captured,
/// only the exit status comes back.
#[derive(Debug, Default)]
pub struct ProcessSpawner;

impl Spawner for ProcessSpawner {
    fn run(&self, program: &str, args: &[String]) -> RunStatus {
        match Command::new(program).args(args).status() {
            Ok(status) => match status.code() {
                Some(code) => RunStatus::Exited(code),
                None => RunStatus::Signaled,
            },
            Err(e) => RunStatus::SpawnFailed(e.to_string()),
        }
    }
}
