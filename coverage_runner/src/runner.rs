//! Sequential, fail-fast execution of the coverage plan.

use std::io;
use std::process::{Command, ExitStatus};
use std::time::Instant;

use tracing::{info, warn};

use crate::config::RunConfig;
use crate::coverage_data;
use crate::error::{RunError, RunResult};
use crate::steps::{Invocation, Step};

/// How a child process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Exited(i32),
    Signaled(Option<i32>),
}

impl StepOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::Exited(code),
            None => Self::Signaled(termination_signal(&status)),
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn termination_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Launches one invocation and blocks until it finishes.
pub trait StepExecutor {
    fn execute(&mut self, invocation: &Invocation) -> io::Result<StepOutcome>;
}

/// Spawns real child processes with inherited stdio.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl StepExecutor for ProcessExecutor {
    fn execute(&mut self, invocation: &Invocation) -> io::Result<StepOutcome> {
        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.envs.iter().map(|(k, v)| (k, v)))
            .current_dir(&invocation.current_dir)
            .status()?;
        Ok(StepOutcome::from_status(status))
    }
}

pub struct Runner {
    config: RunConfig,
    plan: Vec<Invocation>,
}

impl Runner {
    pub fn new(config: RunConfig, plan: Vec<Invocation>) -> Self {
        Self { config, plan }
    }

    /// Runs every step in order, stopping at the first one that does not
    /// exit successfully.
    pub fn run<E: StepExecutor>(&self, executor: &mut E) -> RunResult<()> {
        let start = Instant::now();
        info!(
            project_root = %self.config.project_root().display(),
            steps = self.plan.len(),
            "Starting coverage run"
        );

        for invocation in &self.plan {
            let step_start = Instant::now();
            info!(step = %invocation.step, command = %invocation.command_line(), "Running step");

            let outcome = executor
                .execute(invocation)
                .map_err(|err| RunError::launch(invocation.step, &invocation.program, err))?;
            match outcome {
                StepOutcome::Exited(0) => {}
                StepOutcome::Exited(code) => {
                    return Err(RunError::StepFailed {
                        step: invocation.step,
                        code,
                    });
                }
                StepOutcome::Signaled(signal) => {
                    return Err(RunError::Terminated {
                        step: invocation.step,
                        signal,
                    });
                }
            }

            info!(
                step = %invocation.step,
                elapsed_secs = step_start.elapsed().as_secs_f32(),
                "Step completed"
            );
            self.after_step(invocation.step);
        }

        info!(
            elapsed_secs = start.elapsed().as_secs_f32(),
            report = %self.config.report_entry().display(),
            "Coverage run completed"
        );
        Ok(())
    }

    fn after_step(&self, step: Step) {
        match step {
            Step::Test => {
                let build_dir = self.config.build_dir();
                let files = coverage_data::find_coverage_data(&build_dir);
                if files.is_empty() {
                    warn!(
                        build_dir = %build_dir.display(),
                        "No coverage data found; was the test binary built with profiling enabled?"
                    );
                } else {
                    info!(count = files.len(), "Found coverage data files");
                }
            }
            Step::Report => {
                let entry = self.config.report_entry();
                if entry.exists() {
                    info!(report = %entry.display(), "Coverage report written");
                } else {
                    warn!(report = %entry.display(), "Coverage report entry point is missing");
                }
            }
            Step::Clean | Step::Build | Step::Open => {}
        }
    }
}
