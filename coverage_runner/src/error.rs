use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::steps::Step;

/// Exit code a shell reports for a command that cannot be found.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code a shell reports for a command found but not executable.
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("{step} step exited with status {code}")]
    StepFailed { step: Step, code: i32 },
    #[error("{step} step was terminated by {}", describe_signal(.signal))]
    Terminated { step: Step, signal: Option<i32> },
    #[error("failed to launch {program:?} for {step} step: {source}")]
    Launch {
        step: Step,
        program: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type RunResult<T> = Result<T, RunError>;

impl RunError {
    pub fn launch(step: Step, program: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Launch {
            step,
            program: program.into(),
            source,
        }
    }

    pub fn step(&self) -> Step {
        match self {
            Self::StepFailed { step, .. } | Self::Terminated { step, .. } | Self::Launch { step, .. } => {
                *step
            }
        }
    }

    /// Process exit code to report for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::StepFailed { code, .. } => *code,
            Self::Terminated {
                signal: Some(signal),
                ..
            } => 128 + signal,
            Self::Terminated { signal: None, .. } => 1,
            Self::Launch { source, .. } if source.kind() == io::ErrorKind::NotFound => EXIT_NOT_FOUND,
            Self::Launch { .. } => EXIT_NOT_EXECUTABLE,
        }
    }
}

fn describe_signal(signal: &Option<i32>) -> String {
    match signal {
        Some(signal) => format!("signal {signal}"),
        None => "an unknown signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn run_error__step_failed__then_exit_code_matches_child() {
        let err = RunError::StepFailed {
            step: Step::Build,
            code: 101,
        };

        assert_eq!(err.exit_code(), 101);
        assert_eq!(err.step(), Step::Build);
        assert_eq!(err.to_string(), "build step exited with status 101");
    }

    #[test]
    fn run_error__terminated_by_signal__then_exit_code_is_128_plus_signal() {
        let err = RunError::Terminated {
            step: Step::Test,
            signal: Some(9),
        };

        assert_eq!(err.exit_code(), 137);
        assert!(err.to_string().contains("signal 9"));
    }

    #[test]
    fn run_error__terminated_without_signal__then_exit_code_is_one() {
        let err = RunError::Terminated {
            step: Step::Test,
            signal: None,
        };

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("unknown signal"));
    }

    #[test]
    fn run_error__launch_not_found__then_exit_code_127() {
        let err = RunError::launch(
            Step::Report,
            "grcov",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );

        assert_eq!(err.exit_code(), 127);
        assert_eq!(err.step(), Step::Report);
        let message = err.to_string();
        assert!(message.contains("grcov"));
        assert!(message.contains("coverage report"));
    }

    #[test]
    fn run_error__launch_permission_denied__then_exit_code_126() {
        let err = RunError::launch(
            Step::Open,
            "/usr/bin/xdg-open",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        assert_eq!(err.exit_code(), 126);
        assert!(std::error::Error::source(&err).is_some());
    }
}
