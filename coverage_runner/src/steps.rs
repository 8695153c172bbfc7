//! The coverage workflow as an ordered plan of child-process invocations.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;

use crate::config::RunConfig;
use crate::toolchains::{Tool, Toolchain};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Clean,
    Build,
    Test,
    Report,
    Open,
}

impl Step {
    /// Execution order.
    pub const ALL: [Step; 5] = [Step::Clean, Step::Build, Step::Test, Step::Report, Step::Open];
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Clean => write!(f, "clean"),
            Self::Build => write!(f, "build"),
            Self::Test => write!(f, "test"),
            Self::Report => write!(f, "coverage report"),
            Self::Open => write!(f, "open report"),
        }
    }
}

/// A fully resolved child process for one step
#[derive(Debug, Clone)]
pub struct Invocation {
    pub step: Step,
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub envs: Vec<(OsString, OsString)>,
    pub current_dir: PathBuf,
}

impl Invocation {
    fn new(step: Step, tool: &Tool, config: &RunConfig) -> Self {
        Self {
            step,
            program: tool.program.clone(),
            args: tool.leading_args.clone(),
            envs: config
                .environment()
                .iter()
                .map(|(name, value)| (OsString::from(name), OsString::from(value)))
                .collect(),
            current_dir: config.project_root().to_path_buf(),
        }
    }

    fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Looks up a variable in the environment overlay.
    pub fn env(&self, name: &str) -> Option<&OsString> {
        self.envs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Builds the five invocations in execution order.
pub fn plan(config: &RunConfig, toolchain: &Toolchain) -> Vec<Invocation> {
    Step::ALL
        .iter()
        .map(|&step| match step {
            Step::Clean => Invocation::new(step, &toolchain.cargo, config).arg("clean"),
            Step::Build => Invocation::new(step, &toolchain.cargo, config).arg("build"),
            Step::Test => Invocation::new(step, &toolchain.cargo, config).arg("test"),
            Step::Report => Invocation::new(step, &toolchain.grcov, config)
                .arg(config.build_dir())
                .arg("-s")
                .arg(config.project_root())
                .arg("-t")
                .arg("html")
                .arg("--llvm")
                .arg("--branch")
                .arg("--ignore-not-existing")
                .arg("-o")
                .arg(config.report_dir()),
            Step::Open => Invocation::new(step, &toolchain.opener, config).arg(config.report_entry()),
        })
        .collect()
}
