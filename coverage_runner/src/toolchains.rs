//! Toolchain detection for the external programs the runner drives
//!
//! Each program is looked up on PATH:
//! - Build tool: `cargo`
//! - Coverage aggregator: `grcov`
//! - Document opener: `open` (macOS), `cmd /C start` (Windows), `xdg-open` (elsewhere)
//!
//! A program missing from PATH is kept by bare name so that the step which
//! needs it fails on launch, after the earlier steps have already run.

use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum ToolSource {
    Path,     // Found on PATH
    Fallback, // Not found, bare program name kept
}

impl std::fmt::Display for ToolSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Path => write!(f, "PATH"),
            Self::Fallback => write!(f, "unresolved"),
        }
    }
}

/// A resolved external program, plus any arguments that must precede the
/// step's own arguments.
#[derive(Debug, Clone)]
pub struct Tool {
    pub program: PathBuf,
    pub leading_args: Vec<OsString>,
    pub source: ToolSource,
}

impl Tool {
    /// A tool at a fixed location, bypassing PATH lookup.
    pub fn at(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
            source: ToolSource::Path,
        }
    }

    fn locate(name: &str) -> Self {
        match which::which(name) {
            Ok(program) => {
                debug!(tool = name, path = %program.display(), "Resolved tool on PATH");
                Self {
                    program,
                    leading_args: Vec::new(),
                    source: ToolSource::Path,
                }
            }
            Err(err) => {
                debug!(tool = name, error = %err, "Tool not found on PATH");
                Self {
                    program: PathBuf::from(name),
                    leading_args: Vec::new(),
                    source: ToolSource::Fallback,
                }
            }
        }
    }

    #[cfg_attr(not(windows), allow(dead_code))]
    fn with_leading_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.leading_args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// The detected set of external programs
#[derive(Debug, Clone)]
pub struct Toolchain {
    pub cargo: Tool,
    pub grcov: Tool,
    pub opener: Tool,
}

impl Toolchain {
    pub fn detect() -> Self {
        Self {
            cargo: Tool::locate("cargo"),
            grcov: Tool::locate("grcov"),
            opener: detect_opener(),
        }
    }
}

#[cfg(target_os = "macos")]
fn detect_opener() -> Tool {
    Tool::locate("open")
}

#[cfg(windows)]
fn detect_opener() -> Tool {
    // `start` is a cmd builtin; the empty string is its window title.
    Tool::locate("cmd").with_leading_args(["/C", "start", ""])
}

#[cfg(not(any(target_os = "macos", windows)))]
fn detect_opener() -> Tool {
    Tool::locate("xdg-open")
}
