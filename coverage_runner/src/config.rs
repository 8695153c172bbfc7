//! Fixed run configuration: the instrumentation environment and the
//! build/report locations derived from the project root.

use std::path::{Path, PathBuf};

/// Disables incremental compilation so every crate is rebuilt instrumented.
pub const INCREMENTAL_VAR: &str = "CARGO_INCREMENTAL";
pub const INCREMENTAL_VALUE: &str = "0";

/// Compiler flags for gcov-style profiling instrumentation.
///
/// - `-Zprofile`: emit `.gcno`/`.gcda` profiling data
/// - `-Ccodegen-units=1`, `-Copt-level=0`: keep line mapping exact
/// - `-Clink-dead-code`: keep unused functions so they report as uncovered
/// - `-Coverflow-checks=off`, `-Zno-landing-pads`: drop compiler-generated branches
pub const RUSTFLAGS_VAR: &str = "RUSTFLAGS";
pub const INSTRUMENTATION_RUSTFLAGS: &str = "-Zprofile -Ccodegen-units=1 -Copt-level=0 \
     -Clink-dead-code -Coverflow-checks=off -Zno-landing-pads";

const TARGET_DIR: &str = "target";
const PROFILE_DIR: &str = "debug";
const REPORT_DIR: &str = "coverage";
const REPORT_ENTRY: &str = "index.html";

#[derive(Debug, Clone)]
pub struct RunConfig {
    project_root: PathBuf,
}

impl RunConfig {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Environment overlay applied to every child process.
    pub fn environment(&self) -> [(&'static str, &'static str); 2] {
        [
            (INCREMENTAL_VAR, INCREMENTAL_VALUE),
            (RUSTFLAGS_VAR, INSTRUMENTATION_RUSTFLAGS),
        ]
    }

    /// Where `cargo build` places the instrumented artifacts.
    pub fn build_dir(&self) -> PathBuf {
        self.project_root.join(TARGET_DIR).join(PROFILE_DIR)
    }

    pub fn report_dir(&self) -> PathBuf {
        self.build_dir().join(REPORT_DIR)
    }

    pub fn report_entry(&self) -> PathBuf {
        self.report_dir().join(REPORT_ENTRY)
    }
}
