//! # Coverage Runner
//!
//! Produces an HTML coverage report for the crate in the current directory
//! using gcov-style profiling and `grcov`.
//!
//! ## How It Works
//!
//! Every step runs with an instrumented build environment:
//! - `CARGO_INCREMENTAL=0`
//! - `RUSTFLAGS="-Zprofile -Ccodegen-units=1 -Copt-level=0 -Clink-dead-code -Coverflow-checks=off -Zno-landing-pads"`
//!
//! and the steps are, in order:
//!
//! ```bash
//! cargo clean
//! cargo build
//! cargo test
//! grcov ./target/debug -s . -t html --llvm --branch --ignore-not-existing -o ./target/debug/coverage
//! open ./target/debug/coverage/index.html   # xdg-open on Linux
//! ```
//!
//! The first step that fails ends the run, and its exit code becomes the
//! runner's exit code.
//!
//! ## Troubleshooting
//!
//! If no coverage data is generated:
//! - `-Zprofile` requires a nightly toolchain (`rustup override set nightly`)
//! - Check `target/debug/deps` for `.gcda` files after `cargo test`

pub mod config;
pub mod coverage_data;
pub mod error;
pub mod runner;
pub mod steps;
pub mod toolchains;

pub use config::RunConfig;
pub use error::{RunError, RunResult};
pub use runner::{ProcessExecutor, Runner, StepExecutor, StepOutcome};
pub use steps::{plan, Invocation, Step};
pub use toolchains::Toolchain;
