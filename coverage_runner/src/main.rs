use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use coverage_runner::{plan, ProcessExecutor, RunConfig, Runner, Toolchain};

/// Clean, rebuild with profiling instrumentation, test, and open an HTML
/// coverage report for the crate in the current directory.
#[derive(Parser, Debug)]
#[command(name = "coverage_runner", author, version, about, long_about = None)]
struct Cli {}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let _cli = Cli::parse();
    init_tracing();

    let project_root = std::env::current_dir().context("Failed to determine project root")?;
    let config = RunConfig::new(project_root);
    let toolchain = Toolchain::detect();
    let runner = Runner::new(config.clone(), plan(&config, &toolchain));

    if let Err(err) = runner.run(&mut ProcessExecutor) {
        error!(step = %err.step(), error = %err, "Coverage run failed");
        std::process::exit(err.exit_code());
    }

    Ok(())
}
