//! collection-harness: lifecycle-managed unit tests for a dynamic array.
//!
//! This crate wires the two workspace layers together so the binary and the
//! integration harnesses share one entry point.
//!
//! # Architecture
//!
//! ```text
//! Config + Cli ──► Runner(RandomEnvironment) ──► Suite<CollectionFixture>
//!                        │
//!                        └──► ConsoleReporter / JSON report
//! ```
//!
//! Everything runs on the calling thread, one case at a time.

pub mod cli;

use std::io::Write;

pub use harness_collection;
pub use harness_core;

use harness_collection::{clock_seed, suite, RandomEnvironment};
use harness_core::config::Config;
use harness_core::{ConsoleReporter, RunOptions, RunReport, Runner};

/// Seed the run will use: the configured one, or the clock.
pub fn resolve_seed(config: &Config) -> u64 {
    config.run.seed.unwrap_or_else(clock_seed)
}

fn runner(config: &Config, seed: u64) -> anyhow::Result<Runner<RandomEnvironment>> {
    let options = RunOptions::from_config(&config.run, seed)?;
    Ok(Runner::new(RandomEnvironment::with_seed(seed), options)?)
}

/// Run the catalogue, printing progress to `out`. Writes the JSON report too
/// when `report.output` is set.
pub fn run_catalogue(config: &Config, out: impl Write, is_tty: bool) -> anyhow::Result<RunReport> {
    let seed = resolve_seed(config);
    let mut reporter = ConsoleReporter::new(out)
        .with_color(config.report.color.enabled(is_tty))
        .brief(config.report.brief);

    let report = runner(config, seed)?.run(&suite(), &mut reporter)?;

    if let Some(path) = &config.report.output {
        report.write_json(path)?;
        tracing::info!(path = %path.display(), "wrote JSON report");
    }
    Ok(report)
}

/// Print the cases the config would select.
pub fn list_catalogue(config: &Config, mut out: impl Write) -> anyhow::Result<()> {
    let seed = resolve_seed(config);
    runner(config, seed)?.list(&suite(), &mut out)?;
    Ok(())
}
