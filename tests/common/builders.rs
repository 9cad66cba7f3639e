//! Builders for configs and run options.
//!
//! Designed for readability in tests; they panic on invalid input rather than
//! returning `Result`.

use harness_core::config::{ColorChoice, Config};
use harness_core::{Filter, RunOptions};
use std::path::Path;

/// Fluent builder over [`Config::defaults`] that never touches the user's
/// config file.
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = Config::defaults();
        config.run.seed = Some(2024);
        config.report.color = ColorChoice::Never;
        Self { config }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.run.seed = Some(seed);
        self
    }

    /// Leave the seed to the clock, as an unconfigured run does.
    pub fn unseeded(mut self) -> Self {
        self.config.run.seed = None;
        self
    }

    pub fn filter(mut self, filter: &str) -> Self {
        self.config.run.filter = filter.to_string();
        self
    }

    pub fn shuffle(mut self) -> Self {
        self.config.run.shuffle = true;
        self
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.config.run.repeat = repeat;
        self
    }

    pub fn also_run_disabled(mut self) -> Self {
        self.config.run.also_run_disabled = true;
        self
    }

    pub fn brief(mut self) -> Self {
        self.config.report.brief = true;
        self
    }

    pub fn output(mut self, path: &Path) -> Self {
        self.config.report.output = Some(path.to_path_buf());
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

/// Options selecting the cases matching `filter`.
pub fn options_with_filter(seed: u64, filter: &str) -> RunOptions {
    let mut options = RunOptions::new(seed);
    options.filter = Filter::parse(filter).expect("test filter must parse");
    options
}

/// Run the catalogue with `config`, capturing console output.
pub fn run_captured(config: &Config) -> (harness_core::RunReport, String) {
    let mut out = Vec::new();
    let report = collection_harness::run_catalogue(config, &mut out, false)
        .expect("catalogue run must not error");
    (report, String::from_utf8(out).expect("console output is UTF-8"))
}
