//! Command-line flags. Every flag is optional and, when given, overrides the
//! corresponding config value.

use std::path::PathBuf;

use clap::Parser;
use harness_core::config::{ColorChoice, Config};

#[derive(Debug, Parser)]
#[command(
    name = "collection-harness",
    about = "Run the managed-collection behavioural catalogue"
)]
pub struct Cli {
    /// Select cases by `Suite.Case` name: `POS1:POS2-NEG1:NEG2`, with `*`/`?` wildcards.
    #[arg(long)]
    pub filter: Option<String>,

    /// List the selected cases and exit without running them.
    #[arg(long)]
    pub list: bool,

    /// Randomise case order (reproducible with --seed).
    #[arg(long)]
    pub shuffle: bool,

    /// Run the selection this many times.
    #[arg(long)]
    pub repeat: Option<u32>,

    /// Fixed random seed; drawn from the clock when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also run cases that are disabled by default.
    #[arg(long)]
    pub also_run_disabled: bool,

    /// When to colour output: auto, always or never.
    #[arg(long)]
    pub color: Option<ColorChoice>,

    /// Print only failures and the summary.
    #[arg(long)]
    pub brief: bool,

    /// Write a JSON report to this path.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Read config from this file instead of ~/.config/collection-harness/config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write debug logs to <tmp>/collection-harness-debug.log.
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Layer the flags on top of `config`.
    pub fn apply(&self, config: &mut Config) {
        if let Some(filter) = &self.filter {
            config.run.filter = filter.clone();
        }
        if self.shuffle {
            config.run.shuffle = true;
        }
        if let Some(repeat) = self.repeat {
            config.run.repeat = repeat;
        }
        if let Some(seed) = self.seed {
            config.run.seed = Some(seed);
        }
        if self.also_run_disabled {
            config.run.also_run_disabled = true;
        }
        if let Some(color) = self.color {
            config.report.color = color;
        }
        if self.brief {
            config.report.brief = true;
        }
        if let Some(output) = &self.output {
            config.report.output = Some(output.clone());
        }
    }

    /// Config file first, then flags.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        self.apply(&mut config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::parse_from([
            "collection-harness",
            "--filter",
            "*Resiz*",
            "--repeat",
            "3",
            "--seed",
            "11",
            "--color",
            "never",
            "--brief",
        ]);
        let mut config = Config::defaults();
        cli.apply(&mut config);
        assert_eq!(config.run.filter, "*Resiz*");
        assert_eq!(config.run.repeat, 3);
        assert_eq!(config.run.seed, Some(11));
        assert_eq!(config.report.color, ColorChoice::Never);
        assert!(config.report.brief);
        assert!(!config.run.shuffle);
    }

    #[test]
    fn absent_flags_keep_config() {
        let cli = Cli::parse_from(["collection-harness"]);
        let mut config = Config::defaults();
        config.run.shuffle = true;
        cli.apply(&mut config);
        assert!(config.run.shuffle);
        assert_eq!(config.run.filter, "*");
    }

    #[test]
    fn bad_colour_is_rejected() {
        assert!(Cli::try_parse_from(["collection-harness", "--color", "purple"]).is_err());
    }
}
