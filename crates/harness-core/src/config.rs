//! Configuration types for collection-harness.
//!
//! [`Config::load`] layers, from lowest to highest precedence: the embedded
//! defaults, `~/.config/collection-harness/config.toml` (or an explicit path),
//! and `COLLECTION_HARNESS_<SECTION>__<KEY>` environment variables.
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem or the environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[run]
filter            = "*"
shuffle           = false
repeat            = 1
also_run_disabled = false

[report]
color = "auto"
brief = false
"#;

const ENV_PREFIX: &str = "COLLECTION_HARNESS";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[run]` section: which cases run, in what order, how often.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default)]
    pub also_run_disabled: bool,
    /// Fixed seed for reproducing a run. Drawn from the clock when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_filter() -> String { "*".to_string() }
fn default_repeat() -> u32 { 1 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            shuffle: false,
            repeat: default_repeat(),
            also_run_disabled: false,
            seed: None,
        }
    }
}

/// `[report]` section: how results are presented.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub color: ColorChoice,
    /// Print only failures and the summary.
    #[serde(default)]
    pub brief: bool,
    /// Where to write the JSON report, if anywhere.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// Whether the console reporter emits ANSI colour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Colour when stdout is a terminal.
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_tty: bool) -> bool {
        match self {
            ColorChoice::Auto => is_tty,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" | "yes" => Ok(ColorChoice::Always),
            "never" | "no" => Ok(ColorChoice::Never),
            other => Err(format!("unknown colour choice {other:?}")),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the user config file (if any) and environment overrides on top of
    /// the built-in defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path())
    }

    /// Like [`Config::load`] but reads `path` instead of the default location.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("collection-harness")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
