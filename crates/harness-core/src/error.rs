//! Error type for the harness itself (not for assertion failures, which are
//! recorded by the [`Checker`](crate::assertion::Checker)).

use thiserror::Error;

/// Errors raised while configuring or driving a run.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A fixture could not be built. The case is reported as failed and its
    /// body is skipped.
    #[error("fixture set-up failed: {0}")]
    SetUp(String),

    /// The environment was asked for shared state before `set_up` or after
    /// `tear_down`.
    #[error("environment is not ready ({0})")]
    EnvironmentNotReady(&'static str),

    /// A `--filter` expression could not be compiled.
    #[error("invalid filter {pattern:?}: {source}")]
    InvalidFilter {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// `repeat` must run the selection at least once.
    #[error("repeat count must be at least 1")]
    ZeroRepeat,

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}
