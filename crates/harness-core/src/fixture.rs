//! Per-case fixture lifecycle.
//!
//! A fixture is built fresh for every case and consumed at the end of it:
//!
//! ```text
//! Uninitialized ──set_up──► Ready ──body──► Executed ──tear_down──► TornDown
//! ```
//!
//! Because [`Fixture::tear_down`] takes `self`, nothing built for one case can
//! outlive it or be observed by the next.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::HarnessError;

/// Isolated per-case state.
pub trait Fixture: Sized {
    /// Process-wide environment this fixture draws shared state from.
    type Env: Environment;

    /// Build the state for one case. Runs immediately before the body.
    fn set_up(env: &mut Self::Env) -> Result<Self, HarnessError>;

    /// Release the state. Runs after the body, whatever the body's outcome.
    fn tear_down(self, _env: &mut Self::Env) {}
}

/// Lifecycle phase of a single case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    Ready,
    Executed,
    TornDown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Uninitialized => write!(f, "uninitialized"),
            Phase::Ready => write!(f, "ready"),
            Phase::Executed => write!(f, "executed"),
            Phase::TornDown => write!(f, "torn-down"),
        }
    }
}
