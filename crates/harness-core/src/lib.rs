//! harness-core: lifecycle-managed test harness.
//!
//! Everything a catalogue of isolated, fixture-based cases needs: assertion
//! primitives with fatal and non-fatal severities, the [`Environment`] and
//! [`Fixture`] lifecycle traits, suites with name filters, a sequential
//! [`Runner`], reports and configuration.
//!
//! # Lifecycle
//!
//! ```text
//! Environment::set_up
//!   for each selected case:
//!     Fixture::set_up ──► body(&mut fixture, &mut Checker) ──► Fixture::tear_down
//! Environment::tear_down
//! ```

pub mod assertion;
pub mod config;
pub mod environment;
pub mod error;
pub mod fixture;
pub mod report;
pub mod runner;
pub mod suite;

pub use assertion::{Abort, CaseResult, Checker, Failure, Severity};
pub use environment::Environment;
pub use error::HarnessError;
pub use fixture::{Fixture, Phase};
pub use report::{CaseReport, ConsoleReporter, Outcome, Reporter, RunReport, Silent};
pub use runner::{RunOptions, Runner};
pub use suite::{Filter, Suite, TestCase};
