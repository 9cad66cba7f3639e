//! harness-collection: the managed collection and its behavioural catalogue.
//!
//! - [`ManagedCollection`]: the dynamic array under test.
//! - [`RandomEnvironment`]: seeds the run's generator once.
//! - [`CollectionFixture`]: a fresh collection per case, plus `add_entries`.
//! - [`suite`]: the catalogue of cases, ready for a
//!   [`Runner`](harness_core::Runner).

pub mod catalogue;
pub mod collection;
pub mod environment;
pub mod fixture;

pub use catalogue::{suite, SUITE_NAME};
pub use collection::{CollectionError, ManagedCollection};
pub use environment::{clock_seed, RandomEnvironment};
pub use fixture::CollectionFixture;
