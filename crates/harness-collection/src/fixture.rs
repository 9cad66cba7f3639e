//! Per-case fixture owning one [`ManagedCollection`].

use harness_core::{Fixture, HarnessError};
use rand::rngs::StdRng;
use rand::Rng;

use crate::collection::ManagedCollection;
use crate::environment::RandomEnvironment;

/// Exclusive owner of a fresh, empty collection for the length of one case.
pub struct CollectionFixture {
    collection: ManagedCollection,
    rng: StdRng,
}

impl CollectionFixture {
    /// Build a fixture outside a runner, e.g. for benches.
    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            collection: ManagedCollection::new(),
            rng,
        }
    }

    pub fn collection(&self) -> &ManagedCollection {
        &self.collection
    }

    pub fn collection_mut(&mut self) -> &mut ManagedCollection {
        &mut self.collection
    }

    /// The collection exists and its size bounds hold.
    pub fn is_valid(&self) -> bool {
        self.collection.invariants_hold()
    }

    /// Append `count` pseudo-random values in `[0, 99]`.
    ///
    /// # Panics
    ///
    /// When `count` is zero. That is a bug in the calling case, not a
    /// test outcome.
    pub fn add_entries(&mut self, count: usize) {
        assert!(count > 0, "add_entries requires a positive count");
        for _ in 0..count {
            self.collection.push_back(self.rng.random_range(0..100));
        }
    }
}

impl Fixture for CollectionFixture {
    type Env = RandomEnvironment;

    fn set_up(env: &mut RandomEnvironment) -> Result<Self, HarnessError> {
        Ok(Self::with_rng(env.fork()?))
    }

    fn tear_down(mut self, _env: &mut RandomEnvironment) {
        tracing::trace!(size = self.collection.size(), "clearing collection");
        self.collection.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_core::Environment;
    use rand::SeedableRng;

    fn fixture() -> CollectionFixture {
        CollectionFixture::with_rng(StdRng::seed_from_u64(5))
    }

    #[test]
    fn set_up_yields_empty_collection() {
        let mut env = RandomEnvironment::with_seed(3);
        env.set_up();
        let f = CollectionFixture::set_up(&mut env).unwrap();
        assert!(f.collection().empty());
        assert!(f.is_valid());
        f.tear_down(&mut env);
    }

    #[test]
    fn set_up_before_environment_fails() {
        let mut env = RandomEnvironment::with_seed(3);
        assert!(CollectionFixture::set_up(&mut env).is_err());
    }

    #[test]
    fn add_entries_appends_in_range() {
        let mut f = fixture();
        f.add_entries(50);
        f.add_entries(50);
        assert_eq!(f.collection().size(), 100);
        assert!(f.collection().iter().all(|v| (0..=99).contains(v)));
    }

    #[test]
    #[should_panic(expected = "add_entries requires a positive count")]
    fn add_entries_rejects_zero() {
        fixture().add_entries(0);
    }
}
