//! Process-wide randomness for the collection catalogue.

use harness_core::{Environment, HarnessError};
use rand::rngs::StdRng;
use rand::SeedableRng;

enum Seeding {
    Pending,
    Seeded { seed: u64, rng: StdRng },
    TornDown,
}

/// Seeds a generator once per run and hands every fixture its own fork of it.
///
/// Forking keeps fixtures from sharing generator state, so one case's draws
/// never depend on how many values an earlier case consumed.
pub struct RandomEnvironment {
    requested: Option<u64>,
    seeding: Seeding,
}

impl RandomEnvironment {
    /// Seed from the clock at `set_up`, so successive runs differ.
    pub fn from_clock() -> Self {
        Self {
            requested: None,
            seeding: Seeding::Pending,
        }
    }

    /// Seed with a fixed value, to reproduce a run.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            requested: Some(seed),
            seeding: Seeding::Pending,
        }
    }

    /// The seed in use, once set up.
    pub fn seed(&self) -> Option<u64> {
        match &self.seeding {
            Seeding::Seeded { seed, .. } => Some(*seed),
            _ => None,
        }
    }

    /// A generator for one fixture, derived from the run's generator.
    pub fn fork(&mut self) -> Result<StdRng, HarnessError> {
        match &mut self.seeding {
            Seeding::Seeded { rng, .. } => Ok(StdRng::from_rng(rng)),
            Seeding::Pending => Err(HarnessError::EnvironmentNotReady("not set up yet")),
            Seeding::TornDown => Err(HarnessError::EnvironmentNotReady("already torn down")),
        }
    }
}

impl Environment for RandomEnvironment {
    fn set_up(&mut self) {
        if matches!(self.seeding, Seeding::TornDown) {
            tracing::warn!("environment reused after tear-down; ignoring set_up");
            return;
        }
        let seed = self.requested.unwrap_or_else(clock_seed);
        tracing::info!(seed, "seeding random environment");
        self.seeding = Seeding::Seeded {
            seed,
            rng: StdRng::seed_from_u64(seed),
        };
    }

    fn tear_down(&mut self) {
        self.seeding = Seeding::TornDown;
    }
}

/// Microseconds since the Unix epoch; differs between any two runs.
pub fn clock_seed() -> u64 {
    chrono::Utc::now().timestamp_micros().unsigned_abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn fork_requires_set_up() {
        let mut env = RandomEnvironment::with_seed(1);
        assert!(env.fork().is_err());
        assert_eq!(env.seed(), None);

        env.set_up();
        assert_eq!(env.seed(), Some(1));
        assert!(env.fork().is_ok());

        env.tear_down();
        assert!(env.fork().is_err());
        env.set_up();
        assert!(env.fork().is_err(), "a torn-down environment is never reused");
    }

    #[test]
    fn same_seed_same_forks() {
        let draws = |seed| {
            let mut env = RandomEnvironment::with_seed(seed);
            env.set_up();
            let mut a = env.fork().unwrap();
            let mut b = env.fork().unwrap();
            (a.random::<u64>(), b.random::<u64>())
        };
        assert_eq!(draws(99), draws(99));
        let (a, b) = draws(99);
        assert_ne!(a, b, "sibling forks are independent streams");
    }

    #[test]
    fn clock_seed_uses_current_time() {
        assert!(clock_seed() > 0);
    }

    #[test]
    fn clock_environment_is_seeded_at_set_up() {
        let mut env = RandomEnvironment::from_clock();
        assert_eq!(env.seed(), None);

        env.set_up();
        assert!(env.seed().is_some());
        assert!(env.fork().is_ok());
    }

    #[test]
    fn clock_environments_differ_between_runs() {
        let seed = || {
            let mut env = RandomEnvironment::from_clock();
            env.set_up();
            env.seed()
        };
        let first = seed();
        std::thread::sleep(std::time::Duration::from_millis(2));
        assert_ne!(first, seed());
    }
}
