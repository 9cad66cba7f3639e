//! Process-wide set-up and tear-down surrounding a whole run.

/// Global hook driven by the [`Runner`](crate::runner::Runner).
///
/// `set_up` is called exactly once, before the first fixture is built, and
/// `tear_down` exactly once, after the last fixture is torn down. The runner
/// takes the environment by value, so an environment serves a single run.
pub trait Environment {
    fn set_up(&mut self) {}

    fn tear_down(&mut self) {}
}

/// For fixtures that need no shared state.
impl Environment for () {}
