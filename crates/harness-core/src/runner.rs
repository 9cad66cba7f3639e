//! Drives a suite: environment once, then set-up, body and tear-down for every
//! selected case, strictly one case at a time.

use std::io::{self, Write};
use std::time::Instant;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::assertion::Checker;
use crate::config::RunConfig;
use crate::environment::Environment;
use crate::error::HarnessError;
use crate::fixture::{Fixture, Phase};
use crate::report::{CaseReport, Outcome, Reporter, RunPlan, RunReport};
use crate::suite::{Filter, Suite, TestCase};

/// Knobs for a single run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub filter: Filter,
    pub shuffle: bool,
    pub repeat: u32,
    pub also_run_disabled: bool,
    /// Seeds the shuffle order. Reported so a run can be reproduced.
    pub seed: u64,
}

impl RunOptions {
    /// Every enabled case, once, in registration order.
    pub fn new(seed: u64) -> Self {
        Self {
            filter: Filter::default(),
            shuffle: false,
            repeat: 1,
            also_run_disabled: false,
            seed,
        }
    }

    pub fn from_config(run: &RunConfig, seed: u64) -> Result<Self, HarnessError> {
        Ok(Self {
            filter: Filter::parse(&run.filter)?,
            shuffle: run.shuffle,
            repeat: run.repeat,
            also_run_disabled: run.also_run_disabled,
            seed,
        })
    }
}

/// The cases a run will execute, plus how many matching cases were skipped
/// for being disabled.
#[derive(Debug)]
pub struct Selection<'s, F> {
    pub cases: Vec<&'s TestCase<F>>,
    pub disabled: usize,
}

/// Owns the environment for exactly one run; [`Runner::run`] consumes it.
pub struct Runner<E> {
    env: E,
    options: RunOptions,
}

impl<E: Environment> Runner<E> {
    pub fn new(env: E, options: RunOptions) -> Result<Self, HarnessError> {
        if options.repeat == 0 {
            return Err(HarnessError::ZeroRepeat);
        }
        Ok(Self { env, options })
    }

    pub fn options(&self) -> &RunOptions {
        &self.options
    }

    /// Apply the filter and the disabled rule to `suite`.
    pub fn select<'s, F>(&self, suite: &'s Suite<F>) -> Selection<'s, F> {
        let mut selection = Selection {
            cases: Vec::new(),
            disabled: 0,
        };
        for case in suite.cases() {
            if !self.options.filter.matches(&suite.full_name(case)) {
                continue;
            }
            if case.is_disabled() && !self.options.also_run_disabled {
                selection.disabled += 1;
            } else {
                selection.cases.push(case);
            }
        }
        selection
    }

    /// Print the selected case names, grouped under the suite name.
    pub fn list<F>(&self, suite: &Suite<F>, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}.", suite.name())?;
        for case in self.select(suite).cases {
            writeln!(out, "  {}", case.name())?;
        }
        Ok(())
    }

    /// Run the selection. Assertion failures end up in the report; only
    /// reporter I/O errors surface as `Err`. Such an error stops the run, but
    /// an environment that was set up is still torn down first.
    pub fn run<F>(self, suite: &Suite<F>, reporter: &mut dyn Reporter) -> Result<RunReport, HarnessError>
    where
        F: Fixture<Env = E>,
    {
        let started_at = Utc::now();
        let clock = Instant::now();
        let selection = self.select(suite);
        let Runner { mut env, options } = self;

        let plan = RunPlan {
            suite: suite.name().to_string(),
            seed: options.seed,
            cases: selection.cases.len(),
            iterations: options.repeat,
            filter: options.filter.as_str().to_string(),
            shuffle: options.shuffle,
        };
        tracing::info!(
            suite = suite.name(),
            cases = plan.cases,
            disabled = selection.disabled,
            iterations = plan.iterations,
            seed = plan.seed,
            "run started"
        );
        reporter.run_started(&plan)?;

        reporter.iteration_started(0, &plan)?;
        reporter.environment_set_up()?;
        env.set_up();
        tracing::debug!("environment set up");

        let mut cases = Vec::new();
        let outcome = run_iterations(
            &mut env,
            suite,
            &selection.cases,
            &options,
            &plan,
            reporter,
            &mut cases,
        )
        .and_then(|()| reporter.environment_tear_down());

        env.tear_down();
        tracing::debug!("environment torn down");
        if let Err(err) = outcome {
            tracing::warn!(error = %err, ran = cases.len(), "reporter failed, run stopped early");
            return Err(err.into());
        }

        let report = RunReport {
            started_at,
            seed: options.seed,
            filter: plan.filter,
            suite: plan.suite,
            iterations: options.repeat,
            cases,
            disabled: selection.disabled,
            elapsed_ms: elapsed_ms(clock),
        };
        tracing::info!(
            passed = report.passed_count(),
            failed = report.failed_count(),
            "run finished"
        );
        reporter.run_finished(&report)?;
        Ok(report)
    }
}

/// Every iteration of the selection. Iteration 0 was announced before the
/// environment was set up. Stops at the first reporter error.
fn run_iterations<F: Fixture>(
    env: &mut F::Env,
    suite: &Suite<F>,
    selection: &[&TestCase<F>],
    options: &RunOptions,
    plan: &RunPlan,
    reporter: &mut dyn Reporter,
    cases: &mut Vec<CaseReport>,
) -> io::Result<()> {
    let mut order_rng = StdRng::seed_from_u64(options.seed);
    for iteration in 0..options.repeat {
        if iteration > 0 {
            reporter.iteration_started(iteration, plan)?;
        }
        let mut order = selection.to_vec();
        if options.shuffle {
            order.shuffle(&mut order_rng);
        }
        for case in order {
            reporter.case_started(suite.name(), case.name())?;
            let report = run_case(env, suite, case, iteration);
            reporter.case_finished(&report)?;
            cases.push(report);
        }
    }
    Ok(())
}

fn run_case<F: Fixture>(
    env: &mut F::Env,
    suite: &Suite<F>,
    case: &TestCase<F>,
    iteration: u32,
) -> CaseReport {
    let span = tracing::info_span!("case", suite = suite.name(), case = case.name(), iteration);
    let _guard = span.enter();
    let clock = Instant::now();
    let mut checker = Checker::new();

    let phase = match F::set_up(env) {
        Ok(mut fixture) => {
            tracing::debug!(phase = %Phase::Ready, "fixture set up");
            let aborted = case.run(&mut fixture, &mut checker).is_err();
            tracing::debug!(phase = %Phase::Executed, aborted, "body finished");
            fixture.tear_down(env);
            tracing::debug!(phase = %Phase::TornDown, "fixture torn down");
            Phase::TornDown
        }
        Err(err) => {
            tracing::warn!(error = %err, "fixture set-up failed");
            checker.record_set_up_error(&err);
            Phase::Uninitialized
        }
    };

    let aborted = checker.aborted();
    let failures = checker.into_failures();
    CaseReport {
        suite: suite.name().to_string(),
        name: case.name().to_string(),
        iteration,
        outcome: if failures.is_empty() {
            Outcome::Passed
        } else {
            Outcome::Failed
        },
        aborted,
        phase,
        failures,
        elapsed_ms: elapsed_ms(clock),
    }
}

fn elapsed_ms(clock: Instant) -> u64 {
    u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
