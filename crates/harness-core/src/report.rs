//! Run results and the reporters that present them.
//!
//! A [`Reporter`] receives lifecycle events as the runner makes progress. The
//! [`ConsoleReporter`] prints the familiar bracketed progress lines:
//!
//! ```text
//! [==========] Running 15 tests from 1 test suite.
//! [----------] Global test environment set-up.
//! [ RUN      ] CollectionTest.IsEmptyOnCreate
//! [       OK ] CollectionTest.IsEmptyOnCreate (0 ms)
//! …
//! [  PASSED  ] 15 tests.
//! ```
//!
//! The finished [`RunReport`] is serializable; `write_json` persists it.

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use crossterm::style::{style, Color, Stylize};
use serde::{Deserialize, Serialize};

use crate::assertion::Failure;
use crate::error::HarnessError;
use crate::fixture::Phase;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
}

/// Result of one case in one iteration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseReport {
    pub suite: String,
    pub name: String,
    /// Zero-based repeat iteration.
    pub iteration: u32,
    pub outcome: Outcome,
    /// A fatal assertion (or a set-up error) cut the body short.
    pub aborted: bool,
    /// Last lifecycle phase reached. `TornDown` unless set-up failed.
    pub phase: Phase,
    pub failures: Vec<Failure>,
    pub elapsed_ms: u64,
}

impl CaseReport {
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.suite, self.name)
    }

    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub seed: u64,
    pub filter: String,
    pub suite: String,
    pub iterations: u32,
    pub cases: Vec<CaseReport>,
    /// Selected-by-filter cases skipped because they are disabled.
    pub disabled: usize,
    pub elapsed_ms: u64,
}

impl RunReport {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed_count(&self) -> usize {
        self.cases.iter().filter(|c| c.passed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.total() - self.passed_count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CaseReport> {
        self.cases.iter().filter(|c| !c.passed())
    }

    /// True when every executed case passed.
    pub fn success(&self) -> bool {
        self.cases.iter().all(CaseReport::passed)
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), HarnessError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// What is about to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunPlan {
    pub suite: String,
    pub seed: u64,
    /// Cases per iteration.
    pub cases: usize,
    pub iterations: u32,
    pub filter: String,
    pub shuffle: bool,
}

/// Receives lifecycle events from the runner. Every method defaults to a
/// no-op.
pub trait Reporter {
    fn run_started(&mut self, _plan: &RunPlan) -> io::Result<()> {
        Ok(())
    }

    fn iteration_started(&mut self, _iteration: u32, _plan: &RunPlan) -> io::Result<()> {
        Ok(())
    }

    fn environment_set_up(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn case_started(&mut self, _suite: &str, _name: &str) -> io::Result<()> {
        Ok(())
    }

    fn case_finished(&mut self, _case: &CaseReport) -> io::Result<()> {
        Ok(())
    }

    fn environment_tear_down(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn run_finished(&mut self, _report: &RunReport) -> io::Result<()> {
        Ok(())
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Reporter for Silent {}

// ---------------------------------------------------------------------------
// Console reporter
// ---------------------------------------------------------------------------

/// Human-readable progress on any writer.
pub struct ConsoleReporter<W> {
    out: W,
    color: bool,
    brief: bool,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            color: false,
            brief: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Only print failures and the final summary.
    pub fn brief(mut self, brief: bool) -> Self {
        self.brief = brief;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn tag(&mut self, tag: &str, color: Color, rest: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{} {rest}", style(tag).with(color))
        } else {
            writeln!(self.out, "{tag} {rest}")
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn run_started(&mut self, plan: &RunPlan) -> io::Result<()> {
        if plan.filter != "*" {
            writeln!(self.out, "Note: Test filter = {}", plan.filter)?;
        }
        if plan.shuffle {
            writeln!(self.out, "Note: Shuffling test order")?;
        }
        writeln!(self.out, "Note: Random seed = {}", plan.seed)?;
        Ok(())
    }

    fn iteration_started(&mut self, iteration: u32, plan: &RunPlan) -> io::Result<()> {
        if plan.iterations > 1 {
            writeln!(
                self.out,
                "\nRepeating all tests (iteration {}) . . .\n",
                iteration + 1
            )?;
        }
        let rest = format!("Running {} from 1 test suite.", plural(plan.cases, "test"));
        self.tag("[==========]", Color::Green, &rest)
    }

    fn environment_set_up(&mut self) -> io::Result<()> {
        self.tag("[----------]", Color::Green, "Global test environment set-up.")
    }

    fn case_started(&mut self, suite: &str, name: &str) -> io::Result<()> {
        if self.brief {
            return Ok(());
        }
        self.tag("[ RUN      ]", Color::Green, &format!("{suite}.{name}"))
    }

    fn case_finished(&mut self, case: &CaseReport) -> io::Result<()> {
        for failure in &case.failures {
            writeln!(self.out, "{failure}")?;
            writeln!(self.out)?;
        }
        let rest = format!("{} ({} ms)", case.full_name(), case.elapsed_ms);
        if case.passed() {
            if self.brief {
                return Ok(());
            }
            self.tag("[       OK ]", Color::Green, &rest)
        } else {
            self.tag("[  FAILED  ]", Color::Red, &rest)
        }
    }

    fn environment_tear_down(&mut self) -> io::Result<()> {
        writeln!(self.out)?;
        self.tag("[----------]", Color::Green, "Global test environment tear-down")
    }

    fn run_finished(&mut self, report: &RunReport) -> io::Result<()> {
        let rest = format!(
            "{} from 1 test suite ran. ({} ms total)",
            plural(report.total(), "test"),
            report.elapsed_ms
        );
        self.tag("[==========]", Color::Green, &rest)?;
        let rest = format!("{}.", plural(report.passed_count(), "test"));
        self.tag("[  PASSED  ]", Color::Green, &rest)?;

        let failed = report.failed_count();
        if failed > 0 {
            let rest = format!("{}, listed below:", plural(failed, "test"));
            self.tag("[  FAILED  ]", Color::Red, &rest)?;
            for case in report.failed() {
                self.tag("[  FAILED  ]", Color::Red, &case.full_name())?;
            }
            writeln!(self.out)?;
            let noun = if failed == 1 { "TEST" } else { "TESTS" };
            writeln!(self.out, "{failed:2} FAILED {noun}")?;
        }
        if report.disabled > 0 {
            let noun = if report.disabled == 1 { "TEST" } else { "TESTS" };
            writeln!(self.out, "  YOU HAVE {} DISABLED {noun}", report.disabled)?;
        }
        self.out.flush()
    }
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assertion::Severity;
    use pretty_assertions::assert_eq;

    fn case(name: &str, failures: Vec<Failure>) -> CaseReport {
        CaseReport {
            suite: "CollectionTest".into(),
            name: name.into(),
            iteration: 0,
            outcome: if failures.is_empty() {
                Outcome::Passed
            } else {
                Outcome::Failed
            },
            aborted: false,
            phase: Phase::TornDown,
            failures,
            elapsed_ms: 0,
        }
    }

    fn failure() -> Failure {
        Failure {
            severity: Severity::Fatal,
            expression: "Failed".into(),
            detail: Some("always".into()),
            file: "src/catalogue.rs".into(),
            line: 9,
        }
    }

    fn report(cases: Vec<CaseReport>, disabled: usize) -> RunReport {
        RunReport {
            started_at: DateTime::<Utc>::from_timestamp(0, 0).unwrap(),
            seed: 42,
            filter: "*".into(),
            suite: "CollectionTest".into(),
            iterations: 1,
            cases,
            disabled,
            elapsed_ms: 3,
        }
    }

    fn render(f: impl FnOnce(&mut ConsoleReporter<Vec<u8>>) -> io::Result<()>) -> String {
        let mut reporter = ConsoleReporter::new(Vec::new());
        f(&mut reporter).unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn counts() {
        let r = report(vec![case("A", vec![]), case("B", vec![failure()])], 1);
        assert_eq!(r.total(), 2);
        assert_eq!(r.passed_count(), 1);
        assert_eq!(r.failed_count(), 1);
        assert!(!r.success());
        let names: Vec<_> = r.failed().map(CaseReport::full_name).collect();
        assert_eq!(names, ["CollectionTest.B"]);
    }

    #[test]
    fn passing_case_line() {
        let out = render(|r| r.case_finished(&case("IsEmptyOnCreate", vec![])));
        insta::assert_snapshot!(out, @"[       OK ] CollectionTest.IsEmptyOnCreate (0 ms)");
    }

    #[test]
    fn brief_mode_hides_passing_cases() {
        let mut reporter = ConsoleReporter::new(Vec::new()).brief(true);
        reporter.case_started("CollectionTest", "A").unwrap();
        reporter.case_finished(&case("A", vec![])).unwrap();
        assert!(reporter.into_inner().is_empty());
    }

    #[test]
    fn summary_lists_failures_and_disabled() {
        let r = report(vec![case("A", vec![]), case("AlwaysFail", vec![failure()])], 1);
        let out = render(|rep| rep.run_finished(&r));
        assert_eq!(
            out,
            "[==========] 2 tests from 1 test suite ran. (3 ms total)\n\
             [  PASSED  ] 1 test.\n\
             [  FAILED  ] 1 test, listed below:\n\
             [  FAILED  ] CollectionTest.AlwaysFail\n\
             \n \
             1 FAILED TEST\n  \
             YOU HAVE 1 DISABLED TEST\n"
        );
    }

    #[test]
    fn colour_wraps_tags_only() {
        let mut reporter = ConsoleReporter::new(Vec::new()).with_color(true);
        reporter.case_started("S", "A").unwrap();
        let out = String::from_utf8(reporter.into_inner()).unwrap();
        if std::env::var_os("NO_COLOR").is_none() {
            assert!(out.contains("\u{1b}["));
        }
        assert!(out.ends_with("S.A\n"));
    }

    #[test]
    fn json_round_trips() {
        let r = report(vec![case("B", vec![failure()])], 0);
        let json = r.to_json().unwrap();
        let back: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cases"][0]["outcome"], "failed");
        assert_eq!(value["cases"][0]["failures"][0]["severity"], "fatal");
        assert_eq!(value["cases"][0]["phase"], "torn_down");
    }
}
