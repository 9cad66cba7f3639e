//! Suites, cases and name filters.

use regex::Regex;

use crate::assertion::{CaseResult, Checker};
use crate::error::HarnessError;

/// Signature of a case body.
pub type Body<F> = fn(&mut F, &mut Checker) -> CaseResult;

/// A single named scenario run against a fresh `F`.
pub struct TestCase<F> {
    name: &'static str,
    body: Body<F>,
    disabled: bool,
}

impl<F> TestCase<F> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Disabled cases are skipped unless the run asks for them.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn run(&self, fixture: &mut F, checker: &mut Checker) -> CaseResult {
        (self.body)(fixture, checker)
    }
}

// `derive(Clone)` would demand `F: Clone`; the fields never hold an `F`.
impl<F> Clone for TestCase<F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            body: self.body,
            disabled: self.disabled,
        }
    }
}

impl<F> std::fmt::Debug for TestCase<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("name", &self.name)
            .field("disabled", &self.disabled)
            .finish()
    }
}

/// An ordered group of cases sharing one fixture type.
#[derive(Debug)]
pub struct Suite<F> {
    name: &'static str,
    cases: Vec<TestCase<F>>,
}

impl<F> Suite<F> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            cases: Vec::new(),
        }
    }

    /// Register a case. Panics on a duplicate name, which is a mistake in the
    /// suite definition rather than a test outcome.
    pub fn case(self, name: &'static str, body: Body<F>) -> Self {
        self.push(name, body, false)
    }

    /// Register a case that only runs with `also_run_disabled`.
    pub fn disabled_case(self, name: &'static str, body: Body<F>) -> Self {
        self.push(name, body, true)
    }

    fn push(mut self, name: &'static str, body: Body<F>, disabled: bool) -> Self {
        assert!(
            self.cases.iter().all(|c| c.name != name),
            "duplicate case {}.{}",
            self.name,
            name
        );
        self.cases.push(TestCase {
            name,
            body,
            disabled,
        });
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn cases(&self) -> &[TestCase<F>] {
        &self.cases
    }

    /// `Suite.Case`, the name filters match against.
    pub fn full_name(&self, case: &TestCase<F>) -> String {
        format!("{}.{}", self.name, case.name)
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Case selection in the familiar `POS1:POS2-NEG1:NEG2` form.
///
/// `*` matches any run of characters and `?` a single character. A name is
/// selected when it matches any positive pattern and no negative pattern. An
/// empty positive side selects everything.
#[derive(Debug, Clone)]
pub struct Filter {
    source: String,
    positive: Vec<Regex>,
    negative: Vec<Regex>,
}

impl Filter {
    pub fn parse(pattern: &str) -> Result<Self, HarnessError> {
        let (pos, neg) = match pattern.split_once('-') {
            Some((pos, neg)) => (pos, neg),
            None => (pattern, ""),
        };
        Ok(Self {
            source: pattern.to_string(),
            positive: compile_all(pattern, pos)?,
            negative: compile_all(pattern, neg)?,
        })
    }

    pub fn matches(&self, full_name: &str) -> bool {
        (self.positive.is_empty() || self.positive.iter().any(|re| re.is_match(full_name)))
            && !self.negative.iter().any(|re| re.is_match(full_name))
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl Default for Filter {
    fn default() -> Self {
        Self {
            source: "*".to_string(),
            positive: Vec::new(),
            negative: Vec::new(),
        }
    }
}

fn compile_all(pattern: &str, side: &str) -> Result<Vec<Regex>, HarnessError> {
    side.split(':')
        .filter(|glob| !glob.is_empty())
        .map(|glob| {
            glob_regex(glob).map_err(|source| HarnessError::InvalidFilter {
                pattern: pattern.to_string(),
                source,
            })
        })
        .collect()
}

fn glob_regex(glob: &str) -> Result<Regex, regex::Error> {
    let body = regex::escape(glob)
        .replace(r"\*", ".*")
        .replace(r"\?", ".");
    Regex::new(&format!("^{body}$"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
