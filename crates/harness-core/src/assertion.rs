//! Assertion primitives for test bodies.
//!
//! Every case body receives a [`Checker`]. It offers two severities:
//!
//! - `check*` methods (and the `check_*!` macros) are **non-fatal**: a failure
//!   is recorded and the method returns `false`, so the body keeps going and
//!   every independent check gets reported.
//! - `require*` methods (and the `require_*!` macros) are **fatal**: a failure
//!   is recorded and `Err(Abort)` is returned. The body propagates it with `?`,
//!   which skips the rest of the body. The runner still tears the fixture down.
//!
//! No unwinding is involved. Failure locations come from
//! [`std::panic::Location::caller`], so they point at the assertion in the
//! body, not at this module.
//!
//! ```rust,ignore
//! fn resizing_decreases(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
//!     f.add_entries(10);
//!     require_eq!(t, f.collection().size(), 10)?;
//!     f.collection_mut().resize(5);
//!     check_eq!(t, f.collection().size(), 5);
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;

// ---------------------------------------------------------------------------
// Failure records
// ---------------------------------------------------------------------------

/// How a failed assertion affects the rest of the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The body was aborted at this assertion.
    Fatal,
    /// The body continued after this assertion.
    NonFatal,
}

/// One failed assertion, as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub severity: Severity,
    /// Source text of the asserted expression.
    pub expression: String,
    /// Actual values, or a free-form message.
    pub detail: Option<String>,
    pub file: String,
    pub line: u32,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: Failure", self.file, self.line)?;
        write!(f, "\nExpected: {}", self.expression)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  Actual: {detail}")?;
        }
        Ok(())
    }
}

/// Marker returned by fatal assertions. Only a [`Checker`] can create one,
/// so an aborted body always has a recorded failure behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort(());

/// Return type of every case body.
pub type CaseResult = Result<(), Abort>;

// ---------------------------------------------------------------------------
// Comparisons
// ---------------------------------------------------------------------------

/// Binary comparison used by the `*_eq!` and `check_ge!` macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ge,
}

impl CmpOp {
    pub fn holds<L, R>(self, left: &L, right: &R) -> bool
    where
        L: PartialOrd<R>,
    {
        match self {
            CmpOp::Eq => left == right,
            CmpOp::Ge => left >= right,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CmpOp::Eq => "==",
            CmpOp::Ge => ">=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

/// Collects the failures of a single case body.
#[derive(Debug, Default)]
pub struct Checker {
    failures: Vec<Failure>,
    aborted: bool,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Failures recorded so far, in the order they happened.
    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether a fatal assertion has failed.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    /// Non-fatal boolean assertion.
    #[track_caller]
    pub fn check(&mut self, condition: bool, expression: &str) -> bool {
        self.evaluate(Severity::NonFatal, condition, expression, || None)
    }

    /// Fatal boolean assertion.
    #[track_caller]
    pub fn require(&mut self, condition: bool, expression: &str) -> CaseResult {
        let passed = self.evaluate(Severity::Fatal, condition, expression, || None);
        self.gate(passed)
    }

    /// Non-fatal assertion with a lazily built detail message.
    #[track_caller]
    pub fn check_with(
        &mut self,
        condition: bool,
        expression: &str,
        detail: impl FnOnce() -> String,
    ) -> bool {
        self.evaluate(Severity::NonFatal, condition, expression, || Some(detail()))
    }

    /// Non-fatal comparison. `left_expr`/`right_expr` are the source text of
    /// each operand.
    #[track_caller]
    pub fn check_cmp<L, R>(
        &mut self,
        op: CmpOp,
        left: L,
        right: R,
        left_expr: &str,
        right_expr: &str,
    ) -> bool
    where
        L: PartialOrd<R> + fmt::Debug,
        R: fmt::Debug,
    {
        let expression = format!("{left_expr} {op} {right_expr}");
        self.evaluate(
            Severity::NonFatal,
            op.holds(&left, &right),
            &expression,
            || Some(format!("{left:?} vs {right:?}")),
        )
    }

    /// Fatal comparison.
    #[track_caller]
    pub fn require_cmp<L, R>(
        &mut self,
        op: CmpOp,
        left: L,
        right: R,
        left_expr: &str,
        right_expr: &str,
    ) -> CaseResult
    where
        L: PartialOrd<R> + fmt::Debug,
        R: fmt::Debug,
    {
        let expression = format!("{left_expr} {op} {right_expr}");
        let passed = self.evaluate(
            Severity::Fatal,
            op.holds(&left, &right),
            &expression,
            || Some(format!("{left:?} vs {right:?}")),
        );
        self.gate(passed)
    }

    /// Fatal assertion that `result` is `Ok`, yielding the value.
    #[track_caller]
    pub fn require_ok<T, E: fmt::Debug>(
        &mut self,
        result: Result<T, E>,
        expression: &str,
    ) -> Result<T, Abort> {
        match result {
            Ok(value) => Ok(value),
            Err(err) => {
                let expression = format!("{expression} is Ok");
                self.evaluate(Severity::Fatal, false, &expression, || {
                    Some(format!("Err({err:?})"))
                });
                Err(self.abort())
            }
        }
    }

    /// Records an unconditional fatal failure. Use as `return Err(t.fail(..))`.
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) -> Abort {
        let message = message.into();
        self.evaluate(Severity::Fatal, false, "Failed", || Some(message));
        self.abort()
    }

    /// Records a fixture set-up error as a fatal failure.
    #[track_caller]
    pub(crate) fn record_set_up_error(&mut self, err: &HarnessError) {
        self.evaluate(Severity::Fatal, false, "fixture set-up", || {
            Some(err.to_string())
        });
        self.aborted = true;
    }

    #[track_caller]
    fn evaluate(
        &mut self,
        severity: Severity,
        condition: bool,
        expression: &str,
        detail: impl FnOnce() -> Option<String>,
    ) -> bool {
        if !condition {
            let location = Location::caller();
            self.failures.push(Failure {
                severity,
                expression: expression.to_string(),
                detail: detail(),
                file: location.file().to_string(),
                line: location.line(),
            });
        }
        condition
    }

    fn gate(&mut self, passed: bool) -> CaseResult {
        if passed {
            Ok(())
        } else {
            Err(self.abort())
        }
    }

    fn abort(&mut self) -> Abort {
        self.aborted = true;
        Abort(())
    }
}

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

/// Non-fatal boolean assertion: `check!(t, collection.empty());`
#[macro_export]
macro_rules! check {
    ($t:expr, $cond:expr) => {
        $t.check($cond, stringify!($cond))
    };
}

/// Fatal boolean assertion: `require!(t, collection.empty())?;`
#[macro_export]
macro_rules! require {
    ($t:expr, $cond:expr) => {
        $t.require($cond, stringify!($cond))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __check_cmp {
    ($method:ident, $op:ident, $t:expr, $left:expr, $right:expr) => {
        $t.$method(
            $crate::assertion::CmpOp::$op,
            &$left,
            &$right,
            stringify!($left),
            stringify!($right),
        )
    };
}

/// Non-fatal `left == right`.
#[macro_export]
macro_rules! check_eq {
    ($t:expr, $left:expr, $right:expr) => {
        $crate::__check_cmp!(check_cmp, Eq, $t, $left, $right)
    };
}

/// Non-fatal `left >= right`.
#[macro_export]
macro_rules! check_ge {
    ($t:expr, $left:expr, $right:expr) => {
        $crate::__check_cmp!(check_cmp, Ge, $t, $left, $right)
    };
}

/// Fatal `left == right`.
#[macro_export]
macro_rules! require_eq {
    ($t:expr, $left:expr, $right:expr) => {
        $crate::__check_cmp!(require_cmp, Eq, $t, $left, $right)
    };
}

/// Non-fatal assertion that `result` is an `Err` matching `pattern`, and
/// nothing else.
///
/// ```rust,ignore
/// check_err!(t, collection.at(15), CollectionError::OutOfRange { .. });
/// ```
#[macro_export]
macro_rules! check_err {
    ($t:expr, $result:expr, $pattern:pat) => {{
        let result = $result;
        let matched = matches!(&result, Err($pattern));
        $t.check_with(
            matched,
            concat!(stringify!($result), " fails with ", stringify!($pattern)),
            || format!("{:?}", result),
        )
    }};
}

/// Fatal assertion that `result` is `Ok`; evaluates to `Result<T, Abort>`.
///
/// ```rust,ignore
/// let last = require_ok!(t, collection.at(9))?;
/// ```
#[macro_export]
macro_rules! require_ok {
    ($t:expr, $result:expr) => {
        $t.require_ok($result, stringify!($result))
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
