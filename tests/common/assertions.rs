//! Report-level assertion macros for harness tests.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! offending cases and their recorded failures.

use harness_core::RunReport;

/// Assert that every executed case in a `RunReport` passed.
///
/// ```rust
/// assert_all_passed!(report);
/// ```
#[macro_export]
macro_rules! assert_all_passed {
    ($report:expr) => {{
        let report: &harness_core::RunReport = &$report;
        let failed: Vec<String> = report
            .failed()
            .map(|c| {
                let failures: Vec<String> = c.failures.iter().map(|f| f.to_string()).collect();
                format!("{}\n{}", c.full_name(), failures.join("\n"))
            })
            .collect();
        if !failed.is_empty() {
            panic!(
                "assert_all_passed! failed (seed {}): {} of {} cases failed:\n{}",
                report.seed,
                failed.len(),
                report.total(),
                failed.join("\n\n")
            );
        }
    }};
}

/// Assert that a named case failed, and return its report.
///
/// ```rust
/// let case = assert_case_failed!(report, "AlwaysFail");
/// ```
#[macro_export]
macro_rules! assert_case_failed {
    ($report:expr, $name:expr) => {{
        let report: &harness_core::RunReport = &$report;
        let name: &str = $name;
        match report.cases.iter().find(|c| c.name == name) {
            Some(case) if !case.passed() => case,
            Some(_) => panic!("assert_case_failed! failed: {name:?} passed"),
            None => panic!(
                "assert_case_failed! failed: {name:?} not in report.\n  Ran: {:?}",
                report.cases.iter().map(|c| &c.name).collect::<Vec<_>>()
            ),
        }
    }};
}

/// Names of the executed cases, in execution order.
pub fn executed_names(report: &RunReport) -> Vec<String> {
    report.cases.iter().map(|c| c.name.clone()).collect()
}
