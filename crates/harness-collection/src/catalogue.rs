//! Behavioural catalogue for [`ManagedCollection`](crate::ManagedCollection).
//!
//! # What this covers
//!
//! - **Construction**: a fresh fixture holds a valid, empty collection.
//! - **Growth**: adding 1 and 5 entries updates size and emptiness.
//! - **Size bounds**: `max_size >= size` and `capacity >= size` at 0, 1, 5
//!   and 10 entries.
//! - **Resize**: grows with zeroes, shrinks keeping the leading elements,
//!   shrinks to empty.
//! - **Clear / erase**: both empty a populated collection; clear is
//!   idempotent.
//! - **Reserve**: grows capacity to exactly the request without touching size;
//!   smaller requests are no-ops.
//! - **Access**: `at` past the end fails with `OutOfRange` and nothing else,
//!   on populated and empty collections alike; `back` agrees with `at`.
//!
//! Use `require*` where the rest of a case would be meaningless after a
//! failure, `check*` for independent observations.

use harness_core::{
    check, check_eq, check_err, check_ge, require, require_eq, require_ok, CaseResult, Checker,
    Suite,
};

use crate::collection::CollectionError;
use crate::fixture::CollectionFixture;

/// Name every case is reported under.
pub const SUITE_NAME: &str = "CollectionTest";

/// The full catalogue, in registration order.
pub fn suite() -> Suite<CollectionFixture> {
    Suite::new(SUITE_NAME)
        .case("CollectionIsCreated", collection_is_created)
        .case("IsEmptyOnCreate", is_empty_on_create)
        .disabled_case("AlwaysFail", always_fail)
        .case("CanAddToEmptyVector", can_add_to_empty)
        .case("CanAddFiveValuesToVector", can_add_five_values)
        .case("MaxSizeGreaterThanEqualToVariousSizes", max_size_covers_various_sizes)
        .case("CapacityGreaterThanEqualToVariousSizes", capacity_covers_various_sizes)
        .case("ResizingIncreasesCollectionSize", resizing_increases_size)
        .case("ResizingDecreasesCollectionSize", resizing_decreases_size)
        .case("ResizingDecreasesSizeToZero", resizing_decreases_size_to_zero)
        .case("ClearErasesCollection", clear_erases_collection)
        .case("EraseBeginEndErasesCollection", erase_begin_end_erases_collection)
        .case("ReserveIncreasesCapacityButNotSize", reserve_increases_capacity_not_size)
        .case("InvalidIndexThrowsOutOfRangeException", invalid_index_is_out_of_range)
        .case("BackReturnsCorrectValue", back_returns_correct_value)
        .case(
            "AccessingValuesInEmptyCollectionThrowsOutOfRangeException",
            empty_access_is_out_of_range,
        )
        .case("ClearOnEmptyCollectionIsIdempotent", clear_on_empty_is_idempotent)
        .case("ResizingDownRetainsLeadingElements", resizing_down_retains_prefix)
        .case("ReserveBelowCapacityLeavesCapacityUnchanged", reserve_below_capacity_is_noop)
        .case("AddEntriesStayWithinRange", add_entries_stay_within_range)
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

fn collection_is_created(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require!(t, f.is_valid())?;
    check!(t, f.collection().empty());
    Ok(())
}

fn is_empty_on_create(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require!(t, f.collection().empty())?;
    require_eq!(t, f.collection().size(), 0)?;
    Ok(())
}

/// Shows what a failure looks like in the report. Disabled by default.
fn always_fail(_f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    Err(t.fail("this case always fails"))
}

// ---------------------------------------------------------------------------
// Growth
// ---------------------------------------------------------------------------

fn can_add_to_empty(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require!(t, f.collection().empty())?;
    require_eq!(t, f.collection().size(), 0)?;

    f.add_entries(1);

    check!(t, !f.collection().empty());
    check_eq!(t, f.collection().size(), 1);
    Ok(())
}

fn can_add_five_values(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require!(t, f.collection().empty())?;

    f.add_entries(5);

    check!(t, !f.collection().empty());
    check_eq!(t, f.collection().size(), 5);
    Ok(())
}

// ---------------------------------------------------------------------------
// Size bounds
// ---------------------------------------------------------------------------

/// Entry counts visited after the initial empty state.
const VARIOUS_SIZES: [usize; 3] = [1, 5, 10];

fn max_size_covers_various_sizes(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    check_ge!(t, f.collection().max_size(), f.collection().size());
    for count in VARIOUS_SIZES {
        f.collection_mut().clear();
        f.add_entries(count);
        check_eq!(t, f.collection().size(), count);
        check_ge!(t, f.collection().max_size(), f.collection().size());
    }
    Ok(())
}

fn capacity_covers_various_sizes(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    check_ge!(t, f.collection().capacity(), f.collection().size());
    for count in VARIOUS_SIZES {
        f.collection_mut().clear();
        f.add_entries(count);
        check_eq!(t, f.collection().size(), count);
        check_ge!(t, f.collection().capacity(), f.collection().size());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Resize
// ---------------------------------------------------------------------------

fn resizing_increases_size(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require_eq!(t, f.collection().size(), 0)?;

    f.collection_mut().resize(10);

    check_eq!(t, f.collection().size(), 10);
    check!(t, f.collection().iter().all(|&v| v == 0));
    Ok(())
}

fn resizing_decreases_size(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    require_eq!(t, f.collection().size(), 10)?;

    f.collection_mut().resize(5);

    check_eq!(t, f.collection().size(), 5);
    Ok(())
}

fn resizing_decreases_size_to_zero(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    require_eq!(t, f.collection().size(), 10)?;

    f.collection_mut().resize(0);

    check_eq!(t, f.collection().size(), 0);
    check!(t, f.collection().empty());
    Ok(())
}

fn resizing_down_retains_prefix(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    require_eq!(t, f.collection().size(), 10)?;
    let before = f.collection().as_slice().to_vec();

    f.collection_mut().resize(5);

    check_eq!(t, f.collection().as_slice(), &before[..5]);
    Ok(())
}

// ---------------------------------------------------------------------------
// Clear / erase
// ---------------------------------------------------------------------------

fn clear_erases_collection(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    require_eq!(t, f.collection().size(), 10)?;

    f.collection_mut().clear();

    check_eq!(t, f.collection().size(), 0);
    Ok(())
}

fn clear_on_empty_is_idempotent(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require!(t, f.collection().empty())?;

    f.collection_mut().clear();
    check_eq!(t, f.collection().size(), 0);
    f.collection_mut().clear();
    check_eq!(t, f.collection().size(), 0);
    Ok(())
}

fn erase_begin_end_erases_collection(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    require_eq!(t, f.collection().size(), 10)?;

    let end = f.collection().size();
    require_ok!(t, f.collection_mut().erase(0..end))?;

    check_eq!(t, f.collection().size(), 0);
    Ok(())
}

// ---------------------------------------------------------------------------
// Reserve
// ---------------------------------------------------------------------------

fn reserve_increases_capacity_not_size(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    let old_size = f.collection().size();
    let old_capacity = f.collection().capacity();

    require_ok!(t, f.collection_mut().reserve(old_capacity + 10))?;

    check_eq!(t, f.collection().size(), old_size);
    check_eq!(t, f.collection().capacity(), old_capacity + 10);
    Ok(())
}

fn reserve_below_capacity_is_noop(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    let old_capacity = f.collection().capacity();

    require_ok!(t, f.collection_mut().reserve(old_capacity - 1))?;
    check_eq!(t, f.collection().capacity(), old_capacity);

    require_ok!(t, f.collection_mut().reserve(0))?;
    check_eq!(t, f.collection().capacity(), old_capacity);
    check_eq!(t, f.collection().size(), 10);
    Ok(())
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

fn invalid_index_is_out_of_range(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    let before = f.collection().as_slice().to_vec();

    check_err!(t, f.collection().at(15), CollectionError::OutOfRange { .. });

    check_eq!(t, f.collection().as_slice(), before.as_slice());
    Ok(())
}

fn back_returns_correct_value(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(10);
    let c = f.collection();

    let last = require_ok!(t, c.at(c.size() - 1))?;

    check_eq!(t, c.back(), Some(last));
    Ok(())
}

fn empty_access_is_out_of_range(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    require!(t, f.collection().empty())?;

    check_err!(t, f.collection().at(0), CollectionError::OutOfRange { .. });

    check!(t, f.collection().empty());
    Ok(())
}

fn add_entries_stay_within_range(f: &mut CollectionFixture, t: &mut Checker) -> CaseResult {
    f.add_entries(100);
    require_eq!(t, f.collection().size(), 100)?;

    for (index, value) in f.collection().iter().enumerate() {
        t.check_with((0..=99).contains(value), "0 <= value && value <= 99", || {
            format!("collection[{index}] = {value}")
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::RandomEnvironment;
    use harness_core::{Filter, Outcome, Phase, RunOptions, Runner, Severity, Silent};
    use pretty_assertions::assert_eq;

    fn run(options: RunOptions) -> harness_core::RunReport {
        Runner::new(RandomEnvironment::with_seed(options.seed), options)
            .unwrap()
            .run(&suite(), &mut Silent)
            .unwrap()
    }

    #[test]
    fn every_enabled_case_passes() {
        let report = run(RunOptions::new(2024));
        let failed: Vec<_> = report.failed().map(|c| c.full_name()).collect();
        assert_eq!(failed, Vec::<String>::new());
        assert_eq!(report.total(), 19);
        assert_eq!(report.disabled, 1);
        assert!(report.cases.iter().all(|c| c.phase == Phase::TornDown));
    }

    #[test]
    fn catalogue_passes_under_many_seeds() {
        for seed in 0..25 {
            let report = run(RunOptions::new(seed));
            assert!(report.success(), "seed {seed} failed");
        }
    }

    #[test]
    fn always_fail_reports_a_fatal_failure() {
        let mut options = RunOptions::new(1);
        options.filter = Filter::parse("*AlwaysFail").unwrap();
        options.also_run_disabled = true;
        let report = run(options);

        assert_eq!(report.total(), 1);
        let case = &report.cases[0];
        assert_eq!(case.outcome, Outcome::Failed);
        assert!(case.aborted);
        assert_eq!(case.phase, Phase::TornDown);
        assert_eq!(case.failures[0].severity, Severity::Fatal);
        assert!(case.failures[0].file.ends_with("catalogue.rs"));
    }

    #[test]
    fn case_names_are_stable() {
        let suite = suite();
        let names: Vec<_> = suite.cases().iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), 20);
        assert!(names.contains(&"InvalidIndexThrowsOutOfRangeException"));
        assert!(names.contains(&"AccessingValuesInEmptyCollectionThrowsOutOfRangeException"));
    }
}
