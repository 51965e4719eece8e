//! Property tests for the entity model's structural invariants (§8): skip
//! propagation, the status/modifier pairing, and location well-formedness hold for
//! any suite shape, not just the hand-picked examples in the unit tests.

use proptest::prelude::*;

use testscan_core::{Location, Test, TestFile, TestStatus, TestSuite};

fn loc(line: u32) -> Location {
    Location::new("f.rs", line, 0, line, 10)
}

fn arb_status() -> impl Strategy<Value = TestStatus> {
    prop_oneof![
        Just(TestStatus::Active),
        Just(TestStatus::Skipped),
        Just(TestStatus::Xfail),
    ]
}

fn make_test(name: &str, status: TestStatus, line: u32) -> Test {
    if status.is_active() {
        Test::active(name, loc(line))
    } else {
        Test::non_active(name, status, "marker", loc(line))
    }
}

fn build_suite(suite_status: TestStatus, child_statuses: &[TestStatus]) -> TestSuite {
    let mut suite = if suite_status.is_active() {
        TestSuite::active("Suite", loc(1))
    } else {
        TestSuite::non_active("Suite", suite_status, "marker", loc(1))
    };
    for (i, status) in child_statuses.iter().enumerate() {
        suite
            .tests
            .push(make_test(&format!("t{i}"), *status, (i + 2) as u32));
    }
    suite
}

proptest! {
    /// §8 invariant 3: a skipped suite forces every descendant test to `skipped`.
    #[test]
    fn skipped_suite_forces_all_descendants_skipped(
        child_statuses in prop::collection::vec(arb_status(), 0..8),
    ) {
        let mut suite = build_suite(TestStatus::Skipped, &child_statuses);
        suite.propagate_skip();
        for test in &suite.tests {
            prop_assert_eq!(test.status, TestStatus::Skipped);
        }
    }

    /// An active suite never forces a status change on its children.
    #[test]
    fn active_suite_leaves_descendant_statuses_untouched(
        child_statuses in prop::collection::vec(arb_status(), 0..8),
    ) {
        let mut suite = build_suite(TestStatus::Active, &child_statuses);
        let before: Vec<TestStatus> = suite.tests.iter().map(|t| t.status).collect();
        suite.propagate_skip();
        let after: Vec<TestStatus> = suite.tests.iter().map(|t| t.status).collect();
        prop_assert_eq!(before, after);
    }

    /// §8 invariant 4: non-active implies a non-empty modifier, active implies an
    /// empty one — true however the test was constructed.
    #[test]
    fn status_modifier_pairing_holds(
        status in arb_status(),
        name in "[a-z_]{1,12}",
    ) {
        let test = make_test(&name, status, 1);
        if test.status.is_active() {
            prop_assert!(test.modifier.is_empty());
        } else {
            prop_assert!(!test.modifier.is_empty());
        }
    }

    /// §8 invariant 5: every produced location has start_line <= end_line and a
    /// 1-based start_line.
    #[test]
    fn location_is_well_formed(start in 1u32..10_000, span in 0u32..500) {
        let location = Location::new("f.rs", start, 0, start + span, 4);
        prop_assert!(location.is_well_formed());
    }

    /// A file whose suites were all pruned empty never survives into a non-empty
    /// `TestFile` — mirrors the Scanner's own "empty file is omitted" rule.
    #[test]
    fn pruning_removes_every_suite_with_no_tests_and_no_children(
        empty_count in 0usize..10,
    ) {
        let mut file = TestFile::new("f.rs", testscan_core::Language::Rust, "cargo-test");
        for i in 0..empty_count {
            file.suites.push(TestSuite::active(format!("Empty{i}"), loc(1)));
        }
        file.prune_empty_suites();
        prop_assert!(file.suites.is_empty());
        prop_assert!(file.is_empty());
    }
}
