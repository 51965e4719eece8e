//! End-to-end scenarios driving the Scanner against real directories on disk,
//! exercising the walk -> detect -> extract -> Inventory pipeline as a whole
//! rather than any single component.

use std::fs;
use std::path::Path;

use testscan_core::{Inventory, NullEventHandler, ScanOptions, TestStatus};
use testscan_engine::Scanner;

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn scan(root: &Path) -> (Inventory, Vec<testscan_core::ScanError>) {
    let scanner = Scanner::new(ScanOptions::default());
    scanner.scan_local(root, &NullEventHandler).unwrap()
}

#[test]
fn jest_typescript_describe_it() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "user.test.ts",
        "import { describe, it } from '@jest/globals';\n\
         describe('UserService', () => {\n\
           it('should create user', () => {});\n\
           it('should delete user', () => {});\n\
         });\n",
    );

    let (inventory, errors) = scan(dir.path());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(inventory.files.len(), 1);

    let file = &inventory.files[0];
    assert_eq!(file.framework, "jest");
    assert_eq!(file.language, testscan_core::Language::TypeScript);
    assert_eq!(file.suites.len(), 1);

    let suite = &file.suites[0];
    assert_eq!(suite.name, "UserService");
    assert_eq!(suite.tests.len(), 2);
    assert_eq!(suite.tests[0].name, "should create user");
    assert_eq!(suite.tests[1].name, "should delete user");
    assert!(suite.tests.iter().all(|t| t.status == TestStatus::Active));
}

#[test]
fn gtest_two_cases_one_suite() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "math_test.cc",
        "#include <gtest/gtest.h>\n\
         TEST(MathTest, Addition) { EXPECT_EQ(1 + 1, 2); }\n\
         TEST(MathTest, Subtraction) { EXPECT_EQ(2 - 1, 1); }\n",
    );

    let (inventory, errors) = scan(dir.path());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(inventory.files.len(), 1);

    let file = &inventory.files[0];
    assert_eq!(file.framework, "gtest");
    assert_eq!(file.language, testscan_core::Language::Cpp);
    assert_eq!(file.suites.len(), 1);
    assert_eq!(file.suites[0].name, "MathTest");
    assert_eq!(file.suites[0].tests.len(), 2);
}

#[test]
fn gtest_disabled_prefix_marks_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "suite_test.cc",
        "#include <gtest/gtest.h>\n\
         TEST(Suite, DISABLED_SkippedTest) { FAIL(); }\n\
         TEST(Suite, ActiveTest) { SUCCEED(); }\n",
    );

    let (inventory, _errors) = scan(dir.path());
    assert_eq!(inventory.files.len(), 1);

    let suite = &inventory.files[0].suites[0];
    assert_eq!(suite.name, "Suite");
    assert_eq!(suite.tests.len(), 2);

    let skipped = suite.tests.iter().find(|t| t.name == "SkippedTest").unwrap();
    assert_eq!(skipped.status, TestStatus::Skipped);
    assert_eq!(skipped.modifier, "DISABLED_");

    let active = suite.tests.iter().find(|t| t.name == "ActiveTest").unwrap();
    assert_eq!(active.status, TestStatus::Active);
    assert!(active.modifier.is_empty());
}

#[test]
fn phpunit_attribute_test_is_discovered_and_non_testcase_sibling_is_not() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "AttributeTest.php",
        "<?php\n\
         use PHPUnit\\Framework\\TestCase;\n\
         use PHPUnit\\Framework\\Attributes\\Test;\n\
         \n\
         final class AttributeTest extends TestCase {\n\
             #[Test]\n\
             public function userCreation(): void {}\n\
         }\n\
         \n\
         final class NotATest {\n\
             public function testSomething(): void {}\n\
         }\n",
    );

    let (inventory, errors) = scan(dir.path());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(inventory.files.len(), 1);

    let file = &inventory.files[0];
    assert_eq!(file.framework, "phpunit");
    assert_eq!(file.suites.len(), 1);
    assert_eq!(file.suites[0].name, "AttributeTest");
    assert_eq!(file.suites[0].tests.len(), 1);
    assert_eq!(file.suites[0].tests[0].name, "userCreation");
}

#[test]
fn fixtures_directory_is_excluded_from_the_inventory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "__tests__/__fixtures__/data.js", "module.exports = {};\n");
    write(
        dir.path(),
        "__tests__/component.test.ts",
        "import { it } from '@jest/globals';\nit('renders', () => {});\n",
    );

    let (inventory, _errors) = scan(dir.path());
    assert_eq!(inventory.files.len(), 1);
    assert!(inventory.files[0].path.ends_with("component.test.ts"));
}

#[test]
fn minitest_skip_call_marks_test_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "user_test.rb",
        "require 'minitest/autorun'\n\
         class UserTest < Minitest::Test\n\
           def test_skipped\n\
             skip 'not ready'\n\
           end\n\
           \n\
           def test_active\n\
             assert true\n\
           end\n\
         end\n",
    );

    let (inventory, errors) = scan(dir.path());
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    assert_eq!(inventory.files.len(), 1);

    let suite = &inventory.files[0].suites[0];
    assert_eq!(suite.name, "UserTest");
    assert_eq!(suite.tests.len(), 2);

    let skipped = suite.tests.iter().find(|t| t.name == "test_skipped").unwrap();
    assert_eq!(skipped.status, TestStatus::Skipped);

    let active = suite.tests.iter().find(|t| t.name == "test_active").unwrap();
    assert_eq!(active.status, TestStatus::Active);
}

#[test]
fn empty_directory_yields_empty_inventory_and_no_errors() {
    let dir = tempfile::tempdir().unwrap();
    let (inventory, errors) = scan(dir.path());
    assert!(inventory.is_empty());
    assert!(errors.is_empty());
}

#[test]
fn rescanning_is_stable_across_worker_counts() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.test.ts",
        "import { it } from '@jest/globals';\nit('a', () => {});\n",
    );
    write(
        dir.path(),
        "b.test.ts",
        "import { it } from '@jest/globals';\nit('b', () => {});\nit('c', () => {});\n",
    );

    let single = Scanner::new(ScanOptions {
        workers: Some(1),
        ..Default::default()
    });
    let (single_inventory, single_errors) = single.scan_local(dir.path(), &NullEventHandler).unwrap();

    let many = Scanner::new(ScanOptions {
        workers: Some(8),
        ..Default::default()
    });
    let (many_inventory, many_errors) = many.scan_local(dir.path(), &NullEventHandler).unwrap();

    assert!(single_errors.is_empty());
    assert!(many_errors.is_empty());

    let mut single_tuples: Vec<(String, String, Vec<String>)> = single_inventory
        .files
        .iter()
        .map(|f| (f.path.clone(), f.framework.clone(), test_names(f)))
        .collect();
    let mut many_tuples: Vec<(String, String, Vec<String>)> = many_inventory
        .files
        .iter()
        .map(|f| (f.path.clone(), f.framework.clone(), test_names(f)))
        .collect();
    single_tuples.sort();
    many_tuples.sort();
    assert_eq!(single_tuples, many_tuples);
}

fn test_names(file: &testscan_core::TestFile) -> Vec<String> {
    let mut names: Vec<String> = file.tests.iter().map(|t| t.name.clone()).collect();
    for suite in &file.suites {
        collect_suite_names(suite, &mut names);
    }
    names.sort();
    names
}

fn collect_suite_names(suite: &testscan_core::TestSuite, out: &mut Vec<String>) {
    for t in &suite.tests {
        out.push(t.name.clone());
    }
    for s in &suite.suites {
        collect_suite_names(s, out);
    }
}

/// Cancels the scan on its very first progress report (`files_processed == 0`) —
/// synchronously, on the scanning thread itself, after the walk has already
/// produced a file list but before any file has been dispatched to a worker. No
/// race against `Scanner::scan`'s own `cancellation.reset()` at the top of the
/// call, since this fires strictly after it.
struct CancelOnFirstProgress<'a>(&'a testscan_engine::ScanCancellation);

impl testscan_core::ScanEventHandler for CancelOnFirstProgress<'_> {
    fn on_scan_progress(&self, event: &testscan_core::events::ScanProgressEvent) {
        if event.files_processed == 0 {
            self.0.cancel();
        }
    }
}

#[test]
fn cancelling_immediately_yields_empty_inventory_and_cancelled_error() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..20 {
        write(
            dir.path(),
            &format!("file_{i}.test.ts"),
            "import { it } from '@jest/globals';\nit('x', () => {});\n",
        );
    }

    let scanner = Scanner::new(ScanOptions::default());
    let handler = CancelOnFirstProgress(scanner.cancellation());
    let (inventory, errors) = scanner.scan_local(dir.path(), &handler).unwrap();

    assert!(inventory.is_empty());
    assert!(errors
        .iter()
        .any(|e| e.kind == testscan_core::ScanErrorKind::Cancelled));
}

#[test]
fn oversize_file_is_skipped_with_scan_error() {
    let dir = tempfile::tempdir().unwrap();
    let huge_body = "it('x', () => {});\n".repeat(20_000);
    write(
        dir.path(),
        "huge.test.ts",
        &format!("import {{ it }} from '@jest/globals';\n{huge_body}"),
    );

    let scanner = Scanner::new(ScanOptions {
        max_file_size: Some(1024),
        ..Default::default()
    });
    let (inventory, errors) = scanner.scan_local(dir.path(), &NullEventHandler).unwrap();

    assert!(inventory.is_empty());
    assert!(errors
        .iter()
        .any(|e| e.kind == testscan_core::ScanErrorKind::Oversize));
}

#[test]
fn exceeding_max_nesting_depth_keeps_partial_tree_and_records_scan_error() {
    let dir = tempfile::tempdir().unwrap();
    // Each level has its own test, plus a describe nested one level deeper;
    // five describes deep, but the budget below only allows three.
    let src = "import { describe, it } from '@jest/globals';\n\
        describe('d0', () => {\n\
          it('t0', () => {});\n\
          describe('d1', () => {\n\
            it('t1', () => {});\n\
            describe('d2', () => {\n\
              it('t2', () => {});\n\
              describe('d3', () => {\n\
                it('t3', () => {});\n\
                describe('d4', () => {\n\
                  it('t4', () => {});\n\
                });\n\
              });\n\
            });\n\
          });\n\
        });\n";
    write(dir.path(), "deep.test.ts", src);

    let scanner = Scanner::new(ScanOptions {
        max_nesting_depth: Some(3),
        ..Default::default()
    });
    let (inventory, errors) = scanner.scan_local(dir.path(), &NullEventHandler).unwrap();

    assert_eq!(inventory.files.len(), 1, "partial tree is still kept, not dropped");
    let depth_error = errors
        .iter()
        .find(|e| e.kind == testscan_core::ScanErrorKind::ExtractionError)
        .expect("depth budget overrun must be recorded as a scan error");
    assert_eq!(depth_error.phase, testscan_core::ScanPhase::Extraction);

    // Suites nest down to the budget (d0, d1, d2); d2's own test survives but
    // d3/d4 are never descended into.
    let mut suite = &inventory.files[0].suites[0];
    assert_eq!(suite.name, "d0");
    for expected in ["d1", "d2"] {
        suite = suite.suites.iter().find(|s| s.name == expected).unwrap();
    }
    assert_eq!(suite.tests.len(), 1);
    assert_eq!(suite.tests[0].name, "t2");
    assert!(suite.suites.is_empty(), "descent must stop at the configured depth");
}
