//! Integration test: failure policy of individual demos.
//!
//! Validates that:
//! 1. An allocation failure ends the memory demo before any other step.
//! 2. A resize failure releases the buffer and ends the memory demo.
//! 3. A file create failure ends the file demo; the run keeps going.
//! 4. A reopen or read failure ends the file demo and leaves no file behind.
//! 5. A delete failure is recorded as a failed check without aborting.
//! 6. The error demo reports expected failures, never failed checks.
//!
//! Run: cargo test -p nos-smoke-harness --test failure_paths_test

use std::time::Duration;

use nos_smoke_harness::demos::{file_io, memory};
use nos_smoke_harness::structured_log::Outcome;
use nos_smoke_harness::{Demo, DemoError, Session, SmokeConfig, SmokeRunner, StdinMode};

fn quiet() -> SmokeConfig {
    SmokeConfig {
        stdin: StdinMode::Skip,
        delay: Duration::ZERO,
        ..SmokeConfig::default()
    }
}

#[test]
fn initial_allocation_failure_returns_early() {
    let mut out = Vec::new();
    let mut session = Session::new(quiet(), &mut out, std::io::empty());
    let err = memory::run_with_sizes(&mut session, usize::MAX, 8).unwrap_err();
    let results = session.finish();

    assert!(matches!(err, DemoError::Buffer(_)));
    assert_eq!(results.summary().total, 0, "no step after the failed malloc");
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("allocation failed"));
    assert!(!text.contains("strcpy"));
}

#[test]
fn resize_failure_aborts_after_original_work() {
    let mut out = Vec::new();
    let mut session = Session::new(quiet(), &mut out, std::io::empty());
    let err = memory::run_with_sizes(&mut session, 64, usize::MAX).unwrap_err();
    let results = session.finish();

    assert!(err.to_string().contains("resize"), "{err}");
    assert_eq!(results.summary().failed, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("strcpy → \"Hello, NOS memory!\""));
    assert!(text.contains("original released"));
    assert!(!text.contains("squares"));
}

#[test]
fn default_memory_demo_keeps_prefix_after_realloc() {
    let mut out = Vec::new();
    let mut session = Session::new(quiet(), &mut out, std::io::empty());
    memory::run(&mut session).unwrap();
    let results = session.finish();
    assert_eq!(results.summary().failed, 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"Hello, NOS memory! (extended after realloc)\""));
}

#[test]
fn unwritable_scratch_dir_aborts_file_demo_only() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");
    let config = SmokeConfig {
        scratch_dir: missing,
        only: vec![Demo::FileIo, Demo::Sort],
        ..quiet()
    };
    let mut out = Vec::new();
    let runner = SmokeRunner::new(config.selected());
    let mut session = Session::new(config, &mut out, std::io::empty());
    let report = runner.run(&mut session);
    session.finish();

    let aborted: Vec<&str> = report.aborted().map(|r| r.demo).collect();
    assert_eq!(aborted, vec!["file-io"]);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("中止 (aborted): create "), "{text}");
    assert!(text.contains("排序后 after:"));
}

#[test]
fn reopen_failure_aborts_file_demo() {
    let dir = tempfile::tempdir().unwrap();
    let missing = file_io::transient_path(dir.path());
    let mut out = Vec::new();
    let mut session = Session::new(quiet(), &mut out, std::io::empty());
    let err = file_io::read_back(&mut session, &missing, &file_io::file_lines()).unwrap_err();
    let results = session.finish();

    assert!(err.to_string().starts_with("reopen "), "{err}");
    assert_eq!(err.errno(), Some(nos_smoke_core::sys::ENOENT));
    assert_eq!(results.summary().total, 0);
}

#[test]
fn read_failure_removes_transient_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = file_io::transient_path(dir.path());
    std::fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

    let mut session = Session::new(quiet(), std::io::sink(), std::io::empty());
    let err = file_io::read_back(&mut session, &path, &file_io::file_lines()).unwrap_err();
    drop(session);

    assert!(err.to_string().starts_with("read "), "{err}");
    assert!(!path.exists(), "file left behind after read failure");
}

#[test]
fn delete_failure_is_a_failed_check() {
    let dir = tempfile::tempdir().unwrap();
    let missing = file_io::transient_path(dir.path());
    let mut out = Vec::new();
    let mut session = Session::new(quiet(), &mut out, std::io::empty());
    file_io::remove(&mut session, &missing).unwrap();
    let results = session.finish();

    let failures: Vec<_> = results.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].outcome, Outcome::Fail);
    let expected = std::io::Error::from_raw_os_error(nos_smoke_core::sys::ENOENT).to_string();
    assert_eq!(failures[0].detail.as_deref(), Some(expected.as_str()));
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("remove failed"), "{text}");
}

#[test]
fn error_demo_records_expected_failures() {
    let mut out = Vec::new();
    let mut session = Session::new(quiet(), &mut out, std::io::empty());
    let report = SmokeRunner::new(vec![Demo::Error]).run(&mut session);
    let results = session.finish();

    assert_eq!(report.summary.failed, 0);
    let expected: Vec<&str> = results
        .records()
        .iter()
        .filter(|r| r.outcome == Outcome::Expected)
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(expected.len(), 2, "{expected:?}");
    assert_eq!(expected[0], "read(-1)");
    assert!(expected[1].contains("/nonexistent/file.txt"));

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("strlen(NULL) = 0"));
    assert!(text.contains("失败 (预期)"));
}
