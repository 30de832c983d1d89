//! Integration test: structured logging of a run.
//!
//! Validates that:
//! 1. A run with a file-backed LogEmitter produces valid JSONL.
//! 2. Every demo gets demo_start / demo_end events.
//! 3. Check events carry outcomes; expected failures carry errno.
//! 4. Passing checks log at debug, expected failures at info.
//!
//! Run: cargo test -p nos-smoke-harness --test structured_log_test

use std::time::Duration;

use nos_smoke_harness::structured_log::{LogEmitter, LogEntry, LogLevel, Outcome, validate_log_file};
use nos_smoke_harness::{Demo, Session, SmokeConfig, SmokeRunner, StdinMode};

fn read_entries(path: &std::path::Path) -> Vec<LogEntry> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn run_log_is_valid_jsonl() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("smoke.jsonl");
    let config = SmokeConfig {
        scratch_dir: dir.path().to_path_buf(),
        stdin: StdinMode::Skip,
        delay: Duration::ZERO,
        only: vec![Demo::String, Demo::Error],
        ..SmokeConfig::default()
    };

    {
        let emitter = LogEmitter::to_file(&log_path, "run-integ").unwrap();
        let runner = SmokeRunner::new(config.selected());
        let mut session = Session::new(config, std::io::sink(), std::io::empty()).with_log(emitter);
        runner.run(&mut session);
        session.finish();
    }

    let (line_count, errors) = validate_log_file(&log_path).unwrap();
    assert!(errors.is_empty(), "log errors: {errors:?}");

    let entries = read_entries(&log_path);
    assert_eq!(entries.len(), line_count);
    assert_eq!(entries.first().unwrap().event, "run_start");
    assert_eq!(entries.last().unwrap().event, "run_end");
    assert!(entries[0].trace_id.starts_with("nos-smoke::run-integ::"));

    for demo in ["string", "error"] {
        for event in ["demo_start", "demo_end"] {
            assert!(
                entries
                    .iter()
                    .any(|e| e.event == event && e.demo.as_deref() == Some(demo)),
                "missing {event} for {demo}"
            );
        }
    }

    let read_check = entries
        .iter()
        .find(|e| e.check.as_deref() == Some("read(-1)"))
        .expect("read(-1) check logged");
    assert_eq!(read_check.errno, Some(nos_smoke_core::sys::EBADF));
    assert_eq!(read_check.level, LogLevel::Info);
    assert_eq!(read_check.outcome, Some(Outcome::Expected));

    let passing = entries
        .iter()
        .filter(|e| e.event == "check" && e.outcome == Some(Outcome::Pass))
        .collect::<Vec<_>>();
    assert!(!passing.is_empty());
    assert!(passing.iter().all(|e| e.level == LogLevel::Debug));

    let ids: std::collections::BTreeSet<&str> =
        entries.iter().map(|e| e.trace_id.as_str()).collect();
    assert_eq!(ids.len(), entries.len(), "trace ids are unique");
}
