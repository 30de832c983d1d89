//! Structured JSONL log of a smoke run.
//!
//! Provides:
//! - [`LogEntry`]: one JSONL record with required + optional fields.
//! - [`LogEmitter`]: writes JSONL lines with sequential trace ids.
//! - [`validate_log_line`]: validates a single JSONL line against the schema.
//! - [`validate_log_file`]: validates an entire JSONL file.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

// ---------------------------------------------------------------------------
// Log entry
// ---------------------------------------------------------------------------

/// Severity level for log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Check outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pass,
    Fail,
    Skip,
    /// The call failed on purpose; the failure is the observation.
    Expected,
}

impl Outcome {
    /// True unless the check failed.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        !matches!(self, Self::Fail)
    }

    /// Level a check with this outcome is logged at. Passing checks are the
    /// bulk of a run and go to debug.
    #[must_use]
    pub const fn log_level(self) -> LogLevel {
        match self {
            Self::Pass => LogLevel::Debug,
            Self::Skip | Self::Expected => LogLevel::Info,
            Self::Fail => LogLevel::Warn,
        }
    }
}

/// Structured log entry.
///
/// Required fields: `timestamp`, `trace_id`, `level`, `event`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    // Required
    pub timestamp: String,
    pub trace_id: String,
    pub level: LogLevel,
    pub event: String,

    // Optional
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errno: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LogEntry {
    /// Create a new log entry with required fields only.
    #[must_use]
    pub fn new(trace_id: impl Into<String>, level: LogLevel, event: impl Into<String>) -> Self {
        Self {
            timestamp: now_utc(),
            trace_id: trace_id.into(),
            level,
            event: event.into(),
            demo: None,
            check: None,
            outcome: None,
            errno: None,
            duration_ms: None,
            details: None,
        }
    }

    /// Set the demo routine name.
    #[must_use]
    pub fn with_demo(mut self, demo: impl Into<String>) -> Self {
        self.demo = Some(demo.into());
        self
    }

    /// Set the check name and its outcome.
    #[must_use]
    pub fn with_check(mut self, check: impl Into<String>, outcome: Outcome) -> Self {
        self.check = Some(check.into());
        self.outcome = Some(outcome);
        self
    }

    /// Set errno.
    #[must_use]
    pub fn with_errno(mut self, errno: i32) -> Self {
        self.errno = Some(errno);
        self
    }

    /// Set duration in milliseconds.
    #[must_use]
    pub fn with_duration_ms(mut self, ms: u64) -> Self {
        self.duration_ms = Some(ms);
        self
    }

    /// Set free-form details.
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Serialize to a single JSONL line (no trailing newline).
    pub fn to_jsonl(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// Log emitter
// ---------------------------------------------------------------------------

/// Writes structured JSONL log entries.
pub struct LogEmitter {
    writer: Box<dyn Write>,
    seq: u64,
    run_id: String,
}

impl LogEmitter {
    /// Create an emitter that writes to a file.
    pub fn to_file(path: &Path, run_id: &str) -> std::io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Ok(Self::new(Box::new(std::io::BufWriter::new(file)), run_id))
    }

    /// Create an emitter over any writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>, run_id: &str) -> Self {
        Self {
            writer,
            seq: 0,
            run_id: run_id.to_string(),
        }
    }

    fn next_trace_id(&mut self) -> String {
        self.seq += 1;
        format!("nos-smoke::{}::{:03}", self.run_id, self.seq)
    }

    /// Emit a populated entry. An empty trace_id is replaced with the next one.
    pub fn emit_entry(&mut self, mut entry: LogEntry) -> std::io::Result<LogEntry> {
        if entry.trace_id.is_empty() {
            entry.trace_id = self.next_trace_id();
        }
        let line = entry.to_jsonl().map_err(std::io::Error::other)?;
        writeln!(self.writer, "{line}")?;
        Ok(entry)
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validation error for a log line.
#[derive(Debug)]
pub struct LogValidationError {
    pub line_number: usize,
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for LogValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "line {}: field '{}': {}",
            self.line_number, self.field, self.message
        )
    }
}

/// Validate a single JSONL line against the schema.
pub fn validate_log_line(
    line: &str,
    line_number: usize,
) -> Result<LogEntry, Vec<LogValidationError>> {
    let mut errors = Vec::new();
    let mut error = |field: &str, message: String| {
        errors.push(LogValidationError {
            line_number,
            field: field.to_string(),
            message,
        });
    };

    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            error("<json>", format!("invalid JSON: {e}"));
            return Err(errors);
        }
    };

    let Some(obj) = value.as_object() else {
        error("<root>", "expected JSON object".to_string());
        return Err(errors);
    };

    for field in ["timestamp", "trace_id", "level", "event"] {
        if !obj.contains_key(field) {
            error(field, "required field missing".to_string());
        }
    }

    if let Some(level) = obj.get("level").and_then(|v| v.as_str())
        && !["debug", "info", "warn", "error"].contains(&level)
    {
        error("level", format!("invalid level: '{level}'"));
    }

    if let Some(outcome) = obj.get("outcome").and_then(|v| v.as_str())
        && !["pass", "fail", "skip", "expected"].contains(&outcome)
    {
        error("outcome", format!("invalid outcome: '{outcome}'"));
    }

    // A check record must name its check and carry an outcome.
    if obj.get("event").and_then(|v| v.as_str()) == Some("check") {
        if !obj.get("check").is_some_and(serde_json::Value::is_string) {
            error("check", "check events must include a check name".to_string());
        }
        if !obj.contains_key("outcome") {
            error("outcome", "check events must include an outcome".to_string());
        }
    }

    if let Some(trace_id) = obj.get("trace_id").and_then(|v| v.as_str())
        && !trace_id.contains("::")
    {
        error(
            "trace_id",
            format!("trace_id should follow nos-smoke::<run_id>::<seq> format, got: '{trace_id}'"),
        );
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value::<LogEntry>(value).map_err(|e| {
        vec![LogValidationError {
            line_number,
            field: "<deserialization>".to_string(),
            message: format!("failed to deserialize: {e}"),
        }]
    })
}

/// Validate an entire JSONL file.
///
/// Returns the total line count and any validation errors found.
pub fn validate_log_file(path: &Path) -> Result<(usize, Vec<LogValidationError>), std::io::Error> {
    let content = std::fs::read_to_string(path)?;
    let mut all_errors = Vec::new();
    let mut line_count = 0;

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        line_count += 1;
        if let Err(errs) = validate_log_line(line, i + 1) {
            all_errors.extend(errs);
        }
    }

    Ok((line_count, all_errors))
}

fn now_utc() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_entry_serializes_required_fields() {
        let entry = LogEntry::new("nos-smoke::run-1::001", LogLevel::Info, "run_start");
        let json = entry.to_jsonl().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(parsed["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(parsed["trace_id"], "nos-smoke::run-1::001");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "run_start");
        assert!(parsed.get("demo").is_none());
        assert!(parsed.get("outcome").is_none());
    }

    #[test]
    fn check_entry_carries_outcome() {
        let entry = LogEntry::new("nos-smoke::run-1::002", LogLevel::Info, "check")
            .with_demo("error")
            .with_check("read(-1)", Outcome::Expected)
            .with_errno(9)
            .with_duration_ms(0)
            .with_details(serde_json::json!({"message": "Bad file descriptor"}));
        let parsed: serde_json::Value = serde_json::from_str(&entry.to_jsonl().unwrap()).unwrap();
        assert_eq!(parsed["demo"], "error");
        assert_eq!(parsed["check"], "read(-1)");
        assert_eq!(parsed["outcome"], "expected");
        assert_eq!(parsed["errno"], 9);
        assert!(parsed["details"].is_object());
    }

    #[test]
    fn validate_valid_line() {
        let entry = LogEntry::new("nos-smoke::run-1::001", LogLevel::Info, "demo_start");
        let result = validate_log_line(&entry.to_jsonl().unwrap(), 1);
        assert!(result.is_ok(), "Valid line should pass: {result:?}");
    }

    #[test]
    fn validate_missing_required_field() {
        let json = r#"{"timestamp":"2026-01-01T00:00:00Z","level":"info","event":"test"}"#;
        let errors = validate_log_line(json, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "trace_id"));
    }

    #[test]
    fn validate_invalid_level() {
        let json = r#"{"timestamp":"2026-01-01T00:00:00Z","trace_id":"a::b::c","level":"critical","event":"test"}"#;
        let errors = validate_log_line(json, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "level"));
    }

    #[test]
    fn validate_check_without_name() {
        let json = r#"{"timestamp":"2026-01-01T00:00:00Z","trace_id":"a::b::c","level":"info","event":"check","outcome":"pass"}"#;
        let errors = validate_log_line(json, 3).unwrap_err();
        assert_eq!(errors[0].field, "check");
        assert_eq!(errors[0].line_number, 3);
    }

    #[test]
    fn validate_invalid_json() {
        let errors = validate_log_line("not json at all", 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "<json>"));
    }

    #[test]
    fn validate_bad_trace_id_format() {
        let json = r#"{"timestamp":"2026-01-01T00:00:00Z","trace_id":"no-separator","level":"info","event":"test"}"#;
        let errors = validate_log_line(json, 1).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "trace_id"));
    }

    #[test]
    fn emitter_generates_sequential_trace_ids() {
        let mut emitter = LogEmitter::new(Box::new(std::io::sink()), "run-42");
        let e1 = emitter
            .emit_entry(LogEntry::new("", LogLevel::Info, "start"))
            .unwrap();
        let e2 = emitter
            .emit_entry(LogEntry::new("", LogLevel::Info, "end"))
            .unwrap();
        assert_eq!(e1.trace_id, "nos-smoke::run-42::001");
        assert_eq!(e2.trace_id, "nos-smoke::run-42::002");
    }

    #[test]
    fn outcome_levels() {
        assert_eq!(Outcome::Pass.log_level(), LogLevel::Debug);
        assert_eq!(Outcome::Expected.log_level(), LogLevel::Info);
        assert_eq!(Outcome::Skip.log_level(), LogLevel::Info);
        assert_eq!(Outcome::Fail.log_level(), LogLevel::Warn);
    }

    #[test]
    fn emitter_keeps_explicit_trace_id() {
        let mut emitter = LogEmitter::new(Box::new(std::io::sink()), "run-1");
        let entry = emitter
            .emit_entry(LogEntry::new("x::y::z", LogLevel::Debug, "custom"))
            .unwrap();
        assert_eq!(entry.trace_id, "x::y::z");
    }
}
