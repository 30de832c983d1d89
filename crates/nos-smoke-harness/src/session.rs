//! Per-run state handed to each demo: output, input, checks and the log.

use std::fmt;
use std::io::{self, Read, Write};

use crate::config::SmokeConfig;
use crate::demos::Demo;
use crate::error::DemoError;
use crate::results::{CheckRecord, TestResults};
use crate::structured_log::{LogEmitter, LogEntry, Outcome};

/// C `EOF`.
pub const EOF: i32 = -1;

pub struct Session<'a> {
    pub config: SmokeConfig,
    out: Box<dyn Write + 'a>,
    input: Box<dyn Read + 'a>,
    results: TestResults,
    log: Option<LogEmitter>,
    current: Demo,
}

impl<'a> Session<'a> {
    pub fn new(config: SmokeConfig, out: impl Write + 'a, input: impl Read + 'a) -> Self {
        Self {
            config,
            out: Box::new(out),
            input: Box::new(input),
            results: TestResults::new(),
            log: None,
            current: Demo::Stdio,
        }
    }

    #[must_use]
    pub fn with_log(mut self, log: LogEmitter) -> Self {
        self.log = Some(log);
        self
    }

    pub fn results(&self) -> &TestResults {
        &self.results
    }

    /// Ends the session, flushing output and log.
    pub fn finish(mut self) -> TestResults {
        let _ = self.out.flush();
        if let Some(log) = self.log.as_mut() {
            let _ = log.flush();
        }
        self.results
    }

    pub(crate) fn enter(&mut self, demo: Demo) {
        self.current = demo;
    }

    /// Writes one line of output.
    pub fn line(&mut self, args: fmt::Arguments<'_>) -> Result<(), DemoError> {
        self.out.write_fmt(args)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    /// Writes text without a newline (`fputs`).
    pub fn write_str(&mut self, text: &str) -> Result<(), DemoError> {
        self.out.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Writes one byte (`putchar`). Returns the byte written.
    pub fn putchar(&mut self, byte: u8) -> Result<i32, DemoError> {
        self.out.write_all(&[byte])?;
        Ok(i32::from(byte))
    }

    /// Flushes pending output, e.g. before blocking on input.
    pub fn flush(&mut self) -> Result<(), DemoError> {
        self.out.flush()?;
        Ok(())
    }

    /// Reads one byte from input (`getchar`). End of stream and read errors
    /// both yield [`EOF`].
    pub fn getchar(&mut self) -> i32 {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(1) => return i32::from(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                _ => return EOF,
            }
        }
    }

    /// Records a pass/fail check and prints its status line.
    pub fn check(
        &mut self,
        name: &str,
        passed: bool,
        detail: Option<String>,
    ) -> Result<bool, DemoError> {
        let outcome = if passed { Outcome::Pass } else { Outcome::Fail };
        match (&detail, passed) {
            (Some(detail), false) => self.line(format_args!("  ❌ {name}: {detail}"))?,
            (_, false) => self.line(format_args!("  ❌ {name}"))?,
            (_, true) => self.line(format_args!("  ✅ {name}"))?,
        }
        self.record(name, outcome, detail, None);
        Ok(passed)
    }

    /// Records a check that was not run.
    pub fn skip(&mut self, name: &str, reason: &str) -> Result<(), DemoError> {
        self.line(format_args!("  ⏭️ {name} (跳过: {reason})"))?;
        self.record(name, Outcome::Skip, Some(reason.to_string()), None);
        Ok(())
    }

    /// Reports a call that failed on purpose, with its error text.
    pub fn expected_failure(&mut self, name: &str, err: &io::Error) -> Result<(), DemoError> {
        self.line(format_args!("  ℹ️ {name} 失败 (预期): {err}"))?;
        self.record(name, Outcome::Expected, Some(err.to_string()), err.raw_os_error());
        Ok(())
    }

    fn record(&mut self, name: &str, outcome: Outcome, detail: Option<String>, errno: Option<i32>) {
        let demo = self.current.name();
        if let Some(log) = self.log.as_mut() {
            let mut entry = LogEntry::new("", outcome.log_level(), "check")
                .with_demo(demo)
                .with_check(name, outcome);
            if let Some(errno) = errno {
                entry = entry.with_errno(errno);
            }
            if let Some(detail) = &detail {
                entry = entry.with_details(serde_json::json!({ "detail": detail }));
            }
            let _ = log.emit_entry(entry);
        }
        self.results.record(CheckRecord {
            demo,
            name: name.to_string(),
            outcome,
            detail,
        });
    }

    /// Emits a run-level log entry, if logging is enabled.
    pub(crate) fn log(&mut self, entry: LogEntry) {
        if let Some(log) = self.log.as_mut() {
            let _ = log.emit_entry(entry);
        }
    }
}
