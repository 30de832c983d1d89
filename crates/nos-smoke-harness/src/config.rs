//! Run configuration.
//!
//! Defaults reproduce the canonical run. Two environment variables can adjust
//! it before CLI flags are applied:
//! - `NOS_SMOKE_STDIN`: `interactive` (default) or `skip`.
//! - `NOS_SMOKE_DELAY_MS`: sleep length of the syscall demo, in milliseconds.

use std::path::PathBuf;
use std::time::Duration;

use crate::demos::Demo;

pub const STDIN_ENV: &str = "NOS_SMOKE_STDIN";
pub const DELAY_ENV: &str = "NOS_SMOKE_DELAY_MS";

/// Default sleep of the syscall demo.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);
/// Term count the canonical run asks the Fibonacci demo for.
pub const DEFAULT_FIB_COUNT: i32 = 15;

/// Whether the stdio demo reads a character from standard input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StdinMode {
    #[default]
    Interactive,
    Skip,
}

impl StdinMode {
    /// Parse from string (case-insensitive). Unknown values keep the default.
    #[must_use]
    pub fn from_str_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "off" | "none" | "no" | "0" => Self::Skip,
            _ => Self::Interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmokeConfig {
    /// Directory holding the transient file.
    pub scratch_dir: PathBuf,
    pub delay: Duration,
    pub fib_count: i32,
    pub stdin: StdinMode,
    /// Demos to run; empty means all of them.
    pub only: Vec<Demo>,
    /// JSONL structured log destination.
    pub log_path: Option<PathBuf>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            scratch_dir: std::env::temp_dir(),
            delay: DEFAULT_DELAY,
            fib_count: DEFAULT_FIB_COUNT,
            stdin: StdinMode::Interactive,
            only: Vec::new(),
            log_path: None,
        }
    }
}

impl SmokeConfig {
    /// Defaults overlaid with the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overlay(|key| std::env::var(key).ok())
    }

    /// Applies `NOS_SMOKE_*` values obtained through `lookup`.
    ///
    /// Malformed delays are ignored.
    #[must_use]
    pub fn with_env_overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(STDIN_ENV) {
            self.stdin = StdinMode::from_str_loose(&raw);
        }
        if let Some(ms) = lookup(DELAY_ENV).and_then(|raw| raw.trim().parse::<u64>().ok()) {
            self.delay = Duration::from_millis(ms);
        }
        self
    }

    /// Demos selected for this run, in canonical order.
    #[must_use]
    pub fn selected(&self) -> Vec<Demo> {
        Demo::ALL
            .into_iter()
            .filter(|demo| self.only.is_empty() || self.only.contains(demo))
            .collect()
    }
}
