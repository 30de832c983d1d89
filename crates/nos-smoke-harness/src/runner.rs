//! Sequential demo execution.

use std::time::Instant;

use serde::Serialize;

use crate::demos::Demo;
use crate::results::Summary;
use crate::session::Session;
use crate::structured_log::{LogEntry, LogLevel, Outcome};

/// How one demo ended.
#[derive(Debug, Clone, Serialize)]
pub struct DemoRun {
    pub demo: &'static str,
    /// Error text when the demo ended early.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub runs: Vec<DemoRun>,
    pub summary: Summary,
}

impl RunReport {
    pub fn aborted(&self) -> impl Iterator<Item = &DemoRun> {
        self.runs.iter().filter(|run| run.aborted.is_some())
    }
}

/// Runs demos in order. A demo that fails is reported and skipped; the rest
/// still run.
pub struct SmokeRunner {
    demos: Vec<Demo>,
}

impl SmokeRunner {
    #[must_use]
    pub fn new(demos: Vec<Demo>) -> Self {
        Self { demos }
    }

    pub fn run(&self, session: &mut Session<'_>) -> RunReport {
        session.log(
            LogEntry::new("", LogLevel::Info, "run_start").with_details(serde_json::json!({
                "demos": self.demos.iter().map(|d| d.name()).collect::<Vec<_>>(),
            })),
        );
        let _ = session.line(format_args!("🧪 NOS C 标准库冒烟测试 (libc smoke test)"));
        let _ = session.line(format_args!("====================================="));

        let mut runs = Vec::with_capacity(self.demos.len());
        for &demo in &self.demos {
            runs.push(run_one(session, demo));
        }

        let summary = session.results().summary();
        let report = session.results().render_report();
        let _ = session.write_str(&report);
        let _ = session.line(format_args!("\n🏁 测试完成 (done)"));
        session.log(
            LogEntry::new("", LogLevel::Info, "run_end").with_details(serde_json::json!({
                "summary": summary,
                "aborted": runs.iter().filter_map(|r| r.aborted.as_ref().map(|_| r.demo)).collect::<Vec<_>>(),
            })),
        );
        RunReport { runs, summary }
    }
}

fn run_one(session: &mut Session<'_>, demo: Demo) -> DemoRun {
    session.enter(demo);
    session.log(LogEntry::new("", LogLevel::Info, "demo_start").with_demo(demo.name()));
    let _ = session.line(format_args!("\n{}", demo.title()));

    let started = Instant::now();
    let result = demo.run(session);
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let aborted = match result {
        Ok(()) => None,
        Err(err) => {
            let text = err.to_string();
            let _ = session.line(format_args!("  ❌ {demo} 中止 (aborted): {text}"));
            let _ = session.check("完成 (completed)", false, Some(text.clone()));
            let mut entry = LogEntry::new("", LogLevel::Error, "demo_abort")
                .with_demo(demo.name())
                .with_check("completed", Outcome::Fail)
                .with_details(serde_json::json!({ "error": text }));
            if let Some(errno) = err.errno() {
                entry = entry.with_errno(errno);
            }
            session.log(entry);
            Some(text)
        }
    };

    session.log(
        LogEntry::new("", LogLevel::Info, "demo_end")
            .with_demo(demo.name())
            .with_duration_ms(duration_ms),
    );
    DemoRun {
        demo: demo.name(),
        aborted,
        duration_ms,
    }
}
