//! Check bookkeeping and the end-of-run report.

use serde::Serialize;

use crate::structured_log::Outcome;

/// One named observation made by a demo.
#[derive(Debug, Clone, Serialize)]
pub struct CheckRecord {
    pub demo: &'static str,
    pub name: String,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// All checks recorded during a run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TestResults {
    records: Vec<CheckRecord>,
}

/// Totals over a [`TestResults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl Summary {
    /// Share of passing checks in percent. Expected failures count as passing.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }
}

impl TestResults {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, record: CheckRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[CheckRecord] {
        &self.records
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckRecord> {
        self.records.iter().filter(|r| r.outcome == Outcome::Fail)
    }

    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            total: self.records.len(),
            ..Summary::default()
        };
        for record in &self.records {
            match record.outcome {
                Outcome::Pass | Outcome::Expected => summary.passed += 1,
                Outcome::Fail => summary.failed += 1,
                Outcome::Skip => summary.skipped += 1,
            }
        }
        summary
    }

    /// Human-readable report printed at the end of a run.
    #[must_use]
    pub fn render_report(&self) -> String {
        let summary = self.summary();
        let mut out = String::from("\n📊 测试结果统计 (summary):\n");
        out.push_str(&format!("  总测试数 total:   {}\n", summary.total));
        out.push_str(&format!(
            "  通过 passed:      {} ({:.1}%)\n",
            summary.passed,
            summary.success_rate()
        ));
        out.push_str(&format!("  失败 failed:      {}\n", summary.failed));
        out.push_str(&format!("  跳过 skipped:     {}\n", summary.skipped));

        let mut failures = self.failures().peekable();
        if failures.peek().is_some() {
            out.push_str("\n❌ 失败的测试 (failed checks):\n");
            for record in failures {
                match &record.detail {
                    Some(detail) => {
                        out.push_str(&format!("  [{}] {}: {detail}\n", record.demo, record.name));
                    }
                    None => out.push_str(&format!("  [{}] {}\n", record.demo, record.name)),
                }
            }
        }
        out
    }
}
