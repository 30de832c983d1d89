use nos_smoke_core::{FIB_MAX_TERMS, fibonacci};

use super::join;
use crate::error::DemoError;
use crate::session::Session;

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let n = s.config.fib_count;
    let terms: Vec<i32> = fibonacci(n).collect();
    s.line(format_args!("  fibonacci({n}): {}", join(&terms)))?;

    let expected_len = usize::try_from(n).unwrap_or(0).min(FIB_MAX_TERMS);
    s.check(
        "项数 term count",
        terms.len() == expected_len,
        (terms.len() != expected_len)
            .then(|| format!("expected {expected_len} terms, got {}", terms.len())),
    )?;
    Ok(())
}
