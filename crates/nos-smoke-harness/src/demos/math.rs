//! Trigonometric, exponential, power, root, rounding and absolute-value calls.

use std::f64::consts::FRAC_PI_4;

use nos_smoke_core::math::{EXPECTED, approx_eq, samples};

use crate::error::DemoError;
use crate::session::Session;

pub fn run(s: &mut Session<'_>) -> Result<(), DemoError> {
    let mut mismatches = Vec::new();
    for (sample, expected) in samples().into_iter().zip(EXPECTED) {
        s.line(format_args!("  {:<16} = {:.4}", sample.expr, sample.value))?;
        if !approx_eq(sample.value, expected) {
            mismatches.push(format!("{} = {:.4}, expected {expected:.4}", sample.expr, sample.value));
        }
    }
    let passed = mismatches.is_empty();
    s.check("math.h 结果", passed, (!passed).then(|| mismatches.join("; ")))?;

    let (sin, cos) = (FRAC_PI_4.sin(), FRAC_PI_4.cos());
    s.line(format_args!("  sin(π/4) = {sin:.3}, cos(π/4) = {cos:.3}"))?;
    s.check(
        "数学计算和格式化集成",
        (sin - 0.707).abs() < 0.01 && (cos - 0.707).abs() < 0.01,
        None,
    )?;
    Ok(())
}
