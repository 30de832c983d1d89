//! `<math.h>` sample evaluations for the numeric demo.

use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4};

/// One evaluated math call: the C expression and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MathSample {
    pub expr: &'static str,
    pub value: f64,
}

const fn sample(expr: &'static str, value: f64) -> MathSample {
    MathSample { expr, value }
}

/// Evaluates the fixed set of math calls, in display order.
#[must_use]
pub fn samples() -> Vec<MathSample> {
    vec![
        sample("sin(PI/2)", FRAC_PI_2.sin()),
        sample("cos(0.0)", 0.0_f64.cos()),
        sample("tan(PI/4)", FRAC_PI_4.tan()),
        sample("exp(1.0)", 1.0_f64.exp()),
        sample("log(E)", E.ln()),
        sample("log10(100.0)", 100.0_f64.log10()),
        sample("pow(2.0, 10.0)", 2.0_f64.powf(10.0)),
        sample("sqrt(16.0)", 16.0_f64.sqrt()),
        sample("ceil(3.2)", 3.2_f64.ceil()),
        sample("floor(3.8)", 3.8_f64.floor()),
        sample("round(3.5)", 3.5_f64.round()),
        sample("fabs(-5.5)", (-5.5_f64).abs()),
    ]
}

/// Reference values for [`samples`], same order, rounded to 4 decimals.
pub const EXPECTED: [f64; 12] = [
    1.0, 1.0, 1.0, 2.7183, 1.0, 2.0, 1024.0, 4.0, 4.0, 3.0, 4.0, 5.5,
];

/// Absolute tolerance matching the 4-decimal display precision.
pub const TOLERANCE: f64 = 5e-5;

/// True if `actual` is within [`TOLERANCE`] of `expected`.
#[must_use]
pub fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_match_reference_values() {
        let values = samples();
        assert_eq!(values.len(), EXPECTED.len());
        for (s, expected) in values.iter().zip(EXPECTED) {
            assert!(
                approx_eq(s.value, expected),
                "{} = {} (expected {expected})",
                s.expr,
                s.value
            );
        }
    }

    #[test]
    fn rounding_family() {
        assert_eq!(2.5_f64.round(), 3.0);
        assert_eq!((-3.2_f64).ceil(), -3.0);
        assert_eq!((-3.2_f64).floor(), -4.0);
    }

    #[test]
    fn approx_eq_respects_tolerance() {
        assert!(approx_eq(0.70711, FRAC_PI_4.sin()));
        assert!(!approx_eq(0.7, FRAC_PI_4.sin()));
    }
}
