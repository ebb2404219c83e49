//! # Arithmetic Evaluator
//!
//! Pure function from `(left, right, operator)` to a [`CalculationOutcome`].
//! Domain errors are returned as part of the outcome, never raised.
//!
//! ## Rounding
//!
//! Every successful result is rounded to 9 decimal places
//! (`round(x * 1e9) / 1e9`) so binary floating-point noise does not reach
//! the display:
//!
//! ```rust
//! use keypad_core::evaluator::evaluate;
//! use keypad_core::operator::Operator;
//!
//! let outcome = evaluate(0.1, 0.2, Operator::Add);
//! assert_eq!(outcome.value, 0.3);
//! assert!(!outcome.is_error());
//! ```

use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

use crate::errors::{CalcError, CalcResult};
use crate::operator::Operator;

/// Number of decimal places kept in results
pub const DEFAULT_DECIMAL_PLACES: u32 = 9;

/// Largest supported precision; 10^15 still scales integral parts exactly
pub const MAX_DECIMAL_PLACES: u32 = 15;

/// Significant digits shown on the display
const DISPLAY_SIGNIFICANT_DIGITS: usize = 12;

/// Value object returned by the evaluator. Not retained by the engine
/// beyond the most recent computation.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationOutcome {
    /// Rounded result; `0.0` when `error` is set
    pub value: f64,
    pub error: Option<CalcError>,
}

impl CalculationOutcome {
    pub fn ok(value: f64) -> Self {
        CalculationOutcome { value, error: None }
    }

    pub fn failed(error: CalcError) -> Self {
        CalculationOutcome {
            value: 0.0,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Driver-facing message, if this outcome is an error
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(CalcError::user_message)
    }

    /// Convert into a tagged result
    pub fn into_result(self) -> CalcResult<f64> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.value),
        }
    }
}

impl Serialize for CalculationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("CalculationOutcome", 3)?;
        state.serialize_field("value", &self.value)?;
        state.serialize_field("is_error", &self.is_error())?;
        state.serialize_field("error_message", &self.error_message())?;
        state.end()
    }
}

/// Evaluate `left op right` with the default 9-place rounding.
pub fn evaluate(left: f64, right: f64, op: Operator) -> CalculationOutcome {
    evaluate_with_precision(left, right, op, DEFAULT_DECIMAL_PLACES)
}

/// Evaluate `left op right`, rounding to `decimal_places`.
pub fn evaluate_with_precision(left: f64, right: f64, op: Operator, decimal_places: u32) -> CalculationOutcome {
    let raw = match op {
        Operator::Add => left + right,
        Operator::Subtract => left - right,
        Operator::Multiply => left * right,
        Operator::Divide => {
            if right == 0.0 {
                tracing::debug!(left, "division by zero");
                return CalculationOutcome::failed(CalcError::DivisionByZero);
            }
            left / right
        }
        Operator::Equals => right,
    };

    // NaN is not finite either, so it has to be checked first
    if raw.is_nan() {
        tracing::debug!(left, right, op = op.token(), "result is NaN");
        return CalculationOutcome::failed(CalcError::InvalidComputation);
    }
    if !raw.is_finite() {
        tracing::debug!(left, right, op = op.token(), "result overflowed");
        return CalculationOutcome::failed(CalcError::Overflow);
    }

    CalculationOutcome::ok(round_to(raw, decimal_places))
}

/// Evaluate with an operator given as a raw token.
///
/// Unknown tokens produce an `InvalidOperator` outcome with `value = 0`.
pub fn evaluate_token(left: f64, right: f64, token: &str) -> CalculationOutcome {
    match Operator::parse_token(token) {
        Ok(op) => evaluate(left, right, op),
        Err(err) => {
            tracing::debug!(token, "invalid operator token");
            CalculationOutcome::failed(err)
        }
    }
}

/// Round to 9 decimal places.
pub fn round_result(value: f64) -> f64 {
    round_to(value, DEFAULT_DECIMAL_PLACES)
}

fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places.min(MAX_DECIMAL_PLACES) as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Magnitudes this large have no fractional digits left to round
        return value;
    }
    let rounded = scaled.round() / factor;
    if !rounded.is_finite() {
        return value;
    }
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Canonical display text for a number.
///
/// Magnitudes at or above 1e15 or below 1e-6 use exponent notation
/// (`1e+300`, `1.5e-7`); everything else is shown with at most 12
/// significant digits and no trailing zeros. Negative zero prints as `"0"`.
/// The output always parses back with `str::parse::<f64>`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0".to_string();
    }

    // Round to 12 significant digits, then let Display drop trailing zeros
    let precise = format!("{:.*e}", DISPLAY_SIGNIFICANT_DIGITS - 1, value);
    let value = precise.parse::<f64>().unwrap_or(value);

    let magnitude = value.abs();
    if magnitude >= 1e15 || magnitude < 1e-6 {
        format_exponent(value)
    } else {
        value.to_string()
    }
}

/// Exponent notation with up to 7 significant digits, e.g. `-1.25e+20`.
fn format_exponent(value: f64) -> String {
    let formatted = format!("{:.6e}", value);
    let (mantissa, exponent) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    match exponent.strip_prefix('-') {
        Some(digits) => format!("{mantissa}e-{digits}"),
        None => format!("{mantissa}e+{exponent}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(evaluate(5.0, 3.0, Operator::Add).value, 8.0);
        assert_eq!(evaluate(10.0, 4.0, Operator::Subtract).value, 6.0);
        assert_eq!(evaluate(7.0, 6.0, Operator::Multiply).value, 42.0);
        assert_eq!(evaluate(15.0, 3.0, Operator::Divide).value, 5.0);
    }

    #[test]
    fn test_equals_passes_right_operand() {
        let outcome = evaluate(99.0, 4.5, Operator::Equals);
        assert_eq!(outcome.value, 4.5);
        assert!(!outcome.is_error());
    }

    #[test]
    fn test_float_noise_is_rounded() {
        assert_eq!(evaluate(0.1, 0.2, Operator::Add).value, 0.3);
        assert_eq!(evaluate(3.14, 2.86, Operator::Add).value, 6.0);
        assert_eq!(evaluate(1.1, 3.0, Operator::Multiply).value, 3.3);
    }

    #[test]
    fn test_division_by_zero() {
        for left in [5.0, -3.0, 0.0, 1e300] {
            let outcome = evaluate(left, 0.0, Operator::Divide);
            assert_eq!(outcome.error, Some(CalcError::DivisionByZero));
            assert_eq!(outcome.value, 0.0);
        }
        let outcome = evaluate(5.0, -0.0, Operator::Divide);
        assert_eq!(outcome.error, Some(CalcError::DivisionByZero));
    }

    #[test]
    fn test_overflow() {
        let outcome = evaluate(f64::MAX, 10.0, Operator::Multiply);
        assert_eq!(outcome.error, Some(CalcError::Overflow));
        assert_eq!(outcome.value, 0.0);
        assert_eq!(outcome.error_message().as_deref(), Some("Result is too large"));
    }

    #[test]
    fn test_nan_is_invalid_computation() {
        let outcome = evaluate(f64::INFINITY, f64::INFINITY, Operator::Subtract);
        assert_eq!(outcome.error, Some(CalcError::InvalidComputation));
    }

    #[test]
    fn test_invalid_operator_token() {
        let outcome = evaluate_token(2.0, 3.0, "^");
        assert_eq!(outcome.error, Some(CalcError::invalid_operator("^")));
        assert_eq!(outcome.value, 0.0);
        assert_eq!(evaluate_token(2.0, 3.0, "*").value, 6.0);
    }

    #[test]
    fn test_large_values_skip_rounding() {
        let outcome = evaluate(1e300, 1.0, Operator::Add);
        assert!(!outcome.is_error());
        assert_eq!(outcome.value, 1e300);
    }

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(1.0000000004), 1.0);
        assert_eq!(round_result(2.0000000006), 2.000000001);
        assert_eq!(round_result(-0.0000000001), 0.0);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(evaluate(2.0, 2.0, Operator::Add).into_result(), Ok(4.0));
        assert_eq!(
            evaluate(2.0, 0.0, Operator::Divide).into_result(),
            Err(CalcError::DivisionByZero)
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(8.0), "8");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(0.3), "0.3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1000000000.0), "1000000000");
    }

    #[test]
    fn test_format_number_exponent() {
        assert_eq!(format_number(1e300), "1e+300");
        assert_eq!(format_number(-2.5e20), "-2.5e+20");
        assert_eq!(format_number(1e15), "1e+15");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.5e-7), "1.5e-7");

        for value in [1e300, -2.5e20, 1e-7, 1.5e-7] {
            assert_eq!(format_number(value).parse::<f64>().unwrap(), value);
        }
    }

    #[test]
    fn test_format_number_significant_digits() {
        assert_eq!(format_number(123456789.123456789), "123456789.123");
        assert_eq!(format_number(0.333333333), "0.333333333");
        assert_eq!(format_number(999999999999999.0), "1e+15");
    }

    #[test]
    fn test_extreme_precision_is_clamped() {
        let outcome = evaluate_with_precision(7.0, 8.0, Operator::Add, u32::MAX);
        assert_eq!(outcome.value, 15.0);
        let outcome = evaluate_with_precision(0.1, 0.2, Operator::Add, 2_147_483_648);
        assert!(outcome.value.is_finite());
        assert!((outcome.value - 0.3).abs() < 1e-15);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(evaluate(1.0, 0.0, Operator::Divide)).unwrap();
        assert_eq!(json["value"], 0.0);
        assert_eq!(json["is_error"], true);
        assert_eq!(json["error_message"], "Cannot divide by zero");
    }
}
