//! # Token Validation
//!
//! Driver-side pre-checks for numeric tokens before they are fed to the
//! engine.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Outcome of validating a numeric token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenValidation {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl TokenValidation {
    fn valid() -> Self {
        TokenValidation {
            is_valid: true,
            error_message: None,
        }
    }

    fn invalid(message: &str) -> Self {
        TokenValidation {
            is_valid: false,
            error_message: Some(message.to_string()),
        }
    }
}

/// Validate a numeric token.
///
/// ```rust
/// use keypad_core::validation::validate_numeric_token;
///
/// assert!(validate_numeric_token("3.14").is_valid);
/// assert_eq!(
///     validate_numeric_token("").error_message.as_deref(),
///     Some("Input cannot be empty")
/// );
/// ```
pub fn validate_numeric_token(input: &str) -> TokenValidation {
    if input.is_empty() {
        return TokenValidation::invalid("Input cannot be empty");
    }

    let value = match input.trim().parse::<f64>() {
        Ok(v) if !v.is_nan() => v,
        _ => return TokenValidation::invalid("Invalid number format"),
    };

    if !value.is_finite() {
        return TokenValidation::invalid("Number is too large");
    }

    TokenValidation::valid()
}

/// Validate a numeric token and reject it if longer than `max_len` characters.
pub fn validate_with_limit(input: &str, max_len: usize) -> TokenValidation {
    if input.chars().count() > max_len {
        return TokenValidation::invalid("Number too long");
    }
    validate_numeric_token(input)
}

/// Validate a numeric token as a `CalcResult`, applying the length limit
/// when one is configured.
pub fn check_token(input: &str, max_len: Option<usize>) -> CalcResult<()> {
    let validation = match max_len {
        Some(max) => validate_with_limit(input, max),
        None => validate_numeric_token(input),
    };
    match validation.error_message {
        Some(reason) => Err(CalcError::invalid_input("token", input, reason)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tokens() {
        for token in ["0", "42", "3.14", "-5", "1e10", ".5"] {
            assert!(validate_numeric_token(token).is_valid, "{token} should be valid");
        }
    }

    #[test]
    fn test_empty() {
        let v = validate_numeric_token("");
        assert!(!v.is_valid);
        assert_eq!(v.error_message.as_deref(), Some("Input cannot be empty"));
    }

    #[test]
    fn test_invalid_format() {
        for token in ["abc", "1.2.3", "NaN", "--1"] {
            let v = validate_numeric_token(token);
            assert_eq!(v.error_message.as_deref(), Some("Invalid number format"), "{token}");
        }
    }

    #[test]
    fn test_too_large() {
        assert_eq!(
            validate_numeric_token("1e999").error_message.as_deref(),
            Some("Number is too large")
        );
        assert!(!validate_numeric_token("inf").is_valid);
    }

    #[test]
    fn test_length_limit() {
        let v = validate_with_limit("1234567890123456", 15);
        assert_eq!(v.error_message.as_deref(), Some("Number too long"));
        assert!(validate_with_limit("123456789012345", 15).is_valid);
    }

    #[test]
    fn test_check_token() {
        assert!(check_token("42", None).is_ok());
        assert!(check_token("42", Some(2)).is_ok());

        let err = check_token("123", Some(2)).unwrap_err();
        assert_eq!(err, CalcError::invalid_input("token", "123", "Number too long"));

        let err = check_token("", None).unwrap_err();
        assert_eq!(err.user_message(), "Input cannot be empty");
    }

    #[test]
    fn test_serialization_skips_missing_message() {
        let json = serde_json::to_string(&validate_numeric_token("7")).unwrap();
        assert_eq!(json, r#"{"is_valid":true}"#);
    }
}
