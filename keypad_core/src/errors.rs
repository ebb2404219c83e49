//! # Error Types
//!
//! Structured error types for keypad_core. Arithmetic failures are carried
//! as data inside [`CalculationOutcome`](crate::evaluator::CalculationOutcome)
//! and the engine's display; they are never raised from input operations.
//!
//! ## Example
//!
//! ```rust
//! use keypad_core::errors::{CalcError, CalcResult};
//!
//! fn checked_divisor(divisor: f64) -> CalcResult<f64> {
//!     if divisor == 0.0 {
//!         return Err(CalcError::DivisionByZero);
//!     }
//!     Ok(divisor)
//! }
//!
//! assert_eq!(checked_divisor(0.0).unwrap_err().error_code(), "DIVISION_BY_ZERO");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for keypad_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculator operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Divisor was exactly zero under `/`
    #[error("Division by zero")]
    DivisionByZero,

    /// Result is non-finite (too large in magnitude)
    #[error("Overflow: result is too large")]
    Overflow,

    /// Result is NaN
    #[error("Invalid computation: result is not a number")]
    InvalidComputation,

    /// Operator token outside `+ - * / =`
    #[error("Invalid operator: '{token}'")]
    InvalidOperator { token: String },

    /// An input token was rejected before reaching the engine state
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidOperator error
    pub fn invalid_operator(token: impl Into<String>) -> Self {
        CalcError::InvalidOperator { token: token.into() }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Short message suitable for a calculator status line.
    pub fn user_message(&self) -> String {
        match self {
            CalcError::DivisionByZero => "Cannot divide by zero".to_string(),
            CalcError::Overflow => "Result is too large".to_string(),
            CalcError::InvalidComputation => "Invalid calculation".to_string(),
            CalcError::InvalidOperator { .. } => "Invalid operator".to_string(),
            CalcError::InvalidInput { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::DivisionByZero => "DIVISION_BY_ZERO",
            CalcError::Overflow => "OVERFLOW",
            CalcError::InvalidComputation => "INVALID_COMPUTATION",
            CalcError::InvalidOperator { .. } => "INVALID_OPERATOR",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}
