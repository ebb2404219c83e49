//! # Operators
//!
//! The four binary operators plus the `=` finalize pseudo-operator.
//!
//! Operators serialize as their ASCII token (`"+"`, `"-"`, `"*"`, `"/"`,
//! `"="`) and render in the equation trace with typographic glyphs.
//!
//! ```rust
//! use keypad_core::operator::Operator;
//!
//! let op: Operator = "*".parse().unwrap();
//! assert_eq!(op, Operator::Multiply);
//! assert_eq!(op.symbol(), "×");
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Calculator operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
    /// Passes the right operand through unchanged
    #[serde(rename = "=")]
    Equals,
}

impl Operator {
    /// All binary operators, in keypad order
    pub const BINARY: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// Parse an operator token.
    ///
    /// Accepts the ASCII tokens and the glyphs used in the equation trace.
    pub fn parse_token(token: &str) -> CalcResult<Self> {
        match token {
            "+" => Ok(Operator::Add),
            "-" | "−" => Ok(Operator::Subtract),
            "*" | "×" | "x" => Ok(Operator::Multiply),
            "/" | "÷" => Ok(Operator::Divide),
            "=" => Ok(Operator::Equals),
            other => Err(CalcError::invalid_operator(other)),
        }
    }

    /// Glyph shown in the equation trace
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
            Operator::Equals => "=",
        }
    }

    /// ASCII token
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Equals => "=",
        }
    }

    pub fn is_binary(&self) -> bool {
        !matches!(self, Operator::Equals)
    }
}

impl FromStr for Operator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::parse_token(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ascii_tokens() {
        assert_eq!(Operator::parse_token("+").unwrap(), Operator::Add);
        assert_eq!(Operator::parse_token("-").unwrap(), Operator::Subtract);
        assert_eq!(Operator::parse_token("*").unwrap(), Operator::Multiply);
        assert_eq!(Operator::parse_token("/").unwrap(), Operator::Divide);
        assert_eq!(Operator::parse_token("=").unwrap(), Operator::Equals);
    }

    #[test]
    fn test_parse_glyphs() {
        assert_eq!("−".parse::<Operator>().unwrap(), Operator::Subtract);
        assert_eq!("×".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("÷".parse::<Operator>().unwrap(), Operator::Divide);
    }

    #[test]
    fn test_invalid_token() {
        let err = Operator::parse_token("%").unwrap_err();
        assert_eq!(err, CalcError::invalid_operator("%"));
    }

    #[test]
    fn test_symbols() {
        let symbols: Vec<_> = Operator::BINARY.iter().map(|op| op.symbol()).collect();
        assert_eq!(symbols, vec!["+", "−", "×", "÷"]);
        assert!(!Operator::Equals.is_binary());
    }

    #[test]
    fn test_serialization() {
        let json = serde_json::to_string(&Operator::Divide).unwrap();
        assert_eq!(json, "\"/\"");
        let roundtrip: Operator = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Operator::Divide);
    }
}
