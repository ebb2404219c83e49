//! # Input Events
//!
//! Discrete keypad events and the textual tokens that name them. Drivers
//! (terminal, scripted sequences) parse tokens here and hand the events to
//! [`InputStateMachine::apply`](crate::engine::InputStateMachine::apply).
//!
//! | Token              | Event          |
//! |--------------------|----------------|
//! | `0`-`9`, `3.14`    | `Number`       |
//! | `.`                | `DecimalPoint` |
//! | `+ - * /`, `− × ÷` | `Operator`     |
//! | `=`, `Enter`       | `Equals`       |
//! | `C`                | `Clear`        |
//! | `CE`               | `ClearEntry`   |
//! | `<-`, `BS`, `⌫`    | `Backspace`    |

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::operator::Operator;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum InputEvent {
    /// One or more digits, optionally with a decimal point
    Number(String),
    DecimalPoint,
    /// A binary operator
    Operator(Operator),
    Equals,
    Clear,
    ClearEntry,
    Backspace,
}

impl InputEvent {
    /// Parse a single token into an event.
    pub fn parse(token: &str) -> CalcResult<Self> {
        let token = token.trim();
        match token {
            "." => return Ok(InputEvent::DecimalPoint),
            "=" | "Enter" => return Ok(InputEvent::Equals),
            "C" | "c" => return Ok(InputEvent::Clear),
            "CE" | "ce" => return Ok(InputEvent::ClearEntry),
            "<-" | "BS" | "⌫" => return Ok(InputEvent::Backspace),
            _ => {}
        }

        if is_number_literal(token) {
            return Ok(InputEvent::Number(token.to_string()));
        }

        match Operator::parse_token(token) {
            Ok(op) => Ok(InputEvent::Operator(op)),
            Err(_) => Err(CalcError::invalid_input("token", token, "Unrecognized input")),
        }
    }

    /// Parse a whitespace-separated sequence of tokens.
    pub fn parse_sequence(line: &str) -> CalcResult<Vec<Self>> {
        line.split_whitespace().map(InputEvent::parse).collect()
    }
}

/// Digits with at most one decimal point and at least one digit.
pub(crate) fn is_number_literal(token: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;
    for c in token.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}
