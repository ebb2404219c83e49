//! # Input State Machine
//!
//! Interprets an ordered stream of keypad inputs and maintains the display
//! buffer, the pending operation and the equation trace.
//!
//! ## States
//!
//! ```text
//! Idle ──operator──▶ PendingOperation ──operator──▶ PendingOperation (chained)
//!  ▲                        │
//!  └───────── = ────────────┘
//! ```
//!
//! Both states are combined with the fresh-entry flag
//! (`awaiting_new_operand`): when set, the next digit replaces the display
//! instead of appending to it.
//!
//! Chained operators evaluate strictly left to right. `2 + 3 * 4 =` computes
//! `2 + 3 = 5` when `*` is pressed, then `5 * 4 = 20`.
//!
//! ## Example
//!
//! ```rust
//! use keypad_core::engine::InputStateMachine;
//! use keypad_core::operator::Operator;
//!
//! let mut calc = InputStateMachine::new();
//! calc.input_number("5").unwrap();
//! calc.input_operator(Operator::Add);
//! calc.input_number("3").unwrap();
//! calc.finalize();
//!
//! assert_eq!(calc.display(), "8");
//! assert_eq!(calc.equation_trace(), "5 + 3 = 8");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::evaluator::{evaluate_with_precision, format_number, CalculationOutcome};
use crate::history::{HistoryEntry, HistoryLog};
use crate::input::{is_number_literal, InputEvent};
use crate::operator::Operator;
use crate::settings::EngineSettings;

/// What the display currently holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum DisplayState {
    /// Decimal text being edited or last computed
    Value(String),
    /// The last computation failed; renders as the error sentinel
    Error(CalcError),
}

impl DisplayState {
    fn zero() -> Self {
        DisplayState::Value("0".to_string())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DisplayState::Error(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PendingOperation {
    left: f64,
    /// Left operand as it appears in the trace
    left_text: String,
    operator: Operator,
}

impl PendingOperation {
    fn trace_with(&self, right: &str) -> String {
        format!("{} {} {}", self.left_text, self.operator.symbol(), right)
    }
}

/// Read-only snapshot of the engine state, for rendering or JSON output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Rendered display text (error sentinel when `error` is set)
    pub display: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<CalcError>,
    pub pending_operator: Option<Operator>,
    pub pending_left_value: Option<String>,
    pub awaiting_new_operand: bool,
    pub equation_trace: String,
}

/// Calculator input state machine.
///
/// Every operation runs to completion and leaves the state consistent;
/// arithmetic errors are recorded in the display, never returned as `Err`.
#[derive(Debug, Clone)]
pub struct InputStateMachine {
    settings: EngineSettings,
    display: DisplayState,
    pending: Option<PendingOperation>,
    awaiting_new_operand: bool,
    equation_trace: String,
    last_outcome: Option<CalculationOutcome>,
    history: HistoryLog,
}

impl Default for InputStateMachine {
    fn default() -> Self {
        InputStateMachine::new()
    }
}

impl InputStateMachine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::from_valid_settings(EngineSettings::default())
    }

    /// Create an engine with custom settings.
    ///
    /// Fails with `CalcError::InvalidInput` if the settings are out of range.
    pub fn with_settings(settings: EngineSettings) -> CalcResult<Self> {
        settings.validate()?;
        Ok(Self::from_valid_settings(settings))
    }

    fn from_valid_settings(settings: EngineSettings) -> Self {
        let history = HistoryLog::with_capacity(settings.history_capacity);
        InputStateMachine {
            settings,
            display: DisplayState::zero(),
            pending: None,
            awaiting_new_operand: false,
            equation_trace: String::new(),
            last_outcome: None,
            history,
        }
    }

    // ------------------------------------------------------------------
    // Inputs
    // ------------------------------------------------------------------

    /// Enter one or more digits (optionally containing a decimal point).
    ///
    /// Replaces the display when a fresh operand is expected, otherwise
    /// appends, replacing a lone `"0"`. Rejects malformed tokens and tokens
    /// that would leave two decimal points in the display; the state is
    /// unchanged on `Err`.
    pub fn input_number(&mut self, token: &str) -> CalcResult<()> {
        if !is_number_literal(token) {
            return Err(CalcError::invalid_input("token", token, "Not a decimal number"));
        }

        let next = match &self.display {
            DisplayState::Value(current) if !self.awaiting_new_operand && current != "0" => {
                format!("{current}{token}")
            }
            _ => token.to_string(),
        };

        if next.matches('.').count() > 1 {
            return Err(CalcError::invalid_input(
                "token",
                token,
                "Display already contains a decimal point",
            ));
        }
        self.check_length(&next)?;

        tracing::trace!(token, display = %next, "number input");
        self.display = DisplayState::Value(next);
        self.awaiting_new_operand = false;
        self.refresh_trace();
        Ok(())
    }

    /// Enter a decimal point. A second press on the same operand is a no-op.
    pub fn input_decimal_point(&mut self) {
        let next = match &self.display {
            DisplayState::Value(current) if !self.awaiting_new_operand => {
                if current.contains('.') {
                    return;
                }
                format!("{current}.")
            }
            _ => "0.".to_string(),
        };

        if self.check_length(&next).is_err() {
            tracing::debug!(display = %next, "decimal point ignored, display at max length");
            return;
        }

        self.display = DisplayState::Value(next);
        self.awaiting_new_operand = false;
        self.refresh_trace();
    }

    /// Apply a binary operator.
    ///
    /// With no pending operation the display becomes the left operand. With
    /// one pending, it is evaluated immediately (no precedence) and the result
    /// becomes the new left operand. Returns the outcome when an evaluation
    /// happened. `Operator::Equals` is routed to [`finalize`](Self::finalize).
    pub fn input_operator(&mut self, op: Operator) -> Option<CalculationOutcome> {
        if !op.is_binary() {
            return self.finalize();
        }

        let display_text = match &self.display {
            DisplayState::Value(text) => text.clone(),
            DisplayState::Error(_) => {
                tracing::debug!(op = op.token(), "operator ignored while display shows an error");
                return None;
            }
        };
        let input_value = parse_display(&display_text);

        let outcome = match self.pending.take() {
            None => {
                self.equation_trace = format!("{} {} ", display_text, op.symbol());
                self.pending = Some(PendingOperation {
                    left: input_value,
                    left_text: display_text,
                    operator: op,
                });
                None
            }
            Some(pending) => {
                let outcome = self.evaluate(&pending, input_value);
                match &outcome.error {
                    None => {
                        let text = format_number(outcome.value);
                        tracing::debug!(
                            equation = %pending.trace_with(&display_text),
                            result = %text,
                            "chained evaluation"
                        );
                        self.equation_trace = format!("{} {} ", text, op.symbol());
                        self.display = DisplayState::Value(text.clone());
                        self.pending = Some(PendingOperation {
                            left: outcome.value,
                            left_text: text,
                            operator: op,
                        });
                    }
                    Some(err) => {
                        self.equation_trace = pending.trace_with(&display_text);
                        self.display = DisplayState::Error(err.clone());
                    }
                }
                Some(outcome)
            }
        };

        self.awaiting_new_operand = true;
        outcome
    }

    /// The `=` action.
    ///
    /// Evaluates the pending operation against the display. On success the
    /// trace becomes `"<left> <op> <right> = <result>"` and the equation is
    /// recorded in history; on error the display shows the sentinel and the
    /// trace keeps the unresolved expression. Returns `None` (state
    /// unchanged) when nothing is pending.
    pub fn finalize(&mut self) -> Option<CalculationOutcome> {
        let display_text = match &self.display {
            DisplayState::Value(text) => text.clone(),
            DisplayState::Error(_) => return None,
        };
        let pending = self.pending.take()?;

        let outcome = self.evaluate(&pending, parse_display(&display_text));
        let expression = pending.trace_with(&display_text);

        match &outcome.error {
            None => {
                let text = format_number(outcome.value);
                let equation = format!("{expression} = {text}");
                tracing::debug!(equation = %equation, "finalized");
                self.history.record(HistoryEntry::new(equation.clone(), outcome.value));
                self.equation_trace = equation;
                self.display = DisplayState::Value(text);
            }
            Some(err) => {
                self.equation_trace = expression;
                self.display = DisplayState::Error(err.clone());
            }
        }

        self.awaiting_new_operand = true;
        Some(outcome)
    }

    /// Reset to the initial state. History is kept.
    pub fn clear_all(&mut self) {
        self.display = DisplayState::zero();
        self.pending = None;
        self.awaiting_new_operand = false;
        self.equation_trace.clear();
        self.last_outcome = None;
    }

    /// Reset only the display to `"0"`.
    pub fn clear_entry(&mut self) {
        self.display = DisplayState::zero();
    }

    /// Remove the last character of the operand being typed.
    ///
    /// Ignored right after an operator or `=`.
    pub fn backspace(&mut self) {
        if self.awaiting_new_operand {
            return;
        }
        if let DisplayState::Value(text) = &mut self.display {
            text.pop();
            if text.is_empty() || text.as_str() == "-" {
                *text = "0".to_string();
            }
        }
    }

    /// Dispatch a parsed input event.
    ///
    /// Only a rejected number token produces `Err`.
    pub fn apply(&mut self, event: InputEvent) -> CalcResult<Option<CalculationOutcome>> {
        match event {
            InputEvent::Number(token) => self.input_number(&token).map(|_| None),
            InputEvent::DecimalPoint => {
                self.input_decimal_point();
                Ok(None)
            }
            InputEvent::Operator(op) => Ok(self.input_operator(op)),
            InputEvent::Equals => Ok(self.finalize()),
            InputEvent::Clear => {
                self.clear_all();
                Ok(None)
            }
            InputEvent::ClearEntry => {
                self.clear_entry();
                Ok(None)
            }
            InputEvent::Backspace => {
                self.backspace();
                Ok(None)
            }
        }
    }

    /// Clear the history log.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Display text; the configured sentinel while in an error state.
    pub fn display(&self) -> &str {
        match &self.display {
            DisplayState::Value(text) => text,
            DisplayState::Error(_) => &self.settings.error_sentinel,
        }
    }

    pub fn display_state(&self) -> &DisplayState {
        &self.display
    }

    /// The display as a number, or the error that replaced it.
    pub fn display_value(&self) -> CalcResult<f64> {
        match &self.display {
            DisplayState::Value(text) => Ok(parse_display(text)),
            DisplayState::Error(err) => Err(err.clone()),
        }
    }

    pub fn equation_trace(&self) -> &str {
        &self.equation_trace
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending.as_ref().map(|p| p.operator)
    }

    pub fn is_awaiting_new_operand(&self) -> bool {
        self.awaiting_new_operand
    }

    /// Outcome of the most recent evaluation, if any since the last clear
    pub fn last_outcome(&self) -> Option<&CalculationOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn snapshot(&self) -> CalculatorState {
        CalculatorState {
            display: self.display().to_string(),
            error: match &self.display {
                DisplayState::Error(err) => Some(err.clone()),
                DisplayState::Value(_) => None,
            },
            pending_operator: self.pending_operator(),
            pending_left_value: self.pending.as_ref().map(|p| p.left_text.clone()),
            awaiting_new_operand: self.awaiting_new_operand,
            equation_trace: self.equation_trace.clone(),
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn evaluate(&mut self, pending: &PendingOperation, right: f64) -> CalculationOutcome {
        let outcome = evaluate_with_precision(pending.left, right, pending.operator, self.settings.decimal_places);
        if let Some(err) = &outcome.error {
            tracing::debug!(code = err.error_code(), "evaluation failed");
        }
        self.last_outcome = Some(outcome.clone());
        outcome
    }

    /// Rewrite the trailing operand of the trace to match the display.
    fn refresh_trace(&mut self) {
        let text = self.display().to_string();
        self.equation_trace = match &self.pending {
            Some(pending) => pending.trace_with(&text),
            None => text,
        };
    }

    fn check_length(&self, next: &str) -> CalcResult<()> {
        match self.settings.max_input_length {
            Some(max) if next.chars().count() > max => Err(CalcError::invalid_input(
                "display",
                next,
                format!("Entry longer than {max} characters"),
            )),
            _ => Ok(()),
        }
    }
}

/// Display text as a number. Partial entries like `"0."` parse fine.
fn parse_display(text: &str) -> f64 {
    text.parse().unwrap_or(0.0)
}
