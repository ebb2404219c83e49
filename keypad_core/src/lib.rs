//! # keypad_core - Four-Function Calculator Engine
//!
//! `keypad_core` interprets a stream of keypad inputs (digits, decimal point,
//! operators, equals, clear, backspace) and maintains a display value and a
//! human-readable equation trace. All state and result types are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Every input runs to completion synchronously
//! - **Errors as Data**: Arithmetic failures are returned in outcomes, never raised
//! - **Left-to-Right**: Chained operators evaluate immediately, like a simple accumulator
//!
//! ## Quick Start
//!
//! ```rust
//! use keypad_core::{InputEvent, InputStateMachine};
//!
//! let mut calc = InputStateMachine::new();
//! for event in InputEvent::parse_sequence("0.1 + 0.2 =").unwrap() {
//!     calc.apply(event).unwrap();
//! }
//! assert_eq!(calc.display(), "0.3");
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Input state machine and state snapshots
//! - [`evaluator`] - Pure arithmetic with rounding and domain-error detection
//! - [`operator`] - Operator enum and token/glyph mapping
//! - [`input`] - Keypad input events and token parsing
//! - [`history`] - Bounded log of finalized calculations
//! - [`validation`] - Driver-side numeric token checks
//! - [`settings`] - Engine configuration
//! - [`errors`] - Structured error types

pub mod engine;
pub mod errors;
pub mod evaluator;
pub mod history;
pub mod input;
pub mod operator;
pub mod settings;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use engine::{CalculatorState, DisplayState, InputStateMachine};
pub use errors::{CalcError, CalcResult};
pub use evaluator::{evaluate, CalculationOutcome};
pub use history::{HistoryEntry, HistoryLog};
pub use input::InputEvent;
pub use operator::Operator;
pub use settings::EngineSettings;
pub use validation::{validate_numeric_token, TokenValidation};
