//! # Engine Settings
//!
//! Tunables for an [`InputStateMachine`](crate::engine::InputStateMachine).
//! Settings files are plain JSON; any field may be omitted.
//!
//! ```rust
//! use keypad_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_json_str(r#"{ "history_capacity": 10 }"#).unwrap();
//! assert_eq!(settings.history_capacity, 10);
//! assert_eq!(settings.error_sentinel, "Error");
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::evaluator::{DEFAULT_DECIMAL_PLACES, MAX_DECIMAL_PLACES};

/// Default number of finalized calculations kept in history
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Text shown in the display after an arithmetic error
pub const DEFAULT_ERROR_SENTINEL: &str = "Error";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Maximum history entries; 0 disables history
    pub history_capacity: usize,

    /// Decimal places results are rounded to
    pub decimal_places: u32,

    /// Display text rendered for an error state
    pub error_sentinel: String,

    /// Longest display an entry may grow to (None = unlimited)
    pub max_input_length: Option<usize>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            decimal_places: DEFAULT_DECIMAL_PLACES,
            error_sentinel: DEFAULT_ERROR_SENTINEL.to_string(),
            max_input_length: None,
        }
    }
}

impl EngineSettings {
    /// Parse settings from a JSON string.
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
        let settings = Self::from_json_str(&json)?;
        tracing::debug!(path = %path.display(), "loaded engine settings");
        Ok(settings)
    }

    /// Check every field is in range.
    pub fn validate(&self) -> CalcResult<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(CalcError::invalid_input(
                "decimal_places",
                self.decimal_places.to_string(),
                format!("Must be between 0 and {MAX_DECIMAL_PLACES}"),
            ));
        }
        if self.error_sentinel.is_empty() {
            return Err(CalcError::invalid_input("error_sentinel", "", "Cannot be empty"));
        }
        if self.max_input_length == Some(0) {
            return Err(CalcError::invalid_input("max_input_length", "0", "Must be positive"));
        }
        Ok(())
    }
}
