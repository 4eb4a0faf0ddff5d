use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Atomic outcome of checking one value (or one file) against one rule set.
///
/// Carries human-readable text only; the UI renders `error`/`warning`
/// verbatim, no error codes are exposed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
            warning: None,
        }
    }

    pub fn ok_with_warning(warning: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            error: None,
            warning: Some(warning.into()),
        }
    }

    pub fn fail(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
            warning: None,
        }
    }
}

/// Whether a field-level finding blocks the row or is informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One field-level finding attached to the originating column key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

/// Aggregated verdict for one spreadsheet row.
///
/// `data` keeps the header-to-value map so the UI can render per-row
/// diagnostics without re-deriving the positional mapping. A row is valid
/// iff it has zero error-severity entries; warnings never block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowValidation {
    pub row_number: usize,
    pub is_valid: bool,
    pub errors: Vec<RowError>,
    pub data: HashMap<String, String>,
}
