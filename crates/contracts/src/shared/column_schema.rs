use serde::{Deserialize, Serialize};

/// Declared cell type for one spreadsheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    String,
    Number,
    Date,
    Enum,
}

/// Declarative validation rule interpreted by the backend's generic checker.
///
/// Rules are plain data (no embedded closures) so a schema can be
/// serialized, diffed and tested in isolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValueRule {
    /// Character-count bounds, applied after trimming.
    Length { min: usize, max: usize },
    /// Full-match regex; `uppercase_first` uppercases the value before
    /// matching so lowercase input passes case-insensitive patterns.
    Pattern { regex: String, uppercase_first: bool },
    /// Numeric bounds, inclusive on both ends.
    Range { min: f64, max: f64 },
    /// `YYYY-MM-DD` date that must parse; optionally rejects future dates.
    IsoDate { allow_future: bool },
    /// Case-sensitive membership in the declared value list.
    OneOf { values: Vec<String> },
}

/// Rule set for one spreadsheet column.
///
/// `key` is the internal field name emitted by sanitization; `header` is
/// the column title expected in the uploaded file. Schemas are built once
/// at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub key: String,
    pub header: String,
    pub required: bool,
    pub column_type: ColumnType,
    pub rules: Vec<ValueRule>,
}

impl ColumnSchema {
    pub fn new(
        key: &str,
        header: &str,
        required: bool,
        column_type: ColumnType,
        rules: Vec<ValueRule>,
    ) -> Self {
        Self {
            key: key.to_string(),
            header: header.to_string(),
            required,
            column_type,
            rules,
        }
    }
}
