//! Sanitization of validated row data into typed records.
//!
//! Trusts that its input already passed row validation; the
//! required-field error here is a defensive backstop, not the primary
//! validation mechanism.

use std::collections::{BTreeMap, HashMap};

use contracts::shared::column_schema::ColumnType;
use serde_json::Value;

use crate::error::ImportError;

use super::schema::asset_schema;

/// Convert one validated row into a typed record for the persistence
/// layer. Iterates the schema, not the input, so unknown keys are dropped
/// and the output never contains unexpected fields. Empty optional fields
/// are omitted entirely rather than written as null or "".
pub fn sanitize_asset_row(
    data: &HashMap<String, String>,
) -> Result<BTreeMap<String, Value>, ImportError> {
    let mut record = BTreeMap::new();

    for column in asset_schema() {
        let raw = data
            .get(&column.header)
            .map(|value| value.trim())
            .unwrap_or("");

        if raw.is_empty() {
            if column.required {
                return Err(ImportError::MissingRequired(column.key.clone()));
            }
            continue;
        }

        let value = match column.column_type {
            // Dates stay as strings: format was already validated, the
            // downstream consumer is trusted with the parsed form.
            ColumnType::String | ColumnType::Date => Value::String(raw.to_string()),
            ColumnType::Number => match raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
                Some(number) => Value::Number(number),
                None => continue,
            },
            // Stored enums are lower-cased while validation matched the
            // declared casing; inherited mismatch, kept (see DESIGN.md).
            ColumnType::Enum => Value::String(raw.to_lowercase()),
        };
        record.insert(column.key.clone(), value);
    }

    if !record.contains_key("status") {
        record.insert("status".to_string(), Value::String("active".to_string()));
    }

    Ok(record)
}
