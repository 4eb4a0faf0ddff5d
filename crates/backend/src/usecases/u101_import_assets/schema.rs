//! The static asset column schema and the generic rule interpreter.
//!
//! The schema is built once at startup and drives every later stage:
//! structural validation, row validation and sanitization all iterate it
//! rather than the input, so unknown columns are never validated and never
//! reach the sanitized output.

use chrono::{NaiveDate, Utc};
use contracts::shared::column_schema::{ColumnSchema, ColumnType, ValueRule};
use contracts::shared::import_validation::ValidationResult;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Pattern for display names: letters, digits, spaces, `.`, `_`, `-`.
const NAME_PATTERN: &str = r"^[A-Za-z0-9 ._-]+$";
/// Serial numbers after uppercasing: digits, capitals and hyphens.
const SERIAL_PATTERN: &str = r"^[A-Z0-9-]+$";
/// RFID tags after uppercasing: digits and capitals only.
const RFID_PATTERN: &str = r"^[A-Z0-9]+$";

/// Accepted `status` values, matched case-sensitively. The sanitizer
/// lower-cases the stored value and defaults to "active"; the casing
/// mismatch is inherited behavior kept on purpose (see DESIGN.md).
pub const STATUS_VALUES: [&str; 4] = ["Available", "In Use", "Maintenance", "Out of Service"];

static ASSET_SCHEMA: Lazy<Vec<ColumnSchema>> = Lazy::new(|| {
    use ColumnType::*;
    use ValueRule::*;

    let statuses = STATUS_VALUES.iter().map(|s| s.to_string()).collect();

    vec![
        ColumnSchema::new(
            "asset_name",
            "asset_name",
            true,
            String,
            vec![
                Length { min: 3, max: 100 },
                Pattern {
                    regex: NAME_PATTERN.to_string(),
                    uppercase_first: false,
                },
            ],
        ),
        ColumnSchema::new(
            "serial_number",
            "serial_number",
            true,
            String,
            vec![
                Length { min: 5, max: 50 },
                Pattern {
                    regex: SERIAL_PATTERN.to_string(),
                    uppercase_first: true,
                },
            ],
        ),
        ColumnSchema::new(
            "rfid",
            "rfid",
            false,
            String,
            vec![
                Length { min: 8, max: 20 },
                Pattern {
                    regex: RFID_PATTERN.to_string(),
                    uppercase_first: true,
                },
            ],
        ),
        ColumnSchema::new(
            "category_name",
            "category_name",
            true,
            String,
            vec![Length { min: 2, max: 100 }],
        ),
        ColumnSchema::new(
            "product_name",
            "product_name",
            true,
            String,
            vec![Length { min: 2, max: 100 }],
        ),
        ColumnSchema::new(
            "manufacturer",
            "manufacturer",
            false,
            String,
            vec![Length { min: 0, max: 100 }],
        ),
        ColumnSchema::new(
            "model",
            "model",
            false,
            String,
            vec![Length { min: 0, max: 100 }],
        ),
        ColumnSchema::new(
            "location_name",
            "location_name",
            true,
            String,
            vec![Length { min: 2, max: 100 }],
        ),
        ColumnSchema::new(
            "department_name",
            "department_name",
            true,
            String,
            vec![Length { min: 2, max: 50 }],
        ),
        ColumnSchema::new(
            "purchase_date",
            "purchase_date",
            false,
            Date,
            vec![IsoDate {
                allow_future: false,
            }],
        ),
        ColumnSchema::new(
            "warranty_expiry",
            "warranty_expiry",
            false,
            Date,
            vec![IsoDate { allow_future: true }],
        ),
        ColumnSchema::new(
            "purchase_cost",
            "purchase_cost",
            false,
            Number,
            vec![Range {
                min: 0.0,
                max: 10_000_000.0,
            }],
        ),
        ColumnSchema::new("status", "status", false, Enum, vec![OneOf { values: statuses }]),
        ColumnSchema::new(
            "description",
            "description",
            false,
            String,
            vec![Length { min: 0, max: 500 }],
        ),
        ColumnSchema::new(
            "parent_asset_serial",
            "parent_asset_serial",
            false,
            String,
            vec![
                Length { min: 0, max: 50 },
                Pattern {
                    regex: SERIAL_PATTERN.to_string(),
                    uppercase_first: true,
                },
            ],
        ),
    ]
});

/// The column schema for asset uploads. Immutable after first access.
pub fn asset_schema() -> &'static [ColumnSchema] {
    &ASSET_SCHEMA
}

/// Check one trimmed cell value against one column's rule set.
///
/// Empty optional values always pass: "not provided" is not an
/// empty-string violation. Rules are applied in declaration order and the
/// first failure wins.
pub fn check_value(column: &ColumnSchema, raw: &str) -> ValidationResult {
    let value = raw.trim();

    if value.is_empty() {
        if column.required {
            return ValidationResult::fail(format!("{} is required", column.header));
        }
        return ValidationResult::ok();
    }

    for rule in &column.rules {
        if let Err(message) = apply_rule(column, rule, value) {
            return ValidationResult::fail(message);
        }
    }

    ValidationResult::ok()
}

fn apply_rule(column: &ColumnSchema, rule: &ValueRule, value: &str) -> Result<(), String> {
    match rule {
        ValueRule::Length { min, max } => {
            let chars = value.chars().count();
            if chars < *min || chars > *max {
                if *min == 0 {
                    return Err(format!(
                        "{} must be at most {} characters",
                        column.header, max
                    ));
                }
                return Err(format!(
                    "{} must be between {} and {} characters",
                    column.header, min, max
                ));
            }
            Ok(())
        }
        ValueRule::Pattern {
            regex,
            uppercase_first,
        } => {
            let candidate = if *uppercase_first {
                value.to_uppercase()
            } else {
                value.to_string()
            };
            if !compiled(regex)?.is_match(&candidate) {
                return Err(format!("{} contains invalid characters", column.header));
            }
            Ok(())
        }
        ValueRule::Range { min, max } => {
            let number: f64 = value
                .parse()
                .map_err(|_| format!("{} must be a number", column.header))?;
            if number < *min || number > *max {
                return Err(format!(
                    "{} must be between {} and {}",
                    column.header, min, max
                ));
            }
            Ok(())
        }
        ValueRule::IsoDate { allow_future } => {
            let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map_err(|_| format!("{} must be a date in YYYY-MM-DD format", column.header))?;
            if !allow_future && date > Utc::now().date_naive() {
                return Err(format!("{} cannot be in the future", column.header));
            }
            Ok(())
        }
        ValueRule::OneOf { values } => {
            if !values.iter().any(|v| v == value) {
                return Err(format!(
                    "{} must be one of: {}",
                    column.header,
                    values.join(", ")
                ));
            }
            Ok(())
        }
    }
}

/// Compile-once regex cache; schema patterns repeat across every row.
fn compiled(pattern: &str) -> Result<Regex, String> {
    static CACHE: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

    let mut cache = CACHE.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }
    let regex = Regex::new(pattern).map_err(|e| format!("invalid pattern '{}': {}", pattern, e))?;
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn column(key: &str) -> &'static ColumnSchema {
        asset_schema()
            .iter()
            .find(|c| c.key == key)
            .unwrap_or_else(|| panic!("no column {}", key))
    }

    #[test]
    fn asset_name_minimum_length() {
        let result = check_value(column("asset_name"), "AB");
        assert!(!result.is_valid);
        let message = result.error.unwrap();
        assert!(message.contains("between 3 and 100"), "{}", message);
    }

    #[test]
    fn serial_number_is_case_insensitive_via_uppercasing() {
        assert!(check_value(column("serial_number"), "AB-123").is_valid);
        assert!(check_value(column("serial_number"), "ab-123").is_valid);
        assert!(!check_value(column("serial_number"), "ab_123").is_valid);
    }

    #[test]
    fn empty_optional_fields_pass() {
        assert!(check_value(column("rfid"), "").is_valid);
        assert!(check_value(column("purchase_cost"), "   ").is_valid);
    }

    #[test]
    fn empty_required_field_fails() {
        let result = check_value(column("location_name"), "");
        assert!(!result.is_valid);
        assert_eq!(result.error.unwrap(), "location_name is required");
    }

    #[test]
    fn purchase_date_rejects_future_but_accepts_today() {
        let today = Utc::now().date_naive();
        let tomorrow = today + Duration::days(1);

        let date_column = column("purchase_date");
        assert!(check_value(date_column, &today.format("%Y-%m-%d").to_string()).is_valid);

        let result = check_value(date_column, &tomorrow.format("%Y-%m-%d").to_string());
        assert!(!result.is_valid);
        assert!(result.error.unwrap().contains("future"));
    }

    #[test]
    fn warranty_expiry_allows_future() {
        let next_year = Utc::now().date_naive() + Duration::days(365);
        let value = next_year.format("%Y-%m-%d").to_string();
        assert!(check_value(column("warranty_expiry"), &value).is_valid);
    }

    #[test]
    fn malformed_date_fails() {
        let result = check_value(column("purchase_date"), "01/02/2024");
        assert!(!result.is_valid);
        assert!(result.error.unwrap().contains("YYYY-MM-DD"));
    }

    #[test]
    fn purchase_cost_bounds() {
        let cost = column("purchase_cost");
        assert!(check_value(cost, "0").is_valid);
        assert!(check_value(cost, "10000000").is_valid);
        assert!(!check_value(cost, "-1").is_valid);
        assert!(!check_value(cost, "10000001").is_valid);
        assert!(!check_value(cost, "a lot").is_valid);
    }

    #[test]
    fn status_enum_is_case_sensitive() {
        let status = column("status");
        assert!(check_value(status, "Available").is_valid);
        assert!(check_value(status, "Out of Service").is_valid);
        assert!(!check_value(status, "available").is_valid);
        assert!(!check_value(status, "Retired").is_valid);
    }

    #[test]
    fn values_are_trimmed_before_checks() {
        assert!(check_value(column("asset_name"), "  Pump A1  ").is_valid);
        assert!(check_value(column("status"), " Available ").is_valid);
    }
}
