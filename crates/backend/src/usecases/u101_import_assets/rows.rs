//! Per-row validation against the asset column schema.

use std::collections::HashMap;

use contracts::shared::import_validation::{RowError, RowValidation, Severity};

use super::schema::{asset_schema, check_value};

/// Validate one data row.
///
/// Cells are zipped positionally against the headers; missing trailing
/// cells become empty strings. Iteration is driven by the schema, not the
/// headers, so unknown columns are never validated and never block a row.
pub fn validate_row(row: &[String], headers: &[String], row_number: usize) -> RowValidation {
    let mut data = HashMap::with_capacity(headers.len());
    for (i, header) in headers.iter().enumerate() {
        let value = row.get(i).map(|cell| cell.trim().to_string()).unwrap_or_default();
        data.insert(header.clone(), value);
    }

    let mut errors = Vec::new();
    for column in asset_schema() {
        let value = data.get(&column.header).map(String::as_str).unwrap_or("");
        let result = check_value(column, value);
        if !result.is_valid {
            errors.push(RowError {
                field: column.key.clone(),
                message: result.error.unwrap_or_default(),
                severity: Severity::Error,
            });
        } else if let Some(warning) = result.warning {
            errors.push(RowError {
                field: column.key.clone(),
                message: warning,
                severity: Severity::Warning,
            });
        }
    }

    let is_valid = errors.iter().all(|e| e.severity != Severity::Error);

    RowValidation {
        row_number,
        is_valid,
        errors,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers() -> Vec<String> {
        [
            "asset_name",
            "serial_number",
            "category_name",
            "product_name",
            "location_name",
            "department_name",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn valid_row() -> Vec<String> {
        ["Pump A1", "SN-00123", "Pumps", "Grundfos CR3", "Plant 1", "Maintenance"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn a_complete_valid_row_passes() {
        let validation = validate_row(&valid_row(), &headers(), 2);
        assert!(validation.is_valid, "{:?}", validation.errors);
        assert!(validation.errors.is_empty());
        assert_eq!(validation.row_number, 2);
        assert_eq!(validation.data["asset_name"], "Pump A1");
    }

    #[test]
    fn short_asset_name_fails_on_that_field() {
        let mut row = valid_row();
        row[0] = "AB".to_string();

        let validation = validate_row(&row, &headers(), 2);
        assert!(!validation.is_valid);
        assert_eq!(validation.errors.len(), 1);
        assert_eq!(validation.errors[0].field, "asset_name");
        assert_eq!(validation.errors[0].severity, Severity::Error);
        assert!(validation.errors[0].message.contains("between 3 and 100"));
    }

    #[test]
    fn missing_trailing_cells_become_empty_strings() {
        let row: Vec<String> = vec!["Pump A1".to_string(), "SN-00123".to_string()];
        let validation = validate_row(&row, &headers(), 3);

        assert_eq!(validation.data["department_name"], "");
        // Required fields past the row's end are reported missing.
        assert!(!validation.is_valid);
        assert!(validation.errors.iter().any(|e| e.field == "category_name"));
    }

    #[test]
    fn unknown_columns_are_carried_but_never_validated() {
        let mut headers = headers();
        headers.push("notes".to_string());
        let mut row = valid_row();
        row.push("!!! free text with ### anything".to_string());

        let validation = validate_row(&row, &headers, 2);
        assert!(validation.is_valid);
        assert_eq!(validation.data["notes"], "!!! free text with ### anything");
    }

    #[test]
    fn cell_values_are_trimmed_into_the_data_map() {
        let mut row = valid_row();
        row[1] = "  SN-00123  ".to_string();

        let validation = validate_row(&row, &headers(), 2);
        assert_eq!(validation.data["serial_number"], "SN-00123");
    }

    #[test]
    fn validation_is_idempotent() {
        let row = valid_row();
        let first = validate_row(&row, &headers(), 2);
        let second = validate_row(&row, &headers(), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn multiple_bad_fields_are_all_reported() {
        let mut row = valid_row();
        row[0] = "AB".to_string();
        row[1] = "S!".to_string();

        let validation = validate_row(&row, &headers(), 2);
        assert!(!validation.is_valid);
        let fields: Vec<&str> = validation.errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"asset_name"));
        assert!(fields.contains(&"serial_number"));
    }
}
