//! Structural validation of the parsed header row.

use std::collections::HashSet;

use contracts::shared::import_validation::ValidationResult;

use super::schema::asset_schema;

/// Missing required columns are fatal for the whole file and are listed by
/// name. Extra operator-added columns are common in the field (free-text
/// notes appended by different departments), so unknown headers only
/// produce a warning.
pub fn validate_structure(headers: &[String]) -> ValidationResult {
    let schema = asset_schema();

    let missing: Vec<&str> = schema
        .iter()
        .filter(|column| column.required)
        .filter(|column| !headers.iter().any(|h| h == &column.header))
        .map(|column| column.header.as_str())
        .collect();

    if !missing.is_empty() {
        return ValidationResult::fail(format!(
            "Missing required columns: {}",
            missing.join(", ")
        ));
    }

    let known: HashSet<&str> = schema.iter().map(|column| column.header.as_str()).collect();
    let extra: Vec<&str> = headers
        .iter()
        .filter(|h| !known.contains(h.as_str()))
        .map(String::as_str)
        .collect();

    if extra.is_empty() {
        ValidationResult::ok()
    } else {
        ValidationResult::ok_with_warning(format!("Ignoring unrecognized columns: {}", extra.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required_headers() -> Vec<String> {
        asset_schema()
            .iter()
            .filter(|c| c.required)
            .map(|c| c.header.clone())
            .collect()
    }

    #[test]
    fn all_required_headers_pass_without_warning() {
        let result = validate_structure(&required_headers());
        assert!(result.is_valid);
        assert!(result.warning.is_none());
    }

    #[test]
    fn each_missing_required_header_is_named() {
        for omitted in required_headers() {
            let headers: Vec<String> = required_headers()
                .into_iter()
                .filter(|h| h != &omitted)
                .collect();
            let result = validate_structure(&headers);
            assert!(!result.is_valid);
            let message = result.error.unwrap();
            assert!(message.contains(&omitted), "{} not named in: {}", omitted, message);
        }
    }

    #[test]
    fn extra_columns_warn_but_do_not_fail() {
        let mut headers = required_headers();
        headers.push("extra_col".to_string());

        let result = validate_structure(&headers);
        assert!(result.is_valid);
        assert!(result.warning.unwrap().contains("extra_col"));
    }

    #[test]
    fn optional_known_columns_are_not_extra() {
        let mut headers = required_headers();
        headers.push("rfid".to_string());
        headers.push("status".to_string());

        let result = validate_structure(&headers);
        assert!(result.is_valid);
        assert!(result.warning.is_none());
    }
}
