//! File admission guard: size, MIME type, extension and file-name checks
//! run against declared metadata before any parsing cost is incurred.

use contracts::shared::import_validation::ValidationResult;
use contracts::usecases::u101_import_assets::FileMeta;

use crate::shared::security::{SecurityLimits, ALLOWED_EXTENSIONS, ALLOWED_MIME_TYPES};

/// Checks run in order and short-circuit on the first failure. Pure
/// function of the file's declared metadata; the body is never read here.
pub fn validate_file_upload(meta: &FileMeta, limits: &SecurityLimits) -> ValidationResult {
    if meta.size_bytes > limits.max_file_size_bytes {
        let limit_mb = limits.max_file_size_bytes / (1024 * 1024);
        return ValidationResult::fail(format!("File size exceeds the {} MB limit", limit_mb));
    }

    if !ALLOWED_MIME_TYPES.contains(&meta.content_type.as_str()) {
        return ValidationResult::fail(
            "Invalid file type. Only .xlsx, .xls and .csv files are allowed",
        );
    }

    match file_extension(&meta.file_name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => {
            return ValidationResult::fail(
                "Invalid file extension. Only .xlsx, .xls and .csv files are allowed",
            )
        }
    }

    // The file name is never used as a path, but reject traversal
    // sequences anyway.
    if meta.file_name.contains("..")
        || meta.file_name.contains('/')
        || meta.file_name.contains('\\')
    {
        return ValidationResult::fail("Invalid file name");
    }

    ValidationResult::ok()
}

/// Lower-cased suffix after the last dot, including the dot.
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const XLSX_MIME: &str =
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

    fn meta(file_name: &str, size_bytes: u64, content_type: &str) -> FileMeta {
        FileMeta {
            file_name: file_name.to_string(),
            size_bytes,
            content_type: content_type.to_string(),
        }
    }

    #[test]
    fn accepts_a_normal_xlsx() {
        let result = validate_file_upload(&meta("assets.xlsx", 1024, XLSX_MIME), &SecurityLimits::default());
        assert!(result.is_valid);
    }

    #[test]
    fn rejects_oversized_files_naming_the_limit() {
        let result = validate_file_upload(
            &meta("assets.xlsx", 5 * 1024 * 1024 + 1, XLSX_MIME),
            &SecurityLimits::default(),
        );
        assert!(!result.is_valid);
        assert_eq!(result.error.unwrap(), "File size exceeds the 5 MB limit");
    }

    #[test]
    fn rejects_unknown_mime_type() {
        let result =
            validate_file_upload(&meta("assets.xlsx", 10, "application/pdf"), &SecurityLimits::default());
        assert!(!result.is_valid);
        assert!(result.error.unwrap().contains("file type"));
    }

    #[test]
    fn rejects_unknown_extension_even_with_valid_mime() {
        let result = validate_file_upload(&meta("assets.pdf", 10, XLSX_MIME), &SecurityLimits::default());
        assert!(!result.is_valid);
        assert!(result.error.unwrap().contains("extension"));
    }

    #[test]
    fn extension_check_is_case_insensitive() {
        let result = validate_file_upload(&meta("ASSETS.XLSX", 10, XLSX_MIME), &SecurityLimits::default());
        assert!(result.is_valid);
    }

    #[test]
    fn rejects_path_traversal_names() {
        for name in ["../assets.csv", "dir/assets.csv", "dir\\assets.csv", "a..b.csv"] {
            let result = validate_file_upload(&meta(name, 10, "text/csv"), &SecurityLimits::default());
            assert!(!result.is_valid, "{} should be rejected", name);
            assert_eq!(result.error.unwrap(), "Invalid file name");
        }
    }

    #[test]
    fn size_check_runs_first() {
        // Oversized and badly named: the size message wins.
        let result = validate_file_upload(
            &meta("../evil.pdf", 6 * 1024 * 1024, "application/pdf"),
            &SecurityLimits::default(),
        );
        assert!(result.error.unwrap().contains("5 MB"));
    }
}
