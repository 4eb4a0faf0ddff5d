//! Hard ceilings protecting the import pipeline from resource exhaustion.

use serde::Deserialize;

/// Maximum accepted upload size
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Maximum number of data rows per upload
pub const MAX_ROW_COUNT: usize = 1000;

/// Maximum character length of a single cell
pub const MAX_CELL_LENGTH: usize = 1000;

/// MIME types accepted by the admission guard
pub const ALLOWED_MIME_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/csv",
];

/// File extensions accepted by the admission guard (lower-cased)
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".xlsx", ".xls", ".csv"];

/// Runtime ceilings, overridable through `config.toml`.
///
/// The compiled defaults above stay authoritative when no override is
/// configured; deployments may only need to tighten them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecurityLimits {
    #[serde(default = "default_max_file_size_bytes")]
    pub max_file_size_bytes: u64,
    #[serde(default = "default_max_row_count")]
    pub max_row_count: usize,
    #[serde(default = "default_max_cell_length")]
    pub max_cell_length: usize,
}

fn default_max_file_size_bytes() -> u64 {
    MAX_FILE_SIZE_BYTES
}

fn default_max_row_count() -> usize {
    MAX_ROW_COUNT
}

fn default_max_cell_length() -> usize {
    MAX_CELL_LENGTH
}

impl Default for SecurityLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: MAX_FILE_SIZE_BYTES,
            max_row_count: MAX_ROW_COUNT,
            max_cell_length: MAX_CELL_LENGTH,
        }
    }
}
