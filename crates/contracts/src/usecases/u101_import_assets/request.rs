use serde::{Deserialize, Serialize};

/// Declared metadata of an uploaded spreadsheet.
///
/// Checked by the admission guard before a single byte of the body is
/// parsed; the values come from the multipart field, not from reading the
/// file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMeta {
    pub file_name: String,
    pub size_bytes: u64,
    pub content_type: String,
}
