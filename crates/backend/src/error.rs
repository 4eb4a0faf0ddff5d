use thiserror::Error;

/// Fatal import failures.
///
/// Admission, decode and structural problems abort the whole upload and
/// surface as one of these; row-level findings are reported through
/// `RowValidation` instead and never raise an error here. Messages are
/// plain text suitable for direct display.
#[derive(Debug, Error)]
pub enum ImportError {
    /// File rejected before parsing (size, type, extension or name).
    #[error("{0}")]
    Admission(String),

    #[error("No worksheets found in file")]
    NoWorksheets,

    #[error("File is empty")]
    EmptyFile,

    #[error("File contains {found} data rows, the maximum allowed is {max}")]
    TooManyRows { found: usize, max: usize },

    #[error("File contains a cell longer than {max} characters")]
    CellTooLong { max: usize },

    #[error("Failed to parse file: {0}")]
    Parse(String),

    /// Missing required columns in the header row.
    #[error("{0}")]
    Structure(String),

    /// Sanitization backstop; only reachable if a row that failed
    /// validation is sanitized anyway.
    #[error("Required field '{0}' is missing")]
    MissingRequired(String),
}
