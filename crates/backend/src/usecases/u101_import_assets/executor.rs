use std::time::Instant;

use contracts::usecases::u101_import_assets::{FileMeta, ImportReport};

use crate::error::ImportError;
use crate::shared::security::SecurityLimits;

use super::admission::validate_file_upload;
use super::decoder::parse_spreadsheet;
use super::rows::validate_row;
use super::sanitizer::sanitize_asset_row;
use super::structure::validate_structure;

/// Executor for the asset import UseCase.
///
/// Stage order: admission -> decode -> structure -> row validation ->
/// sanitize. Admission, decode and structural failures abort the run;
/// invalid rows are reported in the result and skipped during
/// sanitization, leaving the accept-or-reject policy to the caller.
pub struct ImportExecutor {
    limits: SecurityLimits,
}

impl ImportExecutor {
    pub fn new(limits: SecurityLimits) -> Self {
        Self { limits }
    }

    pub fn run(&self, meta: &FileMeta, bytes: &[u8]) -> Result<ImportReport, ImportError> {
        let started_at = Instant::now();

        let admission = validate_file_upload(meta, &self.limits);
        if !admission.is_valid {
            return Err(ImportError::Admission(
                admission.error.unwrap_or_else(|| "File rejected".to_string()),
            ));
        }

        let sheet = parse_spreadsheet(bytes, &meta.file_name, &self.limits)?;

        let structure = validate_structure(&sheet.headers);
        if !structure.is_valid {
            return Err(ImportError::Structure(
                structure
                    .error
                    .unwrap_or_else(|| "Invalid file structure".to_string()),
            ));
        }
        if let Some(warning) = &structure.warning {
            tracing::warn!("{}: {}", meta.file_name, warning);
        }

        let mut rows = Vec::with_capacity(sheet.rows.len());
        let mut records = Vec::new();

        for (idx, row) in sheet.rows.iter().enumerate() {
            if idx > 0 && idx % 100 == 0 {
                tracing::info!("Import progress: {} rows processed...", idx);
            }

            // Spreadsheet row numbers: 1-based, header is row 1.
            let validation = validate_row(row, &sheet.headers, idx + 2);
            if validation.is_valid {
                records.push(sanitize_asset_row(&validation.data)?);
            }
            rows.push(validation);
        }

        let valid_rows = records.len();
        let invalid_rows = rows.len() - valid_rows;

        tracing::info!(
            "Import finished: file={}, total={}, valid={}, invalid={}, elapsed_ms={}",
            meta.file_name,
            rows.len(),
            valid_rows,
            invalid_rows,
            started_at.elapsed().as_millis()
        );

        Ok(ImportReport {
            session_id: uuid::Uuid::new_v4(),
            finished_at: chrono::Utc::now(),
            total_rows: rows.len(),
            valid_rows,
            invalid_rows,
            structure_warning: structure.warning,
            rows,
            records,
        })
    }
}
