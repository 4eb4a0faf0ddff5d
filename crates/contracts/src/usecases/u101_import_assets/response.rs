use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::shared::import_validation::RowValidation;

/// Full outcome of one upload run, returned to the UI.
///
/// Row-level failures never abort the batch: `rows` carries the verdict for
/// every data row and `records` only the sanitized output of the valid
/// ones. Whether to persist a partial batch is the caller's policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportReport {
    pub session_id: Uuid,
    pub finished_at: DateTime<Utc>,
    pub total_rows: usize,
    pub valid_rows: usize,
    pub invalid_rows: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure_warning: Option<String>,
    pub rows: Vec<RowValidation>,
    pub records: Vec<BTreeMap<String, serde_json::Value>>,
}
