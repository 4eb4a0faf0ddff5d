use std::time::Duration;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u101_import_assets::{FileMeta, ImportAssets, ImportReport};

use crate::shared::config;
use crate::shared::rate_limit::{RateLimitOptions, RateLimiter};
use crate::usecases::u101_import_assets::schema::asset_schema;
use crate::usecases::u101_import_assets::ImportExecutor;

/// Limiter instance for the upload endpoint; other endpoint classes get
/// their own instances with their own stores.
static UPLOAD_LIMITER: Lazy<RateLimiter> = Lazy::new(|| {
    let settings = &config::get().rate_limit;
    RateLimiter::new(RateLimitOptions {
        interval: Duration::from_millis(settings.interval_ms),
        max_requests_per_interval: settings.max_requests_per_interval,
    })
});

/// POST /api/asset/import-excel
///
/// Multipart upload with a single `file` field. Returns the full
/// `ImportReport`; fatal pipeline failures map to 400 with the
/// human-readable reason.
pub async fn import_excel(
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>, (StatusCode, Json<Value>)> {
    let token = caller_token(&headers);
    let outcome = UPLOAD_LIMITER.check(&token);
    if !outcome.success {
        tracing::warn!(
            "{}: rate limit hit for caller {}",
            ImportAssets::full_name(),
            token
        );
        return Err((
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "error": "Too many upload requests, try again later",
                "limit": outcome.limit,
                "reset_ms": outcome.reset_ms,
            })),
        ));
    }

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or("").to_string();
        let bytes = field.bytes().await.map_err(multipart_error)?;

        tracing::info!(
            "{}: received {} ({} bytes) from {}",
            ImportAssets::full_name(),
            file_name,
            bytes.len(),
            token
        );

        let meta = FileMeta {
            file_name,
            size_bytes: bytes.len() as u64,
            content_type,
        };
        let executor = ImportExecutor::new(config::get().upload.clone());
        return match executor.run(&meta, &bytes) {
            Ok(report) => Ok(Json(report)),
            Err(e) => {
                tracing::warn!("Import rejected: {}", e);
                Err((
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.to_string() })),
                ))
            }
        };
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Missing multipart field 'file'" })),
    ))
}

/// GET /api/asset/import-template
///
/// The expected column list, so the UI can render a template and mark
/// required fields before the operator uploads anything.
pub async fn import_template() -> Json<Value> {
    let columns: Vec<Value> = asset_schema()
        .iter()
        .map(|column| {
            json!({
                "header": column.header,
                "required": column.required,
                "column_type": column.column_type,
            })
        })
        .collect();
    Json(json!({ "columns": columns }))
}

/// Rate-limit token for the caller: first X-Forwarded-For hop, or a
/// shared bucket when the header is absent.
fn caller_token(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "anonymous".to_string())
}

fn multipart_error(e: MultipartError) -> (StatusCode, Json<Value>) {
    tracing::warn!("Malformed multipart body: {}", e);
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Malformed upload request" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_token_takes_first_forwarded_hop() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "10.0.0.5, 172.16.0.1".parse().unwrap());
        assert_eq!(caller_token(&headers), "10.0.0.5");
    }

    #[test]
    fn caller_token_falls_back_to_shared_bucket() {
        assert_eq!(caller_token(&HeaderMap::new()), "anonymous");
    }
}
