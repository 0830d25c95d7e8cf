use std::path::Path as FsPath;
use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use idscan_core::{DocumentFields, DocumentKind};

use crate::error::ApiError;
use crate::AppState;

// ── Pages ────────────────────────────────────────────────────────────────────

const INDEX_HTML: &str = r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>idscan</title></head>
<body>
  <h1>Identity document scan</h1>
  <form action="/scan" method="post" enctype="multipart/form-data">
    <input type="file" name="file" accept="image/*">
    <button type="submit">Scan</button>
  </form>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// ── Scan endpoint ────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    /// Document classification (`passport`, `license`, `unknown`).
    pub document: DocumentKind,
    /// Flat label → value mapping of everything the rules matched.
    pub fields: DocumentFields,
    /// URL of the stored original upload.
    pub image: String,
    pub scanned_at: DateTime<Utc>,
}

/// `POST /scan` — multipart upload, field name `file`.
///
/// Failures of any shape come back as a single descriptive message; this
/// handler must never panic on an upload, however malformed.
pub async fn scan_document(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ScanResponse>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::UnreadableUpload(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::NoFileSelected);
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::UnreadableUpload(e.to_string()))?;
        upload = Some((filename, bytes.to_vec()));
        break;
    }

    let (filename, bytes) = upload.ok_or(ApiError::MissingFile)?;
    if bytes.is_empty() {
        return Err(ApiError::NoFileSelected);
    }

    let ext = FsPath::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_else(|| "bin".to_string());

    tracing::info!(file = %filename, size = bytes.len(), "processing upload");
    let report = state.pipeline.process_bytes(&bytes, &ext).await?;
    tracing::info!(hash = %report.hash_hex, kind = %report.kind, matched = report.fields.len(), "scan complete");

    let rel = report
        .stored_path
        .strip_prefix(&state.uploads_dir)
        .unwrap_or(&report.stored_path);
    let image = format!("/uploads/{}", rel.to_string_lossy());

    Ok(Json(ScanResponse {
        document: report.kind,
        fields: report.fields,
        image,
        scanned_at: Utc::now(),
    }))
}

// ── Stored uploads ───────────────────────────────────────────────────────────

/// `GET /uploads/{*path}` — serve a stored original back to the client.
pub async fn serve_upload(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    if path.contains("..") || path.starts_with('/') {
        return Err(ApiError::NotFound);
    }

    let file_path = state.uploads_dir.join(&path);
    let bytes = tokio::fs::read(&file_path)
        .await
        .map_err(|_| ApiError::NotFound)?;

    let mime = match file_path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    };

    Ok(([(header::CONTENT_TYPE, mime)], bytes).into_response())
}
