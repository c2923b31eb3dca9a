use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::error::AppError;
use crate::state::AppState;
use crate::storage;
use crate::utils::filename::validate_flat_filename;

/// Stored names never change, so clients may cache aggressively.
const UPLOAD_CACHE_CONTROL: &str = "public, max-age=2592000, immutable";

/// Serve a stored media file from `uploads/<category>/<file>`.
///
/// Only known category subfolders are reachable and the file segment must be
/// a flat name, so requests cannot escape the upload root.
#[utoipa::path(
    get,
    path = "/uploads/{category}/{file}",
    tag = "Uploads",
    operation_id = "serveUpload",
    summary = "Serve an uploaded media file",
    params(
        ("category" = String, Path, description = "Upload subfolder (kegiatan, sia, sroi, beranda, video)"),
        ("file" = String, Path, description = "Stored filename"),
    ),
    responses(
        (status = 200, description = "File content"),
        (status = 304, description = "Not Modified (ETag match)"),
        (status = 404, description = "Unknown subfolder or file"),
    ),
)]
#[instrument(skip(state, headers))]
pub async fn serve_upload(
    State(state): State<AppState>,
    Path((category, file)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    if !storage::is_public_subfolder(&category) {
        return Err(AppError::NotFound("File not found".into()));
    }
    let name = validate_flat_filename(&file)
        .map_err(|_| AppError::NotFound("File not found".into()))?;

    // Stored names are unique and never reused, so the name itself is a
    // strong validator.
    let etag_value = format!("\"{name}\"");
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && let Ok(val) = if_none_match.to_str()
        && (val == etag_value || val == "*")
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let path = state.uploads.root().join(&category).join(name);
    let content = match tokio::fs::read(&path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound("File not found".into()));
        }
        Err(e) => return Err(AppError::Internal(format!("IO error: {e}"))),
    };

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    Response::builder()
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::ETAG, &etag_value)
        .header(header::CACHE_CONTROL, UPLOAD_CACHE_CONTROL)
        .body(Body::from(content))
        .map_err(|e| AppError::Internal(e.to_string()))
}
