use axum::extract::DefaultBodyLimit;

use crate::error::AppError;

pub mod activity;
pub mod auth;
pub mod health;
pub mod hero;
pub mod project;
pub mod uploads;
pub mod video;

/// Body limit for multipart routes carrying an image: the 5 MB file cap is
/// enforced while streaming, this only bounds the whole form.
pub fn image_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(8 * 1024 * 1024)
}

/// Body limit for multipart routes carrying a video (100 MB file cap plus
/// form overhead).
pub fn video_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(104 * 1024 * 1024)
}

/// Read a multipart text field, mapping stream errors to 400s.
pub(crate) async fn read_text(
    field: axum::extract::multipart::Field<'_>,
) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))
}
