use serde::Serialize;

use crate::error::AppError;

/// Response carrying the id of a newly created row.
#[derive(Serialize, utoipa::ToSchema)]
pub struct IdResponse {
    /// ID of the created row.
    #[schema(example = 42)]
    pub id: i32,
}

/// Plain confirmation message.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Password reset successful")]
    pub message: String,
}

/// `Cache-Control` value for public list/get endpoints; content changes
/// rarely so a short shared-cache TTL is safe.
pub const PUBLIC_CACHE_CONTROL: &str = "public, max-age=300, stale-while-revalidate=600";

/// Validate a trimmed title (1-256 Unicode characters).
pub fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 256 {
        return Err(AppError::Validation("Title must be 1-256 characters".into()));
    }
    Ok(())
}

/// Collapse empty or whitespace-only form values to `None`.
pub fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
