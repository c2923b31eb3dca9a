use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::error::AppError;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ActivityResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub location: Option<String>,
    /// Public path of the stored image, when one was uploaded.
    #[schema(example = "/uploads/sia/1700000000000-123456789.jpg")]
    pub image: Option<String>,
    /// One of: kegiatan, sia, sroi.
    #[schema(example = "kegiatan")]
    pub category: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::activity::Model> for ActivityResponse {
    fn from(m: crate::entity::activity::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            date: m.date,
            location: m.location,
            image: m.image,
            category: m.category,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

/// Parse a `YYYY-MM-DD` form value.
pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Date must be in YYYY-MM-DD format".into()))
}
