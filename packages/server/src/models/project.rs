use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, utoipa::ToSchema)]
pub struct ProjectResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    /// Long-form detail text shown on the project page.
    pub detail: Option<String>,
    /// Ordered tag list.
    #[schema(example = json!(["reforestation", "carbon"]))]
    pub tags: Vec<String>,
    /// Public path of the stored image, when one was uploaded.
    #[schema(example = "/uploads/sia/proyek-1700000000000-123456789.jpg")]
    pub image: Option<String>,
    /// One of: sia, sroi.
    #[schema(example = "sia")]
    pub category: String,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::project::Model> for ProjectResponse {
    fn from(m: crate::entity::project::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            detail: m.detail,
            tags: tags_from_json(m.tags),
            image: m.image,
            category: m.category,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}

/// Query parameters for the public project list.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ProjectListQuery {
    /// Optional equality filter: `sia` or `sroi`.
    pub category: Option<String>,
}

/// Split a comma-separated tag field into an ordered list, trimming each tag
/// and dropping empties.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn tags_to_json(tags: &[String]) -> serde_json::Value {
    serde_json::json!(tags)
}

fn tags_from_json(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}
