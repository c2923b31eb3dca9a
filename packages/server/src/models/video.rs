use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct VideoResponse {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Public path of the stored video (`/uploads/video/<file>`).
    #[schema(example = "/uploads/video/video-1700000000000-123456789.mp4")]
    pub video: String,
    /// Whether this is the video shown on the landing page. At most one row
    /// is active at a time.
    pub is_active: bool,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::video::Model> for VideoResponse {
    fn from(m: crate::entity::video::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            video: m.video,
            is_active: m.is_active,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}
