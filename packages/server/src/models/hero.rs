use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, utoipa::ToSchema)]
pub struct HeroImageResponse {
    pub id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Public path of the stored image (`/uploads/beranda/<file>`).
    #[schema(example = "/uploads/beranda/1700000000000-123456789.jpg")]
    pub image: String,
    /// Lower sorts first; ties broken by recency.
    pub display_order: i32,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
}

impl From<crate::entity::hero_image::Model> for HeroImageResponse {
    fn from(m: crate::entity::hero_image::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            image: m.image,
            display_order: m.display_order,
            created_by: m.created_by,
            created_at: m.created_at,
        }
    }
}
