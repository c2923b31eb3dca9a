use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "admin")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt hash; never returned to clients (response DTOs strip it).
    pub password: String,
    pub full_name: String,
    pub email: String,
    /// Free-form role label (e.g. "superadmin"); there is no permission matrix.
    pub role: String,

    #[sea_orm(has_many)]
    pub hero_images: HasMany<super::hero_image::Entity>,

    #[sea_orm(has_many)]
    pub activities: HasMany<super::activity::Entity>,

    #[sea_orm(has_many)]
    pub projects: HasMany<super::project::Entity>,

    #[sea_orm(has_many)]
    pub videos: HasMany<super::video::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
