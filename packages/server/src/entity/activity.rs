use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "kegiatan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: Option<String>,
    pub date: Option<Date>,
    pub location: Option<String>,
    /// Public path under the upload root (`/uploads/<category>/<file>`).
    pub image: Option<String>,
    /// One of: kegiatan, sia, sroi. Selects the upload subfolder.
    pub category: String,

    pub created_by: i32,
    #[sea_orm(belongs_to, from = "created_by", to = "id")]
    pub admin: HasOne<super::admin::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
