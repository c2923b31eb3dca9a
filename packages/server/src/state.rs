use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::storage::UploadStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub uploads: UploadStore,
}
