use sea_orm::*;
use tracing::{info, warn};

use crate::entity::admin;
use crate::utils::hash;

const DEFAULT_ADMIN_USERNAME: &str = "admin";
const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Create a default admin account when the `admin` table is empty, so a fresh
/// deployment can be logged into at all. The password must be changed after
/// the first login.
pub async fn ensure_default_admin(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = admin::Entity::find().count(db).await?;
    if existing > 0 {
        return Ok(());
    }

    let password_hash = hash::hash_password(DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| DbErr::Custom(format!("Password hash error: {e}")))?;

    let now = chrono::Utc::now();
    let model = admin::ActiveModel {
        username: Set(DEFAULT_ADMIN_USERNAME.to_string()),
        password: Set(password_hash),
        full_name: Set("Administrator".to_string()),
        email: Set("admin@example.org".to_string()),
        role: Set("superadmin".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let inserted = model.insert(db).await?;

    info!(
        id = inserted.id,
        username = DEFAULT_ADMIN_USERNAME,
        "Seeded default admin account"
    );
    warn!("Default admin uses a well-known password; change it after first login");

    Ok(())
}
