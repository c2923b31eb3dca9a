use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Request body for admin login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username of the admin account.
    #[schema(example = "admin")]
    pub username: String,
    /// Account password.
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(
            "Username and password are required".into(),
        ));
    }
    Ok(())
}

/// Admin profile returned on login.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AdminProfile {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "Administrator")]
    pub full_name: String,
    #[schema(example = "superadmin")]
    pub role: String,
}

impl From<crate::entity::admin::Model> for AdminProfile {
    fn from(m: crate::entity::admin::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            full_name: m.full_name,
            role: m.role,
        }
    }
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token; expiry is configurable (24h by default).
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    pub admin: AdminProfile,
}

/// Identity as embedded in a verified token.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SessionAdmin {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "superadmin")]
    pub role: String,
    #[schema(example = "Administrator")]
    pub name: String,
}

/// Response for `GET /api/verify`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct VerifyResponse {
    #[schema(example = true)]
    pub valid: bool,
    pub admin: SessionAdmin,
}

/// Request body for the password reset flow. Identity is re-established by
/// the username+email pair, not by the old password.
#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "admin@example.org")]
    pub email: String,
    #[schema(example = "new_password")]
    pub new_password: String,
    #[schema(example = "new_password")]
    pub confirm_password: String,
}

pub fn validate_forgot_password(payload: &ForgotPasswordRequest) -> Result<(), AppError> {
    if payload.username.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.new_password.is_empty()
        || payload.confirm_password.is_empty()
    {
        return Err(AppError::Validation("All fields are required".into()));
    }
    if payload.new_password.len() < 6 {
        return Err(AppError::Validation(
            "New password must be at least 6 characters".into(),
        ));
    }
    if payload.new_password != payload.confirm_password {
        return Err(AppError::Validation(
            "Password confirmation does not match".into(),
        ));
    }
    Ok(())
}
