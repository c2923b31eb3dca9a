use axum::{Json, extract::State};
use sea_orm::*;
use tracing::instrument;

use crate::entity::admin;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::extractors::json::AppJson;
use crate::models::auth::{
    AdminProfile, ForgotPasswordRequest, LoginRequest, LoginResponse, SessionAdmin, VerifyResponse,
    validate_forgot_password, validate_login_request,
};
use crate::models::shared::MessageResponse;
use crate::state::AppState;
use crate::utils::{hash, jwt};

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Log in as an admin",
    description = "Verifies the password against the stored bcrypt hash and issues a time-limited JWT.",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = LoginResponse),
        (status = 400, description = "Missing fields (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Bad credentials (INVALID_CREDENTIALS)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let username = payload.username.trim();

    let admin = admin::Entity::find()
        .filter(admin::Column::Username.eq(username))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let is_valid = hash::verify_password(&payload.password, &admin.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {e}")))?;

    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = jwt::sign(
        admin.id,
        &admin.username,
        &admin.role,
        &admin.full_name,
        &state.config.auth.jwt_secret,
        state.config.auth.token_ttl_hours,
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {e}")))?;

    Ok(Json(LoginResponse {
        token,
        admin: AdminProfile::from(admin),
    }))
}

#[utoipa::path(
    get,
    path = "/api/verify",
    tag = "Auth",
    operation_id = "verifyToken",
    summary = "Verify the bearer token",
    description = "Returns the identity embedded in the token. The same check guards every mutating endpoint.",
    responses(
        (status = 200, description = "Token is valid", body = VerifyResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin), fields(admin_id = admin.id))]
pub async fn verify(admin: AuthAdmin) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        admin: SessionAdmin {
            id: admin.id,
            username: admin.username,
            role: admin.role,
            name: admin.name,
        },
    })
}

#[utoipa::path(
    post,
    path = "/api/forgot-password",
    tag = "Auth",
    operation_id = "forgotPassword",
    summary = "Reset a password by username and email",
    description = "Re-establishes identity by the username+email pair (not the old password) and overwrites the stored hash.",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 404, description = "No matching admin (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(username = %payload.username))]
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ForgotPasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    validate_forgot_password(&payload)?;

    let admin = admin::Entity::find()
        .filter(admin::Column::Username.eq(payload.username.trim()))
        .filter(admin::Column::Email.eq(payload.email.trim()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Username or email not found".into()))?;

    let password_hash = hash::hash_password(&payload.new_password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {e}")))?;

    let mut active: admin::ActiveModel = admin.into();
    active.password = Set(password_hash);
    active.updated_at = Set(chrono::Utc::now());
    active.update(&state.db).await?;

    Ok(Json(MessageResponse {
        message: "Password reset successful".into(),
    }))
}
