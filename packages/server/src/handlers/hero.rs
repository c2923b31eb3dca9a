use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::*;
use tracing::instrument;

use super::read_text;
use crate::entity::hero_image;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::models::hero::HeroImageResponse;
use crate::models::shared::{IdResponse, PUBLIC_CACHE_CONTROL, non_empty};
use crate::state::AppState;
use crate::storage::{HERO_SUBFOLDER, PendingUpload, UploadRules};

#[derive(Default)]
struct HeroForm {
    title: Option<String>,
    description: Option<String>,
    display_order: i32,
    image: Option<PendingUpload>,
}

async fn read_hero_form(state: &AppState, mut multipart: Multipart) -> Result<HeroForm, AppError> {
    let rules = UploadRules::image(state.config.storage.max_image_bytes);
    let mut form = HeroForm::default();

    let result = async {
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("title") => form.title = non_empty(read_text(field).await?),
                Some("description") => form.description = non_empty(read_text(field).await?),
                Some("display_order") => {
                    let raw = read_text(field).await?;
                    form.display_order = raw.trim().parse().map_err(|_| {
                        AppError::Validation("Display order must be an integer".into())
                    })?;
                }
                Some("image") => {
                    if let Some(previous) = form.image.take() {
                        state.uploads.discard(previous).await;
                    }
                    form.image = Some(state.uploads.spool_field(field, &rules).await?);
                }
                _ => {} // Ignore unknown fields.
            }
        }
        Ok(())
    }
    .await;

    if let Err(e) = result {
        if let Some(pending) = form.image.take() {
            state.uploads.discard(pending).await;
        }
        return Err(e);
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/api/hero-beranda",
    tag = "Hero Images",
    operation_id = "listHeroImages",
    summary = "List hero images",
    description = "Public. Ordered by display_order ascending, ties broken by most recent first.",
    responses(
        (status = 200, description = "Hero images", body = Vec<HeroImageResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_hero_images(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let rows = hero_image::Entity::find()
        .order_by_asc(hero_image::Column::DisplayOrder)
        .order_by_desc(hero_image::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let items: Vec<HeroImageResponse> = rows.into_iter().map(Into::into).collect();

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(items),
    ))
}

#[utoipa::path(
    get,
    path = "/api/hero-beranda/{id}",
    tag = "Hero Images",
    operation_id = "getHeroImage",
    summary = "Get a hero image by ID",
    params(("id" = i32, Path, description = "Hero image ID")),
    responses(
        (status = 200, description = "Hero image", body = HeroImageResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_hero_image(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = find_hero_image(&state.db, id).await?;

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(HeroImageResponse::from(model)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/hero-beranda",
    tag = "Hero Images",
    operation_id = "createHeroImage",
    summary = "Upload a new hero image",
    description = "The `image` multipart field is required; `title`, `description` and `display_order` are optional.",
    request_body(content_type = "multipart/form-data", description = "Hero image upload"),
    responses(
        (status = 201, description = "Hero image created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id))]
pub async fn create_hero_image(
    admin: AuthAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_hero_form(&state, multipart).await?;

    let pending = form
        .image
        .take()
        .ok_or_else(|| AppError::Validation("Image file is required".into()))?;
    let image = state.uploads.persist(pending, HERO_SUBFOLDER, None).await?;

    let model = hero_image::ActiveModel {
        title: Set(form.title),
        description: Set(form.description),
        image: Set(image),
        display_order: Set(form.display_order),
        created_by: Set(admin.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let inserted = model.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id: inserted.id })))
}

#[utoipa::path(
    put,
    path = "/api/hero-beranda/{id}",
    tag = "Hero Images",
    operation_id = "updateHeroImage",
    summary = "Replace a hero image's fields",
    description = "PUT semantics: omitted text fields are cleared. Supplying a new `image` deletes the old file (best effort) before the new path is stored.",
    params(("id" = i32, Path, description = "Hero image ID")),
    request_body(content_type = "multipart/form-data", description = "Hero image update"),
    responses(
        (status = 200, description = "Hero image updated", body = HeroImageResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id, id))]
pub async fn update_hero_image(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<HeroImageResponse>, AppError> {
    let mut form = read_hero_form(&state, multipart).await?;

    let existing = match find_hero_image(&state.db, id).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(pending) = form.image.take() {
                state.uploads.discard(pending).await;
            }
            return Err(e);
        }
    };

    let mut image = existing.image.clone();
    if let Some(pending) = form.image.take() {
        state.uploads.remove_public_path(&existing.image).await;
        image = state.uploads.persist(pending, HERO_SUBFOLDER, None).await?;
    }

    let mut active: hero_image::ActiveModel = existing.into();
    active.title = Set(form.title);
    active.description = Set(form.description);
    active.image = Set(image);
    active.display_order = Set(form.display_order);
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/hero-beranda/{id}",
    tag = "Hero Images",
    operation_id = "deleteHeroImage",
    summary = "Delete a hero image",
    description = "Deletes the row, then removes the stored file best-effort.",
    params(("id" = i32, Path, description = "Hero image ID")),
    responses(
        (status = 204, description = "Hero image deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state), fields(admin_id = admin.id, id))]
pub async fn delete_hero_image(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_hero_image(&state.db, id).await?;

    hero_image::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    state.uploads.remove_public_path(&existing.image).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_hero_image<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<hero_image::Model, AppError> {
    hero_image::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Hero image not found".into()))
}
