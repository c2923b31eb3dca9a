use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use super::read_text;
use crate::entity::activity;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::models::activity::{ActivityResponse, parse_date};
use crate::models::category::{Category, parse_activity_category};
use crate::models::shared::{IdResponse, PUBLIC_CACHE_CONTROL, non_empty, validate_title};
use crate::state::AppState;
use crate::storage::{PendingUpload, UploadRules};

struct ActivityForm {
    title: Option<String>,
    description: Option<String>,
    date: Option<chrono::NaiveDate>,
    location: Option<String>,
    category: Category,
    image: Option<PendingUpload>,
}

/// Parse the whole multipart form before touching the category folder. The
/// upload is spooled to a temp file, so the final location always reflects
/// the submitted category no matter the field order.
async fn read_activity_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<ActivityForm, AppError> {
    let rules = UploadRules::image(state.config.storage.max_image_bytes);
    let mut form = ActivityForm {
        title: None,
        description: None,
        date: None,
        location: None,
        category: Category::Kegiatan,
        image: None,
    };

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
                Some("date") => {
                    form.date = match non_empty(read_text(field).await?) {
                        Some(raw) => Some(parse_date(&raw)?),
                        None => None,
                    };
                }
                Some("location") => form.location = non_empty(read_text(field).await?),
                Some("category") => {
                    let raw = non_empty(read_text(field).await?);
                    form.category = parse_activity_category(raw.as_deref())?;
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
    path = "/api/kegiatan",
    tag = "Activities",
    operation_id = "listActivities",
    summary = "List activities",
    description = "Public. Most recent first.",
    responses(
        (status = 200, description = "Activities", body = Vec<ActivityResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_activities(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = activity::Entity::find()
        .order_by_desc(activity::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let items: Vec<ActivityResponse> = rows.into_iter().map(Into::into).collect();

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(items),
    ))
}

#[utoipa::path(
    get,
    path = "/api/kegiatan/{id}",
    tag = "Activities",
    operation_id = "getActivity",
    summary = "Get an activity by ID",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 200, description = "Activity", body = ActivityResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = find_activity(&state.db, id).await?;

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(ActivityResponse::from(model)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/kegiatan",
    tag = "Activities",
    operation_id = "createActivity",
    summary = "Create an activity",
    description = "`title` is required; `image` is optional and is stored under the submitted category's subfolder.",
    request_body(content_type = "multipart/form-data", description = "Activity fields with optional image"),
    responses(
        (status = 201, description = "Activity created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id))]
pub async fn create_activity(
    admin: AuthAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_activity_form(&state, multipart).await?;

    let title = match require_title(&form) {
        Ok(title) => title,
        Err(e) => {
            if let Some(pending) = form.image.take() {
                state.uploads.discard(pending).await;
            }
            return Err(e);
        }
    };

    let mut image = None;
    if let Some(pending) = form.image.take() {
        image = Some(
            state
                .uploads
                .persist(pending, form.category.subfolder(), None)
                .await?,
        );
    }

    let model = activity::ActiveModel {
        title: Set(title),
        description: Set(form.description),
        date: Set(form.date),
        location: Set(form.location),
        image: Set(image),
        category: Set(form.category.as_str().to_string()),
        created_by: Set(admin.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let inserted = model.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id: inserted.id })))
}

#[utoipa::path(
    put,
    path = "/api/kegiatan/{id}",
    tag = "Activities",
    operation_id = "updateActivity",
    summary = "Replace an activity's fields",
    description = "PUT semantics: omitted optional fields are cleared, category falls back to `kegiatan`. \
        Without a new `image` the stored path is kept as-is, even when the category changes.",
    params(("id" = i32, Path, description = "Activity ID")),
    request_body(content_type = "multipart/form-data", description = "Activity fields with optional image"),
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id, id))]
pub async fn update_activity(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ActivityResponse>, AppError> {
    let mut form = read_activity_form(&state, multipart).await?;

    let checks = async {
        let title = require_title(&form)?;
        let existing = find_activity(&state.db, id).await?;
        Ok::<_, AppError>((title, existing))
    }
    .await;

    let (title, existing) = match checks {
        Ok(ok) => ok,
        Err(e) => {
            if let Some(pending) = form.image.take() {
                state.uploads.discard(pending).await;
            }
            return Err(e);
        }
    };

    let mut image = existing.image.clone();
    if let Some(pending) = form.image.take() {
        if let Some(ref old) = existing.image {
            state.uploads.remove_public_path(old).await;
        }
        image = Some(
            state
                .uploads
                .persist(pending, form.category.subfolder(), None)
                .await?,
        );
    }

    let mut active: activity::ActiveModel = existing.into();
    active.title = Set(title);
    active.description = Set(form.description);
    active.date = Set(form.date);
    active.location = Set(form.location);
    active.image = Set(image);
    active.category = Set(form.category.as_str().to_string());
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/kegiatan/{id}",
    tag = "Activities",
    operation_id = "deleteActivity",
    summary = "Delete an activity",
    description = "Deletes the row, then removes the stored image best-effort.",
    params(("id" = i32, Path, description = "Activity ID")),
    responses(
        (status = 204, description = "Activity deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state), fields(admin_id = admin.id, id))]
pub async fn delete_activity(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_activity(&state.db, id).await?;

    activity::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    if let Some(ref image) = existing.image {
        state.uploads.remove_public_path(image).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

fn require_title(form: &ActivityForm) -> Result<String, AppError> {
    let title = form
        .title
        .clone()
        .ok_or_else(|| AppError::Validation("Title is required".into()))?;
    validate_title(&title)?;
    Ok(title)
}

async fn find_activity<C: ConnectionTrait>(db: &C, id: i32) -> Result<activity::Model, AppError> {
    activity::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Activity not found".into()))
}
