use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use sea_orm::prelude::Expr;
use sea_orm::*;
use tracing::instrument;

use super::read_text;
use crate::entity::video;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::models::shared::{IdResponse, MessageResponse, PUBLIC_CACHE_CONTROL, non_empty};
use crate::models::video::VideoResponse;
use crate::state::AppState;
use crate::storage::{PendingUpload, UploadRules, VIDEO_SUBFOLDER};

/// Stored name prefix so landing-page videos are recognizable on disk.
const VIDEO_FILE_PREFIX: &str = "video";

struct VideoForm {
    title: Option<String>,
    description: Option<String>,
    video: Option<PendingUpload>,
}

async fn read_video_form(state: &AppState, mut multipart: Multipart) -> Result<VideoForm, AppError> {
    let rules = UploadRules::video(state.config.storage.max_video_bytes);
    let mut form = VideoForm {
        title: None,
        description: None,
        video: None,
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
                Some("video") => {
                    if let Some(previous) = form.video.take() {
                        state.uploads.discard(previous).await;
                    }
                    form.video = Some(state.uploads.spool_field(field, &rules).await?);
                }
                _ => {} // Ignore unknown fields.
            }
        }
        Ok(())
    }
    .await;

    if let Err(e) = result {
        if let Some(pending) = form.video.take() {
            state.uploads.discard(pending).await;
        }
        return Err(e);
    }

    Ok(form)
}

#[utoipa::path(
    get,
    path = "/api/video-beranda",
    tag = "Videos",
    operation_id = "listVideos",
    summary = "List landing-page videos",
    description = "Public. Most recent first.",
    responses(
        (status = 200, description = "Videos", body = Vec<VideoResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_videos(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let rows = video::Entity::find()
        .order_by_desc(video::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let items: Vec<VideoResponse> = rows.into_iter().map(Into::into).collect();

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(items),
    ))
}

#[utoipa::path(
    get,
    path = "/api/video-beranda/active",
    tag = "Videos",
    operation_id = "getActiveVideo",
    summary = "Get the video shown on the landing page",
    description = "Public. `null` when no video is active.",
    responses(
        (status = 200, description = "Active video, or null when none is active", body = VideoResponse),
    ),
)]
#[instrument(skip(state))]
pub async fn get_active_video(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let row = video::Entity::find()
        .filter(video::Column::IsActive.eq(true))
        .order_by_desc(video::Column::CreatedAt)
        .one(&state.db)
        .await?;

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(row.map(VideoResponse::from)),
    ))
}

#[utoipa::path(
    get,
    path = "/api/video-beranda/{id}",
    tag = "Videos",
    operation_id = "getVideo",
    summary = "Get a video by ID",
    params(("id" = i32, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video", body = VideoResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = find_video(&state.db, id).await?;

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(VideoResponse::from(model)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/video-beranda",
    tag = "Videos",
    operation_id = "createVideo",
    summary = "Upload a new landing-page video",
    description = "The `video` multipart field is required. The new row becomes the active video; \
        all others are deactivated in the same transaction.",
    request_body(content_type = "multipart/form-data", description = "Video upload"),
    responses(
        (status = 201, description = "Video created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id))]
pub async fn create_video(
    admin: AuthAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_video_form(&state, multipart).await?;

    let pending = form
        .video
        .take()
        .ok_or_else(|| AppError::Validation("Video file is required".into()))?;
    let video_path = state
        .uploads
        .persist(pending, VIDEO_SUBFOLDER, Some(VIDEO_FILE_PREFIX))
        .await?;

    let txn = state.db.begin().await?;

    video::Entity::update_many()
        .col_expr(video::Column::IsActive, Expr::value(false))
        .exec(&txn)
        .await?;

    let model = video::ActiveModel {
        title: Set(form.title),
        description: Set(form.description),
        video: Set(video_path),
        is_active: Set(true),
        created_by: Set(admin.id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let inserted = model.insert(&txn).await?;

    txn.commit().await?;

    Ok((StatusCode::CREATED, Json(IdResponse { id: inserted.id })))
}

#[utoipa::path(
    put,
    path = "/api/video-beranda/{id}",
    tag = "Videos",
    operation_id = "updateVideo",
    summary = "Replace a video's fields",
    description = "PUT semantics for title and description; the active flag is untouched. \
        Supplying a new `video` deletes the old file (best effort) before the new path is stored.",
    params(("id" = i32, Path, description = "Video ID")),
    request_body(content_type = "multipart/form-data", description = "Video update"),
    responses(
        (status = 200, description = "Video updated", body = VideoResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id, id))]
pub async fn update_video(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<VideoResponse>, AppError> {
    let mut form = read_video_form(&state, multipart).await?;

    let existing = match find_video(&state.db, id).await {
        Ok(model) => model,
        Err(e) => {
            if let Some(pending) = form.video.take() {
                state.uploads.discard(pending).await;
            }
            return Err(e);
        }
    };

    let mut video_path = existing.video.clone();
    if let Some(pending) = form.video.take() {
        state.uploads.remove_public_path(&existing.video).await;
        video_path = state
            .uploads
            .persist(pending, VIDEO_SUBFOLDER, Some(VIDEO_FILE_PREFIX))
            .await?;
    }

    let mut active: video::ActiveModel = existing.into();
    active.title = Set(form.title);
    active.description = Set(form.description);
    active.video = Set(video_path);
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    put,
    path = "/api/video-beranda/{id}/activate",
    tag = "Videos",
    operation_id = "activateVideo",
    summary = "Make a video the landing-page video",
    description = "A single conditional UPDATE sets `is_active = (id = target)` across the table, \
        so exactly one row is active afterwards even under concurrent calls.",
    params(("id" = i32, Path, description = "Video ID")),
    responses(
        (status = 200, description = "Video activated", body = MessageResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state), fields(admin_id = admin.id, id))]
pub async fn activate_video(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, AppError> {
    find_video(&state.db, id).await?;

    video::Entity::update_many()
        .col_expr(
            video::Column::IsActive,
            Expr::col(video::Column::Id).eq(id),
        )
        .exec(&state.db)
        .await?;

    Ok(Json(MessageResponse {
        message: "Video activated".into(),
    }))
}

#[utoipa::path(
    delete,
    path = "/api/video-beranda/{id}",
    tag = "Videos",
    operation_id = "deleteVideo",
    summary = "Delete a video",
    description = "Deletes the row, then removes the stored file best-effort.",
    params(("id" = i32, Path, description = "Video ID")),
    responses(
        (status = 204, description = "Video deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state), fields(admin_id = admin.id, id))]
pub async fn delete_video(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_video(&state.db, id).await?;

    video::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    state.uploads.remove_public_path(&existing.video).await;

    Ok(StatusCode::NO_CONTENT)
}

async fn find_video<C: ConnectionTrait>(db: &C, id: i32) -> Result<video::Model, AppError> {
    video::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Video not found".into()))
}
