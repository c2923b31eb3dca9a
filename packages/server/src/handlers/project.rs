use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use super::read_text;
use crate::entity::project;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthAdmin;
use crate::models::category::{Category, parse_project_category};
use crate::models::project::{ProjectListQuery, ProjectResponse, parse_tags, tags_to_json};
use crate::models::shared::{IdResponse, PUBLIC_CACHE_CONTROL, non_empty, validate_title};
use crate::state::AppState;
use crate::storage::{PendingUpload, UploadRules};

/// Stored name prefix so project uploads are recognizable on disk.
const PROJECT_FILE_PREFIX: &str = "proyek";

struct ProjectForm {
    title: Option<String>,
    description: Option<String>,
    detail: Option<String>,
    /// `None` when the field was absent; updates then keep the stored list.
    tags: Option<Vec<String>>,
    category: Category,
    image: Option<PendingUpload>,
}

async fn read_project_form(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<ProjectForm, AppError> {
    let rules = UploadRules::image(state.config.storage.max_image_bytes);
    let mut form = ProjectForm {
        title: None,
        description: None,
        detail: None,
        tags: None,
        category: Category::Sia,
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
                Some("detail") => form.detail = non_empty(read_text(field).await?),
                Some("tags") => form.tags = Some(parse_tags(&read_text(field).await?)),
                Some("category") => {
                    let raw = non_empty(read_text(field).await?);
                    form.category = parse_project_category(raw.as_deref())?;
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
    path = "/api/proyek",
    tag = "Projects",
    operation_id = "listProjects",
    summary = "List projects",
    description = "Public. Most recent first; optionally filtered by category.",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Projects", body = Vec<ProjectResponse>),
        (status = 400, description = "Unknown category (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let mut select = project::Entity::find();

    if let Some(ref raw) = query.category {
        let category = parse_project_category(Some(raw))?;
        select = select.filter(project::Column::Category.eq(category.as_str()));
    }

    let rows = select
        .order_by_desc(project::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let items: Vec<ProjectResponse> = rows.into_iter().map(Into::into).collect();

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(items),
    ))
}

#[utoipa::path(
    get,
    path = "/api/proyek/{id}",
    tag = "Projects",
    operation_id = "getProject",
    summary = "Get a project by ID",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project", body = ProjectResponse),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let model = find_project(&state.db, id).await?;

    Ok((
        [(header::CACHE_CONTROL, PUBLIC_CACHE_CONTROL)],
        Json(ProjectResponse::from(model)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/proyek",
    tag = "Projects",
    operation_id = "createProject",
    summary = "Create a project",
    description = "`title` is required. `tags` is a comma-separated list. The optional `image` is stored under the submitted category's subfolder.",
    request_body(content_type = "multipart/form-data", description = "Project fields with optional image"),
    responses(
        (status = 201, description = "Project created", body = IdResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id))]
pub async fn create_project(
    admin: AuthAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut form = read_project_form(&state, multipart).await?;

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
                .persist(pending, form.category.subfolder(), Some(PROJECT_FILE_PREFIX))
                .await?,
        );
    }

    let tags = form.tags.unwrap_or_default();
    let model = project::ActiveModel {
        title: Set(title),
        description: Set(form.description),
        detail: Set(form.detail),
        tags: Set(tags_to_json(&tags)),
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
    path = "/api/proyek/{id}",
    tag = "Projects",
    operation_id = "updateProject",
    summary = "Replace a project's fields",
    description = "PUT semantics for text fields; an omitted `tags` field keeps the stored list. \
        Supplying a new `image` deletes the old file (best effort) before the new path is stored.",
    params(("id" = i32, Path, description = "Project ID")),
    request_body(content_type = "multipart/form-data", description = "Project fields with optional image"),
    responses(
        (status = 200, description = "Project updated", body = ProjectResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state, multipart), fields(admin_id = admin.id, id))]
pub async fn update_project(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<ProjectResponse>, AppError> {
    let mut form = read_project_form(&state, multipart).await?;

    let checks = async {
        let title = require_title(&form)?;
        let existing = find_project(&state.db, id).await?;
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
                .persist(pending, form.category.subfolder(), Some(PROJECT_FILE_PREFIX))
                .await?,
        );
    }

    let tags = match form.tags {
        Some(tags) => tags_to_json(&tags),
        None => existing.tags.clone(),
    };

    let mut active: project::ActiveModel = existing.into();
    active.title = Set(title);
    active.description = Set(form.description);
    active.detail = Set(form.detail);
    active.tags = Set(tags);
    active.image = Set(image);
    active.category = Set(form.category.as_str().to_string());
    let model = active.update(&state.db).await?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/api/proyek/{id}",
    tag = "Projects",
    operation_id = "deleteProject",
    summary = "Delete a project",
    description = "Deletes the row, then removes the stored image best-effort.",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 204, description = "Project deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(admin, state), fields(admin_id = admin.id, id))]
pub async fn delete_project(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_project(&state.db, id).await?;

    project::Entity::delete_by_id(existing.id)
        .exec(&state.db)
        .await?;
    if let Some(ref image) = existing.image {
        state.uploads.remove_public_path(image).await;
    }

    Ok(StatusCode::NO_CONTENT)
}

fn require_title(form: &ProjectForm) -> Result<String, AppError> {
    let title = form
        .title
        .clone()
        .ok_or_else(|| AppError::Validation("Title is required".into()))?;
    validate_title(&title)?;
    Ok(title)
}

async fn find_project<C: ConnectionTrait>(db: &C, id: i32) -> Result<project::Model, AppError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Project not found".into()))
}
