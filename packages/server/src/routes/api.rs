use axum::{
    Router,
    routing::{get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/verify", get(handlers::auth::verify))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/health", get(handlers::health::health))
        .nest("/hero-beranda", hero_routes())
        .nest("/kegiatan", activity_routes())
        .nest("/proyek", project_routes())
        .nest("/video-beranda", video_routes())
}

fn hero_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::hero::list_hero_images).post(handlers::hero::create_hero_image),
        )
        .route(
            "/{id}",
            get(handlers::hero::get_hero_image)
                .put(handlers::hero::update_hero_image)
                .delete(handlers::hero::delete_hero_image),
        )
        .layer(handlers::image_upload_body_limit())
}

fn activity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::activity::list_activities).post(handlers::activity::create_activity),
        )
        .route(
            "/{id}",
            get(handlers::activity::get_activity)
                .put(handlers::activity::update_activity)
                .delete(handlers::activity::delete_activity),
        )
        .layer(handlers::image_upload_body_limit())
}

fn project_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::project::list_projects).post(handlers::project::create_project),
        )
        .route(
            "/{id}",
            get(handlers::project::get_project)
                .put(handlers::project::update_project)
                .delete(handlers::project::delete_project),
        )
        .layer(handlers::image_upload_body_limit())
}

fn video_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::video::list_videos).post(handlers::video::create_video),
        )
        .route("/active", get(handlers::video::get_active_video))
        .route(
            "/{id}",
            get(handlers::video::get_video)
                .put(handlers::video::update_video)
                .delete(handlers::video::delete_video),
        )
        .route("/{id}/activate", put(handlers::video::activate_video))
        .layer(handlers::video_upload_body_limit())
}
