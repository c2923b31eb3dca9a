pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod seed;
pub mod state;
pub mod storage;
pub mod utils;

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foundation Content API",
        version = "1.0.0",
        description = "Content-management backend for the foundation website: \
            admin authentication plus CRUD for hero images, activities, projects, \
            and the landing-page video, with media uploads stored on disk."
    ),
    paths(
        handlers::auth::login,
        handlers::auth::verify,
        handlers::auth::forgot_password,
        handlers::health::health,
        handlers::hero::list_hero_images,
        handlers::hero::get_hero_image,
        handlers::hero::create_hero_image,
        handlers::hero::update_hero_image,
        handlers::hero::delete_hero_image,
        handlers::activity::list_activities,
        handlers::activity::get_activity,
        handlers::activity::create_activity,
        handlers::activity::update_activity,
        handlers::activity::delete_activity,
        handlers::project::list_projects,
        handlers::project::get_project,
        handlers::project::create_project,
        handlers::project::update_project,
        handlers::project::delete_project,
        handlers::video::list_videos,
        handlers::video::get_active_video,
        handlers::video::get_video,
        handlers::video::create_video,
        handlers::video::update_video,
        handlers::video::activate_video,
        handlers::video::delete_video,
        handlers::uploads::serve_upload,
    ),
    components(schemas(
        error::ErrorBody,
        handlers::health::HealthResponse,
        handlers::health::DbHealth,
        handlers::health::PoolStats,
        models::auth::LoginRequest,
        models::auth::LoginResponse,
        models::auth::AdminProfile,
        models::auth::SessionAdmin,
        models::auth::VerifyResponse,
        models::auth::ForgotPasswordRequest,
        models::shared::IdResponse,
        models::shared::MessageResponse,
        models::hero::HeroImageResponse,
        models::activity::ActivityResponse,
        models::project::ProjectResponse,
        models::video::VideoResponse,
    )),
    tags(
        (name = "Auth", description = "Login, token verification, and password reset"),
        (name = "Hero Images", description = "Landing-page hero slider images"),
        (name = "Activities", description = "Foundation activity posts"),
        (name = "Projects", description = "SIA/SROI project entries"),
        (name = "Videos", description = "Landing-page video management"),
        (name = "Uploads", description = "Static serving of uploaded media"),
        (name = "Health", description = "Service health probe"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let api = ApiDoc::openapi();

    routes::api_routes(&state.config)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
