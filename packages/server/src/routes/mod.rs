mod api;

use std::time::Duration;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::{AppConfig, CorsConfig};
use crate::handlers;
use crate::state::AppState;

pub fn api_routes(config: &AppConfig) -> Router<AppState> {
    let mut router = Router::new()
        .nest("/api", api::routes())
        .route(
            "/uploads/{category}/{file}",
            get(handlers::uploads::serve_upload),
        )
        .layer(cors_layer(&config.server.cors));

    if config.server.production {
        router = router.layer(middleware::from_fn(security_headers));
    }

    router
}

// Hardened response headers for production deployments.
async fn security_headers(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        HeaderName::from_static("x-content-type-options"),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        HeaderName::from_static("x-frame-options"),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        HeaderName::from_static("referrer-policy"),
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );

    response
}

fn cors_layer(cfg: &CorsConfig) -> CorsLayer {
    let origin = if cfg.allow_origins.is_empty() {
        // Development mode: reflect whatever origin is calling.
        AllowOrigin::mirror_request()
    } else {
        let origins: Vec<HeaderValue> = cfg
            .allow_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(cfg.max_age))
}
