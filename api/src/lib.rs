// ============================================================================
// POSTS API OVER A HOSTED DATA STORE
// ============================================================================

// - User registration with salted password hashing
// - Caller identity taken from the X-User-Email header
// - Create / read / list / delete posts, author-only delete
// - Open CORS policy for local frontend development
// - Frontend served from disk at / and /static

pub mod auth;
pub mod config;
pub mod dto;
pub mod errors;
pub mod extract;
pub mod models;
pub mod routes;
pub mod states;
pub mod store;

pub use states::AppState;

use axum::{
    Router,
    routing::{get, post},
};
use std::path::Path;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

pub const API_PREFIX: &str = "/api/v1";

/// Allows any origin, method and header, with credentials.
///
/// Wildcards are not allowed together with credentials, so the request's own
/// origin, method and headers are echoed back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Builds the full router: API routes, health check and the frontend.
pub fn app(state: AppState, frontend_dir: &Path) -> Router {
    let api = Router::new()
        // Public
        .route("/auth/register", post(routes::register))
        // Identity required
        .route("/users/me", get(routes::current_user))
        .route("/posts", get(routes::list_posts).post(routes::create_post))
        .route(
            "/posts/{id}",
            get(routes::get_post).delete(routes::delete_post),
        );

    Router::new()
        .route("/health", get(routes::health_check))
        .nest(API_PREFIX, api)
        .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(frontend_dir))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer()),
        )
}
