pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod session;
pub mod state;
pub mod utils;

use axum::{
    http::Method,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Assembles the full application router.
///
/// The public routes resolve their own credentials (and answer 403
/// themselves when the cookie is missing or stale); only `/users/me` sits
/// behind the auth middleware.
pub fn build_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(handlers::status::index))
        .route("/status", get(handlers::status::status))
        .route("/users", post(handlers::users::register))
        .route(
            "/sessions",
            post(handlers::sessions::login).delete(handlers::sessions::logout),
        )
        .route("/profile", get(handlers::sessions::profile))
        .route(
            "/reset_password",
            post(handlers::password_reset::request_reset)
                .put(handlers::password_reset::update_password),
        );

    let protected_routes = Router::new()
        .route("/users/me", get(handlers::users::me))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authenticate,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([
                            Method::GET,
                            Method::POST,
                            Method::PUT,
                            Method::DELETE,
                            Method::OPTIONS,
                        ])
                        .allow_headers(Any)
                        .max_age(std::time::Duration::from_secs(24 * 60 * 60)),
                ),
        )
        .with_state(state)
}
