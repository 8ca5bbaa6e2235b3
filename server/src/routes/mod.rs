//! HTTP surface.
//!
//! ARCHITECTURE
//! ============
//! One router, guarded as a whole: `guard::access_guard` wraps every
//! route, so the redirect rules apply to page paths and API mutations
//! alike. Page GETs answer with a small JSON body; what matters for
//! them is the guard decision, not the rendering.

pub mod auth;
pub mod guard;
pub mod posts;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

async fn fallback() -> ApiError {
    ApiError::NotFound
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/healthz", get(healthz))
        .route("/login", get(home).post(auth::login))
        .route("/register", get(home).post(auth::register))
        .route("/logout", post(auth::logout))
        .route("/posts", get(posts::list))
        .route("/posts/create", get(posts::create_form).post(posts::create))
        .route("/posts/user/{id}", get(posts::user_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post).put(posts::update).delete(posts::delete),
        )
        .fallback(fallback)
        .layer(middleware::from_fn(guard::access_guard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
#[path = "app_test.rs"]
mod tests;
