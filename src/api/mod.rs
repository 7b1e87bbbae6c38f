//! HTTP JSON API.
//!
//! Routes are nested under `/api`. Reads are public (hidden bookmarks need a
//! token); writes require an admin bearer token. CORS is permissive so a
//! separately hosted frontend can call the API, and preflight `OPTIONS`
//! requests are answered by the CORS layer.

pub mod error;
pub mod extract;
pub mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::app::App;

/// Builds the application router.
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        // Bookmarks
        .route(
            "/api/bookmarks",
            get(handlers::list_bookmarks).post(handlers::create_bookmark),
        )
        .route("/api/bookmarks/reorder", post(handlers::reorder_bookmarks))
        .route(
            "/api/bookmarks/{id}",
            get(handlers::get_bookmark)
                .put(handlers::update_bookmark)
                .delete(handlers::delete_bookmark),
        )
        // Categories
        .route("/api/categories", get(handlers::list_categories))
        .route(
            "/api/categories/order",
            get(handlers::get_category_order).put(handlers::put_category_order),
        )
        // Settings
        .route(
            "/api/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        // Auth
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/verify", get(handlers::verify_session))
        // Health check
        .route("/api/health", get(handlers::health))
        .with_state(app)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
