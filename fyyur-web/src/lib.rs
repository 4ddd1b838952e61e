//! fyyur-web library - HTTP surface of the booking service
//!
//! Server-rendered pages for browsing, searching, creating and editing
//! venues and artists, and for scheduling shows.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod form;
pub mod pages;

pub use error::{PageError, PageResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool; handlers open one transaction per request
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::home_routes())
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
