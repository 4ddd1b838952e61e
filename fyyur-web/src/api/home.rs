//! Home page route

use axum::{response::Html, routing::get, Router};

use crate::{pages, AppState};

/// GET /
pub async fn index() -> Html<String> {
    pages::home::render(&[])
}

pub fn home_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}
