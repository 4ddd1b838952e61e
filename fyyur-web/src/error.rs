//! Error types for fyyur-web
//!
//! Read paths propagate `PageError`; it renders the generic 404 or 500 page.
//! Write paths never surface store errors this way: they roll back and
//! flash a message instead (see `api`).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::pages;

/// Page-level error
#[derive(Debug, Error)]
pub enum PageError {
    /// Entity or route not found (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request body could not be decoded (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Database error outside the store layer (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// fyyur-common error
    #[error("Common error: {0}")]
    Common(#[from] fyyur_common::Error),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Common(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            PageError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            PageError::Database(_) | PageError::Common(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();

        let page = match status {
            StatusCode::NOT_FOUND => pages::errors::not_found(),
            StatusCode::BAD_REQUEST => pages::errors::bad_request(),
            _ => {
                error!("Request failed: {}", self);
                pages::errors::server_error()
            }
        };

        (status, page).into_response()
    }
}

/// Result type for page handlers
pub type PageResult<T> = Result<T, PageError>;
