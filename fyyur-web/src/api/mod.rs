//! HTTP handlers for fyyur-web
//!
//! Each handler works inside one transaction. Read handlers start theirs
//! with [`begin_read`], which moves shows whose start time has passed from
//! upcoming to past before anything is rendered.

use axum::http::Uri;
use fyyur_common::db::counters;
use fyyur_common::time;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

use crate::{PageError, PageResult};

pub mod artists;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

pub use artists::artist_routes;
pub use health::health_routes;
pub use home::home_routes;
pub use shows::show_routes;
pub use venues::venue_routes;

/// Open a transaction and reconcile show state against the clock
pub(crate) async fn begin_read(db: &SqlitePool) -> PageResult<Transaction<'static, Sqlite>> {
    let mut tx = db.begin().await?;
    counters::reconcile(&mut *tx, time::now()).await?;
    Ok(tx)
}

/// Parse an id path segment; anything that is not an id is a missing page
pub(crate) fn parse_id(raw: &str) -> PageResult<i64> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| PageError::NotFound(format!("No record with id {:?}", raw)))
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> PageError {
    debug!("No route for {}", uri);
    PageError::NotFound(uri.to_string())
}
