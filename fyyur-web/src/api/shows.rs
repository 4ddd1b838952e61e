//! Show scheduling routes

use axum::{
    extract::State,
    response::Html,
    routing::get,
    Router,
};
use fyyur_common::db::{artists, shows, venues, Show, ShowInput};
use fyyur_common::time;
use fyyur_common::validation::{self, FieldError};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::begin_read;
use crate::form::FormPairs;
use crate::{pages, AppState, PageResult};

pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_form).post(create_show))
}

/// GET /shows
///
/// Upcoming shows only, soonest first.
pub async fn list_shows(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut tx = begin_read(&state.db).await?;
    let listing = shows::list_upcoming(&mut *tx).await?;
    tx.commit().await?;

    Ok(pages::shows::list(&listing, &[]))
}

/// GET /shows/create
pub async fn create_form() -> Html<String> {
    pages::forms::show(&pages::forms::show_defaults(), &[])
}

/// Insert the show unless a referenced row is missing.
///
/// The existence checks and the insert share one transaction.
async fn insert_show(
    db: &SqlitePool,
    input: &ShowInput,
) -> fyyur_common::Result<Result<Show, Vec<FieldError>>> {
    let mut tx = db.begin().await?;

    let mut missing = Vec::new();
    if !artists::exists(&mut *tx, input.artist_id).await? {
        missing.push(validation::missing_reference("artist_id"));
    }
    if !venues::exists(&mut *tx, input.venue_id).await? {
        missing.push(validation::missing_reference("venue_id"));
    }
    if !missing.is_empty() {
        return Ok(Err(missing));
    }

    let show = shows::insert(&mut *tx, input, time::now()).await?;
    tx.commit().await?;
    Ok(Ok(show))
}

/// POST /shows/create
pub async fn create_show(
    State(state): State<AppState>,
    FormPairs(form): FormPairs,
) -> Html<String> {
    let input = match validation::validate_show(&form) {
        Ok(input) => input,
        Err(errors) => {
            warn!("Rejected show form: {:?}", errors);
            let flashes: Vec<String> = errors.iter().map(FieldError::flash_message).collect();
            return pages::forms::show(&form, &flashes);
        }
    };

    match insert_show(&state.db, &input).await {
        Ok(Ok(show)) => {
            info!(
                "Created show {} (artist {}, venue {}, upcoming: {})",
                show.id, show.artist_id, show.venue_id, show.upcoming
            );
            pages::home::render(&["Show was successfully listed!".to_string()])
        }
        Ok(Err(missing)) => {
            warn!("Show references missing rows: {:?}", missing);
            let flashes: Vec<String> = missing.iter().map(FieldError::flash_message).collect();
            pages::forms::show(&form, &flashes)
        }
        Err(e) => {
            error!("Failed to create show: {}", e);
            pages::home::render(&["An error occurred. Show could not be listed.".to_string()])
        }
    }
}
