//! Venue directory routes
//!
//! Store failures on writes are rolled back and reported with a flash
//! message naming the venue; the cause is only logged.

use axum::{
    extract::{Path, State},
    response::Html,
    routing::{get, post},
    Router,
};
use fyyur_common::db::{counters, venues, Venue, VenueArea, VenueDetail, VenueInput};
use fyyur_common::time;
use fyyur_common::validation::{self, FieldError, FormData};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::{begin_read, parse_id};
use crate::form::FormPairs;
use crate::{pages, AppState, PageError, PageResult};

pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_form).post(create_venue))
        .route("/venues/:venue_id", get(show_venue).delete(delete_venue))
        .route("/venues/:venue_id/edit", get(edit_form).post(edit_venue))
        .route("/venues/:venue_id/delete", post(delete_venue))
}

fn flash_errors(errors: &[FieldError]) -> Vec<String> {
    errors.iter().map(FieldError::flash_message).collect()
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut tx = begin_read(&state.db).await?;
    let areas = venues::list_areas(&mut *tx).await?;
    tx.commit().await?;

    Ok(pages::venues::list(&areas, &[]))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    FormPairs(form): FormPairs,
) -> PageResult<Html<String>> {
    let term = form.text("search_term");

    let mut tx = begin_read(&state.db).await?;
    let results = venues::search(&mut *tx, &term).await?;
    tx.commit().await?;

    Ok(pages::search_results("venues", "/venues", &term, &results))
}

/// GET /venues/:venue_id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> PageResult<Html<String>> {
    let venue_id = parse_id(&venue_id)?;

    let mut tx = begin_read(&state.db).await?;
    let detail = venues::detail(&mut *tx, venue_id).await?;
    tx.commit().await?;

    Ok(pages::venues::detail(&detail, &[]))
}

/// GET /venues/create
pub async fn create_form() -> Html<String> {
    pages::forms::venue("List a new venue", "/venues/create", &FormData::default(), &[])
}

async fn insert_venue(db: &SqlitePool, input: &VenueInput) -> fyyur_common::Result<i64> {
    let mut tx = db.begin().await?;
    let venue_id = venues::insert(&mut *tx, input).await?;
    tx.commit().await?;
    Ok(venue_id)
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    FormPairs(form): FormPairs,
) -> Html<String> {
    let input = match validation::validate_venue(&form) {
        Ok(input) => input,
        Err(errors) => {
            warn!("Rejected venue form: {:?}", errors);
            return pages::forms::venue(
                "List a new venue",
                "/venues/create",
                &form,
                &flash_errors(&errors),
            );
        }
    };

    match insert_venue(&state.db, &input).await {
        Ok(venue_id) => {
            info!("Created venue {} ({})", venue_id, input.name);
            pages::home::render(&[format!("Venue {} was successfully listed!", input.name)])
        }
        Err(e) => {
            error!("Failed to create venue {}: {}", input.name, e);
            pages::home::render(&[format!(
                "An error occurred. Venue {} could not be listed.",
                input.name
            )])
        }
    }
}

/// GET /venues/:venue_id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> PageResult<Html<String>> {
    let venue_id = parse_id(&venue_id)?;

    let mut tx = state.db.begin().await?;
    let venue = venues::get(&mut *tx, venue_id).await?;
    tx.commit().await?;

    Ok(pages::forms::venue(
        "Edit venue",
        &format!("/venues/{}/edit", venue_id),
        &pages::forms::venue_values(&venue),
        &[],
    ))
}

async fn update_venue(
    db: &SqlitePool,
    venue_id: i64,
    input: &VenueInput,
) -> fyyur_common::Result<VenueDetail> {
    let mut tx = db.begin().await?;
    venues::update(&mut *tx, venue_id, input).await?;
    counters::reconcile(&mut *tx, time::now()).await?;
    let detail = venues::detail(&mut *tx, venue_id).await?;
    tx.commit().await?;
    Ok(detail)
}

/// POST /venues/:venue_id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
    FormPairs(form): FormPairs,
) -> PageResult<Html<String>> {
    let venue_id = parse_id(&venue_id)?;
    let action = format!("/venues/{}/edit", venue_id);

    let input = match validation::validate_venue(&form) {
        Ok(input) => input,
        Err(errors) => {
            warn!("Rejected edit of venue {}: {:?}", venue_id, errors);
            return Ok(pages::forms::venue("Edit venue", &action, &form, &flash_errors(&errors)));
        }
    };

    match update_venue(&state.db, venue_id, &input).await {
        Ok(detail) => {
            info!("Updated venue {} ({})", venue_id, input.name);
            Ok(pages::venues::detail(
                &detail,
                &[format!("Venue {} was successfully updated!", input.name)],
            ))
        }
        Err(e) if e.is_not_found() => Err(PageError::Common(e)),
        Err(e) => {
            error!("Failed to update venue {}: {}", venue_id, e);
            Ok(pages::forms::venue(
                "Edit venue",
                &action,
                &form,
                &[format!("An error occurred. Venue {} could not be changed.", input.name)],
            ))
        }
    }
}

async fn remove_venue(
    db: &SqlitePool,
    venue_id: i64,
) -> fyyur_common::Result<(Venue, Vec<VenueArea>)> {
    let mut tx = db.begin().await?;
    let venue = venues::delete(&mut *tx, venue_id).await?;
    counters::reconcile(&mut *tx, time::now()).await?;
    let areas = venues::list_areas(&mut *tx).await?;
    tx.commit().await?;
    Ok((venue, areas))
}

/// DELETE /venues/:venue_id and POST /venues/:venue_id/delete
///
/// Removes the venue together with its shows.
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<String>,
) -> PageResult<Html<String>> {
    let venue_id = parse_id(&venue_id)?;

    // Read ahead so a failed delete can still name the venue
    let name = {
        let mut conn = state.db.acquire().await?;
        venues::get(&mut conn, venue_id).await?.name
    };

    match remove_venue(&state.db, venue_id).await {
        Ok((venue, areas)) => {
            info!("Deleted venue {} ({})", venue_id, venue.name);
            Ok(pages::venues::list(
                &areas,
                &[format!("Venue {} was successfully deleted!", venue.name)],
            ))
        }
        Err(e) if e.is_not_found() => Err(PageError::Common(e)),
        Err(e) => {
            error!("Failed to delete venue {} ({}): {}", venue_id, name, e);
            Ok(pages::home::render(&[format!(
                "An error occurred. Venue {} could not be deleted.",
                name
            )]))
        }
    }
}
