//! Artist directory routes

use axum::{
    extract::{Path, State},
    response::Html,
    routing::{get, post},
    Router,
};
use fyyur_common::db::{artists, counters, ArtistDetail, ArtistInput};
use fyyur_common::time;
use fyyur_common::validation::{self, FieldError, FormData};
use sqlx::SqlitePool;
use tracing::{error, info, warn};

use super::{begin_read, parse_id};
use crate::form::FormPairs;
use crate::{pages, AppState, PageError, PageResult};

pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_form).post(create_artist))
        .route("/artists/:artist_id", get(show_artist))
        .route("/artists/:artist_id/edit", get(edit_form).post(edit_artist))
}

fn flash_errors(errors: &[FieldError]) -> Vec<String> {
    errors.iter().map(FieldError::flash_message).collect()
}

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> PageResult<Html<String>> {
    let mut tx = state.db.begin().await?;
    let all = artists::list(&mut *tx).await?;
    tx.commit().await?;

    Ok(pages::artists::list(&all, &[]))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    FormPairs(form): FormPairs,
) -> PageResult<Html<String>> {
    let term = form.text("search_term");

    let mut tx = begin_read(&state.db).await?;
    let results = artists::search(&mut *tx, &term).await?;
    tx.commit().await?;

    Ok(pages::search_results("artists", "/artists", &term, &results))
}

/// GET /artists/:artist_id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> PageResult<Html<String>> {
    let artist_id = parse_id(&artist_id)?;

    let mut tx = begin_read(&state.db).await?;
    let detail = artists::detail(&mut *tx, artist_id).await?;
    tx.commit().await?;

    Ok(pages::artists::detail(&detail, &[]))
}

/// GET /artists/create
pub async fn create_form() -> Html<String> {
    pages::forms::artist("List a new artist", "/artists/create", &FormData::default(), &[])
}

async fn insert_artist(db: &SqlitePool, input: &ArtistInput) -> fyyur_common::Result<i64> {
    let mut tx = db.begin().await?;
    let artist_id = artists::insert(&mut *tx, input).await?;
    tx.commit().await?;
    Ok(artist_id)
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    FormPairs(form): FormPairs,
) -> Html<String> {
    let input = match validation::validate_artist(&form) {
        Ok(input) => input,
        Err(errors) => {
            warn!("Rejected artist form: {:?}", errors);
            return pages::forms::artist(
                "List a new artist",
                "/artists/create",
                &form,
                &flash_errors(&errors),
            );
        }
    };

    match insert_artist(&state.db, &input).await {
        Ok(artist_id) => {
            info!("Created artist {} ({})", artist_id, input.name);
            pages::home::render(&[format!("Artist {} was successfully listed!", input.name)])
        }
        Err(e) => {
            error!("Failed to create artist {}: {}", input.name, e);
            pages::home::render(&[format!(
                "An error occurred. Artist {} could not be listed.",
                input.name
            )])
        }
    }
}

/// GET /artists/:artist_id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
) -> PageResult<Html<String>> {
    let artist_id = parse_id(&artist_id)?;

    let mut tx = state.db.begin().await?;
    let artist = artists::get(&mut *tx, artist_id).await?;
    tx.commit().await?;

    Ok(pages::forms::artist(
        "Edit artist",
        &format!("/artists/{}/edit", artist_id),
        &pages::forms::artist_values(&artist),
        &[],
    ))
}

async fn update_artist(
    db: &SqlitePool,
    artist_id: i64,
    input: &ArtistInput,
) -> fyyur_common::Result<ArtistDetail> {
    let mut tx = db.begin().await?;
    artists::update(&mut *tx, artist_id, input).await?;
    counters::reconcile(&mut *tx, time::now()).await?;
    let detail = artists::detail(&mut *tx, artist_id).await?;
    tx.commit().await?;
    Ok(detail)
}

/// POST /artists/:artist_id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<String>,
    FormPairs(form): FormPairs,
) -> PageResult<Html<String>> {
    let artist_id = parse_id(&artist_id)?;
    let action = format!("/artists/{}/edit", artist_id);

    let input = match validation::validate_artist(&form) {
        Ok(input) => input,
        Err(errors) => {
            warn!("Rejected edit of artist {}: {:?}", artist_id, errors);
            return Ok(pages::forms::artist("Edit artist", &action, &form, &flash_errors(&errors)));
        }
    };

    match update_artist(&state.db, artist_id, &input).await {
        Ok(detail) => {
            info!("Updated artist {} ({})", artist_id, input.name);
            Ok(pages::artists::detail(
                &detail,
                &[format!("Artist {} was successfully updated!", input.name)],
            ))
        }
        Err(e) if e.is_not_found() => Err(PageError::Common(e)),
        Err(e) => {
            error!("Failed to update artist {}: {}", artist_id, e);
            Ok(pages::forms::artist(
                "Edit artist",
                &action,
                &form,
                &[format!("An error occurred. Artist {} could not be changed.", input.name)],
            ))
        }
    }
}
