//! Router integration tests
//!
//! Each test drives the full router against a fresh in-memory database.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use fyyur_common::db::{self, artists, shows, venues, Artist, Venue};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use fyyur_web::{build_router, AppState};

async fn test_app() -> (Router, SqlitePool) {
    let pool = db::init_memory_database().await.unwrap();
    (build_router(AppState::new(pool.clone())), pool)
}

async fn send(app: &Router, method: Method, uri: &str, form: Option<&[(&str, &str)]>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match form {
        Some(pairs) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(serde_urlencoded::to_string(pairs).unwrap())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, form: &[(&str, &str)]) -> (StatusCode, String) {
    send(app, Method::POST, uri, Some(form)).await
}

fn venue_form(name: &str) -> Vec<(&str, &str)> {
    vec![
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("address", "1015 Folsom Street"),
        ("phone", "123-123-1234"),
        ("genres", "Jazz"),
        ("genres", "Reggae"),
        ("website_link", "https://www.themusicalhop.com"),
        ("facebook_link", "https://www.facebook.com/TheMusicalHop"),
        ("seeking_talent", "y"),
        ("seeking_description", "We are on the lookout for a local artist"),
    ]
}

fn artist_form(name: &str) -> Vec<(&str, &str)> {
    vec![
        ("name", name),
        ("city", "San Francisco"),
        ("state", "CA"),
        ("phone", "326-123-5000"),
        ("genres", "Rock n Roll"),
    ]
}

async fn load_venue(pool: &SqlitePool, id: i64) -> Venue {
    let mut conn = pool.acquire().await.unwrap();
    venues::get(&mut conn, id).await.unwrap()
}

async fn load_artist(pool: &SqlitePool, id: i64) -> Artist {
    let mut conn = pool.acquire().await.unwrap();
    artists::get(&mut conn, id).await.unwrap()
}

async fn venue_count(pool: &SqlitePool) -> usize {
    let mut conn = pool.acquire().await.unwrap();
    venues::search(&mut conn, "").await.unwrap().count
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _pool) = test_app().await;
    let (status, body) = get(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["module"], "fyyur-web");
}

#[tokio::test]
async fn test_home_page() {
    let (app, _pool) = test_app().await;
    let (status, body) = get(&app, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("action=\"/venues/search\""));
    assert!(body.contains("action=\"/artists/search\""));
}

#[tokio::test]
async fn test_unknown_routes_and_ids_are_404() {
    let (app, _pool) = test_app().await;

    for uri in ["/nowhere", "/venues/999", "/venues/abc", "/artists/999", "/artists/7/edit"] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.contains("404 Not Found"), "{uri}");
    }
}

#[tokio::test]
async fn test_create_venue_then_fetch() {
    let (app, pool) = test_app().await;

    let (status, body) = post(&app, "/venues/create", &venue_form("The Musical Hop")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Venue The Musical Hop was successfully listed!"));

    let venue = load_venue(&pool, 1).await;
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.genres, vec!["Jazz", "Reggae"]);
    assert_eq!(venue.address, "1015 Folsom Street");
    assert_eq!(venue.phone.as_deref(), Some("123-123-1234"));
    assert_eq!(venue.website_link.as_deref(), Some("https://www.themusicalhop.com"));
    assert!(venue.seeking_talent);
    assert_eq!(venue.image_link, None);
    assert_eq!((venue.upcoming_shows_count, venue.past_shows_count), (0, 0));

    let (status, body) = get(&app, "/venues/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h1>The Musical Hop</h1>"));
    assert!(body.contains("Currently seeking talent"));
    assert!(body.contains("0 Upcoming Shows"));

    let (_, body) = get(&app, "/venues").await;
    assert!(body.contains("<h3>San Francisco, CA</h3>"));
    assert!(body.contains("<a href=\"/venues/1\">The Musical Hop</a>"));
}

#[tokio::test]
async fn test_missing_required_field_persists_nothing() {
    let (app, pool) = test_app().await;

    let form: Vec<(&str, &str)> = venue_form("")
        .into_iter()
        .filter(|(k, _)| *k != "city")
        .collect();
    let (status, body) = post(&app, "/venues/create", &form).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: Check name then resubmit again."));
    assert!(body.contains("Error: Check city then resubmit again."));
    // Submitted values are kept
    assert!(body.contains("value=\"1015 Folsom Street\""));
    assert_eq!(venue_count(&pool).await, 0);

    let (_, body) = post(&app, "/artists/create", &[("name", "No Genres"), ("city", "x"), ("state", "CA")]).await;
    assert!(body.contains("Error: Check genres then resubmit again."));
    let mut conn = pool.acquire().await.unwrap();
    assert!(artists::list(&mut conn).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_venue_search() {
    let (app, _pool) = test_app().await;
    for name in ["The Musical Hop", "The Dueling Pianos Bar", "Park Square Live Music & Coffee"] {
        post(&app, "/venues/create", &venue_form(name)).await;
    }

    let (status, body) = post(&app, "/venues/search", &[("search_term", "Hop")]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Number of search results for \"Hop\": 1"));
    assert!(body.contains("The Musical Hop"));

    let (_, body) = post(&app, "/venues/search", &[("search_term", "music")]).await;
    assert!(body.contains("Number of search results for \"music\": 2"));
    assert!(!body.contains("Dueling Pianos"));

    let (_, body) = post(&app, "/venues/search", &[("search_term", "")]).await;
    assert!(body.contains(": 3</h3>"));
}

#[tokio::test]
async fn test_venue_search_folds_accented_names() {
    let (app, _pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("Café Österreich")).await;

    for term in ["österreich", "CAFÉ"] {
        let (_, body) = post(&app, "/venues/search", &[("search_term", term)]).await;
        assert!(body.contains(&format!("Number of search results for \"{term}\": 1")), "{term}");
        assert!(body.contains("<a href=\"/venues/1\">Café Österreich</a>"), "{term}");
    }
}

#[tokio::test]
async fn test_artist_search() {
    let (app, _pool) = test_app().await;
    for name in ["Guns N Petals", "Matt Quevedo", "The Wild Sax Band"] {
        post(&app, "/artists/create", &artist_form(name)).await;
    }

    let (_, body) = post(&app, "/artists/search", &[("search_term", "A")]).await;
    assert!(body.contains("Number of search results for \"A\": 3"));

    let (_, body) = post(&app, "/artists/search", &[("search_term", "band")]).await;
    assert!(body.contains("Number of search results for \"band\": 1"));
    assert!(body.contains("The Wild Sax Band"));
}

#[tokio::test]
async fn test_show_counters_past_and_future() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;
    post(&app, "/artists/create", &artist_form("Guns N Petals")).await;

    let (_, body) = post(
        &app,
        "/shows/create",
        &[("artist_id", "1"), ("venue_id", "1"), ("start_time", "2019-05-21 21:30:00")],
    )
    .await;
    assert!(body.contains("Show was successfully listed!"));

    let venue = load_venue(&pool, 1).await;
    let artist = load_artist(&pool, 1).await;
    assert_eq!((venue.past_shows_count, venue.upcoming_shows_count), (1, 0));
    assert_eq!((artist.past_shows_count, artist.upcoming_shows_count), (1, 0));

    let (_, body) = get(&app, "/shows").await;
    assert!(body.contains("No upcoming shows."));

    post(
        &app,
        "/shows/create",
        &[("artist_id", "1"), ("venue_id", "1"), ("start_time", "2099-04-01 20:00")],
    )
    .await;

    let venue = load_venue(&pool, 1).await;
    let artist = load_artist(&pool, 1).await;
    assert_eq!((venue.past_shows_count, venue.upcoming_shows_count), (1, 1));
    assert_eq!((artist.past_shows_count, artist.upcoming_shows_count), (1, 1));

    let (_, body) = get(&app, "/shows").await;
    assert!(body.contains("Guns N Petals"));
    assert!(body.contains("Wed 04, 01, 2099 8:00PM"));
    assert!(!body.contains("2019"));

    let (_, body) = get(&app, "/venues/1").await;
    assert!(body.contains("1 Upcoming Shows"));
    assert!(body.contains("1 Past Shows"));
    assert!(body.contains("Tue 05, 21, 2019 9:30PM"));

    let (_, body) = get(&app, "/artists/1").await;
    assert!(body.contains("1 Upcoming Shows"));
    assert!(body.contains("<a href=\"/venues/1\">The Musical Hop</a>"));
}

#[tokio::test]
async fn test_show_with_missing_references_is_rejected() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;

    let (status, body) = post(
        &app,
        "/shows/create",
        &[("artist_id", "99"), ("venue_id", "1"), ("start_time", "2099-04-01 20:00:00")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: Check artist_id then resubmit again."));
    assert!(!body.contains("venue_id then resubmit"));

    let (_, body) = post(&app, "/shows/create", &[("artist_id", "1"), ("venue_id", "1"), ("start_time", "soon")]).await;
    assert!(body.contains("Error: Check start_time then resubmit again."));

    let mut conn = pool.acquire().await.unwrap();
    assert!(shows::list_upcoming(&mut conn).await.unwrap().is_empty());
    drop(conn);
    assert_eq!(load_venue(&pool, 1).await.upcoming_shows_count, 0);
}

#[tokio::test]
async fn test_show_form_defaults_start_time() {
    let (app, _pool) = test_app().await;
    let (status, body) = get(&app, "/shows/create").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"start_time\" value=\"20"));
}

#[tokio::test]
async fn test_delete_venue() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;
    post(&app, "/venues/create", &venue_form("The Dueling Pianos Bar")).await;
    post(&app, "/artists/create", &artist_form("Guns N Petals")).await;
    post(
        &app,
        "/shows/create",
        &[("artist_id", "1"), ("venue_id", "1"), ("start_time", "2099-04-01 20:00:00")],
    )
    .await;

    let (status, body) = post(&app, "/venues/1/delete", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Venue The Musical Hop was successfully deleted!"));

    let (_, body) = get(&app, "/venues").await;
    assert!(!body.contains("The Musical Hop"));
    assert!(body.contains("The Dueling Pianos Bar"));

    let (_, body) = post(&app, "/venues/search", &[("search_term", "Hop")]).await;
    assert!(body.contains(": 0</h3>"));

    let (status, _) = get(&app, "/venues/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The artist lost the show with the venue
    assert_eq!(load_artist(&pool, 1).await.upcoming_shows_count, 0);

    let (status, _) = send(&app, Method::DELETE, "/venues/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(venue_count(&pool).await, 0);

    let (status, _) = send(&app, Method::DELETE, "/venues/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_artist() {
    let (app, pool) = test_app().await;
    post(&app, "/artists/create", &artist_form("Guns N Petals")).await;

    let (status, body) = get(&app, "/artists/1/edit").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("value=\"Guns N Petals\""));
    assert!(body.contains("<option value=\"CA\" selected>CA</option>"));
    assert!(body.contains("<option value=\"Rock n Roll\" selected>"));

    let mut form = artist_form("Guns N Roses");
    form.push(("seeking_venue", "y"));
    let (status, body) = post(&app, "/artists/1/edit", &form).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Artist Guns N Roses was successfully updated!"));
    assert!(body.contains("Currently seeking performance venues"));

    let artist = load_artist(&pool, 1).await;
    assert_eq!(artist.name, "Guns N Roses");
    assert!(artist.seeking_venue);

    let (status, _) = post(&app, "/artists/5/edit", &artist_form("Nobody")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_edit_venue_rejects_invalid_form() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;

    let mut form = venue_form("The Musical Hop");
    form[2] = ("state", "ZZ");
    let (status, body) = post(&app, "/venues/1/edit", &form).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Error: Check state then resubmit again."));
    assert_eq!(load_venue(&pool, 1).await.state, "CA");

    let mut form = venue_form("The Musical Hop Annex");
    form.retain(|(k, _)| *k != "seeking_talent");
    let (_, body) = post(&app, "/venues/1/edit", &form).await;
    assert!(body.contains("Venue The Musical Hop Annex was successfully updated!"));
    assert!(!load_venue(&pool, 1).await.seeking_talent);
}

/// Make every `event` on `table` fail inside the store
async fn break_table(pool: &SqlitePool, event: &str, table: &str) {
    let sql = format!(
        "CREATE TRIGGER reject_{}_{table} BEFORE {event} ON {table} \
         BEGIN SELECT RAISE(ABORT, 'storage offline'); END",
        event.to_lowercase()
    );
    sqlx::query(&sql).execute(pool).await.unwrap();
}

#[tokio::test]
async fn test_failed_venue_create_flashes_and_persists_nothing() {
    let (app, pool) = test_app().await;
    break_table(&pool, "INSERT", "venues").await;

    let (status, body) = post(&app, "/venues/create", &venue_form("The Musical Hop")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Venue The Musical Hop could not be listed."));
    assert!(!body.contains("successfully listed"));
    assert!(!body.contains("storage offline"));
    assert_eq!(venue_count(&pool).await, 0);
}

#[tokio::test]
async fn test_failed_artist_create_flashes_and_persists_nothing() {
    let (app, pool) = test_app().await;
    break_table(&pool, "INSERT", "artists").await;

    let (status, body) = post(&app, "/artists/create", &artist_form("Guns N Petals")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Artist Guns N Petals could not be listed."));
    assert!(!body.contains("storage offline"));
    let mut conn = pool.acquire().await.unwrap();
    assert!(artists::list(&mut conn).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_venue_edit_keeps_stored_values() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;
    break_table(&pool, "UPDATE", "venues").await;

    let (status, body) = post(&app, "/venues/1/edit", &venue_form("The Musical Hop Annex")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Venue The Musical Hop Annex could not be changed."));
    assert!(!body.contains("storage offline"));
    // Form keeps what was submitted
    assert!(body.contains("value=\"The Musical Hop Annex\""));
    assert_eq!(load_venue(&pool, 1).await.name, "The Musical Hop");
}

#[tokio::test]
async fn test_failed_artist_edit_keeps_stored_values() {
    let (app, pool) = test_app().await;
    post(&app, "/artists/create", &artist_form("Guns N Petals")).await;
    break_table(&pool, "UPDATE", "artists").await;

    let (status, body) = post(&app, "/artists/1/edit", &artist_form("Guns N Roses")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Artist Guns N Roses could not be changed."));
    assert!(!body.contains("storage offline"));
    assert_eq!(load_artist(&pool, 1).await.name, "Guns N Petals");
}

#[tokio::test]
async fn test_failed_venue_delete_rolls_back_shows() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;
    post(&app, "/artists/create", &artist_form("Guns N Petals")).await;
    post(
        &app,
        "/shows/create",
        &[("artist_id", "1"), ("venue_id", "1"), ("start_time", "2099-04-01 20:00:00")],
    )
    .await;
    break_table(&pool, "DELETE", "venues").await;

    let (status, body) = post(&app, "/venues/1/delete", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Venue The Musical Hop could not be deleted."));
    assert!(!body.contains("storage offline"));

    // The shows deleted ahead of the venue came back with the rollback
    let venue = load_venue(&pool, 1).await;
    assert_eq!(venue.upcoming_shows_count, 1);
    assert_eq!(load_artist(&pool, 1).await.upcoming_shows_count, 1);
    let mut conn = pool.acquire().await.unwrap();
    assert_eq!(shows::list_upcoming(&mut conn).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_failed_show_create_leaves_counters() {
    let (app, pool) = test_app().await;
    post(&app, "/venues/create", &venue_form("The Musical Hop")).await;
    post(&app, "/artists/create", &artist_form("Guns N Petals")).await;
    break_table(&pool, "INSERT", "shows").await;

    let (status, body) = post(
        &app,
        "/shows/create",
        &[("artist_id", "1"), ("venue_id", "1"), ("start_time", "2099-04-01 20:00:00")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred. Show could not be listed."));
    assert!(!body.contains("storage offline"));

    let venue = load_venue(&pool, 1).await;
    let artist = load_artist(&pool, 1).await;
    assert_eq!((venue.upcoming_shows_count, venue.past_shows_count), (0, 0));
    assert_eq!((artist.upcoming_shows_count, artist.past_shows_count), (0, 0));
    let mut conn = pool.acquire().await.unwrap();
    assert!(shows::list_upcoming(&mut conn).await.unwrap().is_empty());
}
