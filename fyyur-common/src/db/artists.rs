//! Artist store operations

use crate::db::name_matches;
use crate::db::models::{Artist, ArtistDetail, ArtistInput, EntitySummary, SearchResults, VenueShow};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

const ARTIST_COLUMNS: &str = r#"
    id, name, genres, city, state, phone, website_link, facebook_link,
    image_link, seeking_venue, seeking_description, upcoming_shows_count, past_shows_count
"#;

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    let genres: Json<Vec<String>> = row.try_get("genres")?;

    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        genres: genres.0,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        website_link: row.try_get("website_link")?,
        facebook_link: row.try_get("facebook_link")?,
        image_link: row.try_get("image_link")?,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
        upcoming_shows_count: row.try_get("upcoming_shows_count")?,
        past_shows_count: row.try_get("past_shows_count")?,
    })
}

fn summary_from_row(row: &SqliteRow) -> Result<EntitySummary> {
    Ok(EntitySummary {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        upcoming_shows_count: row.try_get("upcoming_shows_count")?,
    })
}

/// All artists in name order
pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<EntitySummary>> {
    let rows = sqlx::query(
        "SELECT id, name, upcoming_shows_count FROM artists ORDER BY name ASC, id ASC",
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(summary_from_row).collect()
}

/// Case-insensitive substring search on artist names
pub async fn search(conn: &mut SqliteConnection, term: &str) -> Result<SearchResults> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, upcoming_shows_count
        FROM artists
        ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let data = rows
        .iter()
        .map(summary_from_row)
        .filter(|summary| summary.as_ref().map_or(true, |s| name_matches(&s.name, term)))
        .collect::<Result<Vec<_>>>()?;

    debug!("Artist search {:?} matched {}", term, data.len());
    Ok(SearchResults::new(data))
}

/// Load one artist
pub async fn get(conn: &mut SqliteConnection, artist_id: i64) -> Result<Artist> {
    let sql = format!("SELECT {ARTIST_COLUMNS} FROM artists WHERE id = ?");
    let row = sqlx::query(&sql)
        .bind(artist_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", artist_id)))?;

    artist_from_row(&row)
}

/// True when an artist with this id exists
pub async fn exists(conn: &mut SqliteConnection, artist_id: i64) -> Result<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(artist_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(found)
}

/// Artist with shows split by the stored `upcoming` flag
pub async fn detail(conn: &mut SqliteConnection, artist_id: i64) -> Result<ArtistDetail> {
    let artist = get(conn, artist_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.venue_id, v.name AS venue_name, v.image_link AS venue_image_link,
               s.start_time, s.upcoming
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(artist_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();

    for row in rows {
        let show = VenueShow {
            venue_id: row.try_get("venue_id")?,
            venue_name: row.try_get("venue_name")?,
            venue_image_link: row.try_get("venue_image_link")?,
            start_time: row.try_get("start_time")?,
        };
        if row.try_get::<bool, _>("upcoming")? {
            upcoming_shows.push(show);
        } else {
            past_shows.push(show);
        }
    }

    Ok(ArtistDetail {
        artist,
        past_shows,
        upcoming_shows,
    })
}

/// Insert an artist and return its id
pub async fn insert(conn: &mut SqliteConnection, input: &ArtistInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, genres, city, state, phone, website_link, facebook_link,
            image_link, seeking_venue, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website_link)
    .bind(&input.facebook_link)
    .bind(&input.image_link)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!("Inserted artist {} ({})", id, input.name);
    Ok(id)
}

/// Replace every mutable field of an artist
pub async fn update(conn: &mut SqliteConnection, artist_id: i64, input: &ArtistInput) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, genres = ?, city = ?, state = ?, phone = ?, website_link = ?,
            facebook_link = ?, image_link = ?, seeking_venue = ?, seeking_description = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website_link)
    .bind(&input.facebook_link)
    .bind(&input.image_link)
    .bind(input.seeking_venue)
    .bind(&input.seeking_description)
    .bind(artist_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", artist_id)));
    }

    debug!("Updated artist {}", artist_id);
    Ok(())
}
