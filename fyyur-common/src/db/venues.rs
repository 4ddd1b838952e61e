//! Venue store operations

use crate::db::models::{ArtistShow, EntitySummary, SearchResults, Venue, VenueArea, VenueDetail, VenueInput};
use crate::db::{counters, name_matches};
use crate::{Error, Result};
use sqlx::sqlite::SqliteRow;
use sqlx::types::Json;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

const VENUE_COLUMNS: &str = r#"
    id, name, genres, address, city, state, phone, website_link, facebook_link,
    image_link, seeking_talent, seeking_description, upcoming_shows_count, past_shows_count
"#;

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    let genres: Json<Vec<String>> = row.try_get("genres")?;

    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        genres: genres.0,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        website_link: row.try_get("website_link")?,
        facebook_link: row.try_get("facebook_link")?,
        image_link: row.try_get("image_link")?,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
        upcoming_shows_count: row.try_get("upcoming_shows_count")?,
        past_shows_count: row.try_get("past_shows_count")?,
    })
}

/// All venues grouped by (state, city), areas and venues in name order
pub async fn list_areas(conn: &mut SqliteConnection) -> Result<Vec<VenueArea>> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, city, state, upcoming_shows_count
        FROM venues
        ORDER BY state ASC, city ASC, name ASC, id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let mut areas: Vec<VenueArea> = Vec::new();

    for row in rows {
        let city: String = row.try_get("city")?;
        let state: String = row.try_get("state")?;
        let summary = EntitySummary {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            upcoming_shows_count: row.try_get("upcoming_shows_count")?,
        };

        match areas.last_mut() {
            Some(area) if area.city == city && area.state == state => area.venues.push(summary),
            _ => areas.push(VenueArea {
                city,
                state,
                venues: vec![summary],
            }),
        }
    }

    Ok(areas)
}

/// Case-insensitive substring search on venue names
pub async fn search(conn: &mut SqliteConnection, term: &str) -> Result<SearchResults> {
    let rows = sqlx::query(
        r#"
        SELECT id, name, upcoming_shows_count
        FROM venues
        ORDER BY name ASC, id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    let data = rows
        .iter()
        .map(|row| {
            Ok(EntitySummary {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
                upcoming_shows_count: row.try_get("upcoming_shows_count")?,
            })
        })
        .filter(|summary: &Result<EntitySummary>| {
            summary.as_ref().map_or(true, |s| name_matches(&s.name, term))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Venue search {:?} matched {}", term, data.len());
    Ok(SearchResults::new(data))
}

/// Load one venue
pub async fn get(conn: &mut SqliteConnection, venue_id: i64) -> Result<Venue> {
    let sql = format!("SELECT {VENUE_COLUMNS} FROM venues WHERE id = ?");
    let row = sqlx::query(&sql)
        .bind(venue_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", venue_id)))?;

    venue_from_row(&row)
}

/// True when a venue with this id exists
pub async fn exists(conn: &mut SqliteConnection, venue_id: i64) -> Result<bool> {
    let found: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(venue_id)
        .fetch_one(&mut *conn)
        .await?;

    Ok(found)
}

/// Venue with its shows split by the stored `upcoming` flag
pub async fn detail(conn: &mut SqliteConnection, venue_id: i64) -> Result<VenueDetail> {
    let venue = get(conn, venue_id).await?;

    let rows = sqlx::query(
        r#"
        SELECT s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link,
               s.start_time, s.upcoming
        FROM shows s
        JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .bind(venue_id)
    .fetch_all(&mut *conn)
    .await?;

    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();

    for row in rows {
        let show = ArtistShow {
            artist_id: row.try_get("artist_id")?,
            artist_name: row.try_get("artist_name")?,
            artist_image_link: row.try_get("artist_image_link")?,
            start_time: row.try_get("start_time")?,
        };
        if row.try_get::<bool, _>("upcoming")? {
            upcoming_shows.push(show);
        } else {
            past_shows.push(show);
        }
    }

    Ok(VenueDetail {
        venue,
        past_shows,
        upcoming_shows,
    })
}

/// Insert a venue and return its id
pub async fn insert(conn: &mut SqliteConnection, input: &VenueInput) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, genres, address, city, state, phone, website_link, facebook_link,
            image_link, seeking_talent, seeking_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website_link)
    .bind(&input.facebook_link)
    .bind(&input.image_link)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .execute(&mut *conn)
    .await?;

    let id = result.last_insert_rowid();
    debug!("Inserted venue {} ({})", id, input.name);
    Ok(id)
}

/// Replace every mutable field of a venue
pub async fn update(conn: &mut SqliteConnection, venue_id: i64, input: &VenueInput) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, genres = ?, address = ?, city = ?, state = ?, phone = ?,
            website_link = ?, facebook_link = ?, image_link = ?, seeking_talent = ?,
            seeking_description = ?, updated_at = CURRENT_TIMESTAMP
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(Json(&input.genres))
    .bind(&input.address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.phone)
    .bind(&input.website_link)
    .bind(&input.facebook_link)
    .bind(&input.image_link)
    .bind(input.seeking_talent)
    .bind(&input.seeking_description)
    .bind(venue_id)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", venue_id)));
    }

    debug!("Updated venue {}", venue_id);
    Ok(())
}

/// Delete a venue together with its shows; returns the deleted venue
///
/// Counters of artists that lose shows are recomputed in the same
/// transaction.
pub async fn delete(conn: &mut SqliteConnection, venue_id: i64) -> Result<Venue> {
    let venue = get(conn, venue_id).await?;

    let artist_ids: Vec<i64> =
        sqlx::query_scalar("SELECT DISTINCT artist_id FROM shows WHERE venue_id = ?")
            .bind(venue_id)
            .fetch_all(&mut *conn)
            .await?;

    let removed_shows = sqlx::query("DELETE FROM shows WHERE venue_id = ?")
        .bind(venue_id)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(venue_id)
        .execute(&mut *conn)
        .await?;

    counters::recompute_artists(conn, &artist_ids).await?;

    debug!(
        "Deleted venue {} with {} show(s), {} artist(s) recounted",
        venue_id,
        removed_shows,
        artist_ids.len()
    );
    Ok(venue)
}
