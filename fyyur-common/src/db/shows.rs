//! Show store operations

use crate::db::counters;
use crate::db::models::{Show, ShowInput, ShowListing};
use crate::Result;
use chrono::NaiveDateTime;
use sqlx::{Row, SqliteConnection};
use tracing::debug;

/// Insert a show and bump the parents' counters.
///
/// `upcoming` is fixed by comparing the start time with `now`. Both steps
/// run on the caller's transaction, so either both land or neither does.
pub async fn insert(conn: &mut SqliteConnection, input: &ShowInput, now: NaiveDateTime) -> Result<Show> {
    let upcoming = crate::time::is_upcoming(&input.start_time, &now);

    let result = sqlx::query(
        r#"
        INSERT INTO shows (venue_id, artist_id, start_time, upcoming)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(input.venue_id)
    .bind(input.artist_id)
    .bind(input.start_time)
    .bind(upcoming)
    .execute(&mut *conn)
    .await?;

    counters::increment_for_show(conn, input.venue_id, input.artist_id, upcoming).await?;

    let show = Show {
        id: result.last_insert_rowid(),
        venue_id: input.venue_id,
        artist_id: input.artist_id,
        start_time: input.start_time,
        upcoming,
    };

    debug!(
        "Inserted show {} (venue {}, artist {}, upcoming={})",
        show.id, show.venue_id, show.artist_id, show.upcoming
    );
    Ok(show)
}

/// Shows flagged upcoming, soonest first, with venue and artist names
pub async fn list_upcoming(conn: &mut SqliteConnection) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.venue_id, v.name AS venue_name, s.artist_id, a.name AS artist_name,
               a.image_link AS artist_image_link, s.start_time
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        WHERE s.upcoming = 1
        ORDER BY s.start_time ASC, s.id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(ShowListing {
                venue_id: row.try_get("venue_id")?,
                venue_name: row.try_get("venue_name")?,
                artist_id: row.try_get("artist_id")?,
                artist_name: row.try_get("artist_name")?,
                artist_image_link: row.try_get("artist_image_link")?,
                start_time: row.try_get("start_time")?,
            })
        })
        .collect()
}
