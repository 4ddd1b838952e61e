//! Upcoming/past show counters on venues and artists
//!
//! Counters are kept equal to the show partition by three mechanisms:
//! - show creation bumps the matching counter in the same transaction,
//! - `reconcile` flips shows whose start time has passed and, when anything
//!   changed, recomputes all counters from the shows table,
//! - venue deletion recomputes the counters of the artists that lost shows.

use crate::{Error, Result};
use chrono::NaiveDateTime;
use sqlx::SqliteConnection;
use tracing::debug;

fn counter_column(upcoming: bool) -> &'static str {
    if upcoming {
        "upcoming_shows_count"
    } else {
        "past_shows_count"
    }
}

/// Add one show to the venue's and the artist's matching counter
pub async fn increment_for_show(
    conn: &mut SqliteConnection,
    venue_id: i64,
    artist_id: i64,
    upcoming: bool,
) -> Result<()> {
    let column = counter_column(upcoming);

    for (table, id) in [("venues", venue_id), ("artists", artist_id)] {
        let sql = format!(
            "UPDATE {table} SET {column} = {column} + 1, updated_at = CURRENT_TIMESTAMP WHERE id = ?"
        );
        let result = sqlx::query(&sql).bind(id).execute(&mut *conn).await?;
        if result.rows_affected() != 1 {
            return Err(Error::NotFound(format!("{table} {id}")));
        }
    }

    debug!(
        "Incremented {} for venue {} and artist {}",
        column, venue_id, artist_id
    );
    Ok(())
}

/// Move shows that started at or before `now` from upcoming to past.
///
/// Returns the number of shows flipped. Counters are recomputed when it is
/// non-zero.
pub async fn reconcile(conn: &mut SqliteConnection, now: NaiveDateTime) -> Result<u64> {
    let flipped = sqlx::query("UPDATE shows SET upcoming = 0 WHERE upcoming = 1 AND start_time <= ?")
        .bind(now)
        .execute(&mut *conn)
        .await?
        .rows_affected();

    if flipped > 0 {
        debug!("{} show(s) moved from upcoming to past", flipped);
        recompute_all(conn).await?;
    }

    Ok(flipped)
}

/// Recompute every venue and artist counter from the shows table
pub async fn recompute_all(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query(
        r#"
        UPDATE venues SET
            upcoming_shows_count = (SELECT COUNT(*) FROM shows s WHERE s.venue_id = venues.id AND s.upcoming = 1),
            past_shows_count = (SELECT COUNT(*) FROM shows s WHERE s.venue_id = venues.id AND s.upcoming = 0)
        "#,
    )
    .execute(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        UPDATE artists SET
            upcoming_shows_count = (SELECT COUNT(*) FROM shows s WHERE s.artist_id = artists.id AND s.upcoming = 1),
            past_shows_count = (SELECT COUNT(*) FROM shows s WHERE s.artist_id = artists.id AND s.upcoming = 0)
        "#,
    )
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// Recompute the counters of the given artists
pub async fn recompute_artists(conn: &mut SqliteConnection, artist_ids: &[i64]) -> Result<()> {
    for artist_id in artist_ids {
        sqlx::query(
            r#"
            UPDATE artists SET
                upcoming_shows_count = (SELECT COUNT(*) FROM shows s WHERE s.artist_id = artists.id AND s.upcoming = 1),
                past_shows_count = (SELECT COUNT(*) FROM shows s WHERE s.artist_id = artists.id AND s.upcoming = 0),
                updated_at = CURRENT_TIMESTAMP
            WHERE id = ?
            "#,
        )
        .bind(artist_id)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
