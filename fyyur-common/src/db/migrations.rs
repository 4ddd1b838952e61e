//! Database schema migrations
//!
//! Versioned, idempotent migrations tracked in the `schema_version` table.
//! Never modify an existing migration; add a new one and bump
//! `CURRENT_SCHEMA_VERSION`.

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
const CURRENT_SCHEMA_VERSION: i32 = 2;

async fn create_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Get current schema version from database (0 when nothing applied yet)
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let version: Option<i32> =
        sqlx::query_scalar("SELECT MAX(version) FROM schema_version")
            .fetch_one(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    create_schema_version_table(pool).await?;

    let current_version = get_schema_version(pool).await?;

    if current_version == CURRENT_SCHEMA_VERSION {
        info!("Database schema is up to date (v{})", current_version);
        return Ok(());
    }

    if current_version > CURRENT_SCHEMA_VERSION {
        warn!(
            "Database schema version ({}) is newer than code version ({})",
            current_version, CURRENT_SCHEMA_VERSION
        );
        return Ok(());
    }

    info!(
        "Running database migrations: v{} -> v{}",
        current_version, CURRENT_SCHEMA_VERSION
    );

    if current_version < 1 {
        migrate_v1(pool).await?;
        set_schema_version(pool, 1).await?;
        info!("✓ Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("✓ Migration v2 completed");
    }

    Ok(())
}

/// Migration v1: venues, artists and shows
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            genres TEXT NOT NULL,
            address TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT,
            website_link TEXT,
            facebook_link TEXT,
            image_link TEXT,
            seeking_talent INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT,
            upcoming_shows_count INTEGER NOT NULL DEFAULT 0 CHECK (upcoming_shows_count >= 0),
            past_shows_count INTEGER NOT NULL DEFAULT 0 CHECK (past_shows_count >= 0),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            genres TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            phone TEXT,
            website_link TEXT,
            facebook_link TEXT,
            image_link TEXT,
            seeking_venue INTEGER NOT NULL DEFAULT 0,
            seeking_description TEXT,
            upcoming_shows_count INTEGER NOT NULL DEFAULT 0 CHECK (upcoming_shows_count >= 0),
            past_shows_count INTEGER NOT NULL DEFAULT 0 CHECK (past_shows_count >= 0),
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            venue_id INTEGER NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            artist_id INTEGER NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            start_time TIMESTAMP NOT NULL,
            upcoming INTEGER NOT NULL DEFAULT 1,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Migration v1: Created venues, artists and shows tables");
    Ok(())
}

/// Migration v2: indexes for show lookups
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    for sql in [
        "CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)",
        "CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)",
        "CREATE INDEX IF NOT EXISTS idx_shows_upcoming ON shows(upcoming, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_venues_area ON venues(state, city)",
    ] {
        sqlx::query(sql).execute(pool).await?;
    }

    info!("Migration v2: Added show and area indexes");
    Ok(())
}
