//! Database schema migrations
//!
//! Versioned, idempotent schema changes applied after the base tables exist.
//! Progress is tracked in the `schema_version` table.
//!
//! # Migration Guidelines
//!
//! 1. **Never modify existing migrations** - databases in the field already ran them
//! 2. **Always add new migrations** - one function per schema change
//! 3. **Stay idempotent** - use `IF NOT EXISTS` or check `pragma_table_info` first

use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Current schema version
///
/// **IMPORTANT:** Increment this when adding new migrations
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Get current schema version from database
///
/// Returns 0 if schema_version table doesn't exist or has no rows
pub async fn get_schema_version(pool: &SqlitePool) -> Result<i32> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='schema_version'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await?;

    Ok(version.unwrap_or(0))
}

async fn set_schema_version(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;

    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
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
        info!("Migration v1 completed");
    }

    if current_version < 2 {
        migrate_v2(pool).await?;
        set_schema_version(pool, 2).await?;
        info!("Migration v2 completed");
    }

    Ok(())
}

/// Migration v1: foreign-key lookup indexes
///
/// Aggregate sub-selects (song counts, revenue sums) filter on these columns.
async fn migrate_v1(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE INDEX IF NOT EXISTS idx_recordings_artist_id ON recordings(artist_id)",
        "CREATE INDEX IF NOT EXISTS idx_releases_artist_id ON releases(artist_id)",
        "CREATE INDEX IF NOT EXISTS idx_releases_label_id ON releases(label_id)",
        "CREATE INDEX IF NOT EXISTS idx_labels_publisher_id ON labels(publisher_id)",
        "CREATE INDEX IF NOT EXISTS idx_royalties_recording_id ON royalties(recording_id)",
        "CREATE INDEX IF NOT EXISTS idx_royalties_artist_id ON royalties(artist_id)",
        "CREATE INDEX IF NOT EXISTS idx_royalties_publisher_id ON royalties(publisher_id)",
        "CREATE INDEX IF NOT EXISTS idx_analytics_entity ON analytics(entity_type, entity_id)",
        "CREATE INDEX IF NOT EXISTS idx_analytics_date ON analytics(date)",
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await?;
    }

    Ok(())
}

/// Migration v2: listing order indexes
async fn migrate_v2(pool: &SqlitePool) -> Result<()> {
    let statements = [
        "CREATE INDEX IF NOT EXISTS idx_artists_name ON artists(name)",
        "CREATE INDEX IF NOT EXISTS idx_publishers_name ON publishers(name)",
        "CREATE INDEX IF NOT EXISTS idx_labels_name ON labels(name)",
        "CREATE INDEX IF NOT EXISTS idx_recordings_created_at ON recordings(created_at)",
        "CREATE INDEX IF NOT EXISTS idx_releases_release_date ON releases(release_date)",
    ];

    for sql in statements {
        sqlx::query(sql).execute(pool).await?;
    }

    Ok(())
}
