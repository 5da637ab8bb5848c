//! Generic catalog store operations
//!
//! Every function is instantiated per [`Resource`]. Writes run inside a
//! transaction (write, then re-read the row); an early return drops the
//! transaction, which rolls it back and hands the connection back to the pool.

use std::collections::HashMap;
use std::time::Instant;

use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::bind_args;
use crate::error::{ApiError, ApiResult};
use crate::pagination::PageRequest;
use crate::query::{SqlArg, WhereClause};
use crate::resources::Resource;

/// One page of records plus the total number of matching rows
pub async fn list<R: Resource>(
    pool: &SqlitePool,
    params: &HashMap<String, String>,
    page: PageRequest,
) -> Result<(Vec<R::Record>, i64), sqlx::Error> {
    let spec = R::SPEC;
    let clause = WhereClause::build(&spec.seed(), spec.filters, params);
    let listing = clause.listing(spec.select, spec.order_by, page);
    let count = clause.count(spec.count_from);

    let started = Instant::now();
    let rows = bind_args!(sqlx::query_as::<_, R::Record>(&listing.sql), &listing.args)
        .fetch_all(pool)
        .await?;
    let total: i64 = bind_args!(sqlx::query_scalar::<_, i64>(&count.sql), &count.args)
        .fetch_one(pool)
        .await?;

    debug!(
        table = spec.table,
        args = clause.args.len(),
        rows = rows.len(),
        total,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Listed rows"
    );

    Ok((rows, total))
}

/// Fetch one record by id
///
/// With `active_only`, soft-deleted rows are treated as missing.
pub async fn fetch<'e, R, E>(
    executor: E,
    id: &str,
    active_only: bool,
) -> Result<Option<R::Record>, sqlx::Error>
where
    R: Resource,
    E: Executor<'e, Database = Sqlite>,
{
    let sql = R::SPEC.select_by_id(active_only);
    sqlx::query_as::<_, R::Record>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Insert a new row and return it as re-read from the store
pub async fn create<R: Resource>(pool: &SqlitePool, input: &R::Input) -> ApiResult<R::Record> {
    let spec = R::SPEC;
    let id = Uuid::new_v4().to_string();

    let mut args = vec![SqlArg::Text(id.clone())];
    args.extend(R::column_values(input)?);

    let started = Instant::now();
    let mut tx = pool.begin().await?;

    let sql = spec.insert_sql();
    bind_args!(sqlx::query(&sql), &args).execute(&mut *tx).await?;

    let record = fetch::<R, _>(&mut *tx, &id, false)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("{} {} vanished after insert", spec.entity, id)))?;

    tx.commit().await?;

    debug!(
        table = spec.table,
        id = %id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Inserted row"
    );

    Ok(record)
}

/// Overwrite every editable column of an existing (active) row
///
/// Returns `None` when no row matched.
pub async fn update<R: Resource>(
    pool: &SqlitePool,
    id: &str,
    input: &R::Input,
) -> ApiResult<Option<R::Record>> {
    let spec = R::SPEC;

    let mut args = R::column_values(input)?;
    args.push(SqlArg::Text(id.to_string()));

    let started = Instant::now();
    let mut tx = pool.begin().await?;

    let sql = spec.update_sql();
    let result = bind_args!(sqlx::query(&sql), &args).execute(&mut *tx).await?;
    if result.rows_affected() == 0 {
        return Ok(None);
    }

    // Re-read without the active guard: the update may have deactivated it
    let record = fetch::<R, _>(&mut *tx, id, false).await?;

    tx.commit().await?;

    debug!(
        table = spec.table,
        id = %id,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Updated row"
    );

    Ok(record)
}

/// Soft or hard delete; returns whether a row matched
pub async fn delete<R: Resource>(pool: &SqlitePool, id: &str) -> Result<bool, sqlx::Error> {
    let spec = R::SPEC;
    let result = sqlx::query(&spec.delete_sql()).bind(id).execute(pool).await?;

    debug!(
        table = spec.table,
        id = %id,
        mode = ?spec.delete,
        matched = result.rows_affected(),
        "Deleted row"
    );

    Ok(result.rows_affected() > 0)
}
