//! Dining Table Repository

use super::{RepoError, RepoResult};
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, table_number, capacity, location, available, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table ORDER BY table_number"
    ))
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn find_by_number(pool: &SqlitePool, table_number: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(&format!(
        "SELECT {COLUMNS} FROM dining_table WHERE table_number = ? LIMIT 1"
    ))
    .bind(table_number)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    if find_by_number(pool, data.table_number).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Table {} already exists",
            data.table_number
        )));
    }

    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO dining_table (id, table_number, capacity, location, available, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(&data.location)
    .bind(data.available.unwrap_or(true))
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
}

/// Partial update; returns `None` when the table does not exist
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: DiningTableUpdate,
) -> RepoResult<Option<DiningTable>> {
    if let Some(number) = data.table_number
        && let Some(found) = find_by_number(pool, number).await?
        && found.id != id
    {
        return Err(RepoError::Duplicate(format!("Table {number} already exists")));
    }

    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), \
         capacity = COALESCE(?2, capacity), location = COALESCE(?3, location), \
         available = COALESCE(?4, available) WHERE id = ?5",
    )
    .bind(data.table_number)
    .bind(data.capacity)
    .bind(data.location)
    .bind(data.available)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// Reservations pointing at the table are detached (`ON DELETE SET NULL`)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM dining_table WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
