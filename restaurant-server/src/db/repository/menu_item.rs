//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, description, price, category, image_url, available, created_at";

/// Menu listing, grouped by category
pub async fn find_all(
    pool: &SqlitePool,
    available: Option<bool>,
    category: Option<&str>,
) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item \
         WHERE (?1 IS NULL OR available = ?1) AND (?2 IS NULL OR category = ?2) \
         ORDER BY category, name, id"
    ))
    .bind(available)
    .bind(category)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, category, image_url, available, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.category)
    .bind(&data.image_url)
    .bind(data.available.unwrap_or(true))
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update; returns `None` when the item does not exist
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: MenuItemUpdate,
) -> RepoResult<Option<MenuItem>> {
    // image_url is tri-state: ?5 says whether it was sent, ?6 may be NULL to clear it
    let set_image = data.image_url.is_some();
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), description = COALESCE(?2, description), \
         price = COALESCE(?3, price), category = COALESCE(?4, category), \
         image_url = CASE WHEN ?5 THEN ?6 ELSE image_url END, \
         available = COALESCE(?7, available) WHERE id = ?8",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.category)
    .bind(set_image)
    .bind(data.image_url.flatten())
    .bind(data.available)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
