//! Whole-database operations for the data management screen

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::RepoResult;

/// Row count per collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataCounts {
    pub menu_items: i64,
    pub orders: i64,
    pub reservations: i64,
    pub reviews: i64,
    pub tables: i64,
    pub admin_users: i64,
}

async fn count_rows(pool: &SqlitePool, table: &str) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await?;
    Ok(count)
}

pub async fn counts(pool: &SqlitePool) -> RepoResult<DataCounts> {
    Ok(DataCounts {
        menu_items: count_rows(pool, "menu_item").await?,
        orders: count_rows(pool, "customer_order").await?,
        reservations: count_rows(pool, "reservation").await?,
        reviews: count_rows(pool, "review").await?,
        tables: count_rows(pool, "dining_table").await?,
        admin_users: count_rows(pool, "admin_user").await?,
    })
}

/// Delete every business record in one transaction. The admin account is kept.
///
/// Returns the number of rows removed per collection.
pub async fn clear_all(pool: &SqlitePool) -> RepoResult<DataCounts> {
    let mut tx = pool.begin().await?;

    // reservation before dining_table so no SET NULL cascade runs
    let reservations = sqlx::query("DELETE FROM reservation").execute(&mut *tx).await?;
    let tables = sqlx::query("DELETE FROM dining_table").execute(&mut *tx).await?;
    let orders = sqlx::query("DELETE FROM customer_order").execute(&mut *tx).await?;
    let reviews = sqlx::query("DELETE FROM review").execute(&mut *tx).await?;
    let menu_items = sqlx::query("DELETE FROM menu_item").execute(&mut *tx).await?;

    tx.commit().await?;

    Ok(DataCounts {
        menu_items: menu_items.rows_affected() as i64,
        orders: orders.rows_affected() as i64,
        reservations: reservations.rows_affected() as i64,
        reviews: reviews.rows_affected() as i64,
        tables: tables.rows_affected() as i64,
        admin_users: 0,
    })
}
