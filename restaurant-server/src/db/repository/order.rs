//! Order Repository
//!
//! Line items live in a JSON text column; rows are decoded through
//! [`OrderRow`].

use super::{RepoError, RepoResult};
use shared::models::{Order, OrderItem, OrderStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str =
    "id, customer_name, customer_phone, customer_address, items, total_amount, status, created_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: i64,
    customer_name: String,
    customer_phone: String,
    customer_address: String,
    items: String,
    total_amount: f64,
    status: OrderStatus,
    created_at: i64,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            customer_address: row.customer_address,
            items: serde_json::from_str(&row.items)?,
            total_amount: row.total_amount,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Validated order ready to be stored
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub items: Vec<OrderItem>,
    /// Server-computed total
    pub total_amount: f64,
}

/// Newest first, optionally filtered by status
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    limit: i64,
) -> RepoResult<Vec<Order>> {
    let rows = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM customer_order WHERE (?1 IS NULL OR status = ?1) \
         ORDER BY created_at DESC, id DESC LIMIT ?2"
    ))
    .bind(status)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(Order::try_from).collect()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let row = sqlx::query_as::<_, OrderRow>(&format!(
        "SELECT {COLUMNS} FROM customer_order WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(Order::try_from).transpose()
}

/// Insert a new order; the status is always `pending`
pub async fn create(pool: &SqlitePool, data: NewOrder) -> RepoResult<Order> {
    let id = snowflake_id();
    let items = serde_json::to_string(&data.items)?;
    sqlx::query(
        "INSERT INTO customer_order \
         (id, customer_name, customer_phone, customer_address, items, total_amount, status, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(&data.customer_name)
    .bind(&data.customer_phone)
    .bind(&data.customer_address)
    .bind(items)
    .bind(data.total_amount)
    .bind(OrderStatus::Pending)
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create order".into()))
}

/// Move an order from `from` to `to` only if it is still in `from`.
///
/// Returns `None` when no row matched: the order is gone or another
/// request changed its status first.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<Option<Order>> {
    let rows = sqlx::query("UPDATE customer_order SET status = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    fn biryani_order() -> NewOrder {
        NewOrder {
            customer_name: "Asha".into(),
            customer_phone: "9876543210".into(),
            customer_address: "12 MG Road".into(),
            items: vec![OrderItem {
                id: None,
                name: "Biryani".into(),
                price: 150.0,
                quantity: 2,
            }],
            total_amount: 300.0,
        }
    }

    #[tokio::test]
    async fn test_create_round_trips_items() {
        let pool = test_pool().await;
        let order = create(&pool, biryani_order()).await.unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total_amount, 300.0);

        let found = find_by_id(&pool, order.id).await.unwrap().unwrap();
        assert_eq!(found.items, biryani_order().items);
    }

    #[tokio::test]
    async fn test_conditional_status_update() {
        let pool = test_pool().await;
        let order = create(&pool, biryani_order()).await.unwrap();

        let moved = update_status(&pool, order.id, OrderStatus::Pending, OrderStatus::Preparing)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(moved.status, OrderStatus::Preparing);

        // A second writer still believing the order is pending loses
        let stale = update_status(&pool, order.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await
            .unwrap();
        assert!(stale.is_none());
        let current = find_by_id(&pool, order.id).await.unwrap().unwrap();
        assert_eq!(current.status, OrderStatus::Preparing);
    }

    #[tokio::test]
    async fn test_missing_order_update_matches_nothing() {
        let pool = test_pool().await;
        let result = update_status(&pool, 42, OrderStatus::Pending, OrderStatus::Preparing)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_filter_and_limit() {
        let pool = test_pool().await;
        let first = create(&pool, biryani_order()).await.unwrap();
        create(&pool, biryani_order()).await.unwrap();
        create(&pool, biryani_order()).await.unwrap();
        update_status(&pool, first.id, OrderStatus::Pending, OrderStatus::Cancelled)
            .await
            .unwrap();

        assert_eq!(find_all(&pool, None, 100).await.unwrap().len(), 3);
        assert_eq!(find_all(&pool, None, 2).await.unwrap().len(), 2);

        let cancelled = find_all(&pool, Some(OrderStatus::Cancelled), 100).await.unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, first.id);
        assert_eq!(
            find_all(&pool, Some(OrderStatus::Pending), 100).await.unwrap().len(),
            2
        );
    }
}
