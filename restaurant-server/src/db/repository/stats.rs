//! Dashboard aggregate queries
//!
//! Recomputed on every call. Ranges are inclusive Unix-millisecond bounds
//! on `created_at`; pass [`ALL_TIME`](super::ALL_TIME) for no filter.

use std::collections::BTreeMap;

use super::RepoResult;
use shared::models::{OrderStatus, ReservationStatus};
use sqlx::SqlitePool;

/// Order count and raw revenue (non-cancelled totals) in range
pub async fn order_totals(pool: &SqlitePool, (start, end): (i64, i64)) -> RepoResult<(i64, f64)> {
    let totals = sqlx::query_as::<_, (i64, f64)>(
        "SELECT COUNT(*), \
                COALESCE(SUM(CASE WHEN status != 'cancelled' THEN total_amount ELSE 0.0 END), 0.0) \
         FROM customer_order WHERE created_at BETWEEN ? AND ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

/// Review count and mean rating (`None` when empty) in range, approved or not
pub async fn review_totals(
    pool: &SqlitePool,
    (start, end): (i64, i64),
) -> RepoResult<(i64, Option<f64>)> {
    let totals = sqlx::query_as::<_, (i64, Option<f64>)>(
        "SELECT COUNT(*), AVG(rating) FROM review WHERE created_at BETWEEN ? AND ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(totals)
}

/// Count per order status, every status present
pub async fn orders_by_status(pool: &SqlitePool) -> RepoResult<BTreeMap<String, i64>> {
    let mut counts: BTreeMap<String, i64> = OrderStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM customer_order GROUP BY status",
    )
    .fetch_all(pool)
    .await?;
    counts.extend(rows);
    Ok(counts)
}

/// Count per reservation status, every status present
pub async fn reservations_by_status(pool: &SqlitePool) -> RepoResult<BTreeMap<String, i64>> {
    let mut counts: BTreeMap<String, i64> = ReservationStatus::ALL
        .iter()
        .map(|s| (s.as_str().to_string(), 0))
        .collect();
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT status, COUNT(*) FROM reservation GROUP BY status",
    )
    .fetch_all(pool)
    .await?;
    counts.extend(rows);
    Ok(counts)
}

/// Reviews awaiting moderation
pub async fn pending_reviews(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM review WHERE approved = 0")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
