//! Review Repository

use super::{RepoError, RepoResult};
use shared::models::Review;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, customer_name, rating, review_text, image_url, approved, created_at";

/// Validated review ready to be stored
#[derive(Debug, Clone)]
pub struct NewReview {
    pub customer_name: String,
    pub rating: i64,
    pub review_text: String,
    pub image_url: Option<String>,
}

/// Newest first. `approved_only` is the public read path.
pub async fn find_all(pool: &SqlitePool, approved_only: bool) -> RepoResult<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(&format!(
        "SELECT {COLUMNS} FROM review WHERE (?1 = 0 OR approved = 1) \
         ORDER BY created_at DESC, id DESC"
    ))
    .bind(approved_only)
    .fetch_all(pool)
    .await?;
    Ok(reviews)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Review>> {
    let review = sqlx::query_as::<_, Review>(&format!("SELECT {COLUMNS} FROM review WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(review)
}

/// Insert a new review; it always awaits moderation
pub async fn create(pool: &SqlitePool, data: NewReview) -> RepoResult<Review> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO review (id, customer_name, rating, review_text, image_url, approved, created_at) \
         VALUES (?, ?, ?, ?, ?, 0, ?)",
    )
    .bind(id)
    .bind(&data.customer_name)
    .bind(data.rating)
    .bind(&data.review_text)
    .bind(&data.image_url)
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create review".into()))
}

/// Set the moderation flag; returns `None` when the review does not exist
pub async fn set_approved(
    pool: &SqlitePool,
    id: i64,
    approved: bool,
) -> RepoResult<Option<Review>> {
    let rows = sqlx::query("UPDATE review SET approved = ? WHERE id = ?")
        .bind(approved)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM review WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
