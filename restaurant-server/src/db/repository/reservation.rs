//! Reservation Repository

use super::{RepoError, RepoResult};
use shared::models::{Reservation, ReservationStatus};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, customer_name, customer_phone, customer_email, date, time, guests, \
                       special_requests, status, table_id, created_at";

/// Validated reservation ready to be stored
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub guests: i64,
    pub special_requests: Option<String>,
}

/// Newest first, optionally filtered by status
pub async fn find_all(
    pool: &SqlitePool,
    status: Option<ReservationStatus>,
    limit: i64,
) -> RepoResult<Vec<Reservation>> {
    let reservations = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE (?1 IS NULL OR status = ?1) \
         ORDER BY created_at DESC, id DESC LIMIT ?2"
    ))
    .bind(status)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(reservations)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Reservation>> {
    let reservation = sqlx::query_as::<_, Reservation>(&format!(
        "SELECT {COLUMNS} FROM reservation WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(reservation)
}

/// Insert a new reservation; the status is always `pending` and no table is assigned
pub async fn create(pool: &SqlitePool, data: NewReservation) -> RepoResult<Reservation> {
    let id = snowflake_id();
    sqlx::query(
        "INSERT INTO reservation \
         (id, customer_name, customer_phone, customer_email, date, time, guests, special_requests, status, table_id, created_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, ?)",
    )
    .bind(id)
    .bind(&data.customer_name)
    .bind(&data.customer_phone)
    .bind(&data.customer_email)
    .bind(&data.date)
    .bind(&data.time)
    .bind(data.guests)
    .bind(&data.special_requests)
    .bind(ReservationStatus::Pending)
    .bind(now_millis())
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create reservation".into()))
}

/// Apply a status transition and/or table assignment, but only while the
/// reservation is still in `expected` status.
///
/// Returns `None` when no row matched: the reservation is gone or another
/// request changed its status first.
pub async fn update_guarded(
    pool: &SqlitePool,
    id: i64,
    expected: ReservationStatus,
    status: ReservationStatus,
    table_id: Option<i64>,
) -> RepoResult<Option<Reservation>> {
    let rows = sqlx::query(
        "UPDATE reservation SET status = ?1, table_id = COALESCE(?2, table_id) \
         WHERE id = ?3 AND status = ?4",
    )
    .bind(status)
    .bind(table_id)
    .bind(id)
    .bind(expected)
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
    use crate::db::repository::dining_table;
    use crate::db::repository::test_support::test_pool;
    use shared::models::DiningTableCreate;

    fn party(guests: i64) -> NewReservation {
        NewReservation {
            customer_name: "Meera".into(),
            customer_phone: "9123456780".into(),
            customer_email: None,
            date: "2099-05-01".into(),
            time: "19:30".into(),
            guests,
            special_requests: Some("Window seat".into()),
        }
    }

    #[tokio::test]
    async fn test_create_starts_pending_without_table() {
        let pool = test_pool().await;
        let r = create(&pool, party(10)).await.unwrap();
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.table_id, None);
        assert_eq!(r.guests, 10);
    }

    #[tokio::test]
    async fn test_guest_check_constraint() {
        let pool = test_pool().await;
        assert!(matches!(
            create(&pool, party(11)).await,
            Err(RepoError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_confirm_with_table_then_detach_on_table_delete() {
        let pool = test_pool().await;
        let table = dining_table::create(
            &pool,
            DiningTableCreate {
                table_number: 4,
                capacity: 10,
                location: String::new(),
                available: None,
            },
        )
        .await
        .unwrap();
        let r = create(&pool, party(4)).await.unwrap();

        let confirmed = update_guarded(
            &pool,
            r.id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            Some(table.id),
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(confirmed.status, ReservationStatus::Confirmed);
        assert_eq!(confirmed.table_id, Some(table.id));

        dining_table::delete(&pool, table.id).await.unwrap();
        let detached = find_by_id(&pool, r.id).await.unwrap().unwrap();
        assert_eq!(detached.table_id, None);
    }

    #[tokio::test]
    async fn test_stale_status_matches_nothing() {
        let pool = test_pool().await;
        let r = create(&pool, party(2)).await.unwrap();
        update_guarded(
            &pool,
            r.id,
            ReservationStatus::Pending,
            ReservationStatus::Cancelled,
            None,
        )
        .await
        .unwrap()
        .unwrap();

        let stale = update_guarded(
            &pool,
            r.id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            None,
        )
        .await
        .unwrap();
        assert!(stale.is_none());
    }

    #[tokio::test]
    async fn test_list_by_status() {
        let pool = test_pool().await;
        let a = create(&pool, party(2)).await.unwrap();
        create(&pool, party(3)).await.unwrap();
        update_guarded(
            &pool,
            a.id,
            ReservationStatus::Pending,
            ReservationStatus::Confirmed,
            None,
        )
        .await
        .unwrap();

        let confirmed = find_all(&pool, Some(ReservationStatus::Confirmed), 100)
            .await
            .unwrap();
        assert_eq!(confirmed.len(), 1);
        assert_eq!(find_all(&pool, None, 100).await.unwrap().len(), 2);
    }
}
