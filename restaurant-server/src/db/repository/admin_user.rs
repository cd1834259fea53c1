//! Admin User Repository

use super::{RepoError, RepoResult};
use shared::models::AdminUser;
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, username, password_hash, created_at";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<AdminUser>> {
    let users = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {COLUMNS} FROM admin_user ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<AdminUser>> {
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {COLUMNS} FROM admin_user WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn find_by_username(pool: &SqlitePool, username: &str) -> RepoResult<Option<AdminUser>> {
    let user = sqlx::query_as::<_, AdminUser>(&format!(
        "SELECT {COLUMNS} FROM admin_user WHERE username = ? LIMIT 1"
    ))
    .bind(username)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admin_user")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert an admin with an already hashed password
pub async fn create(pool: &SqlitePool, username: &str, password_hash: &str) -> RepoResult<AdminUser> {
    let id = snowflake_id();
    sqlx::query("INSERT INTO admin_user (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(now_millis())
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create admin user".into()))
}

pub async fn update_password_hash(pool: &SqlitePool, id: i64, password_hash: &str) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE admin_user SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Admin user {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;

    #[tokio::test]
    async fn test_username_is_unique() {
        let pool = test_pool().await;
        let before = count(&pool).await.unwrap();
        create(&pool, "chef", "hash-a").await.unwrap();
        assert!(matches!(
            create(&pool, "chef", "hash-b").await,
            Err(RepoError::Duplicate(_))
        ));
        assert_eq!(count(&pool).await.unwrap(), before + 1);
    }

    #[tokio::test]
    async fn test_password_hash_update() {
        let pool = test_pool().await;
        let user = create(&pool, "chef", "old").await.unwrap();
        update_password_hash(&pool, user.id, "new").await.unwrap();

        let found = find_by_username(&pool, "chef").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "new");
        assert!(matches!(
            update_password_hash(&pool, user.id + 1, "x").await,
            Err(RepoError::NotFound(_))
        ));
    }

    #[test]
    fn test_hash_never_serialized() {
        let user = AdminUser {
            id: 1,
            username: "admin".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: 0,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2"));
        assert!(!json.contains("passwordHash"));
    }
}
