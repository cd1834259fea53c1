//! Database Module
//!
//! Handles the SQLite connection pool, migrations and first-boot seeding

pub mod repository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;
use std::time::Duration;

use crate::auth::hash_password;
use crate::auth::jwt::generate_printable_secret;
use crate::core::{Config, ServerError};
use repository::admin_user;

/// Database service, owns a SQLite connection pool
#[derive(Clone, Debug)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (creating if missing) the database and apply migrations
    ///
    /// WAL journal with `synchronous = FULL`: a mutation is on disk before
    /// the request that made it returns.
    pub async fn new(database_url: &str) -> Result<Self, ServerError> {
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");

        let mut options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| ServerError::Database(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            options = options
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Full);
        }

        // Every connection to `:memory:` is its own database, so keep exactly one alive
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to open database: {e}")))?;

        tracing::info!(in_memory, "Database connection established (SQLite, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| ServerError::Database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Private in-memory database (tests)
    pub async fn in_memory() -> Result<Self, ServerError> {
        Self::new("sqlite::memory:").await
    }
}

/// Create the admin account on first boot
///
/// Uses `ADMIN_INITIAL_PASSWORD`; in development a random password is
/// generated and logged once. Does nothing when an admin already exists.
pub async fn seed_admin(pool: &SqlitePool, config: &Config) -> Result<(), ServerError> {
    let existing = admin_user::count(pool)
        .await
        .map_err(|e| ServerError::Database(e.to_string()))?;
    if existing > 0 {
        return Ok(());
    }

    let password = match &config.admin_initial_password {
        Some(password) => password.clone(),
        None if config.is_development() => {
            let generated = generate_printable_secret(16);
            tracing::warn!(
                username = %config.admin_username,
                password = %generated,
                "Generated initial admin password, change it after first login"
            );
            generated
        }
        None => {
            return Err(ServerError::Config(
                "ADMIN_INITIAL_PASSWORD must be set to seed the admin account".into(),
            ));
        }
    };

    let hash = hash_password(&password)
        .map_err(|e| ServerError::Config(format!("Failed to hash admin password: {e}")))?;
    admin_user::create(pool, &config.admin_username, &hash)
        .await
        .map_err(|e| ServerError::Database(e.to_string()))?;

    tracing::info!(username = %config.admin_username, "Admin account created");
    Ok(())
}
