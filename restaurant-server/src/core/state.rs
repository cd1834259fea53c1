use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::{DbService, seed_admin};
use crate::services::ImageService;

/// Server state, shared by every handler
///
/// Cloning is cheap: the pool, JWT service and image stores are all
/// reference counted.
///
/// | Field | Meaning |
/// |-------|---------|
/// | config | immutable configuration |
/// | pool | SQLite connection pool |
/// | jwt_service | token issuing and verification |
/// | images | upload validation and storage |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub images: ImageService,
}

impl ServerState {
    /// Manual construction; most callers want [`ServerState::initialize`]
    pub fn new(
        config: Config,
        pool: SqlitePool,
        jwt_service: Arc<JwtService>,
        images: ImageService,
    ) -> Self {
        Self {
            config,
            pool,
            jwt_service,
            images,
        }
    }

    /// Open the database, seed the admin account and build the services
    ///
    /// 1. Create the data directory
    /// 2. Open SQLite and run migrations
    /// 3. Seed the admin account on first boot
    /// 4. JWT and image services
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        tokio::fs::create_dir_all(&config.data_dir).await?;

        let db = DbService::new(&config.database_url).await?;
        seed_admin(&db.pool, config).await?;

        let jwt_service = JwtService::with_config(config.jwt.clone())
            .map_err(|e| ServerError::Config(e.to_string()))?;

        Ok(Self::new(
            config.clone(),
            db.pool,
            Arc::new(jwt_service),
            ImageService::from_config(config),
        ))
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
