use std::path::{Path, PathBuf};

use crate::auth::JwtConfig;
use crate::auth::jwt::{MAX_EXPIRATION_MINUTES, MIN_SECRET_LEN, generate_printable_secret};
use crate::core::ServerError;

/// Default per-attempt login delay
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 500;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | ENVIRONMENT | development | development / staging / production |
/// | HTTP_PORT | 3000 | listen port |
/// | DATA_DIR | ./data | database, backups, local uploads |
/// | DATABASE_URL | sqlite:{DATA_DIR}/restaurant.db | database location |
/// | JWT_SECRET | random (development only) | token signing secret, ≥ 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | ADMIN_USERNAME | admin | seeded admin account |
/// | ADMIN_INITIAL_PASSWORD | random (development only) | seeded admin password |
/// | IMGBB_API_KEY | - | enables the remote image host |
/// | PUBLIC_BASE_URL | - | prefix for locally stored upload URLs |
/// | CORS_ORIGINS | - | comma-separated allowed origins |
/// | LOGIN_DELAY_MS | 500 | fixed delay on every login attempt |
/// | LOG_LEVEL | info | used when RUST_LOG is unset |
/// | LOG_DIR | - | daily rolling log files |
///
/// Outside development a missing `JWT_SECRET` or `ADMIN_INITIAL_PASSWORD`
/// refuses to start.
#[derive(Debug, Clone)]
pub struct Config {
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// HTTP API port
    pub http_port: u16,
    /// Data directory (database, backups, uploads)
    pub data_dir: PathBuf,
    /// SQLite connection URL
    pub database_url: String,
    /// JWT settings
    pub jwt: JwtConfig,
    /// Username of the single admin account
    pub admin_username: String,
    /// Password used when seeding the admin account on first boot
    pub admin_initial_password: Option<String>,
    /// ImgBB API key; local storage is used when unset
    pub imgbb_api_key: Option<String>,
    /// Public URL prefix for locally stored uploads
    pub public_base_url: Option<String>,
    /// Allowed CORS origins; permissive when empty
    pub cors_origins: Vec<String>,
    /// Fixed delay applied to every login attempt (milliseconds)
    pub login_delay_ms: u64,
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Directory for rolling log files
    pub log_dir: Option<String>,
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ServerError> {
    match env_opt(name) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| ServerError::Config(format!("{name} has an invalid value: {raw}"))),
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ServerError> {
        let environment = env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into());
        let is_development = environment == "development";

        let data_dir = PathBuf::from(env_opt("DATA_DIR").unwrap_or_else(|| "./data".into()));
        let database_url = env_opt("DATABASE_URL").unwrap_or_else(|| {
            format!("sqlite:{}", data_dir.join("restaurant.db").display())
        });

        let secret = match env_opt("JWT_SECRET") {
            Some(secret) => secret,
            None if is_development => {
                tracing::warn!("JWT_SECRET not set, using a random secret for this process");
                generate_printable_secret(64)
            }
            None => {
                return Err(ServerError::Config(format!(
                    "JWT_SECRET must be set in {environment} environment"
                )));
            }
        };
        if secret.len() < MIN_SECRET_LEN {
            return Err(ServerError::Config(format!(
                "JWT_SECRET must be at least {MIN_SECRET_LEN} characters long"
            )));
        }

        let admin_initial_password = env_opt("ADMIN_INITIAL_PASSWORD");
        if admin_initial_password.is_none() && !is_development {
            return Err(ServerError::Config(format!(
                "ADMIN_INITIAL_PASSWORD must be set in {environment} environment"
            )));
        }

        let jwt = JwtConfig {
            secret,
            expiration_minutes: check_expiration(env_parse("JWT_EXPIRATION_MINUTES", 1440)?)?,
            ..JwtConfig::ephemeral()
        };

        Ok(Self {
            http_port: env_parse("HTTP_PORT", 3000)?,
            data_dir,
            database_url,
            jwt,
            admin_username: env_opt("ADMIN_USERNAME").unwrap_or_else(|| "admin".into()),
            admin_initial_password,
            imgbb_api_key: env_opt("IMGBB_API_KEY"),
            public_base_url: env_opt("PUBLIC_BASE_URL"),
            cors_origins: env_opt("CORS_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            login_delay_ms: env_parse("LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?,
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            environment,
        })
    }

    /// Development configuration rooted at `data_dir`, without reading the
    /// environment. The database is in-memory and logins are not delayed.
    ///
    /// Used by tests.
    pub fn for_data_dir(data_dir: impl AsRef<Path>, admin_password: &str) -> Self {
        Self {
            environment: "development".into(),
            http_port: 0,
            data_dir: data_dir.as_ref().to_path_buf(),
            database_url: "sqlite::memory:".into(),
            jwt: JwtConfig::ephemeral(),
            admin_username: "admin".into(),
            admin_initial_password: Some(admin_password.to_string()),
            imgbb_api_key: None,
            public_base_url: None,
            cors_origins: Vec::new(),
            login_delay_ms: 0,
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// Is this a development deployment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Directory for JSON backups
    pub fn backups_dir(&self) -> PathBuf {
        self.data_dir.join("backups")
    }

    /// Directory for locally stored images
    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join("uploads")
    }
}

fn check_expiration(minutes: i64) -> Result<i64, ServerError> {
    if !(1..=MAX_EXPIRATION_MINUTES).contains(&minutes) {
        return Err(ServerError::Config(format!(
            "JWT_EXPIRATION_MINUTES must be between 1 and {MAX_EXPIRATION_MINUTES}, got {minutes}"
        )));
    }
    Ok(minutes)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}
