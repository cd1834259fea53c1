//! Data management handlers

use std::path::Path;

use axum::{Json, extract::State};
use serde::Serialize;
use sqlx::SqlitePool;

use shared::models::{AdminUser, DiningTable, MenuItem, Order, Reservation, Review};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::raw_data::{self, DataCounts};
use crate::db::repository::{admin_user, dining_table, menu_item, order, reservation, review};
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Every stored record. Admin users are serialized without their hash.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSnapshot {
    pub exported_at: i64,
    pub menu_items: Vec<MenuItem>,
    pub orders: Vec<Order>,
    pub reservations: Vec<Reservation>,
    pub reviews: Vec<Review>,
    pub tables: Vec<DiningTable>,
    pub admin_users: Vec<AdminUser>,
    pub counts: DataCounts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupFile {
    pub file_name: String,
    pub size: u64,
    /// Unix millis
    pub modified_at: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataInfo {
    pub counts: DataCounts,
    pub database_url: String,
    pub data_dir: String,
    /// Newest first
    pub backups: Vec<BackupFile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClearResult {
    pub success: bool,
    pub deleted: DataCounts,
}

async fn snapshot(pool: &SqlitePool) -> AppResult<DataSnapshot> {
    Ok(DataSnapshot {
        exported_at: now_millis(),
        menu_items: menu_item::find_all(pool, None, None).await?,
        orders: order::find_all(pool, None, i64::MAX).await?,
        reservations: reservation::find_all(pool, None, i64::MAX).await?,
        reviews: review::find_all(pool, false).await?,
        tables: dining_table::find_all(pool).await?,
        admin_users: admin_user::find_all(pool).await?,
        counts: raw_data::counts(pool).await?,
    })
}

/// GET /api/admin/raw-data
pub async fn raw_data(State(state): State<ServerState>) -> AppResult<Json<DataSnapshot>> {
    Ok(Json(snapshot(state.pool()).await?))
}

async fn list_backups(dir: &Path) -> AppResult<Vec<BackupFile>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(AppError::storage(format!("Failed to list backups: {e}"))),
    };

    let mut backups = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::storage(format!("Failed to list backups: {e}")))?
    {
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !file_name.starts_with("backup-") || !file_name.ends_with(".json") {
            continue;
        }
        let Ok(meta) = entry.metadata().await else {
            continue;
        };
        let modified_at = meta
            .modified()
            .ok()
            .map(|t| chrono::DateTime::<chrono::Utc>::from(t).timestamp_millis());
        backups.push(BackupFile {
            file_name,
            size: meta.len(),
            modified_at,
        });
    }
    // Timestamped names sort chronologically
    backups.sort_by(|a, b| b.file_name.cmp(&a.file_name));
    Ok(backups)
}

/// GET /api/admin/data-info
pub async fn data_info(State(state): State<ServerState>) -> AppResult<Json<DataInfo>> {
    Ok(Json(DataInfo {
        counts: raw_data::counts(state.pool()).await?,
        database_url: state.config.database_url.clone(),
        data_dir: state.config.data_dir.display().to_string(),
        backups: list_backups(&state.config.backups_dir()).await?,
    }))
}

/// POST /api/admin/backup - pretty JSON snapshot, returns the file written
pub async fn backup(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<BackupFile>> {
    let snapshot = snapshot(state.pool()).await?;
    let body = serde_json::to_vec_pretty(&snapshot)
        .map_err(|e| AppError::internal(format!("Failed to serialize backup: {e}")))?;

    let dir = state.config.backups_dir();
    tokio::fs::create_dir_all(&dir)
        .await
        .map_err(|e| AppError::storage(format!("Failed to create backup directory: {e}")))?;

    let file_name = format!(
        "backup-{}.json",
        chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ")
    );
    tokio::fs::write(dir.join(&file_name), &body)
        .await
        .map_err(|e| AppError::storage(format!("Failed to write backup: {e}")))?;

    tracing::info!(file = %file_name, size = body.len(), admin = %user.username, "Backup written");
    Ok(Json(BackupFile {
        file_name,
        size: body.len() as u64,
        modified_at: Some(snapshot.exported_at),
    }))
}

/// POST /api/admin/clear-all - menu, orders, reservations, tables and reviews
pub async fn clear_all(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ClearResult>> {
    let deleted = raw_data::clear_all(state.pool()).await?;
    security_log!(
        "WARN",
        "data_cleared",
        admin = user.username.as_str(),
        orders = deleted.orders,
        reviews = deleted.reviews
    );
    Ok(Json(ClearResult {
        success: true,
        deleted,
    }))
}
