//! Dining Table API Handlers

use axum::{Json, extract::State};

use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};

use crate::api::extract::{IdPath, ValidJson};
use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_capacity, validate_optional_text, validate_table_number,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {id} not found"))
}

/// GET /api/tables - ordered by table number
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = dining_table::find_all(state.pool()).await?;
    Ok(Json(tables))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(mut payload): ValidJson<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    validate_table_number(payload.table_number)?;
    validate_capacity(payload.capacity)?;
    payload.location = payload.location.trim().to_string();
    if payload.location.len() > MAX_NAME_LEN {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("location is too long (max {MAX_NAME_LEN})"),
        )
        .for_field("location"));
    }

    let table = dining_table::create(state.pool(), payload).await?;
    tracing::info!(id = table.id, number = table.table_number, "Table created");
    Ok(Json(table))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
    ValidJson(mut payload): ValidJson<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    if let Some(number) = payload.table_number {
        validate_table_number(number)?;
    }
    if let Some(capacity) = payload.capacity {
        validate_capacity(capacity)?;
    }
    payload.location = payload.location.map(|l| l.trim().to_string());
    validate_optional_text(&payload.location, "location", MAX_NAME_LEN)?;

    let table = dining_table::update(state.pool(), id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(table))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<Json<bool>> {
    if !dining_table::delete(state.pool(), id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Table deleted");
    Ok(Json(true))
}
