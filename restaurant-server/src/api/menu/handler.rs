//! Menu API Handlers

use axum::{Json, extract::State};

use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery};

use crate::api::extract::{IdPath, ValidJson, ValidQuery};
use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, normalize_optional, validate_optional_text,
    validate_price, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
}

/// GET /api/menu - list items, optionally by availability and category
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(query): ValidQuery<MenuQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let category = normalize_optional(query.category);
    let items = menu_item::find_all(state.pool(), query.available, category.as_deref()).await?;
    Ok(Json(items))
}

/// GET /api/menu/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(mut payload): ValidJson<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    payload.name = payload.name.trim().to_string();
    payload.category = payload.category.trim().to_string();
    payload.description = payload.description.trim().to_string();
    payload.image_url = normalize_optional(payload.image_url);

    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.category, "category", MAX_NAME_LEN)?;
    if payload.description.len() > MAX_NOTE_LEN {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("description is too long (max {MAX_NOTE_LEN})"),
        )
        .for_field("description"));
    }
    validate_optional_text(&payload.image_url, "imageUrl", MAX_URL_LEN)?;
    validate_price(payload.price, "price")?;

    let item = menu_item::create(state.pool(), payload).await?;
    tracing::info!(id = item.id, name = %item.name, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu/{id} - absent fields are left unchanged
pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
    ValidJson(mut payload): ValidJson<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    payload.name = payload.name.map(|n| n.trim().to_string());
    payload.category = payload.category.map(|c| c.trim().to_string());
    // An empty string clears the image like an explicit null
    payload.image_url = payload.image_url.map(normalize_optional);
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(category) = &payload.category {
        validate_required_text(category, "category", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.description, "description", MAX_NOTE_LEN)?;
    if let Some(image_url) = &payload.image_url {
        validate_optional_text(image_url, "imageUrl", MAX_URL_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price, "price")?;
    }

    let item = menu_item::update(state.pool(), id, payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// DELETE /api/menu/{id}
pub async fn delete(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<Json<bool>> {
    if !menu_item::delete(state.pool(), id).await? {
        return Err(not_found(id));
    }
    tracing::info!(id, "Menu item deleted");
    Ok(Json(true))
}
