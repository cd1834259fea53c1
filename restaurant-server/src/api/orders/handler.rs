//! Order API Handlers

use axum::{Json, extract::State};

use shared::models::{Order, OrderCreate, OrderQuery, OrderStatus, OrderStatusUpdate};

use crate::api::extract::{IdPath, ValidJson, ValidQuery};
use crate::core::ServerState;
use crate::db::repository::order::{self, NewOrder};
use crate::orders::money::{validate_order_items, verify_client_total};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, resolve_limit, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
}

/// POST /api/orders - place a cash-on-delivery order
///
/// The stored total is the server's Σ(price × quantity); the order starts pending.
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<OrderCreate>,
) -> AppResult<Json<Order>> {
    validate_required_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.customer_address, "customerAddress", MAX_ADDRESS_LEN)?;
    validate_order_items(&payload.items)?;
    let total_amount = verify_client_total(&payload.items, payload.total_amount)?;

    let items = payload
        .items
        .into_iter()
        .map(|mut item| {
            item.name = item.name.trim().to_string();
            item
        })
        .collect();

    let order = order::create(
        state.pool(),
        NewOrder {
            customer_name: payload.customer_name.trim().to_string(),
            customer_phone: payload.customer_phone.trim().to_string(),
            customer_address: payload.customer_address.trim().to_string(),
            items,
            total_amount,
        },
    )
    .await?;

    tracing::info!(id = order.id, total = order.total_amount, "Order placed");
    Ok(Json(order))
}

/// GET /api/orders?status=&limit= - newest first
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(query): ValidQuery<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<OrderStatus>)
        .transpose()?;
    let limit = resolve_limit(query.limit)?;
    let orders = order::find_all(state.pool(), status, limit).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Order>> {
    let order = order::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(order))
}

/// PUT /api/orders/{id} - move the order along its status machine
pub async fn update_status(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
    ValidJson(payload): ValidJson<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let current = order::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let next = current.status.transition(payload.status)?;

    match order::update_status(state.pool(), id, current.status, next).await? {
        Some(updated) => {
            tracing::info!(id, from = %current.status, to = %next, "Order status changed");
            Ok(Json(updated))
        }
        None => {
            // Lost a race: report against whatever the row holds now
            let now = order::find_by_id(state.pool(), id)
                .await?
                .ok_or_else(|| not_found(id))?;
            now.status.transition(next)?;
            Err(AppError::with_message(
                ErrorCode::InvalidOrderTransition,
                format!("Order {id} changed concurrently, retry"),
            )
            .with_detail("from", now.status.as_str())
            .with_detail("to", next.as_str()))
        }
    }
}
