//! Reservation API Handlers

use axum::{Json, extract::State};

use shared::models::{
    Reservation, ReservationCreate, ReservationQuery, ReservationStatus, ReservationUpdate,
};

use crate::api::extract::{IdPath, ValidJson, ValidQuery};
use crate::core::ServerState;
use crate::db::repository::dining_table;
use crate::db::repository::reservation::{self, NewReservation};
use crate::utils::time::{parse_date, parse_time_of_day, validate_not_past};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, normalize_optional, resolve_limit,
    validate_email, validate_guests, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::ReservationNotFound,
        format!("Reservation {id} not found"),
    )
}

/// POST /api/reservations - request a table; starts pending with no table
pub async fn create(
    State(state): State<ServerState>,
    ValidJson(payload): ValidJson<ReservationCreate>,
) -> AppResult<Json<Reservation>> {
    validate_required_text(&payload.customer_name, "customerName", MAX_NAME_LEN)?;
    validate_required_text(&payload.customer_phone, "customerPhone", MAX_SHORT_TEXT_LEN)?;
    let customer_email = normalize_optional(payload.customer_email);
    if let Some(email) = &customer_email {
        validate_email(email, "customerEmail")?;
    }
    let special_requests = normalize_optional(payload.special_requests);
    validate_optional_text(&special_requests, "specialRequests", MAX_NOTE_LEN)?;

    let date = parse_date(&payload.date, "date")?;
    validate_not_past(date)?;
    let time = parse_time_of_day(&payload.time, "time")?;
    validate_guests(payload.guests)?;

    let reservation = reservation::create(
        state.pool(),
        NewReservation {
            customer_name: payload.customer_name.trim().to_string(),
            customer_phone: payload.customer_phone.trim().to_string(),
            customer_email,
            date: date.format("%Y-%m-%d").to_string(),
            time: time.format("%H:%M").to_string(),
            guests: payload.guests,
            special_requests,
        },
    )
    .await?;

    tracing::info!(
        id = reservation.id,
        date = %reservation.date,
        guests = reservation.guests,
        "Reservation requested"
    );
    Ok(Json(reservation))
}

/// GET /api/reservations?status=&limit= - newest first
pub async fn list(
    State(state): State<ServerState>,
    ValidQuery(query): ValidQuery<ReservationQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let status = query
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<ReservationStatus>)
        .transpose()?;
    let limit = resolve_limit(query.limit)?;
    let reservations = reservation::find_all(state.pool(), status, limit).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
) -> AppResult<Json<Reservation>> {
    let reservation = reservation::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(reservation))
}

/// PUT /api/reservations/{id} - status transition, table assignment, or both
pub async fn update(
    State(state): State<ServerState>,
    IdPath(id): IdPath,
    ValidJson(payload): ValidJson<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    if payload.status.is_none() && payload.table_id.is_none() {
        return Err(AppError::validation("Nothing to update: provide status and/or tableId"));
    }

    let current = reservation::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let next = match payload.status {
        Some(status) => current.status.transition(status)?,
        None => current.status,
    };

    if let Some(table_id) = payload.table_id {
        if current.status.is_terminal() {
            return Err(AppError::with_message(
                ErrorCode::InvalidReservationTransition,
                format!("Cannot assign a table to a {} reservation", current.status),
            )
            .for_field("tableId"));
        }
        if dining_table::find_by_id(state.pool(), table_id).await?.is_none() {
            return Err(AppError::with_message(
                ErrorCode::TableNotFound,
                format!("Table {table_id} not found"),
            )
            .for_field("tableId"));
        }
    }

    match reservation::update_guarded(state.pool(), id, current.status, next, payload.table_id)
        .await?
    {
        Some(updated) => {
            tracing::info!(
                id,
                from = %current.status,
                to = %next,
                table_id = ?updated.table_id,
                "Reservation updated"
            );
            Ok(Json(updated))
        }
        None => {
            let now = reservation::find_by_id(state.pool(), id)
                .await?
                .ok_or_else(|| not_found(id))?;
            if payload.status.is_some() {
                now.status.transition(next)?;
            }
            Err(AppError::with_message(
                ErrorCode::InvalidReservationTransition,
                format!("Reservation {id} changed concurrently, retry"),
            )
            .with_detail("from", now.status.as_str())
            .with_detail("to", next.as_str()))
        }
    }
}
