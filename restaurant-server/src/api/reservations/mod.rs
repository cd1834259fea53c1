//! Reservation API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/reservations | POST | none |
//! | /api/reservations | GET | admin |
//! | /api/reservations/{id} | GET, PUT | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/reservations", post(handler::create))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/reservations", get(handler::list))
        .route(
            "/api/reservations/{id}",
            get(handler::get_by_id).put(handler::update),
        )
}
