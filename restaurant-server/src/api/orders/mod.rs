//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | none |
//! | /api/orders | GET | admin |
//! | /api/orders/{id} | GET, PUT | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(handler::create))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/orders", get(handler::list))
        .route(
            "/api/orders/{id}",
            get(handler::get_by_id).put(handler::update_status),
        )
}
