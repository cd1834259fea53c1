//! Review API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/reviews | GET, POST | none |
//! | /api/admin/reviews | GET | admin |
//! | /api/reviews/{id} | PUT, DELETE | admin |

mod form;
mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/reviews", get(handler::list_approved).post(handler::create))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/reviews", get(handler::list_all))
        .route(
            "/api/reviews/{id}",
            put(handler::set_approval).delete(handler::delete),
        )
}
