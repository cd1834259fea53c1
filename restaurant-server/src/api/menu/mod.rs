//! Menu API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu | GET | none |
//! | /api/menu/{id} | GET | none |
//! | /api/menu | POST | admin |
//! | /api/menu/{id} | PUT, DELETE | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/menu", get(handler::list))
        .route("/api/menu/{id}", get(handler::get_by_id))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/menu", post(handler::create))
        .route("/api/menu/{id}", put(handler::update).delete(handler::delete))
}
