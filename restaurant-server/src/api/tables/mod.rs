//! Dining Table API (admin)
//!
//! | Path | Method |
//! |------|--------|
//! | /api/tables | GET, POST |
//! | /api/tables/{id} | PUT, DELETE |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/tables", get(handler::list).post(handler::create))
        .route("/api/tables/{id}", put(handler::update).delete(handler::delete))
}
