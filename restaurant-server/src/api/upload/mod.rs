//! Image upload API (admin)

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/upload", post(handler::upload))
}
