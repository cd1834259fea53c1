//! Dashboard statistics API (admin)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new().route("/api/admin/stats", get(handler::dashboard))
}
