//! Admin session API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/admin/login | POST | none |
//! | /api/admin/me | GET | admin |
//! | /api/admin/change-password | POST | admin |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/login", post(handler::login))
}

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/me", get(handler::me))
        .route("/api/admin/change-password", post(handler::change_password))
}
