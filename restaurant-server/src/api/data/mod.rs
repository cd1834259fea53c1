//! Data management API (admin)
//!
//! | Path | Method | Meaning |
//! |------|--------|---------|
//! | /api/admin/raw-data | GET | every collection plus counts |
//! | /api/admin/data-info | GET | counts, database location, backups |
//! | /api/admin/backup | POST | write a JSON snapshot under `DATA_DIR/backups` |
//! | /api/admin/clear-all | POST | delete all business records |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn admin_router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/raw-data", get(handler::raw_data))
        .route("/api/admin/data-info", get(handler::data_info))
        .route("/api/admin/backup", post(handler::backup))
        .route("/api/admin/clear-all", post(handler::clear_all))
}
