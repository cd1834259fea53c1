//! Restaurant Server - ordering, reservations and reviews for a single restaurant
//!
//! Public visitors browse the menu, place cash-on-delivery orders, reserve
//! tables and submit reviews. A single admin account moves orders and
//! reservations through their status machines, moderates reviews and reads
//! dashboard aggregates.
//!
//! # Module layout
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # config, state, server bootstrap
//! ├── auth/          # JWT, password hashing, middleware
//! ├── db/            # SQLite pool, migrations, repositories
//! ├── orders/        # money arithmetic
//! ├── services/      # image storage
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, validation, time ranges
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
