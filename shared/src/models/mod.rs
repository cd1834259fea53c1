//! Data models
//!
//! Shared between the server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are snowflake `i64`, all timestamps are Unix milliseconds.

pub mod admin_user;
pub mod dining_table;
pub mod menu_item;
pub mod order;
pub mod reservation;
pub mod review;
pub mod stats;

// Re-exports
pub use admin_user::*;
pub use dining_table::*;
pub use menu_item::*;
pub use order::*;
pub use reservation::*;
pub use review::*;
pub use stats::*;
