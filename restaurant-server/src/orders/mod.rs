//! Order arithmetic
//!
//! Totals are always recomputed on the server from the submitted lines.

pub mod money;

pub use money::{calculate_order_total, validate_order_items, verify_client_total};
