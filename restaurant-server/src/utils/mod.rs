//! Utilities
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`ApiResponse`] - API response structure (from shared::error)
//! - logging, input validation and date-range helpers

pub mod logger;
pub mod time;
pub mod validation;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
