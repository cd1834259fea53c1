//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code:
/// - 0xxx: General errors
/// - 1xxx: Authentication errors
/// - 2xxx: Menu errors
/// - 4xxx: Order errors
/// - 5xxx: Reservation errors
/// - 6xxx: Review errors
/// - 7xxx: Table errors
/// - 8xxx: Upload errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Authentication errors (1xxx)
    Auth,
    /// Menu errors (2xxx)
    Menu,
    /// Order errors (4xxx)
    Order,
    /// Reservation errors (5xxx)
    Reservation,
    /// Review errors (6xxx)
    Review,
    /// Table errors (7xxx)
    Table,
    /// Upload errors (8xxx)
    Upload,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Auth,
            2000..3000 => Self::Menu,
            4000..5000 => Self::Order,
            5000..6000 => Self::Reservation,
            6000..7000 => Self::Review,
            7000..8000 => Self::Table,
            8000..9000 => Self::Upload,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}
