//! Unified error codes for the restaurant service
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Menu errors
//! - 4xxx: Order errors
//! - 5xxx: Reservation errors
//! - 6xxx: Review errors
//! - 7xxx: Table errors
//! - 8xxx: Upload errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the browser client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,
    /// Date range start is after its end
    InvalidRange = 9,

    // ==================== 1xxx: Auth ====================
    /// No bearer token presented
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// New password is too short
    PasswordTooShort = 1005,

    // ==================== 2xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 2001,
    /// Price is negative or not a finite number
    InvalidPrice = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Client-supplied total does not match the item lines
    OrderTotalMismatch = 4003,
    /// Status change not allowed from the current order status
    InvalidOrderTransition = 4004,
    /// Item quantity must be positive
    InvalidQuantity = 4005,

    // ==================== 5xxx: Reservation ====================
    /// Reservation not found
    ReservationNotFound = 5001,
    /// Guest count outside 1..=10
    InvalidGuestCount = 5002,
    /// Reservation date lies in the past
    ReservationDateInPast = 5003,
    /// Status change not allowed from the current reservation status
    InvalidReservationTransition = 5004,

    // ==================== 6xxx: Review ====================
    /// Review not found
    ReviewNotFound = 6001,
    /// Review text has fewer words than required
    ReviewTooShort = 6002,
    /// Review text has more words than allowed
    ReviewTooLong = 6003,
    /// Rating outside 1..=5
    RatingOutOfRange = 6004,

    // ==================== 7xxx: Table ====================
    /// Dining table not found
    TableNotFound = 7001,

    // ==================== 8xxx: Upload ====================
    /// File too large
    FileTooLarge = 8001,
    /// Unsupported file format
    UnsupportedFileFormat = 8002,
    /// Invalid/corrupted image file
    InvalidImageFile = 8003,
    /// No file provided in request
    NoFileProvided = 8004,
    /// Empty file provided
    EmptyFile = 8005,
    /// File storage failed
    FileStorageFailed = 8006,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Backing store unreachable or failing
    StorageUnavailable = 9002,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",
            ErrorCode::InvalidRange => "Start date must not be after end date",

            // Auth
            ErrorCode::NotAuthenticated => "Access denied",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::TokenInvalid => "Invalid token",
            ErrorCode::PasswordTooShort => "New password must be at least 6 characters",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::InvalidPrice => "Price must be a non-negative number",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderTotalMismatch => "Order total does not match its items",
            ErrorCode::InvalidOrderTransition => "Order status change is not allowed",
            ErrorCode::InvalidQuantity => "Item quantity must be greater than zero",

            // Reservation
            ErrorCode::ReservationNotFound => "Reservation not found",
            ErrorCode::InvalidGuestCount => "Guests must be between 1 and 10",
            ErrorCode::ReservationDateInPast => "Reservation date must not be in the past",
            ErrorCode::InvalidReservationTransition => "Reservation status change is not allowed",

            // Review
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::ReviewTooShort => "Review must contain at least 10 words",
            ErrorCode::ReviewTooLong => "Review must contain at most 200 words",
            ErrorCode::RatingOutOfRange => "Rating must be between 1 and 5",

            // Table
            ErrorCode::TableNotFound => "Table not found",

            // Upload
            ErrorCode::FileTooLarge => "File is too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file uploaded",
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::FileStorageFailed => "Upload failed",

            // System
            ErrorCode::InternalError => "Server error",
            ErrorCode::StorageUnavailable => "Storage is unavailable",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when a u16 value does not map to a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),
            9 => Ok(ErrorCode::InvalidRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),
            1005 => Ok(ErrorCode::PasswordTooShort),

            // Menu
            2001 => Ok(ErrorCode::MenuItemNotFound),
            2002 => Ok(ErrorCode::InvalidPrice),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderTotalMismatch),
            4004 => Ok(ErrorCode::InvalidOrderTransition),
            4005 => Ok(ErrorCode::InvalidQuantity),

            // Reservation
            5001 => Ok(ErrorCode::ReservationNotFound),
            5002 => Ok(ErrorCode::InvalidGuestCount),
            5003 => Ok(ErrorCode::ReservationDateInPast),
            5004 => Ok(ErrorCode::InvalidReservationTransition),

            // Review
            6001 => Ok(ErrorCode::ReviewNotFound),
            6002 => Ok(ErrorCode::ReviewTooShort),
            6003 => Ok(ErrorCode::ReviewTooLong),
            6004 => Ok(ErrorCode::RatingOutOfRange),

            // Table
            7001 => Ok(ErrorCode::TableNotFound),

            // Upload
            8001 => Ok(ErrorCode::FileTooLarge),
            8002 => Ok(ErrorCode::UnsupportedFileFormat),
            8003 => Ok(ErrorCode::InvalidImageFile),
            8004 => Ok(ErrorCode::NoFileProvided),
            8005 => Ok(ErrorCode::EmptyFile),
            8006 => Ok(ErrorCode::FileStorageFailed),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::StorageUnavailable),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
