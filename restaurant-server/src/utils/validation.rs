//! Input validation helpers
//!
//! Centralized text length constants and the business rules every write is
//! checked against before it reaches the database. Each failure names the
//! offending field in `details.field`.

use shared::models::{
    MAX_GUESTS, MAX_RATING, MAX_REVIEW_WORDS, MIN_GUESTS, MIN_RATING, MIN_REVIEW_WORDS,
};
use shared::util::word_count;

use crate::utils::{AppError, AppResult, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: customer, menu item, category, table location
pub const MAX_NAME_LEN: usize = 200;

/// Notes and descriptions (special requests, menu description)
pub const MAX_NOTE_LEN: usize = 2000;

/// Review bodies: 200 words of up to 100 bytes each
pub const MAX_REVIEW_LEN: usize = 20_000;

/// Short identifiers: phone, time of day
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

/// Minimum length of a new admin password
pub const MIN_PASSWORD_LEN: usize = 6;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Numeric limits ──────────────────────────────────────────────────

/// Maximum allowed price per menu item
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Largest table the floor plan knows about
pub const MAX_TABLE_CAPACITY: i64 = 20;

/// Listing page size bounds
pub const DEFAULT_LIST_LIMIT: i64 = 100;
pub const MAX_LIST_LIMIT: i64 = 100;

// ── Generic helpers ─────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    if value.len() > max_len {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({} chars, max {max_len})", value.len()),
        )
        .for_field(field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(value: &Option<String>, field: &str, max_len: usize) -> AppResult<()> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({} chars, max {max_len})", v.len()),
        )
        .for_field(field));
    }
    Ok(())
}

/// Blank optional strings are stored as NULL
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Resolve a listing `limit` query parameter
pub fn resolve_limit(limit: Option<i64>) -> AppResult<i64> {
    match limit {
        None => Ok(DEFAULT_LIST_LIMIT),
        Some(n) if (1..=MAX_LIST_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("limit must be between 1 and {MAX_LIST_LIMIT}, got {n}"),
        )
        .for_field("limit")),
    }
}

// ── Domain rules ────────────────────────────────────────────────────

/// Price must be finite, non-negative and below the sanity ceiling
pub fn validate_price(price: f64, field: &str) -> AppResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{field} must be a non-negative number, got {price}"),
        )
        .for_field(field));
    }
    if price > MAX_PRICE {
        return Err(AppError::with_message(
            ErrorCode::InvalidPrice,
            format!("{field} exceeds maximum allowed ({MAX_PRICE}), got {price}"),
        )
        .for_field(field));
    }
    Ok(())
}

/// Review text must contain between 10 and 200 words
pub fn validate_review_text(text: &str) -> AppResult<()> {
    let words = word_count(text);
    if words == 0 {
        return Err(AppError::required("reviewText"));
    }
    if words < MIN_REVIEW_WORDS {
        return Err(AppError::with_message(
            ErrorCode::ReviewTooShort,
            format!("Review must contain at least {MIN_REVIEW_WORDS} words, got {words}"),
        )
        .for_field("reviewText")
        .with_detail("words", words));
    }
    if words > MAX_REVIEW_WORDS {
        return Err(AppError::with_message(
            ErrorCode::ReviewTooLong,
            format!("Review must contain at most {MAX_REVIEW_WORDS} words, got {words}"),
        )
        .for_field("reviewText")
        .with_detail("words", words));
    }
    validate_required_text(text, "reviewText", MAX_REVIEW_LEN)
}

/// Rating must be an integer in 1..=5, never clamped
pub fn validate_rating(rating: i64) -> AppResult<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(AppError::with_message(
            ErrorCode::RatingOutOfRange,
            format!("Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"),
        )
        .for_field("rating"));
    }
    Ok(())
}

/// Party size must be in 1..=10
pub fn validate_guests(guests: i64) -> AppResult<()> {
    if !(MIN_GUESTS..=MAX_GUESTS).contains(&guests) {
        return Err(AppError::with_message(
            ErrorCode::InvalidGuestCount,
            format!("Guests must be between {MIN_GUESTS} and {MAX_GUESTS}, got {guests}"),
        )
        .for_field("guests"));
    }
    Ok(())
}

/// New admin password length check
pub fn validate_new_password(password: &str) -> AppResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).for_field("newPassword"));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("newPassword is too long (max {MAX_PASSWORD_LEN})"),
        )
        .for_field("newPassword"));
    }
    Ok(())
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
pub fn validate_email(email: &str, field: &str) -> AppResult<()> {
    if email.len() > MAX_EMAIL_LEN {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} is too long ({} chars, max {MAX_EMAIL_LEN})", email.len()),
        )
        .for_field(field));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid email address: {email}"),
        )
        .for_field(field));
    }
    Ok(())
}

/// Table number must be positive
pub fn validate_table_number(table_number: i64) -> AppResult<()> {
    if table_number <= 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("tableNumber must be greater than 0, got {table_number}"),
        )
        .for_field("tableNumber"));
    }
    Ok(())
}

/// Table capacity must be in 1..=20
pub fn validate_capacity(capacity: i64) -> AppResult<()> {
    if !(1..=MAX_TABLE_CAPACITY).contains(&capacity) {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("capacity must be between 1 and {MAX_TABLE_CAPACITY}, got {capacity}"),
        )
        .for_field("capacity"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        vec!["tasty"; n].join(" ")
    }

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Asha", "customerName", MAX_NAME_LEN).is_ok());

        let err = validate_required_text("   ", "customerName", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.details.unwrap().get("field").unwrap(), "customerName");

        let err = validate_required_text(&"x".repeat(201), "customerName", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_review_word_bounds() {
        assert!(validate_review_text(&words(10)).is_ok());
        assert!(validate_review_text(&words(200)).is_ok());

        let err = validate_review_text(&words(9)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReviewTooShort);

        let err = validate_review_text(&words(201)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReviewTooLong);

        let err = validate_review_text(" \n ").unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
    }

    #[test]
    fn test_long_words_within_word_range_are_accepted() {
        let word = "extraordinarily-fragrant-saffron-biryani";
        let text = vec![word; 150].join(" ");
        assert!(text.len() > 6000);
        assert!(validate_review_text(&text).is_ok());

        let err = validate_review_text(&vec!["x".repeat(150); 150].join(" ")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[test]
    fn test_review_words_split_on_any_whitespace() {
        let text = "  great\tfood \n friendly   staff and quick service, will come back  ";
        assert!(validate_review_text(text).is_ok());
    }

    #[test]
    fn test_rating_is_not_clamped() {
        for rating in 1..=5 {
            assert!(validate_rating(rating).is_ok());
        }
        assert_eq!(validate_rating(0).unwrap_err().code, ErrorCode::RatingOutOfRange);
        assert_eq!(validate_rating(6).unwrap_err().code, ErrorCode::RatingOutOfRange);
    }

    #[test]
    fn test_guest_bounds() {
        assert!(validate_guests(1).is_ok());
        assert!(validate_guests(10).is_ok());
        assert_eq!(validate_guests(0).unwrap_err().code, ErrorCode::InvalidGuestCount);
        assert_eq!(validate_guests(11).unwrap_err().code, ErrorCode::InvalidGuestCount);
    }

    #[test]
    fn test_price() {
        assert!(validate_price(0.0, "price").is_ok());
        assert!(validate_price(12.5, "price").is_ok());
        assert_eq!(validate_price(-1.0, "price").unwrap_err().code, ErrorCode::InvalidPrice);
        assert_eq!(validate_price(f64::NAN, "price").unwrap_err().code, ErrorCode::InvalidPrice);
        assert_eq!(
            validate_price(f64::INFINITY, "price").unwrap_err().code,
            ErrorCode::InvalidPrice
        );
    }

    #[test]
    fn test_new_password() {
        assert!(validate_new_password("secret").is_ok());
        assert_eq!(
            validate_new_password("12345").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
    }

    #[test]
    fn test_limit() {
        assert_eq!(resolve_limit(None).unwrap(), DEFAULT_LIST_LIMIT);
        assert_eq!(resolve_limit(Some(5)).unwrap(), 5);
        assert!(resolve_limit(Some(0)).is_err());
        assert!(resolve_limit(Some(101)).is_err());
    }

    #[test]
    fn test_table_rules() {
        assert!(validate_table_number(1).is_ok());
        assert!(validate_table_number(0).is_err());
        assert!(validate_capacity(20).is_ok());
        assert!(validate_capacity(21).is_err());
        assert!(validate_capacity(0).is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("asha@example.com", "customerEmail").is_ok());
        for bad in ["asha", "@example.com", "asha@example", "a@b@c.com", "a b@c.com", "asha@.com"] {
            let err = validate_email(bad, "customerEmail").unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFormat, "{bad}");
        }
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".into())), None);
        assert_eq!(normalize_optional(Some(" a@b.c ".into())), Some("a@b.c".into()));
        assert_eq!(normalize_optional(None), None);
    }
}
