//! Date and time helpers
//!
//! All date-to-timestamp conversion happens in the API layer; repositories
//! only see `i64` Unix millis. The restaurant's calendar is UTC.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use super::{AppError, AppResult, ErrorCode};

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(date: &str, field: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::with_message(
            ErrorCode::InvalidFormat,
            format!("Invalid date format: {date} (expected YYYY-MM-DD)"),
        )
        .for_field(field)
    })
}

/// Parse a time of day (HH:MM, seconds optional)
pub fn parse_time_of_day(time: &str, field: &str) -> AppResult<NaiveTime> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid time format: {time} (expected HH:MM)"),
            )
            .for_field(field)
        })
}

/// Reject dates before today (UTC)
pub fn validate_not_past(date: NaiveDate) -> AppResult<()> {
    let today = Utc::now().date_naive();
    if date < today {
        return Err(AppError::with_message(
            ErrorCode::ReservationDateInPast,
            format!("Reservation date {date} is in the past (today is {today})"),
        )
        .for_field("date"));
    }
    Ok(())
}

/// Start of day (00:00:00.000 UTC) as Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Last millisecond of the day (23:59:59.999 UTC) as Unix millis
pub fn day_end_millis(date: NaiveDate) -> i64 {
    match date.succ_opt() {
        Some(next) => day_start_millis(next) - 1,
        None => i64::MAX,
    }
}

/// Which end of a range a bound is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

/// A date bound: a whole UTC day or an RFC 3339 instant
fn parse_bound(value: &str, field: &str, bound: Bound) -> AppResult<i64> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(match bound {
            Bound::Start => day_start_millis(date),
            Bound::End => day_end_millis(date),
        });
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| {
            AppError::with_message(
                ErrorCode::InvalidFormat,
                format!("Invalid {field}: {value} (expected YYYY-MM-DD or RFC 3339)"),
            )
            .for_field(field)
        })
}

/// Resolve the stats date range into inclusive `[start, end]` millis.
///
/// `None` means all-time. Supplying only one bound is rejected, as is a
/// range whose start lies after its end.
pub fn resolve_range(start: Option<&str>, end: Option<&str>) -> AppResult<Option<(i64, i64)>> {
    let start = start.map(str::trim).filter(|s| !s.is_empty());
    let end = end.map(str::trim).filter(|s| !s.is_empty());

    match (start, end) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(AppError::validation("endDate is required when startDate is set")
            .for_field("endDate")),
        (None, Some(_)) => Err(AppError::validation("startDate is required when endDate is set")
            .for_field("startDate")),
        (Some(start), Some(end)) => {
            let start_ms = parse_bound(start, "startDate", Bound::Start)?;
            let end_ms = parse_bound(end, "endDate", Bound::End)?;
            if start_ms > end_ms {
                return Err(AppError::with_message(
                    ErrorCode::InvalidRange,
                    format!("startDate {start} is after endDate {end}"),
                ));
            }
            Ok(Some((start_ms, end_ms)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-03-01", "date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
        let err = parse_date("01/03/2025", "date").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_parse_time_of_day() {
        assert!(parse_time_of_day("19:30", "time").is_ok());
        assert!(parse_time_of_day("19:30:00", "time").is_ok());
        assert!(parse_time_of_day("7pm", "time").is_err());
        assert!(parse_time_of_day("25:00", "time").is_err());
    }

    #[test]
    fn test_past_dates_rejected() {
        let today = Utc::now().date_naive();
        assert!(validate_not_past(today).is_ok());
        assert!(validate_not_past(today.succ_opt().unwrap()).is_ok());
        let err = validate_not_past(today.pred_opt().unwrap()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ReservationDateInPast);
    }

    #[test]
    fn test_whole_day_range_is_inclusive() {
        let (start, end) = resolve_range(Some("2025-01-01"), Some("2025-01-01"))
            .unwrap()
            .unwrap();
        assert_eq!(start, 1_735_689_600_000);
        assert_eq!(end, 1_735_689_600_000 + 86_400_000 - 1);
    }

    #[test]
    fn test_rfc3339_bounds() {
        let (start, end) = resolve_range(
            Some("2025-01-01T10:00:00Z"),
            Some("2025-01-01T12:00:00+00:00"),
        )
        .unwrap()
        .unwrap();
        assert_eq!(end - start, 2 * 3_600_000);
    }

    #[test]
    fn test_no_bounds_is_all_time() {
        assert!(resolve_range(None, None).unwrap().is_none());
        assert!(resolve_range(Some(""), Some(" ")).unwrap().is_none());
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = resolve_range(Some("2025-02-01"), Some("2025-01-01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRange);
    }

    #[test]
    fn test_single_bound_rejected() {
        let err = resolve_range(Some("2025-02-01"), None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let err = resolve_range(None, Some("2025-02-01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_garbage_bound_rejected() {
        let err = resolve_range(Some("yesterday"), Some("2025-02-01")).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidFormat);
    }
}
