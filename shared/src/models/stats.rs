//! Dashboard statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stats query parameters
///
/// Both bounds or neither: `YYYY-MM-DD` (whole UTC days) or RFC 3339 instants.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Aggregates for the admin dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Inclusive range start, Unix millis (absent for all-time)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_start: Option<i64>,
    /// Inclusive range end, Unix millis (absent for all-time)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range_end: Option<i64>,
    pub order_count: i64,
    /// Sum of non-cancelled order totals in range
    pub revenue: f64,
    pub review_count: i64,
    /// 0 when no review falls in range
    pub average_rating: f64,
    /// Unfiltered counts per order status
    pub orders_by_status: BTreeMap<String, i64>,
    /// Unfiltered counts per reservation status
    pub reservations_by_status: BTreeMap<String, i64>,
    /// Reviews awaiting moderation
    pub pending_reviews: i64,
}
