//! Dashboard statistics handler

use axum::{Json, extract::State};

use shared::models::{DashboardStats, StatsQuery};

use crate::api::extract::ValidQuery;
use crate::core::ServerState;
use crate::db::repository::{ALL_TIME, stats};
use crate::orders::money;
use crate::utils::AppResult;
use crate::utils::time::resolve_range;

/// GET /api/admin/stats?startDate=&endDate=
///
/// Order and review figures cover the inclusive range (all-time without
/// bounds). Status breakdowns and pending reviews are always unfiltered.
pub async fn dashboard(
    State(state): State<ServerState>,
    ValidQuery(query): ValidQuery<StatsQuery>,
) -> AppResult<Json<DashboardStats>> {
    let range = resolve_range(query.start_date.as_deref(), query.end_date.as_deref())?;
    let bounds = range.unwrap_or(ALL_TIME);
    let pool = state.pool();

    let (order_count, revenue) = stats::order_totals(pool, bounds).await?;
    let (review_count, average_rating) = stats::review_totals(pool, bounds).await?;

    Ok(Json(DashboardStats {
        range_start: range.map(|(start, _)| start),
        range_end: range.map(|(_, end)| end),
        order_count,
        revenue: money::to_f64(money::to_decimal(revenue)),
        review_count,
        average_rating: average_rating.unwrap_or(0.0),
        orders_by_status: stats::orders_by_status(pool).await?,
        reservations_by_status: stats::reservations_by_status(pool).await?,
        pending_reviews: stats::pending_reviews(pool).await?,
    }))
}
