//! Dashboard statistics endpoint.
//!
//! GET /api/v1/stats - Booking counts per status and completed revenue.

use std::collections::BTreeMap;

use axum::extract::State;
use rust_decimal::Decimal;
use serde::Serialize;

use washbay_types::booking::BookingStatus;

use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Aggregate numbers for the operator dashboard.
#[derive(Debug, Serialize)]
pub struct Stats {
    pub total_bookings: i64,
    /// Count per status; every status is present, zero if unused.
    pub bookings_by_status: BTreeMap<String, i64>,
    /// Sum of prices over completed bookings.
    pub completed_revenue: Decimal,
    pub total_customers: i64,
    pub active_services: i64,
}

/// Gather stats straight from the repositories and pool.
pub async fn collect_stats(state: &AppState) -> Result<Stats, AppError> {
    let repo = state.booking_service.booking_repo();

    let mut bookings_by_status: BTreeMap<String, i64> = BookingStatus::ALL
        .iter()
        .map(|s| (s.to_string(), 0))
        .collect();
    for (status, count) in repo.count_by_status().await? {
        bookings_by_status.insert(status.to_string(), count);
    }
    let total_bookings = bookings_by_status.values().sum();

    let completed_revenue = repo.completed_revenue().await?;
    let total_customers = state.customer_service.customer_repo().count().await?;

    let (active_services,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM services WHERE is_active = 1")
            .fetch_one(&state.db_pool.reader)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to query service stats: {e}")))?;

    Ok(Stats {
        total_bookings,
        bookings_by_status,
        completed_revenue,
        total_customers,
        active_services,
    })
}

/// GET /api/v1/stats - Aggregate dashboard statistics.
pub async fn get_stats(State(state): State<AppState>) -> Result<ApiResponse<Stats>, AppError> {
    let timer = RequestTimer::start();
    let stats = collect_stats(&state).await?;

    Ok(timer
        .finish(stats)
        .with_link("self", "/api/v1/stats")
        .with_link("bookings", "/api/v1/bookings"))
}
