//! Booking handlers for the REST API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use washbay_core::repository::booking::BookingFilter;
use washbay_core::repository::SortOrder;
use washbay_types::booking::{Booking, BookingConfirmation, BookingId, BookingStatus, CreateBookingRequest};
use washbay_types::customer::CustomerId;
use washbay_types::error::BookingError;

use crate::http::error::AppError;
use crate::http::extractors::query::BookingListQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// Body for `PUT /bookings/{id}/status`.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: BookingStatus,
}

fn parse_booking_id(raw: &str) -> Result<BookingId, AppError> {
    raw.parse()
        .map_err(|_| AppError::Booking(BookingError::NotFound))
}

/// POST /api/v1/bookings - Book a wash.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(body): Json<CreateBookingRequest>,
) -> Result<(StatusCode, ApiResponse<BookingConfirmation>), AppError> {
    let timer = RequestTimer::start();

    let confirmation = state.booking_service.create_booking(body).await?;
    let booking_id = confirmation.booking.id.clone();

    let resp = timer
        .finish(confirmation)
        .with_link("self", &format!("/api/v1/bookings/{booking_id}"))
        .with_link("status", &format!("/api/v1/bookings/{booking_id}/status"));

    Ok((StatusCode::CREATED, resp))
}

/// GET /api/v1/bookings - List bookings with filtering and pagination.
pub async fn list_bookings(
    State(state): State<AppState>,
    Query(query): Query<BookingListQuery>,
) -> Result<ApiResponse<Vec<Booking>>, AppError> {
    let timer = RequestTimer::start();

    let customer_id = match &query.customer_id {
        Some(raw) => Some(
            raw.parse::<CustomerId>()
                .map_err(|e| AppError::Validation(format!("invalid customer_id: {e}")))?,
        ),
        None => None,
    };

    let status = match &query.status {
        Some(s) => Some(s.parse::<BookingStatus>().map_err(AppError::Validation)?),
        None => None,
    };

    let sort_order = match query.order.to_lowercase().as_str() {
        "asc" => SortOrder::Asc,
        _ => SortOrder::Desc,
    };

    let filter = BookingFilter {
        customer_id,
        status,
        sort_order: Some(sort_order),
        limit: query.limit,
        offset: query.offset,
    };

    let bookings = state.booking_service.list_bookings(Some(filter)).await?;
    Ok(timer.finish(bookings).with_link("self", "/api/v1/bookings"))
}

/// GET /api/v1/bookings/{id} - Get a booking by ID.
pub async fn get_booking(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Booking>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_booking_id(&id)?;

    let booking = state.booking_service.get_booking(&id).await?;
    let customer_link = format!("/api/v1/customers/{}", booking.customer_id);
    let service_link = format!("/api/v1/services/{}", booking.service_id);

    Ok(timer
        .finish(booking)
        .with_link("self", &format!("/api/v1/bookings/{id}"))
        .with_link("customer", &customer_link)
        .with_link("service", &service_link))
}

/// PUT /api/v1/bookings/{id}/status - Move a booking through its lifecycle.
pub async fn update_booking_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusUpdate>,
) -> Result<ApiResponse<Booking>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_booking_id(&id)?;

    let booking = state.booking_service.transition_status(&id, body.status).await?;
    Ok(timer
        .finish(booking)
        .with_link("self", &format!("/api/v1/bookings/{id}")))
}
