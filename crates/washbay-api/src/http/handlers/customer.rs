//! Customer handlers for the REST API.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use washbay_types::customer::{CreateCustomerRequest, Customer, CustomerId};
use washbay_types::error::CustomerError;

use crate::http::error::AppError;
use crate::http::extractors::query::PageQuery;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// POST /api/v1/customers - Register a customer.
pub async fn create_customer(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, ApiResponse<Customer>), AppError> {
    let timer = RequestTimer::start();

    let customer = state.customer_service.register(body).await?;
    let self_link = format!("/api/v1/customers/{}", customer.id);
    let bookings_link = format!("/api/v1/bookings?customer_id={}", customer.id);

    Ok((
        StatusCode::CREATED,
        timer
            .finish(customer)
            .with_link("self", &self_link)
            .with_link("bookings", &bookings_link),
    ))
}

/// GET /api/v1/customers - List customers, newest first.
pub async fn list_customers(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> Result<ApiResponse<Vec<Customer>>, AppError> {
    let timer = RequestTimer::start();
    let customers = state
        .customer_service
        .list_customers(page.limit, page.offset)
        .await?;
    Ok(timer.finish(customers).with_link("self", "/api/v1/customers"))
}

/// GET /api/v1/customers/{id} - Get a customer by ID.
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<Customer>, AppError> {
    let timer = RequestTimer::start();
    let id: CustomerId = id
        .parse()
        .map_err(|_| AppError::Customer(CustomerError::NotFound))?;

    let customer = state.customer_service.get_customer(&id).await?;
    Ok(timer
        .finish(customer)
        .with_link("self", &format!("/api/v1/customers/{id}"))
        .with_link("bookings", &format!("/api/v1/bookings?customer_id={id}")))
}
