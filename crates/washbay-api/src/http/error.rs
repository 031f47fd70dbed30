//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use washbay_types::error::{
    BookingError, CatalogError, CustomerError, PricingError, RepositoryError,
};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Booking workflow and lifecycle errors.
    Booking(BookingError),
    /// Service catalog errors.
    Catalog(CatalogError),
    /// Customer registry errors.
    Customer(CustomerError),
    /// Malformed path or query input.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::Booking(e)
    }
}

impl From<CatalogError> for AppError {
    fn from(e: CatalogError) -> Self {
        AppError::Catalog(e)
    }
}

impl From<CustomerError> for AppError {
    fn from(e: CustomerError) -> Self {
        AppError::Customer(e)
    }
}

impl From<RepositoryError> for AppError {
    fn from(e: RepositoryError) -> Self {
        AppError::Booking(BookingError::Repository(e))
    }
}

fn repository_status(e: &RepositoryError) -> (StatusCode, &'static str) {
    match e {
        RepositoryError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
        RepositoryError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        RepositoryError::Connection => (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_UNAVAILABLE"),
        RepositoryError::Query(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR"),
    }
}

impl AppError {
    /// HTTP status and machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Booking(e) => match e {
                BookingError::CustomerNotFound => (StatusCode::NOT_FOUND, "CUSTOMER_NOT_FOUND"),
                BookingError::ServiceNotAvailable => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "SERVICE_NOT_AVAILABLE")
                }
                BookingError::SlotUnavailable => (StatusCode::CONFLICT, "SLOT_UNAVAILABLE"),
                BookingError::NotFound => (StatusCode::NOT_FOUND, "BOOKING_NOT_FOUND"),
                BookingError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_TRANSITION")
                }
                BookingError::Repository(e) => repository_status(e),
                BookingError::Pricing(PricingError::InvalidBasePrice) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "PRICING_ERROR")
                }
                BookingError::Pricing(PricingError::Unavailable(_)) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "PRICING_UNAVAILABLE")
                }
            },
            AppError::Catalog(e) => match e {
                CatalogError::NotFound => (StatusCode::NOT_FOUND, "SERVICE_NOT_FOUND"),
                CatalogError::Invalid(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                CatalogError::Repository(e) => repository_status(e),
            },
            AppError::Customer(e) => match e {
                CustomerError::NotFound => (StatusCode::NOT_FOUND, "CUSTOMER_NOT_FOUND"),
                CustomerError::Invalid(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                CustomerError::EmailTaken(_) => (StatusCode::CONFLICT, "EMAIL_TAKEN"),
                CustomerError::Repository(e) => repository_status(e),
            },
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    pub(crate) fn message(&self) -> String {
        match self {
            AppError::Booking(e) => e.to_string(),
            AppError::Catalog(e) => e.to_string(),
            AppError::Customer(e) => e.to_string(),
            AppError::Validation(msg) | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!(code, %message, "request failed");
        } else {
            tracing::debug!(code, %message, "request rejected");
        }

        let body = ApiResponse::error(code, &message, uuid::Uuid::now_v7().to_string(), 0);
        (status, body).into_response()
    }
}
