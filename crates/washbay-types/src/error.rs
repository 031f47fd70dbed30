use thiserror::Error;

use crate::booking::BookingStatus;

/// Errors from the booking workflow and booking lifecycle.
///
/// The first three variants are the workflow's user-facing rejections.
/// Collaborator failures are carried through unchanged.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("customer not found")]
    CustomerNotFound,

    #[error("service not available")]
    ServiceNotAvailable,

    #[error("time slot not available")]
    SlotUnavailable,

    #[error("booking not found")]
    NotFound,

    #[error("cannot move booking from {from} to {to}")]
    InvalidTransition {
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Pricing(#[from] PricingError),
}

/// Errors related to the service catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("service not found")]
    NotFound,

    #[error("invalid service: {0}")]
    Invalid(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors related to customer registration and lookup.
#[derive(Debug, Error)]
pub enum CustomerError {
    #[error("customer not found")]
    NotFound,

    #[error("invalid customer: {0}")]
    Invalid(String),

    #[error("email '{0}' is already registered")]
    EmailTaken(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Errors from a pricing engine.
#[derive(Debug, Error)]
pub enum PricingError {
    #[error("service has no positive base price")]
    InvalidBasePrice,

    #[error("pricing unavailable: {0}")]
    Unavailable(String),
}

/// Errors from repository operations (used by trait definitions in washbay-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_error_messages() {
        assert_eq!(BookingError::CustomerNotFound.to_string(), "customer not found");
        assert_eq!(BookingError::ServiceNotAvailable.to_string(), "service not available");
        assert_eq!(BookingError::SlotUnavailable.to_string(), "time slot not available");
    }

    #[test]
    fn test_repository_error_passes_through() {
        let err: BookingError = RepositoryError::Query("disk I/O error".to_string()).into();
        assert_eq!(err.to_string(), "query error: disk I/O error");
        assert!(matches!(err, BookingError::Repository(RepositoryError::Query(_))));
    }

    #[test]
    fn test_invalid_transition_display() {
        let err = BookingError::InvalidTransition {
            from: BookingStatus::Completed,
            to: BookingStatus::Pending,
        };
        assert_eq!(err.to_string(), "cannot move booking from completed to pending");
    }

    #[test]
    fn test_email_taken_display() {
        let err = CustomerError::EmailTaken("jo@example.com".to_string());
        assert_eq!(err.to_string(), "email 'jo@example.com' is already registered");
    }
}
