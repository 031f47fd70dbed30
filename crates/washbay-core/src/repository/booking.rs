//! Booking repository trait definition.

use washbay_types::booking::{Booking, BookingId, BookingStatus};
use washbay_types::customer::CustomerId;
use washbay_types::error::RepositoryError;

use super::SortOrder;

/// Filter criteria for listing bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Only bookings made by this customer.
    pub customer_id: Option<CustomerId>,
    /// Filter by lifecycle status.
    pub status: Option<BookingStatus>,
    /// Direction of the `scheduled_at` ordering.
    pub sort_order: Option<SortOrder>,
    /// Maximum number of results.
    pub limit: Option<i64>,
    /// Number of results to skip (offset pagination).
    pub offset: Option<i64>,
}

/// Repository trait for booking persistence.
///
/// Implementations live in washbay-infra (e.g., SqliteBookingRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking. Returns the stored booking.
    ///
    /// Fails with `RepositoryError::Conflict` when storage rejects a second
    /// live booking for the same service and start time.
    fn create(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<Booking, RepositoryError>> + Send;

    /// Get a booking by its unique ID.
    fn get_by_id(
        &self,
        id: &BookingId,
    ) -> impl std::future::Future<Output = Result<Option<Booking>, RepositoryError>> + Send;

    /// List bookings with optional filtering, sorting, and pagination.
    fn list(
        &self,
        filter: Option<BookingFilter>,
    ) -> impl std::future::Future<Output = Result<Vec<Booking>, RepositoryError>> + Send;

    /// Update an existing booking. Returns the updated booking.
    fn update(
        &self,
        booking: &Booking,
    ) -> impl std::future::Future<Output = Result<Booking, RepositoryError>> + Send;
}
