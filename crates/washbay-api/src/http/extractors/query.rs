//! Query parameter extractors for list endpoints.

use serde::Deserialize;

/// Query parameters for the booking list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct BookingListQuery {
    /// Only bookings for this customer ID.
    pub customer_id: Option<String>,
    /// Filter by status (pending, confirmed, in_progress, completed, cancelled).
    pub status: Option<String>,
    /// Sort order on the scheduled time (asc, desc).
    #[serde(default = "default_order")]
    pub order: String,
    /// Maximum results.
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

/// Query parameters for the service list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct ServiceListQuery {
    /// Only services that can currently be booked.
    #[serde(default)]
    pub active_only: bool,
}

/// Plain limit/offset pagination.
#[derive(Debug, Deserialize, Default)]
pub struct PageQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn default_order() -> String {
    "desc".to_string()
}
