//! AvailabilityChecker trait for time-slot checks.
//!
//! The booking workflow asks this collaborator whether a service can start at
//! a given time. Exclusivity against concurrent requests is the
//! implementation's (and ultimately storage's) responsibility. The
//! `ScheduleAvailability` adapter lives in washbay-infra.

use chrono::{DateTime, Utc};
use washbay_types::error::RepositoryError;
use washbay_types::service::ServiceId;

pub trait AvailabilityChecker: Send + Sync {
    /// Whether `service_id` can be scheduled to start at `scheduled_at`.
    fn is_available(
        &self,
        service_id: &ServiceId,
        scheduled_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<bool, RepositoryError>> + Send;
}
