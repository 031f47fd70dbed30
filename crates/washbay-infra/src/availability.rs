//! Schedule-based slot availability backed by SQLite.
//!
//! A start time is available for a service when the service exists, the
//! start respects the minimum lead time, the whole wash fits inside opening
//! hours (UTC) and no live booking of the same service overlaps it.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use washbay_core::service::availability::AvailabilityChecker;
use washbay_types::booking::window_end;
use washbay_types::config::ScheduleConfig;
use washbay_types::error::RepositoryError;
use washbay_types::service::ServiceId;

use crate::sqlite::pool::{map_read_error, DatabasePool};
use crate::sqlite::format_slot;

/// `AvailabilityChecker` that consults opening hours and existing bookings.
pub struct ScheduleAvailability {
    pool: DatabasePool,
    schedule: ScheduleConfig,
}

impl ScheduleAvailability {
    pub fn new(pool: DatabasePool, schedule: ScheduleConfig) -> Self {
        Self { pool, schedule }
    }

    /// Availability as seen at `now`.
    pub async fn check_at(
        &self,
        service_id: &ServiceId,
        scheduled_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        let duration: Option<(i64,)> =
            sqlx::query_as("SELECT duration_minutes FROM services WHERE id = ?")
                .bind(service_id.to_string())
                .fetch_optional(&self.pool.reader)
                .await
                .map_err(map_read_error)?;

        let Some((duration_minutes,)) = duration else {
            tracing::debug!(%service_id, "slot check: unknown service");
            return Ok(false);
        };

        let earliest = Duration::try_minutes(self.schedule.min_lead_minutes)
            .and_then(|lead| now.checked_add_signed(lead));
        if earliest.is_none_or(|earliest| scheduled_at < earliest) {
            tracing::debug!(%service_id, %scheduled_at, "slot check: inside lead time");
            return Ok(false);
        }

        let Some(ends_at) = u32::try_from(duration_minutes)
            .ok()
            .and_then(|minutes| window_end(scheduled_at, minutes))
        else {
            tracing::debug!(%service_id, %scheduled_at, "slot check: window out of range");
            return Ok(false);
        };

        if !self.within_opening_hours(scheduled_at, ends_at) {
            tracing::debug!(%service_id, %scheduled_at, %ends_at, "slot check: outside opening hours");
            return Ok(false);
        }

        let (overlapping,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM bookings
             WHERE service_id = ? AND status != 'cancelled' AND scheduled_at < ? AND ends_at > ?",
        )
        .bind(service_id.to_string())
        .bind(format_slot(&ends_at))
        .bind(format_slot(&scheduled_at))
        .fetch_one(&self.pool.reader)
        .await
        .map_err(map_read_error)?;

        if overlapping > 0 {
            tracing::debug!(%service_id, %scheduled_at, overlapping, "slot check: overlaps existing booking");
            return Ok(false);
        }

        Ok(true)
    }

    /// `[scheduled_at, ends_at)` must sit within one day's opening window.
    fn within_opening_hours(&self, scheduled_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> bool {
        let day_start = scheduled_at
            .date_naive()
            .and_time(NaiveTime::MIN)
            .and_utc();
        let opens = day_start + Duration::hours(i64::from(self.schedule.opening_hour));
        let closes = day_start + Duration::hours(i64::from(self.schedule.closing_hour));

        scheduled_at >= opens && ends_at <= closes
    }
}

impl AvailabilityChecker for ScheduleAvailability {
    async fn is_available(
        &self,
        service_id: &ServiceId,
        scheduled_at: DateTime<Utc>,
    ) -> Result<bool, RepositoryError> {
        self.check_at(service_id, scheduled_at, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::booking::tests::{make_booking, seed};
    use crate::sqlite::booking::SqliteBookingRepository;
    use crate::sqlite::pool::tests::test_pool;
    use washbay_core::repository::booking::BookingRepository;
    use washbay_types::booking::BookingStatus;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn now() -> DateTime<Utc> {
        at("2030-04-30T12:00:00Z")
    }

    #[tokio::test]
    async fn test_open_slot_is_available() {
        let pool = test_pool().await;
        let (_, service_id) = seed(&pool).await;
        let checker = ScheduleAvailability::new(pool, ScheduleConfig::default());

        assert!(checker
            .check_at(&service_id, at("2030-05-01T09:00:00Z"), now())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unknown_service_is_unavailable() {
        let pool = test_pool().await;
        let checker = ScheduleAvailability::new(pool, ScheduleConfig::default());

        assert!(!checker
            .check_at(&ServiceId::new(), at("2030-05-01T09:00:00Z"), now())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_lead_time_enforced() {
        let pool = test_pool().await;
        let (_, service_id) = seed(&pool).await;
        let checker = ScheduleAvailability::new(pool, ScheduleConfig::default());
        let now = at("2030-05-01T08:30:00Z");

        // 30 minutes of notice with a 60-minute minimum
        assert!(!checker
            .check_at(&service_id, at("2030-05-01T09:00:00Z"), now)
            .await
            .unwrap());
        assert!(checker
            .check_at(&service_id, at("2030-05-01T09:30:00Z"), now)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_opening_hours_enforced() {
        let pool = test_pool().await;
        let (_, service_id) = seed(&pool).await;
        let checker = ScheduleAvailability::new(pool, ScheduleConfig::default());

        // Before opening
        assert!(!checker
            .check_at(&service_id, at("2030-05-01T07:59:00Z"), now())
            .await
            .unwrap());
        // 45-minute wash must end by 18:00
        assert!(checker
            .check_at(&service_id, at("2030-05-01T17:15:00Z"), now())
            .await
            .unwrap());
        assert!(!checker
            .check_at(&service_id, at("2030-05-01T17:16:00Z"), now())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_far_future_start_is_unavailable() {
        let pool = test_pool().await;
        let (_, service_id) = seed(&pool).await;
        let checker = ScheduleAvailability::new(pool, ScheduleConfig::default());

        assert!(!checker
            .check_at(&service_id, at("+262142-12-31T23:30:00Z"), now())
            .await
            .unwrap());
        // Window would end in year 10000
        assert!(!checker
            .check_at(&service_id, at("9999-12-31T23:30:00Z"), now())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_unrepresentable_lead_time_is_unavailable() {
        let pool = test_pool().await;
        let (_, service_id) = seed(&pool).await;
        let schedule = ScheduleConfig {
            min_lead_minutes: i64::MAX,
            ..ScheduleConfig::default()
        };
        let checker = ScheduleAvailability::new(pool, schedule);

        assert!(!checker
            .check_at(&service_id, at("2030-05-01T09:00:00Z"), now())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_overlap_with_live_booking() {
        let pool = test_pool().await;
        let (customer_id, service_id) = seed(&pool).await;
        let (_, other_service) = seed(&pool).await;
        let bookings = SqliteBookingRepository::new(pool.clone());
        let checker = ScheduleAvailability::new(pool, ScheduleConfig::default());

        // Occupies 10:00-10:45
        let booking = make_booking(&customer_id, &service_id, at("2030-05-01T10:00:00Z"));
        bookings.create(&booking).await.unwrap();

        for taken in ["2030-05-01T09:30:00Z", "2030-05-01T10:00:00Z", "2030-05-01T10:44:00Z"] {
            assert!(
                !checker.check_at(&service_id, at(taken), now()).await.unwrap(),
                "{taken} should overlap"
            );
        }
        for free in ["2030-05-01T09:15:00Z", "2030-05-01T10:45:00Z"] {
            assert!(
                checker.check_at(&service_id, at(free), now()).await.unwrap(),
                "{free} should be free"
            );
        }

        // Other services are unaffected
        assert!(checker
            .check_at(&other_service, at("2030-05-01T10:00:00Z"), now())
            .await
            .unwrap());

        // Cancelling frees the window
        let mut cancelled = booking.clone();
        cancelled.status = BookingStatus::Cancelled;
        bookings.update(&cancelled).await.unwrap();
        assert!(checker
            .check_at(&service_id, at("2030-05-01T10:00:00Z"), now())
            .await
            .unwrap());
    }
}
