//! SQLite booking repository implementation.
//!
//! Implements `BookingRepository` from `washbay-core`. Vehicle and location
//! are stored as JSON text, prices as decimal text.

use sqlx::Row;
use washbay_core::repository::booking::{BookingFilter, BookingRepository};
use washbay_core::repository::SortOrder;
use washbay_types::booking::{Booking, BookingId, BookingStatus, Location, VehicleInfo};
use washbay_types::customer::CustomerId;
use washbay_types::error::RepositoryError;
use washbay_types::service::ServiceId;

use super::pool::{map_read_error, map_write_error, DatabasePool};
use super::{format_datetime, format_slot, parse_datetime, parse_decimal};

/// SQLite-backed implementation of `BookingRepository`.
pub struct SqliteBookingRepository {
    pool: DatabasePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Number of bookings per status, for dashboards.
    pub async fn count_by_status(&self) -> Result<Vec<(BookingStatus, i64)>, RepositoryError> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM bookings GROUP BY status")
                .fetch_all(&self.pool.reader)
                .await
                .map_err(map_read_error)?;

        rows.into_iter()
            .map(|(status, count)| {
                let status: BookingStatus = status.parse().map_err(RepositoryError::Query)?;
                Ok((status, count))
            })
            .collect()
    }

    /// Sum of prices over completed bookings.
    pub async fn completed_revenue(&self) -> Result<rust_decimal::Decimal, RepositoryError> {
        // Prices are decimal text; sum in Rust to keep exact cents.
        let prices: Vec<(String,)> =
            sqlx::query_as("SELECT price FROM bookings WHERE status = 'completed'")
                .fetch_all(&self.pool.reader)
                .await
                .map_err(map_read_error)?;

        prices
            .iter()
            .try_fold(rust_decimal::Decimal::ZERO, |acc, (price,)| {
                Ok(acc + parse_decimal(price)?)
            })
    }
}

/// Internal row type for mapping SQLite rows to domain Booking.
struct BookingRow {
    id: String,
    customer_id: String,
    service_id: String,
    vehicle: String,
    location: String,
    scheduled_at: String,
    duration_minutes: i64,
    status: String,
    price: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl BookingRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            service_id: row.try_get("service_id")?,
            vehicle: row.try_get("vehicle")?,
            location: row.try_get("location")?,
            scheduled_at: row.try_get("scheduled_at")?,
            duration_minutes: row.try_get("duration_minutes")?,
            status: row.try_get("status")?,
            price: row.try_get("price")?,
            notes: row.try_get("notes")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_booking(self) -> Result<Booking, RepositoryError> {
        let id = self
            .id
            .parse::<BookingId>()
            .map_err(|e| RepositoryError::Query(format!("invalid booking id: {e}")))?;
        let customer_id = self
            .customer_id
            .parse::<CustomerId>()
            .map_err(|e| RepositoryError::Query(format!("invalid customer id: {e}")))?;
        let service_id = self
            .service_id
            .parse::<ServiceId>()
            .map_err(|e| RepositoryError::Query(format!("invalid service id: {e}")))?;

        let vehicle: VehicleInfo = serde_json::from_str(&self.vehicle)
            .map_err(|e| RepositoryError::Query(format!("invalid vehicle JSON: {e}")))?;
        let location: Location = serde_json::from_str(&self.location)
            .map_err(|e| RepositoryError::Query(format!("invalid location JSON: {e}")))?;

        let status: BookingStatus = self.status.parse().map_err(RepositoryError::Query)?;
        let duration_minutes = u32::try_from(self.duration_minutes)
            .map_err(|e| RepositoryError::Query(format!("invalid duration: {e}")))?;

        Ok(Booking {
            id,
            customer_id,
            service_id,
            vehicle,
            location,
            scheduled_at: parse_datetime(&self.scheduled_at)?,
            duration_minutes,
            status,
            price: parse_decimal(&self.price)?,
            notes: self.notes,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, RepositoryError> {
    serde_json::to_string(value).map_err(|e| RepositoryError::Query(e.to_string()))
}

fn ends_at_slot(booking: &Booking) -> Result<String, RepositoryError> {
    booking
        .ends_at()
        .map(|end| format_slot(&end))
        .ok_or_else(|| RepositoryError::Query(format!("booking {} window is out of range", booking.id)))
}

impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
        sqlx::query(
            "INSERT INTO bookings (id, customer_id, service_id, vehicle, location, scheduled_at, ends_at, duration_minutes, status, price, notes, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(booking.id.to_string())
        .bind(booking.customer_id.to_string())
        .bind(booking.service_id.to_string())
        .bind(to_json(&booking.vehicle)?)
        .bind(to_json(&booking.location)?)
        .bind(format_slot(&booking.scheduled_at))
        .bind(ends_at_slot(booking)?)
        .bind(i64::from(booking.duration_minutes))
        .bind(booking.status.to_string())
        .bind(booking.price.to_string())
        .bind(&booking.notes)
        .bind(format_datetime(&booking.created_at))
        .bind(format_datetime(&booking.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!(
                    "service {} is already booked at {}",
                    booking.service_id, booking.scheduled_at
                )
            })
        })?;

        Ok(booking.clone())
    }

    async fn get_by_id(&self, id: &BookingId) -> Result<Option<Booking>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM bookings WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        match row {
            Some(row) => {
                let booking_row = BookingRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(booking_row.into_booking()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, filter: Option<BookingFilter>) -> Result<Vec<Booking>, RepositoryError> {
        let filter = filter.unwrap_or_default();

        let mut sql = String::from("SELECT * FROM bookings");
        let mut conditions: Vec<&str> = Vec::new();
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref customer_id) = filter.customer_id {
            conditions.push("customer_id = ?");
            binds.push(customer_id.to_string());
        }
        if let Some(status) = filter.status {
            conditions.push("status = ?");
            binds.push(status.to_string());
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        let order = match filter.sort_order.unwrap_or_default() {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        };
        sql.push_str(&format!(" ORDER BY scheduled_at {order}, id {order}"));

        // SQLite requires LIMIT when OFFSET is present
        match (filter.limit, filter.offset) {
            (Some(limit), Some(offset)) => sql.push_str(&format!(" LIMIT {limit} OFFSET {offset}")),
            (Some(limit), None) => sql.push_str(&format!(" LIMIT {limit}")),
            (None, Some(offset)) => sql.push_str(&format!(" LIMIT -1 OFFSET {offset}")),
            (None, None) => {}
        }

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value);
        }

        let rows = query
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in &rows {
            let booking_row =
                BookingRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            bookings.push(booking_row.into_booking()?);
        }

        Ok(bookings)
    }

    async fn update(&self, booking: &Booking) -> Result<Booking, RepositoryError> {
        let result = sqlx::query(
            "UPDATE bookings SET vehicle = ?, location = ?, scheduled_at = ?, ends_at = ?, duration_minutes = ?, status = ?, price = ?, notes = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(to_json(&booking.vehicle)?)
        .bind(to_json(&booking.location)?)
        .bind(format_slot(&booking.scheduled_at))
        .bind(ends_at_slot(booking)?)
        .bind(i64::from(booking.duration_minutes))
        .bind(booking.status.to_string())
        .bind(booking.price.to_string())
        .bind(&booking.notes)
        .bind(format_datetime(&booking.updated_at))
        .bind(booking.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| {
            map_write_error(e, || {
                format!(
                    "service {} is already booked at {}",
                    booking.service_id, booking.scheduled_at
                )
            })
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(booking.clone())
    }
}
