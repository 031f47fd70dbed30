//! SQLite service catalog repository implementation.

use sqlx::Row;
use washbay_core::repository::service::ServiceRepository;
use washbay_types::error::RepositoryError;
use washbay_types::service::{Service, ServiceId};

use super::pool::{map_read_error, map_write_error, DatabasePool};
use super::{format_datetime, parse_datetime, parse_decimal};

/// SQLite-backed implementation of `ServiceRepository`.
pub struct SqliteServiceRepository {
    pool: DatabasePool,
}

impl SqliteServiceRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Service.
struct ServiceRow {
    id: String,
    name: String,
    description: String,
    price: String,
    duration_minutes: i64,
    is_active: bool,
    created_at: String,
    updated_at: String,
}

impl ServiceRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: row.try_get("price")?,
            duration_minutes: row.try_get("duration_minutes")?,
            is_active: row.try_get("is_active")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_service(self) -> Result<Service, RepositoryError> {
        let id = self
            .id
            .parse::<ServiceId>()
            .map_err(|e| RepositoryError::Query(format!("invalid service id: {e}")))?;
        let duration_minutes = u32::try_from(self.duration_minutes)
            .map_err(|e| RepositoryError::Query(format!("invalid duration: {e}")))?;

        Ok(Service {
            id,
            name: self.name,
            description: self.description,
            price: parse_decimal(&self.price)?,
            duration_minutes,
            is_active: self.is_active,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

impl ServiceRepository for SqliteServiceRepository {
    async fn create(&self, service: &Service) -> Result<Service, RepositoryError> {
        sqlx::query(
            "INSERT INTO services (id, name, description, price, duration_minutes, is_active, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(service.id.to_string())
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price.to_string())
        .bind(i64::from(service.duration_minutes))
        .bind(service.is_active)
        .bind(format_datetime(&service.created_at))
        .bind(format_datetime(&service.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, || format!("service {} already exists", service.id)))?;

        Ok(service.clone())
    }

    async fn get_by_id(&self, id: &ServiceId) -> Result<Option<Service>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM services WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        match row {
            Some(row) => {
                let service_row =
                    ServiceRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(service_row.into_service()?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Service>, RepositoryError> {
        let sql = if active_only {
            "SELECT * FROM services WHERE is_active = 1 ORDER BY name ASC"
        } else {
            "SELECT * FROM services ORDER BY name ASC"
        };

        let rows = sqlx::query(sql)
            .fetch_all(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        let mut services = Vec::with_capacity(rows.len());
        for row in &rows {
            let service_row =
                ServiceRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            services.push(service_row.into_service()?);
        }
        Ok(services)
    }

    async fn update(&self, service: &Service) -> Result<Service, RepositoryError> {
        let result = sqlx::query(
            "UPDATE services SET name = ?, description = ?, price = ?, duration_minutes = ?, is_active = ?, updated_at = ?
             WHERE id = ?",
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.price.to_string())
        .bind(i64::from(service.duration_minutes))
        .bind(service.is_active)
        .bind(format_datetime(&service.updated_at))
        .bind(service.id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, || format!("service {} already exists", service.id)))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(service.clone())
    }
}
