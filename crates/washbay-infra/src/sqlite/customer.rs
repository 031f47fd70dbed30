//! SQLite customer repository implementation.

use sqlx::Row;
use washbay_core::repository::customer::CustomerRepository;
use washbay_types::customer::{Customer, CustomerId};
use washbay_types::error::RepositoryError;

use super::pool::{map_read_error, map_write_error, DatabasePool};
use super::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `CustomerRepository`.
pub struct SqliteCustomerRepository {
    pool: DatabasePool,
}

impl SqliteCustomerRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Total number of registered customers.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(map_read_error)?;
        Ok(count)
    }

    async fn fetch_one_where(
        &self,
        clause: &str,
        value: String,
    ) -> Result<Option<Customer>, RepositoryError> {
        let row = sqlx::query(&format!("SELECT * FROM customers WHERE {clause} = ?"))
            .bind(value)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(map_read_error)?;

        row.map(|row| row_to_customer(&row)).transpose()
    }
}

fn row_to_customer(row: &sqlx::sqlite::SqliteRow) -> Result<Customer, RepositoryError> {
    let id: String = row.try_get("id").map_err(|e| RepositoryError::Query(e.to_string()))?;
    let created_at: String = row
        .try_get("created_at")
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

    Ok(Customer {
        id: id
            .parse::<CustomerId>()
            .map_err(|e| RepositoryError::Query(format!("invalid customer id: {e}")))?,
        name: row.try_get("name").map_err(|e| RepositoryError::Query(e.to_string()))?,
        email: row.try_get("email").map_err(|e| RepositoryError::Query(e.to_string()))?,
        phone: row.try_get("phone").map_err(|e| RepositoryError::Query(e.to_string()))?,
        created_at: parse_datetime(&created_at)?,
    })
}

impl CustomerRepository for SqliteCustomerRepository {
    async fn create(&self, customer: &Customer) -> Result<Customer, RepositoryError> {
        sqlx::query(
            "INSERT INTO customers (id, name, email, phone, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(customer.id.to_string())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(&customer.phone)
        .bind(format_datetime(&customer.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| map_write_error(e, || format!("email '{}' already exists", customer.email)))?;

        Ok(customer.clone())
    }

    async fn get_by_id(&self, id: &CustomerId) -> Result<Option<Customer>, RepositoryError> {
        self.fetch_one_where("id", id.to_string()).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Customer>, RepositoryError> {
        self.fetch_one_where("email", email.to_string()).await
    }

    async fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Customer>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM customers ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(limit.unwrap_or(-1))
        .bind(offset.unwrap_or(0))
        .fetch_all(&self.pool.reader)
        .await
        .map_err(map_read_error)?;

        rows.iter().map(row_to_customer).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::tests::test_pool;
    use chrono::Utc;

    fn make_customer(name: &str, email: &str) -> Customer {
        Customer {
            id: CustomerId::new(),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let repo = SqliteCustomerRepository::new(test_pool().await);
        let customer = make_customer("Avery Quinn", "avery@example.com");

        repo.create(&customer).await.unwrap();

        let by_id = repo.get_by_id(&customer.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Avery Quinn");
        assert!(by_id.phone.is_none());

        let by_email = repo.get_by_email("avery@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, customer.id);

        assert!(repo.get_by_email("nobody@example.com").await.unwrap().is_none());
        assert!(repo.get_by_id(&CustomerId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let repo = SqliteCustomerRepository::new(test_pool().await);
        repo.create(&make_customer("One", "dup@example.com")).await.unwrap();

        let err = repo
            .create(&make_customer("Two", "dup@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_list_pagination() {
        let repo = SqliteCustomerRepository::new(test_pool().await);
        for i in 0..3 {
            repo.create(&make_customer(&format!("C{i}"), &format!("c{i}@example.com")))
                .await
                .unwrap();
        }

        assert_eq!(repo.list(None, None).await.unwrap().len(), 3);
        assert_eq!(repo.list(Some(2), None).await.unwrap().len(), 2);
        assert_eq!(repo.list(Some(10), Some(2)).await.unwrap().len(), 1);
        assert_eq!(repo.count().await.unwrap(), 3);
    }
}
