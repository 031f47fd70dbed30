//! Customer repository trait definition.

use washbay_types::customer::{Customer, CustomerId};
use washbay_types::error::RepositoryError;

/// Repository trait for customer records.
pub trait CustomerRepository: Send + Sync {
    /// Register a new customer.
    ///
    /// Fails with `RepositoryError::Conflict` if the email is already taken.
    fn create(
        &self,
        customer: &Customer,
    ) -> impl std::future::Future<Output = Result<Customer, RepositoryError>> + Send;

    /// Get a customer by ID.
    fn get_by_id(
        &self,
        id: &CustomerId,
    ) -> impl std::future::Future<Output = Result<Option<Customer>, RepositoryError>> + Send;

    /// Get a customer by normalized email address.
    fn get_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Customer>, RepositoryError>> + Send;

    /// List customers, newest first.
    fn list(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> impl std::future::Future<Output = Result<Vec<Customer>, RepositoryError>> + Send;
}
