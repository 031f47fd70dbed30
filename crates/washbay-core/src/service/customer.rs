//! Customer registry.

use chrono::Utc;

use washbay_types::customer::{normalize_email, CreateCustomerRequest, Customer, CustomerId};
use washbay_types::error::{CustomerError, RepositoryError};

use crate::repository::customer::CustomerRepository;

/// Service for registering and looking up customers.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Access the underlying customer repository.
    pub fn customer_repo(&self) -> &R {
        &self.repo
    }

    /// Register a new customer.
    ///
    /// Emails are stored normalized; registering an address that differs
    /// only in case or surrounding whitespace fails with `EmailTaken`.
    pub async fn register(&self, request: CreateCustomerRequest) -> Result<Customer, CustomerError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(CustomerError::Invalid("name must not be empty".to_string()));
        }

        let email = normalize_email(&request.email);
        if !is_plausible_email(&email) {
            return Err(CustomerError::Invalid(format!("'{email}' is not a valid email address")));
        }

        if self.repo.get_by_email(&email).await?.is_some() {
            return Err(CustomerError::EmailTaken(email));
        }

        let customer = Customer {
            id: CustomerId::new(),
            name: name.to_string(),
            email,
            phone: request
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
            created_at: Utc::now(),
        };

        // A concurrent registration can still win the race to the unique index.
        let customer = match self.repo.create(&customer).await {
            Ok(customer) => customer,
            Err(RepositoryError::Conflict(_)) => {
                return Err(CustomerError::EmailTaken(customer.email));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(customer_id = %customer.id, "customer registered");
        Ok(customer)
    }

    /// Get a customer by ID.
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Customer, CustomerError> {
        self.repo.get_by_id(id).await?.ok_or(CustomerError::NotFound)
    }

    /// List customers, newest first.
    pub async fn list_customers(
        &self,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Customer>, CustomerError> {
        Ok(self.repo.list(limit, offset).await?)
    }
}

/// Something before and after a single `@`, and a dot in the domain.
fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}
