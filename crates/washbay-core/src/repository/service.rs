//! Service catalog repository trait definition.

use washbay_types::error::RepositoryError;
use washbay_types::service::{Service, ServiceId};

/// Repository trait for catalog services.
pub trait ServiceRepository: Send + Sync {
    /// Add a service to the catalog.
    fn create(
        &self,
        service: &Service,
    ) -> impl std::future::Future<Output = Result<Service, RepositoryError>> + Send;

    /// Get a service by ID, active or not.
    fn get_by_id(
        &self,
        id: &ServiceId,
    ) -> impl std::future::Future<Output = Result<Option<Service>, RepositoryError>> + Send;

    /// List services ordered by name, optionally only active ones.
    fn list(
        &self,
        active_only: bool,
    ) -> impl std::future::Future<Output = Result<Vec<Service>, RepositoryError>> + Send;

    /// Update an existing service. Returns the updated service.
    fn update(
        &self,
        service: &Service,
    ) -> impl std::future::Future<Output = Result<Service, RepositoryError>> + Send;
}
