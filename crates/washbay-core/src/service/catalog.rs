//! Service catalog management.
//!
//! Validates catalog entries before they reach storage. Prices and durations
//! feed directly into pricing and availability, so both must be positive.

use chrono::Utc;
use rust_decimal::Decimal;

use washbay_types::error::CatalogError;
use washbay_types::service::{CreateServiceRequest, Service, ServiceId, UpdateServiceRequest};

use crate::repository::service::ServiceRepository;

/// Service for adding, updating and listing catalog entries.
pub struct CatalogService<R: ServiceRepository> {
    repo: R,
}

impl<R: ServiceRepository> CatalogService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a new, active service to the catalog.
    pub async fn add_service(&self, request: CreateServiceRequest) -> Result<Service, CatalogError> {
        let name = validate_name(&request.name)?;
        validate_price(request.price)?;
        validate_duration(request.duration_minutes)?;

        let now = Utc::now();
        let service = Service {
            id: ServiceId::new(),
            name,
            description: request.description.unwrap_or_default(),
            price: request.price,
            duration_minutes: request.duration_minutes,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let service = self.repo.create(&service).await?;
        tracing::info!(service_id = %service.id, name = %service.name, price = %service.price, "service added");
        Ok(service)
    }

    /// Get a service by ID, active or not.
    pub async fn get_service(&self, id: &ServiceId) -> Result<Service, CatalogError> {
        self.repo.get_by_id(id).await?.ok_or(CatalogError::NotFound)
    }

    /// List services ordered by name.
    pub async fn list_services(&self, active_only: bool) -> Result<Vec<Service>, CatalogError> {
        Ok(self.repo.list(active_only).await?)
    }

    /// Apply a partial update. Existing bookings keep their quoted price.
    pub async fn update_service(
        &self,
        id: &ServiceId,
        request: UpdateServiceRequest,
    ) -> Result<Service, CatalogError> {
        let mut service = self.get_service(id).await?;

        if let Some(name) = request.name {
            service.name = validate_name(&name)?;
        }
        if let Some(description) = request.description {
            service.description = description;
        }
        if let Some(price) = request.price {
            validate_price(price)?;
            service.price = price;
        }
        if let Some(duration) = request.duration_minutes {
            validate_duration(duration)?;
            service.duration_minutes = duration;
        }
        if let Some(is_active) = request.is_active {
            if is_active != service.is_active {
                tracing::info!(service_id = %service.id, is_active, "service availability toggled");
            }
            service.is_active = is_active;
        }
        service.updated_at = Utc::now();

        Ok(self.repo.update(&service).await?)
    }
}

fn validate_name(name: &str) -> Result<String, CatalogError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CatalogError::Invalid("name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn validate_price(price: Decimal) -> Result<(), CatalogError> {
    if price <= Decimal::ZERO {
        return Err(CatalogError::Invalid(format!("price must be positive, got {price}")));
    }
    Ok(())
}

fn validate_duration(minutes: u32) -> Result<(), CatalogError> {
    if minutes == 0 {
        return Err(CatalogError::Invalid("duration must be at least one minute".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use washbay_types::error::RepositoryError;

    #[derive(Default)]
    struct MemoryServices {
        rows: Mutex<Vec<Service>>,
    }

    impl ServiceRepository for MemoryServices {
        async fn create(&self, service: &Service) -> Result<Service, RepositoryError> {
            self.rows.lock().unwrap().push(service.clone());
            Ok(service.clone())
        }

        async fn get_by_id(&self, id: &ServiceId) -> Result<Option<Service>, RepositoryError> {
            Ok(self.rows.lock().unwrap().iter().find(|s| &s.id == id).cloned())
        }

        async fn list(&self, active_only: bool) -> Result<Vec<Service>, RepositoryError> {
            let mut rows: Vec<Service> = self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|s| !active_only || s.is_active)
                .cloned()
                .collect();
            rows.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(rows)
        }

        async fn update(&self, service: &Service) -> Result<Service, RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let existing = rows
                .iter_mut()
                .find(|s| s.id == service.id)
                .ok_or(RepositoryError::NotFound)?;
            *existing = service.clone();
            Ok(service.clone())
        }
    }

    fn wash(name: &str, cents: i64) -> CreateServiceRequest {
        CreateServiceRequest {
            name: name.to_string(),
            description: None,
            price: Decimal::new(cents, 2),
            duration_minutes: 30,
        }
    }

    #[tokio::test]
    async fn test_add_service_trims_and_activates() {
        let catalog = CatalogService::new(MemoryServices::default());
        let service = catalog.add_service(wash("  Express Wash ", 1999)).await.unwrap();

        assert_eq!(service.name, "Express Wash");
        assert_eq!(service.description, "");
        assert!(service.is_active);
        assert_eq!(service.created_at, service.updated_at);
    }

    #[tokio::test]
    async fn test_add_service_rejects_bad_input() {
        let catalog = CatalogService::new(MemoryServices::default());

        let err = catalog.add_service(wash("   ", 1999)).await.unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));

        let err = catalog.add_service(wash("Free Wash", 0)).await.unwrap_err();
        assert!(err.to_string().contains("price must be positive"));

        let mut zero_minutes = wash("Instant Wash", 1000);
        zero_minutes.duration_minutes = 0;
        let err = catalog.add_service(zero_minutes).await.unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));

        assert!(catalog.list_services(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deactivate_hides_from_active_list() {
        let catalog = CatalogService::new(MemoryServices::default());
        let basic = catalog.add_service(wash("Basic", 1500)).await.unwrap();
        catalog.add_service(wash("Deluxe", 4500)).await.unwrap();

        let update = UpdateServiceRequest {
            is_active: Some(false),
            ..Default::default()
        };
        let updated = catalog.update_service(&basic.id, update).await.unwrap();
        assert!(!updated.is_active);
        assert!(updated.updated_at >= basic.updated_at);

        let active = catalog.list_services(true).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Deluxe");
        assert_eq!(catalog.list_services(false).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_validates_price() {
        let catalog = CatalogService::new(MemoryServices::default());
        let basic = catalog.add_service(wash("Basic", 1500)).await.unwrap();

        let update = UpdateServiceRequest {
            price: Some(Decimal::new(-100, 2)),
            ..Default::default()
        };
        let err = catalog.update_service(&basic.id, update).await.unwrap_err();
        assert!(matches!(err, CatalogError::Invalid(_)));

        let stored = catalog.get_service(&basic.id).await.unwrap();
        assert_eq!(stored.price, Decimal::new(1500, 2));
    }

    #[tokio::test]
    async fn test_update_unknown_service() {
        let catalog = CatalogService::new(MemoryServices::default());
        let err = catalog
            .update_service(&ServiceId::new(), UpdateServiceRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }
}
