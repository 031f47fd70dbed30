//! Table-driven wash pricing.
//!
//! Provides a hardcoded default multiplier per vehicle class with user
//! override capability from `config.toml`. The quote is the service base
//! price scaled by the vehicle's class, plus a flat fee for mobile service.

use rust_decimal::{Decimal, RoundingStrategy};
use washbay_core::service::pricing::PricingEngine;
use washbay_types::booking::{Location, VehicleClass, VehicleInfo};
use washbay_types::config::PricingConfig;
use washbay_types::error::PricingError;
use washbay_types::service::Service;

/// Built-in multiplier for a vehicle class.
fn default_multiplier(class: VehicleClass) -> Decimal {
    match class {
        VehicleClass::Compact => Decimal::new(90, 2),
        VehicleClass::Standard => Decimal::ONE,
        VehicleClass::Suv => Decimal::new(120, 2),
        VehicleClass::Truck => Decimal::new(135, 2),
        VehicleClass::Van => Decimal::new(130, 2),
    }
}

/// `PricingEngine` backed by the class multiplier table.
#[derive(Debug, Clone, Default)]
pub struct TablePricing {
    config: PricingConfig,
}

impl TablePricing {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    /// Multiplier for a class: user override first, then the default table.
    pub fn multiplier_for(&self, class: VehicleClass) -> Decimal {
        self.config
            .class_multipliers
            .iter()
            .find(|m| m.vehicle_class == class)
            .map(|m| m.multiplier)
            .unwrap_or_else(|| default_multiplier(class))
    }

    /// Compute a quote without going through the async trait.
    pub fn quote(
        &self,
        service: &Service,
        vehicle: &VehicleInfo,
        location: &Location,
    ) -> Result<Decimal, PricingError> {
        if service.price <= Decimal::ZERO {
            return Err(PricingError::InvalidBasePrice);
        }

        let multiplier = self.multiplier_for(vehicle.vehicle_class);
        if multiplier <= Decimal::ZERO {
            return Err(PricingError::Unavailable(format!(
                "no usable multiplier for {} vehicles",
                vehicle.vehicle_class
            )));
        }

        let mut price = service
            .price
            .checked_mul(multiplier)
            .ok_or_else(|| PricingError::Unavailable("price overflow".to_string()))?;
        if location.is_mobile() {
            price += self.config.mobile_fee;
        }

        Ok(price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl PricingEngine for TablePricing {
    async fn calculate_price(
        &self,
        service: &Service,
        vehicle: &VehicleInfo,
        location: &Location,
    ) -> Result<Decimal, PricingError> {
        let price = self.quote(service, vehicle, location)?;
        tracing::debug!(
            service_id = %service.id,
            vehicle_class = %vehicle.vehicle_class,
            mobile = location.is_mobile(),
            %price,
            "price quoted"
        );
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use washbay_types::config::ClassMultiplier;
    use washbay_types::service::ServiceId;

    fn service(cents: i64) -> Service {
        let now = Utc::now();
        Service {
            id: ServiceId::new(),
            name: "Exterior Wash".to_string(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            duration_minutes: 30,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn vehicle(class: VehicleClass) -> VehicleInfo {
        VehicleInfo {
            make: "Mazda".to_string(),
            model: "3".to_string(),
            year: 2018,
            color: "red".to_string(),
            license_plate: "MZD 303".to_string(),
            vehicle_class: class,
        }
    }

    fn in_store() -> Location {
        Location::InStore {
            site: "Main".to_string(),
        }
    }

    fn mobile() -> Location {
        Location::Mobile {
            address: "9 Oak Ave".to_string(),
            latitude: None,
            longitude: None,
        }
    }

    #[tokio::test]
    async fn test_standard_in_store_is_base_price() {
        let pricing = TablePricing::default();
        let price = pricing
            .calculate_price(&service(4250), &vehicle(VehicleClass::Standard), &in_store())
            .await
            .unwrap();
        assert_eq!(price, Decimal::new(4250, 2));
    }

    #[test]
    fn test_class_multipliers_and_mobile_fee() {
        let pricing = TablePricing::default();
        let base = service(2000);

        let suv = pricing.quote(&base, &vehicle(VehicleClass::Suv), &in_store()).unwrap();
        assert_eq!(suv, Decimal::new(2400, 2));

        let compact = pricing.quote(&base, &vehicle(VehicleClass::Compact), &in_store()).unwrap();
        assert_eq!(compact, Decimal::new(1800, 2));

        // 20.00 * 1.35 + 15.00
        let truck_mobile = pricing.quote(&base, &vehicle(VehicleClass::Truck), &mobile()).unwrap();
        assert_eq!(truck_mobile, Decimal::new(4200, 2));
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        let pricing = TablePricing::default();
        // 19.99 * 0.90 = 17.991 -> 17.99
        let compact = pricing
            .quote(&service(1999), &vehicle(VehicleClass::Compact), &in_store())
            .unwrap();
        assert_eq!(compact, Decimal::new(1799, 2));

        // 10.05 * 1.30 = 13.065 -> 13.07
        let van = pricing
            .quote(&service(1005), &vehicle(VehicleClass::Van), &in_store())
            .unwrap();
        assert_eq!(van, Decimal::new(1307, 2));
    }

    #[test]
    fn test_config_overrides_win() {
        let pricing = TablePricing::new(PricingConfig {
            mobile_fee: Decimal::new(500, 2),
            class_multipliers: vec![ClassMultiplier {
                vehicle_class: VehicleClass::Suv,
                multiplier: Decimal::new(150, 2),
            }],
        });

        assert_eq!(pricing.multiplier_for(VehicleClass::Suv), Decimal::new(150, 2));
        assert_eq!(pricing.multiplier_for(VehicleClass::Van), Decimal::new(130, 2));

        let price = pricing
            .quote(&service(2000), &vehicle(VehicleClass::Suv), &mobile())
            .unwrap();
        assert_eq!(price, Decimal::new(3500, 2));
    }

    #[test]
    fn test_non_positive_base_price_rejected() {
        let pricing = TablePricing::default();
        let err = pricing
            .quote(&service(0), &vehicle(VehicleClass::Standard), &in_store())
            .unwrap_err();
        assert!(matches!(err, PricingError::InvalidBasePrice));
    }
}
