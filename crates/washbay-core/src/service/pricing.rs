//! PricingEngine trait for quoting a booking.
//!
//! Defined in washbay-core so the booking workflow can price a wash without
//! coupling to a particular price table. The `TablePricing` adapter lives in
//! washbay-infra.

use rust_decimal::Decimal;
use washbay_types::booking::{Location, VehicleInfo};
use washbay_types::error::PricingError;
use washbay_types::service::Service;

/// Computes the price of a wash from exactly three inputs: the service, the
/// vehicle and where the wash happens.
pub trait PricingEngine: Send + Sync {
    fn calculate_price(
        &self,
        service: &Service,
        vehicle: &VehicleInfo,
        location: &Location,
    ) -> impl std::future::Future<Output = Result<Decimal, PricingError>> + Send;
}
