//! Global configuration types for Washbay.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! pricing adjustments and the booking schedule.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::booking::VehicleClass;

/// Top-level configuration for the Washbay backend.
///
/// Loaded from `~/.washbay/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub pricing: PricingConfig,

    #[serde(default)]
    pub schedule: ScheduleConfig,
}

/// Pricing adjustments layered on top of each service's base price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat fee added when the crew drives to the customer.
    #[serde(default = "default_mobile_fee")]
    pub mobile_fee: Decimal,

    /// Per-class multipliers overriding the built-in table.
    #[serde(default)]
    pub class_multipliers: Vec<ClassMultiplier>,
}

fn default_mobile_fee() -> Decimal {
    Decimal::new(1500, 2)
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            mobile_fee: default_mobile_fee(),
            class_multipliers: Vec::new(),
        }
    }
}

/// Price multiplier for one vehicle class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMultiplier {
    pub vehicle_class: VehicleClass,
    pub multiplier: Decimal,
}

/// Opening hours and booking lead time. Hours are UTC.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// First hour of the day a wash may start.
    #[serde(default = "default_opening_hour")]
    pub opening_hour: u32,

    /// Hour by which every wash must be finished.
    #[serde(default = "default_closing_hour")]
    pub closing_hour: u32,

    /// Minimum notice between booking and the scheduled start.
    #[serde(default = "default_min_lead_minutes")]
    pub min_lead_minutes: i64,
}

fn default_opening_hour() -> u32 {
    8
}

fn default_closing_hour() -> u32 {
    18
}

fn default_min_lead_minutes() -> i64 {
    60
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            opening_hour: default_opening_hour(),
            closing_hour: default_closing_hour(),
            min_lead_minutes: default_min_lead_minutes(),
        }
    }
}
