//! Global configuration loader for Washbay.
//!
//! Reads `config.toml` from the data directory (`~/.washbay/` in production)
//! and deserializes it into [`GlobalConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use washbay_types::config::GlobalConfig;

/// Longest accepted booking notice: one year.
const MAX_LEAD_MINUTES: i64 = 366 * 24 * 60;

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `WASHBAY_DATA_DIR` environment variable
/// 2. `~/.washbay`
/// 3. `.washbay` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("WASHBAY_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".washbay");
    }

    PathBuf::from(".washbay")
}

/// Load global configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`GlobalConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Hours outside `0..=24` or an empty opening window are rejected the same way.
/// - So are a lead time outside `0..=MAX_LEAD_MINUTES` and a negative mobile fee.
pub async fn load_global_config(data_dir: &Path) -> GlobalConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return GlobalConfig::default();
        }
    };

    let config = match toml::from_str::<GlobalConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            return GlobalConfig::default();
        }
    };

    let schedule = &config.schedule;
    if schedule.closing_hour > 24 || schedule.opening_hour >= schedule.closing_hour {
        tracing::warn!(
            opening_hour = schedule.opening_hour,
            closing_hour = schedule.closing_hour,
            "Invalid opening hours in {}, using defaults",
            config_path.display()
        );
        return GlobalConfig::default();
    }

    if !(0..=MAX_LEAD_MINUTES).contains(&schedule.min_lead_minutes) {
        tracing::warn!(
            min_lead_minutes = schedule.min_lead_minutes,
            "Invalid lead time in {}, using defaults",
            config_path.display()
        );
        return GlobalConfig::default();
    }

    if config.pricing.mobile_fee < Decimal::ZERO {
        tracing::warn!(
            mobile_fee = %config.pricing.mobile_fee,
            "Negative mobile fee in {}, using defaults",
            config_path.display()
        );
        return GlobalConfig::default();
    }

    config
}
