//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `QUICKBITE_TRACKING_INTERVAL_SECS` - Seconds between order status updates (default: 15)
//! - `QUICKBITE_ESTIMATED_DELIVERY` - Delivery window shown while an order is en route
//!   (default: "4:30 PM - 4:45 PM")
//! - `QUICKBITE_CURRENCY` - ISO currency for cart totals (default: USD)

use std::time::Duration;

use quickbite_core::CurrencyCode;
use quickbite_core::tracking::DEFAULT_ESTIMATED_DELIVERY;
use thiserror::Error;

const DEFAULT_TRACKING_INTERVAL_SECS: u64 = 15;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Time between automatic order status updates
    pub tracking_interval: Duration,
    /// Delivery window shown until the order is delivered
    pub estimated_delivery: String,
    /// Currency used for cart totals
    pub currency: CurrencyCode,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            tracking_interval: Duration::from_secs(DEFAULT_TRACKING_INTERVAL_SECS),
            estimated_delivery: DEFAULT_ESTIMATED_DELIVERY.to_string(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let interval_secs = get_or_default(
            &lookup,
            "QUICKBITE_TRACKING_INTERVAL_SECS",
            &DEFAULT_TRACKING_INTERVAL_SECS.to_string(),
        )
        .trim()
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar(
                "QUICKBITE_TRACKING_INTERVAL_SECS".to_string(),
                e.to_string(),
            )
        })?;
        if interval_secs == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "QUICKBITE_TRACKING_INTERVAL_SECS".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        let estimated_delivery = get_or_default(
            &lookup,
            "QUICKBITE_ESTIMATED_DELIVERY",
            DEFAULT_ESTIMATED_DELIVERY,
        );

        let currency = get_or_default(&lookup, "QUICKBITE_CURRENCY", CurrencyCode::USD.code())
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("QUICKBITE_CURRENCY".to_string(), e))?;

        Ok(Self {
            tracking_interval: Duration::from_secs(interval_secs),
            estimated_delivery,
            currency,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value; blank values count as unset.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
