//! Integration tests for QuickBite.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p quickbite-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `checkout_flow` - Cart to placed order through a storefront session
//! - `order_tracking` - Tracker timing under paused tokio time
//!
//! Shared helpers live here so every test file builds sessions the same way.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use quickbite_storefront::{AppState, Session, StorefrontConfig};

/// Interval used by tests that exercise the tracker.
pub const TEST_INTERVAL: Duration = Duration::from_secs(15);

/// Fixed "now" so card expiry checks are deterministic.
#[must_use]
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Configuration with the test interval and default everything else.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        tracking_interval: TEST_INTERVAL,
        ..StorefrontConfig::default()
    }
}

/// A session with the mock account and starter cart.
///
/// # Panics
///
/// Panics if the fixtures are malformed.
#[must_use]
pub fn fixture_session() -> Session {
    Session::with_fixtures(AppState::with_fixtures(test_config()))
        .expect("fixture data should be valid")
}
