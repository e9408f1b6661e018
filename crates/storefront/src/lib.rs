//! QuickBite Storefront library.
//!
//! Session runtime for the QuickBite ordering flow: configuration, mock
//! catalog data, per-user sessions, the timer-driven order tracker and the
//! display views built from core types.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod fixtures;
pub mod session;
pub mod state;
pub mod tracker;
pub mod views;

pub use config::{ConfigError, StorefrontConfig};
pub use error::{AppError, Result};
pub use session::Session;
pub use state::AppState;
pub use tracker::{OrderTracker, TrackingSnapshot};
