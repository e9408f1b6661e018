//! QuickBite Core - Domain types and view-model logic.
//!
//! This crate provides the types and rules shared by every QuickBite
//! component:
//! - `storefront` - Session runtime, order tracker and display views
//! - `cli` - Command-line driver for browsing, checkout and tracking
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no timers,
//! no async. This keeps it lightweight and deterministic in tests.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices, statuses, addresses and cards
//! - [`catalog`] - Restaurants, menus and discovery filtering
//! - [`cart`] - Cart lines and quantity rules
//! - [`pricing`] - Subtotal, delivery fee, tax and grand total
//! - [`checkout`] - Checkout form validation and order placement
//! - [`tracking`] - Order status progression

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod pricing;
pub mod tracking;
pub mod types;

pub use cart::{Cart, CartError, CartItem};
pub use catalog::{Catalog, CatalogError, DiscoveryFilter, MenuItem, Restaurant};
pub use checkout::{
    CheckoutError, CheckoutField, CheckoutForm, FieldError, NewCardDetails, PlacedOrder,
    SavedAccount, ValidationErrors,
};
pub use pricing::OrderSummary;
pub use tracking::{StatusProgression, StepView, TickOutcome, TrackingError};
pub use types::*;
