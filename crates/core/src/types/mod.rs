//! Core types for QuickBite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod address;
pub mod id;
pub mod payment;
pub mod price;
pub mod status;

pub use address::{Address, AddressBook, AddressError, AddressKind};
pub use id::*;
pub use payment::{NEW_CARD_PAYMENT_ID, PaymentChoice, PaymentError, PaymentMethod};
pub use price::{CurrencyCode, Price, round_for_display};
pub use status::OrderStatus;
