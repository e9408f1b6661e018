//! Unified error handling.
//!
//! Provides a unified `AppError` type covering every failure a session
//! operation can report. Callers render [`AppError::user_message`] and log
//! the full error.

use quickbite_core::{
    AddressError, CartError, CatalogError, CheckoutError, PaymentError, TrackingError,
};
use thiserror::Error;

use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Restaurant or menu lookup failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Cart mutation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Order could not be placed.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Order tracking rejected a command.
    #[error("Tracking error: {0}")]
    Tracking(#[from] TrackingError),

    /// Address record was invalid.
    #[error("Address error: {0}")]
    Address(#[from] AddressError),

    /// Payment method record was invalid.
    #[error("Payment error: {0}")]
    Payment(#[from] PaymentError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Text safe to show the user.
    ///
    /// Checkout validation messages pass through verbatim; internal details
    /// are hidden.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(err) => err.to_string(),
            Self::Cart(CartError::EmptyCart) => CartError::EmptyCart.to_string(),
            Self::Cart(CartError::ItemNotFound(_)) => "That item is no longer in your cart.".to_string(),
            Self::Catalog(CatalogError::RestaurantNotFound(_)) => {
                "Restaurant not found.".to_string()
            }
            Self::Catalog(CatalogError::MenuItemNotFound { .. }) => {
                "Menu item not found.".to_string()
            }
            Self::Tracking(TrackingError::AlreadyTerminal(status)) => {
                format!("This order can no longer be changed ({}).", status.label())
            }
            Self::Tracking(TrackingError::Stopped(_)) => {
                "Tracking for this order has stopped.".to_string()
            }
            Self::NotFound(what) => format!("{what} not found."),
            Self::Config(_)
            | Self::Cart(_)
            | Self::Catalog(_)
            | Self::Address(_)
            | Self::Payment(_) => "Something went wrong. Please try again.".to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
