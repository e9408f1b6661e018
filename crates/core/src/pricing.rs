//! Order summary totals derived from cart contents.
//!
//! All arithmetic is exact decimal; rounding to cents happens only in the
//! `display_*` helpers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartItem;
use crate::types::{CurrencyCode, Price};

/// Flat delivery fee charged on any non-empty order (5.00).
pub const DELIVERY_FEE: Decimal = Decimal::from_parts(500, 0, 0, false, 2);

/// Sales tax rate applied to the subtotal (8%).
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

/// Money breakdown shown in the order summary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub taxes: Price,
    pub grand_total: Price,
}

impl OrderSummary {
    /// Compute totals for a cart snapshot in USD.
    #[must_use]
    pub fn from_items(items: &[CartItem]) -> Self {
        Self::from_items_in(items, CurrencyCode::default())
    }

    /// Compute totals for a cart snapshot in the given currency.
    ///
    /// - `subtotal` is the sum of `unit_price * quantity`
    /// - `delivery_fee` is [`DELIVERY_FEE`] unless the cart is empty
    /// - `taxes` is `subtotal * TAX_RATE`
    #[must_use]
    pub fn from_items_in(items: &[CartItem], currency: CurrencyCode) -> Self {
        let subtotal: Decimal = items.iter().map(CartItem::line_total).sum();
        let delivery_fee = if items.is_empty() {
            Decimal::ZERO
        } else {
            DELIVERY_FEE
        };
        let taxes = subtotal * TAX_RATE;
        let grand_total = subtotal + delivery_fee + taxes;

        Self {
            subtotal: Price::new(subtotal, currency),
            delivery_fee: Price::new(delivery_fee, currency),
            taxes: Price::new(taxes, currency),
            grand_total: Price::new(grand_total, currency),
        }
    }

    #[must_use]
    pub fn display_subtotal(&self) -> String {
        self.subtotal.display()
    }

    #[must_use]
    pub fn display_delivery_fee(&self) -> String {
        self.delivery_fee.display()
    }

    #[must_use]
    pub fn display_taxes(&self) -> String {
        self.taxes.display()
    }

    #[must_use]
    pub fn display_grand_total(&self) -> String {
        self.grand_total.display()
    }
}
