//! Shopping cart state.
//!
//! A [`Cart`] is owned by a single user session. Every mutation goes through
//! the methods here so the invariants hold at all times:
//!
//! - each line has a quantity of at least 1
//! - a line whose quantity would drop below 1 is removed
//! - line order is insertion order

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::MenuItem;
use crate::pricing::OrderSummary;
use crate::types::{CurrencyCode, MenuItemId};

/// Errors from cart construction and mutation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The cart has no line for this item.
    #[error("item {0} is not in the cart")]
    ItemNotFound(MenuItemId),
    /// The cart is empty, so checkout cannot start.
    #[error("Your cart is empty.")]
    EmptyCart,
    /// A line item failed validation.
    #[error("invalid cart item: {0}")]
    InvalidItem(String),
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    id: MenuItemId,
    name: String,
    unit_price: Decimal,
    quantity: u32,
    description: Option<String>,
    image_url: Option<String>,
}

impl CartItem {
    /// Create a validated cart line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidItem`] for a blank id or name, a negative
    /// price, or a zero quantity.
    pub fn new(
        id: impl Into<MenuItemId>,
        name: &str,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, CartError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CartError::InvalidItem("id cannot be empty".into()));
        }
        if name.trim().is_empty() {
            return Err(CartError::InvalidItem(format!("{id}: name cannot be empty")));
        }
        if unit_price.is_sign_negative() {
            return Err(CartError::InvalidItem(format!(
                "{id}: price cannot be negative"
            )));
        }
        if quantity == 0 {
            return Err(CartError::InvalidItem(format!(
                "{id}: quantity must be at least 1"
            )));
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            unit_price,
            quantity,
            description: None,
            image_url: None,
        })
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn id(&self) -> &MenuItemId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl From<&MenuItem> for CartItem {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            unit_price: item.price,
            quantity: 1,
            description: Some(item.description.clone()).filter(|d| !d.is_empty()),
            image_url: item.image_url.clone(),
        }
    }
}

/// The ordered collection of line items a user intends to purchase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    currency: CurrencyCode,
    special_instructions: String,
    promo_code: Option<String>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from existing lines.
    ///
    /// Lines sharing an id are merged into the first occurrence.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        let mut cart = Self::new();
        for item in items {
            cart.push_or_merge(item);
        }
        cart
    }

    #[must_use]
    pub const fn in_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &MenuItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Add one unit of a menu item, merging with an existing line.
    pub fn add(&mut self, item: &MenuItem) {
        self.push_or_merge(CartItem::from(item));
    }

    /// Set a line's quantity. A quantity of 0 removes the line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the item is not in the cart.
    pub fn update_quantity(&mut self, id: &MenuItemId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove(id).map(|_| ());
        }
        let line = self.line_mut(id)?;
        line.quantity = quantity;
        Ok(())
    }

    /// Add one unit to an existing line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the item is not in the cart.
    pub fn increment(&mut self, id: &MenuItemId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_add(1);
        Ok(line.quantity)
    }

    /// Remove one unit from a line, dropping the line when it reaches zero.
    ///
    /// Returns the remaining quantity (0 if the line was removed).
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the item is not in the cart.
    pub fn decrement(&mut self, id: &MenuItemId) -> Result<u32, CartError> {
        let current = self
            .get(id)
            .map(CartItem::quantity)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;
        let remaining = current.saturating_sub(1);
        self.update_quantity(id, remaining)?;
        Ok(remaining)
    }

    /// Remove a line entirely.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] if the item is not in the cart.
    pub fn remove(&mut self, id: &MenuItemId) -> Result<CartItem, CartError> {
        let pos = self
            .items
            .iter()
            .position(|item| &item.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))?;
        Ok(self.items.remove(pos))
    }

    /// Remove every line, keeping instructions and promo code.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn special_instructions(&self) -> &str {
        &self.special_instructions
    }

    pub fn set_special_instructions(&mut self, instructions: impl Into<String>) {
        self.special_instructions = instructions.into();
    }

    #[must_use]
    pub fn promo_code(&self) -> Option<&str> {
        self.promo_code.as_deref()
    }

    /// Store a promo code; blank input clears it.
    pub fn set_promo_code(&mut self, code: &str) {
        let code = code.trim();
        self.promo_code = (!code.is_empty()).then(|| code.to_owned());
    }

    /// Totals for the current contents.
    #[must_use]
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_items_in(&self.items, self.currency)
    }

    /// Gate for leaving the cart page.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyCart`] if there is nothing to order.
    pub fn proceed_to_checkout(&self) -> Result<(), CartError> {
        if self.is_empty() {
            return Err(CartError::EmptyCart);
        }
        Ok(())
    }

    fn line_mut(&mut self, id: &MenuItemId) -> Result<&mut CartItem, CartError> {
        self.items
            .iter_mut()
            .find(|item| &item.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.clone()))
    }

    fn push_or_merge(&mut self, item: CartItem) {
        match self.items.iter().position(|line| line.id == item.id) {
            Some(pos) => {
                if let Some(existing) = self.items.get_mut(pos) {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
            }
            None => self.items.push(item),
        }
    }
}
