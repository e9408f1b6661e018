//! One user's storefront session.
//!
//! A [`Session`] exclusively owns the user's cart, saved addresses, stored
//! cards, checkout form and at most one live [`OrderTracker`]. Placing a new
//! order replaces (and thereby stops) the previous tracker.

use chrono::{DateTime, Utc};
use quickbite_core::{
    Address, AddressBook, Cart, CheckoutForm, DiscoveryFilter, MenuItemId, PaymentMethod,
    PlacedOrder, RestaurantId, SavedAccount,
};
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, Result};
use crate::fixtures;
use crate::state::AppState;
use crate::tracker::OrderTracker;
use crate::views::{AddressView, CartView, DiscoveryView, MenuView, PaymentMethodView};

pub struct Session {
    state: AppState,
    cart: Cart,
    addresses: AddressBook,
    payment_methods: Vec<PaymentMethod>,
    checkout: CheckoutForm,
    last_order: Option<PlacedOrder>,
    tracker: Option<OrderTracker>,
}

impl Session {
    /// Start a session with an empty cart in the configured currency.
    ///
    /// The checkout form is prefilled with the default address and the first
    /// stored card.
    #[must_use]
    pub fn new(state: AppState, addresses: AddressBook, payment_methods: Vec<PaymentMethod>) -> Self {
        let cart = Cart::new().in_currency(state.config().currency);
        let checkout = CheckoutForm::prefilled(&addresses, &payment_methods);
        Self {
            state,
            cart,
            addresses,
            payment_methods,
            checkout,
            last_order: None,
            tracker: None,
        }
    }

    /// A session populated from the mock account and starter cart.
    ///
    /// # Errors
    ///
    /// Returns an error if a fixture record is malformed.
    pub fn with_fixtures(state: AppState) -> Result<Self> {
        let addresses = fixtures::address_book()?;
        let payment_methods = fixtures::payment_methods()?;
        let cart = fixtures::starter_cart(state.catalog());
        Ok(Self::new(state, addresses, payment_methods).with_cart(cart))
    }

    /// Replace the cart, keeping the session currency.
    #[must_use]
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = cart.in_currency(self.state.config().currency);
        self
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    // =========================================================================
    // Discovery
    // =========================================================================

    /// Restaurants matching the filter, with the cuisine chips.
    #[must_use]
    pub fn discover(&self, filter: &DiscoveryFilter) -> DiscoveryView {
        let matches = self.state.catalog().discover(filter);
        debug!(search = %filter.search_term, matches = matches.len(), "Discovery filtered");
        DiscoveryView::new(filter, &fixtures::CUISINES, &matches)
    }

    /// A restaurant's menu page.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown restaurant.
    pub fn menu(&self, restaurant_id: &RestaurantId) -> Result<MenuView> {
        let restaurant = self.state.catalog().restaurant(restaurant_id)?;
        Ok(MenuView::new(restaurant, self.state.config().currency))
    }

    // =========================================================================
    // Cart
    // =========================================================================

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn cart_view(&self) -> CartView {
        CartView::from(&self.cart)
    }

    /// Add one unit of a menu item.
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant or item does not exist.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, restaurant_id: &RestaurantId, item_id: &MenuItemId) -> Result<()> {
        let item = self.state.catalog().menu_item(restaurant_id, item_id)?;
        self.cart.add(item);
        info!(item_count = self.cart.item_count(), "Added to cart");
        Ok(())
    }

    /// Set a line's quantity; 0 removes it.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the cart.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, item_id: &MenuItemId, quantity: u32) -> Result<()> {
        self.cart.update_quantity(item_id, quantity)?;
        debug!(item_count = self.cart.item_count(), "Cart quantity updated");
        Ok(())
    }

    /// Add one unit to a line already in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the cart.
    pub fn increment(&mut self, item_id: &MenuItemId) -> Result<u32> {
        Ok(self.cart.increment(item_id)?)
    }

    /// Remove one unit; the line goes away at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the cart.
    pub fn decrement(&mut self, item_id: &MenuItemId) -> Result<u32> {
        Ok(self.cart.decrement(item_id)?)
    }

    /// Remove a line entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the item is not in the cart.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, item_id: &MenuItemId) -> Result<()> {
        let removed = self.cart.remove(item_id)?;
        info!(name = removed.name(), "Removed from cart");
        Ok(())
    }

    pub fn set_special_instructions(&mut self, instructions: impl Into<String>) {
        self.cart.set_special_instructions(instructions);
    }

    pub fn set_cart_promo_code(&mut self, code: &str) {
        self.cart.set_promo_code(code);
    }

    /// Gate for moving from the cart to checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty.
    pub fn proceed_to_checkout(&self) -> Result<()> {
        self.cart.proceed_to_checkout().map_err(|e| {
            warn!("Checkout attempted with an empty cart");
            AppError::from(e)
        })
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    #[must_use]
    pub const fn checkout_form(&self) -> &CheckoutForm {
        &self.checkout
    }

    pub const fn checkout_form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.checkout
    }

    #[must_use]
    pub const fn addresses(&self) -> &AddressBook {
        &self.addresses
    }

    #[must_use]
    pub fn address_views(&self) -> Vec<AddressView> {
        self.addresses.iter().map(AddressView::from).collect()
    }

    #[must_use]
    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    #[must_use]
    pub fn payment_method_views(&self) -> Vec<PaymentMethodView> {
        self.payment_methods.iter().map(PaymentMethodView::from).collect()
    }

    /// Save a new delivery address and select it.
    ///
    /// # Errors
    ///
    /// Returns an error if an address with the same id exists.
    #[instrument(skip(self, address), fields(address_id = %address.id()))]
    pub fn add_address(&mut self, address: Address) -> Result<()> {
        let id = address.id().clone();
        self.addresses.add(address)?;
        self.checkout.select_address(&id);
        info!("Address added");
        Ok(())
    }

    /// Submit the checkout form for the current cart.
    ///
    /// On success the cart is cleared and a tracker starts for the new order,
    /// replacing any previous one. Must be called within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is empty or the form is invalid; the
    /// cart is left untouched.
    #[instrument(skip(self, now))]
    pub fn place_order(&mut self, now: DateTime<Utc>) -> Result<PlacedOrder> {
        let account = SavedAccount {
            addresses: &self.addresses,
            payment_methods: &self.payment_methods,
        };
        let order = self.checkout.submit_for(&self.cart, account, now).map_err(|e| {
            warn!(error = %e, "Order rejected");
            AppError::from(e)
        })?;

        info!(
            order_id = %order.order_id,
            total = %order.summary.display_grand_total(),
            "Order placed"
        );

        self.cart.clear();
        let config = self.state.config();
        self.tracker = Some(OrderTracker::start(
            order.order_id.clone(),
            order.status,
            config.tracking_interval,
            &config.estimated_delivery,
        ));
        self.last_order = Some(order.clone());
        Ok(order)
    }

    #[must_use]
    pub const fn last_order(&self) -> Option<&PlacedOrder> {
        self.last_order.as_ref()
    }

    // =========================================================================
    // Tracking
    // =========================================================================

    #[must_use]
    pub const fn tracker(&self) -> Option<&OrderTracker> {
        self.tracker.as_ref()
    }

    pub const fn tracker_mut(&mut self) -> Option<&mut OrderTracker> {
        self.tracker.as_mut()
    }

    /// Detach from the tracking page; scheduled updates stop.
    pub fn stop_tracking(&mut self) {
        if let Some(mut tracker) = self.tracker.take() {
            tracker.stop();
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("cart_items", &self.cart.item_count())
            .field("addresses", &self.addresses.len())
            .field("tracker", &self.tracker)
            .finish_non_exhaustive()
    }
}
