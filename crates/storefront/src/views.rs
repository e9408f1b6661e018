//! Display data for the storefront pages.
//!
//! Views carry pre-formatted strings so renderers never touch decimals.

use quickbite_core::{
    Address, Cart, CartItem, CurrencyCode, DiscoveryFilter, MenuItem, OrderSummary, PaymentMethod,
    Price, Restaurant,
};
use serde::Serialize;

/// Shown for cart lines without their own image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://source.unsplash.com/random/80x80?food-item";

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image_url: String,
}

impl CartItemView {
    fn new(item: &CartItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_owned(),
            description: item.description().map(str::to_owned),
            quantity: item.quantity(),
            price: Price::new(item.unit_price(), currency).display(),
            line_price: Price::new(item.line_total(), currency).display(),
            image_url: item
                .image_url()
                .unwrap_or(PLACEHOLDER_IMAGE_URL)
                .to_owned(),
        }
    }
}

/// Order summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummaryView {
    pub subtotal: String,
    pub delivery_fee: String,
    pub taxes: String,
    pub grand_total: String,
}

impl From<&OrderSummary> for OrderSummaryView {
    fn from(summary: &OrderSummary) -> Self {
        Self {
            subtotal: summary.display_subtotal(),
            delivery_fee: summary.display_delivery_fee(),
            taxes: summary.display_taxes(),
            grand_total: summary.display_grand_total(),
        }
    }
}

/// Cart page display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub special_instructions: String,
    pub promo_code: Option<String>,
    pub summary: OrderSummaryView,
}

impl CartView {
    /// Whether the page should show the empty-cart notice instead of lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items()
                .iter()
                .map(|item| CartItemView::new(item, cart.currency()))
                .collect(),
            item_count: cart.item_count(),
            special_instructions: cart.special_instructions().to_owned(),
            promo_code: cart.promo_code().map(str::to_owned),
            summary: OrderSummaryView::from(&cart.summary()),
        }
    }
}

/// Stored card option on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentMethodView {
    pub id: String,
    pub label: String,
}

impl From<&PaymentMethod> for PaymentMethodView {
    fn from(method: &PaymentMethod) -> Self {
        Self {
            id: method.id().to_string(),
            label: method.to_string(),
        }
    }
}

/// Delivery address option on the checkout page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressView {
    pub id: String,
    pub kind: String,
    pub one_line: String,
    pub is_default: bool,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        Self {
            id: address.id().to_string(),
            kind: address.kind().to_string(),
            one_line: address.one_line(),
            is_default: address.is_default(),
        }
    }
}

/// Restaurant tile on the discovery page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RestaurantCardView {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub cuisines: Vec<String>,
    pub rating: f32,
    pub delivery_time: String,
}

impl From<&Restaurant> for RestaurantCardView {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id.to_string(),
            name: restaurant.name.clone(),
            image_url: restaurant.image_url.clone(),
            cuisines: restaurant.cuisines.clone(),
            rating: restaurant.rating,
            delivery_time: restaurant.delivery_time.clone(),
        }
    }
}

/// Discovery page: heading plus matching tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscoveryView {
    pub heading: &'static str,
    pub cuisines: Vec<CuisineChipView>,
    pub restaurants: Vec<RestaurantCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CuisineChipView {
    pub name: String,
    pub selected: bool,
}

impl DiscoveryView {
    #[must_use]
    pub fn new(filter: &DiscoveryFilter, chips: &[&str], matches: &[&Restaurant]) -> Self {
        Self {
            heading: filter.heading(),
            cuisines: chips
                .iter()
                .map(|name| CuisineChipView {
                    name: (*name).to_owned(),
                    selected: filter.is_selected(name),
                })
                .collect(),
            restaurants: matches.iter().copied().map(RestaurantCardView::from).collect(),
        }
    }
}

/// Menu entry with its display price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl MenuItemView {
    #[must_use]
    pub fn new(item: &MenuItem, currency: CurrencyCode) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            description: item.description.clone(),
            price: Price::new(item.price, currency).display(),
            image_url: item.image_url.clone(),
        }
    }
}

/// Restaurant menu page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuView {
    pub restaurant: RestaurantCardView,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub items: Vec<MenuItemView>,
}

impl MenuView {
    #[must_use]
    pub fn new(restaurant: &Restaurant, currency: CurrencyCode) -> Self {
        Self {
            restaurant: RestaurantCardView::from(restaurant),
            logo_url: restaurant.logo_url.clone(),
            cover_image_url: restaurant.cover_image_url.clone(),
            items: restaurant
                .menu
                .iter()
                .map(|item| MenuItemView::new(item, currency))
                .collect(),
        }
    }
}
