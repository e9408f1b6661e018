//! Restaurant catalog and discovery filtering.
//!
//! The catalog is a read-only snapshot supplied by whatever provides
//! restaurant data. Discovery narrows it by a free-text search on the
//! restaurant name and a set of selected cuisine chips.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MenuItemId, RestaurantId};

/// Highest rating a restaurant can carry.
pub const MAX_RATING: f32 = 5.0;

/// Errors from catalog construction and lookups.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("restaurant not found: {0}")]
    RestaurantNotFound(RestaurantId),
    #[error("menu item {item} not found at restaurant {restaurant}")]
    MenuItemNotFound {
        restaurant: RestaurantId,
        item: MenuItemId,
    },
    #[error("invalid restaurant: {0}")]
    InvalidRestaurant(String),
    #[error("invalid menu item: {0}")]
    InvalidMenuItem(String),
}

/// A dish or drink on a restaurant menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
}

impl MenuItem {
    /// Create a validated menu item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidMenuItem`] for a blank id or name, or a
    /// negative price.
    pub fn new(
        id: impl Into<MenuItemId>,
        name: &str,
        description: &str,
        price: Decimal,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CatalogError::InvalidMenuItem("id cannot be empty".into()));
        }
        if name.trim().is_empty() {
            return Err(CatalogError::InvalidMenuItem(format!(
                "{id}: name cannot be empty"
            )));
        }
        if price.is_sign_negative() {
            return Err(CatalogError::InvalidMenuItem(format!(
                "{id}: price cannot be negative"
            )));
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            description: description.trim().to_owned(),
            price,
            image_url: None,
        })
    }

    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// A restaurant listing with its menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub image_url: Option<String>,
    pub logo_url: Option<String>,
    pub cover_image_url: Option<String>,
    pub cuisines: Vec<String>,
    pub rating: f32,
    /// Delivery window label, e.g. `25-35 min`.
    pub delivery_time: String,
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Create a validated restaurant without a menu.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidRestaurant`] for a blank id or name, an
    /// empty cuisine list, or a rating outside `0.0..=5.0`.
    pub fn new(
        id: impl Into<RestaurantId>,
        name: &str,
        cuisines: &[&str],
        rating: f32,
        delivery_time: &str,
    ) -> Result<Self, CatalogError> {
        let id = id.into();
        if id.is_empty() || name.trim().is_empty() {
            return Err(CatalogError::InvalidRestaurant(
                "id and name are required".into(),
            ));
        }
        if cuisines.is_empty() {
            return Err(CatalogError::InvalidRestaurant(format!(
                "{id}: at least one cuisine is required"
            )));
        }
        if !(0.0..=MAX_RATING).contains(&rating) {
            return Err(CatalogError::InvalidRestaurant(format!(
                "{id}: rating {rating} out of range"
            )));
        }

        Ok(Self {
            id,
            name: name.trim().to_owned(),
            image_url: None,
            logo_url: None,
            cover_image_url: None,
            cuisines: cuisines.iter().map(|c| (*c).to_owned()).collect(),
            rating,
            delivery_time: delivery_time.to_owned(),
            menu: Vec::new(),
        })
    }

    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_branding(mut self, logo_url: impl Into<String>, cover_url: impl Into<String>) -> Self {
        self.logo_url = Some(logo_url.into());
        self.cover_image_url = Some(cover_url.into());
        self
    }

    #[must_use]
    pub fn with_menu(mut self, menu: Vec<MenuItem>) -> Self {
        self.menu = menu;
        self
    }

    /// The primary cuisine tag.
    #[must_use]
    pub fn cuisine(&self) -> &str {
        self.cuisines.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn menu_item(&self, id: &MenuItemId) -> Option<&MenuItem> {
        self.menu.iter().find(|item| &item.id == id)
    }
}

/// Search text and cuisine chips chosen on the discovery page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryFilter {
    pub search_term: String,
    pub selected_cuisines: Vec<String>,
}

impl DiscoveryFilter {
    #[must_use]
    pub fn new(search_term: impl Into<String>) -> Self {
        Self {
            search_term: search_term.into(),
            selected_cuisines: Vec::new(),
        }
    }

    /// Select the cuisine if unselected, otherwise deselect it.
    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        if let Some(pos) = self.selected_cuisines.iter().position(|c| c == cuisine) {
            self.selected_cuisines.remove(pos);
        } else {
            self.selected_cuisines.push(cuisine.to_owned());
        }
    }

    #[must_use]
    pub fn is_selected(&self, cuisine: &str) -> bool {
        self.selected_cuisines.iter().any(|c| c == cuisine)
    }

    /// Whether any search text or cuisine is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.search_term.is_empty() || !self.selected_cuisines.is_empty()
    }

    /// Name contains the search term (case-insensitive) and, if any cuisine
    /// is selected, the restaurant carries at least one of them.
    #[must_use]
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        let name_matches = restaurant
            .name
            .to_lowercase()
            .contains(&self.search_term.to_lowercase());
        let cuisine_matches = self.selected_cuisines.is_empty()
            || self
                .selected_cuisines
                .iter()
                .any(|c| restaurant.cuisines.contains(c));
        name_matches && cuisine_matches
    }

    /// Section heading above the result grid.
    #[must_use]
    pub fn heading(&self) -> &'static str {
        if self.is_active() {
            "Matching Restaurants"
        } else {
            "Popular Restaurants"
        }
    }
}

/// Read-only collection of restaurants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
}

impl Catalog {
    #[must_use]
    pub const fn new(restaurants: Vec<Restaurant>) -> Self {
        Self { restaurants }
    }

    #[must_use]
    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    /// Look up a restaurant.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] for an unknown id.
    pub fn restaurant(&self, id: &RestaurantId) -> Result<&Restaurant, CatalogError> {
        self.restaurants
            .iter()
            .find(|r| &r.id == id)
            .ok_or_else(|| CatalogError::RestaurantNotFound(id.clone()))
    }

    /// Look up a menu item at a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant or the item does not exist.
    pub fn menu_item(
        &self,
        restaurant_id: &RestaurantId,
        item_id: &MenuItemId,
    ) -> Result<&MenuItem, CatalogError> {
        self.restaurant(restaurant_id)?
            .menu_item(item_id)
            .ok_or_else(|| CatalogError::MenuItemNotFound {
                restaurant: restaurant_id.clone(),
                item: item_id.clone(),
            })
    }

    /// Restaurants matching the filter, in catalog order.
    #[must_use]
    pub fn discover(&self, filter: &DiscoveryFilter) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| filter.matches(r))
            .collect()
    }
}
