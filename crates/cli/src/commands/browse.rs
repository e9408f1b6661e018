//! Restaurant discovery and menu commands.
//!
//! # Usage
//!
//! ```bash
//! qb-cli discover --search "taco"
//! qb-cli discover --cuisine Italian --cuisine Chinese
//! qb-cli menu 2
//! ```

use quickbite_core::{DiscoveryFilter, RestaurantId};
use quickbite_storefront::{AppState, Session};

use super::{CommandError, print_json};

/// Print the restaurants matching the search text and cuisines.
///
/// # Errors
///
/// Returns an error if the session cannot be built or output fails.
pub fn discover(state: AppState, search: &str, cuisines: &[String]) -> Result<(), CommandError> {
    let session = Session::with_fixtures(state)?;

    let mut filter = DiscoveryFilter::new(search.trim());
    for cuisine in cuisines {
        if !filter.is_selected(cuisine) {
            filter.toggle_cuisine(cuisine);
        }
    }

    let view = session.discover(&filter);
    tracing::info!(
        matches = view.restaurants.len(),
        heading = view.heading,
        "Discovery complete"
    );
    print_json(&view)?;
    Ok(())
}

/// Print a restaurant's menu.
///
/// # Errors
///
/// Returns an error for an unknown restaurant id.
pub fn menu(state: AppState, restaurant_id: &str) -> Result<(), CommandError> {
    let session = Session::with_fixtures(state)?;
    let view = session.menu(&RestaurantId::new(restaurant_id.trim()))?;
    print_json(&view)?;
    Ok(())
}
