//! Cart display command.

use quickbite_storefront::{AppState, Session};

use super::{CommandError, print_json};

/// Print the starter cart with its order summary.
///
/// # Errors
///
/// Returns an error if the session cannot be built or output fails.
pub fn show(state: AppState) -> Result<(), CommandError> {
    let session = Session::with_fixtures(state)?;
    print_json(&session.cart_view())?;
    Ok(())
}
