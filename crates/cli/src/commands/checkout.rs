//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! # Stored card, default address
//! qb-cli checkout
//!
//! # Work address, new card, promo code
//! qb-cli checkout --address addr2 --payment new --card-name "John Doe" \
//!     --card-number "4242 4242 4242 4242" --card-expiry 11/27 --card-cvc 123 \
//!     --promo SPRING
//! ```
//!
//! Invalid fields are printed as JSON before the command fails.

use chrono::Utc;
use clap::Args;
use quickbite_core::{CheckoutError, PlacedOrder};
use quickbite_storefront::views::OrderSummaryView;
use quickbite_storefront::{AppError, AppState, Session, TrackingSnapshot};
use serde::Serialize;

use super::{CommandError, print_json};

#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Delivery address id (defaults to the saved default)
    #[arg(long)]
    address: Option<String>,

    /// Stored payment method id, or `new` to enter a card
    #[arg(long)]
    payment: Option<String>,

    /// Name on the new card
    #[arg(long, default_value = "")]
    card_name: String,

    /// New card number
    #[arg(long, default_value = "")]
    card_number: String,

    /// New card expiry (MM/YY)
    #[arg(long, default_value = "")]
    card_expiry: String,

    /// New card CVC
    #[arg(long, default_value = "")]
    card_cvc: String,

    /// Promo code
    #[arg(long)]
    promo: Option<String>,

    /// Start from an empty cart
    #[arg(long)]
    empty_cart: bool,
}

#[derive(Serialize)]
struct CheckoutOutput<'a> {
    order: &'a PlacedOrder,
    summary: OrderSummaryView,
    tracking: TrackingSnapshot,
}

/// Fill in the checkout form and place the order.
///
/// # Errors
///
/// Returns an error if the cart is empty or any field is invalid.
pub fn run(state: AppState, args: &CheckoutArgs) -> Result<(), CommandError> {
    let mut session = Session::with_fixtures(state)?;
    if args.empty_cart {
        session = session.with_cart(quickbite_core::Cart::new());
    }

    let form = session.checkout_form_mut();
    if let Some(address) = &args.address {
        form.selected_address = address.trim().to_owned();
    }
    if let Some(payment) = &args.payment {
        form.select_payment(payment.trim());
    }
    if form.shows_new_card_form() {
        form.new_card.name.clone_from(&args.card_name);
        form.new_card.number.clone_from(&args.card_number);
        form.new_card.expiry.clone_from(&args.card_expiry);
        form.new_card.cvc.clone_from(&args.card_cvc);
    }
    if let Some(promo) = &args.promo {
        form.set_promo_code(promo);
    }

    let order = match session.place_order(Utc::now()) {
        Ok(order) => order,
        Err(AppError::Checkout(CheckoutError::Validation(errors))) => {
            print_json(&errors)?;
            return Err(AppError::Checkout(CheckoutError::Validation(errors)).into());
        }
        Err(e) => return Err(e.into()),
    };

    let tracking = session
        .tracker()
        .map(quickbite_storefront::OrderTracker::snapshot)
        .ok_or_else(|| AppError::NotFound(format!("Tracker for order {}", order.order_id)))?;

    print_json(&CheckoutOutput {
        order: &order,
        summary: OrderSummaryView::from(&order.summary),
        tracking,
    })?;
    Ok(())
}
