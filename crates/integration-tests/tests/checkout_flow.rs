//! Integration tests for the cart-to-order flow.
//!
//! Runs entirely in-process against the mock catalog and account data.

#![allow(clippy::unwrap_used)]

use quickbite_core::checkout::{MSG_CARD_EXPIRY, MSG_SELECT_ADDRESS, MSG_SELECT_PAYMENT};
use quickbite_core::{
    Cart, CheckoutError, CheckoutField, MenuItemId, OrderStatus, PaymentChoice, RestaurantId,
};
use quickbite_integration_tests::{fixture_session, test_now};
use quickbite_storefront::AppError;
use rust_decimal::Decimal;

// ============================================================================
// Cart
// ============================================================================

#[test]
fn test_starter_cart_summary() {
    let session = fixture_session();
    let summary = session.cart().summary();

    assert_eq!(summary.subtotal.amount, Decimal::new(1799, 2));
    assert_eq!(summary.delivery_fee.amount, Decimal::new(500, 2));
    assert_eq!(summary.taxes.amount, Decimal::new(14392, 4));
    assert_eq!(summary.grand_total.amount, Decimal::new(244292, 4));

    let view = session.cart_view();
    assert_eq!(view.summary.taxes, "$1.44");
    assert_eq!(view.summary.grand_total, "$24.43");
}

#[test]
fn test_emptying_cart_zeroes_fee() {
    let mut session = fixture_session();
    session.decrement(&MenuItemId::new("m1")).unwrap();
    session.update_quantity(&MenuItemId::new("m4"), 0).unwrap();

    assert!(session.cart().is_empty());
    let summary = session.cart().summary();
    assert_eq!(summary.delivery_fee.amount, Decimal::ZERO);
    assert_eq!(summary.taxes.amount, Decimal::ZERO);
    assert_eq!(summary.grand_total.amount, Decimal::ZERO);
    assert!(session.proceed_to_checkout().is_err());
}

#[test]
fn test_items_from_two_restaurants() {
    let mut session = fixture_session();
    session
        .add_to_cart(&RestaurantId::new("2"), &MenuItemId::new("m6"))
        .unwrap();
    session
        .add_to_cart(&RestaurantId::new("2"), &MenuItemId::new("m6"))
        .unwrap();

    // 17.99 + 2 * 12.50 = 42.99; fee 5.00; tax 3.4392
    let summary = session.cart().summary();
    assert_eq!(summary.subtotal.amount, Decimal::new(4299, 2));
    assert_eq!(summary.display_grand_total(), "$51.43");
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_place_order_with_stored_card() {
    let mut session = fixture_session();
    session.proceed_to_checkout().unwrap();
    session.checkout_form_mut().select_payment("pay2");
    session.checkout_form_mut().set_promo_code("WELCOME");
    session.set_special_instructions("leave at door");
    session.set_cart_promo_code("IGNORED");

    let order = session.place_order(test_now()).unwrap();

    assert!(order.order_id.as_str().starts_with("ORD-"));
    assert_eq!(order.status, OrderStatus::Confirmed);
    assert_eq!(order.address_id.as_str(), "addr1");
    assert!(matches!(order.payment, PaymentChoice::Stored { .. }));
    assert_eq!(order.promo_code.as_deref(), Some("WELCOME"));
    assert_eq!(order.special_instructions.as_deref(), Some("leave at door"));
    assert_eq!(order.summary.display_grand_total(), "$24.43");
    assert!(session.cart().is_empty());
    assert!(session.tracker().unwrap().is_running());
}

#[tokio::test(start_paused = true)]
async fn test_place_order_with_new_card() {
    let mut session = fixture_session();
    let form = session.checkout_form_mut();
    form.begin_new_card();
    form.new_card.name = "John Doe".into();
    form.new_card.number = "4242 4242 4242 4242".into();
    form.new_card.expiry = "11/27".into();
    form.new_card.cvc = "123".into();

    let order = session.place_order(test_now()).unwrap();
    assert_eq!(
        order.payment,
        PaymentChoice::NewCard {
            last4: "4242".into()
        }
    );
}

#[test]
fn test_missing_address_blocks_order() {
    let mut session = fixture_session();
    session.checkout_form_mut().selected_address.clear();

    let err = session.place_order(test_now()).unwrap_err();
    let AppError::Checkout(CheckoutError::Validation(errors)) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        errors.for_field(CheckoutField::SelectedAddress),
        Some(MSG_SELECT_ADDRESS)
    );
    assert_eq!(session.cart().item_count(), 3);
}

#[test]
fn test_unknown_address_and_card_block_order() {
    let mut session = fixture_session();
    let form = session.checkout_form_mut();
    form.selected_address = "bogus".into();
    form.select_payment("pay9");

    let err = session.place_order(test_now()).unwrap_err();
    let AppError::Checkout(CheckoutError::Validation(errors)) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(
        errors.for_field(CheckoutField::SelectedAddress),
        Some(MSG_SELECT_ADDRESS)
    );
    assert_eq!(
        errors.for_field(CheckoutField::PaymentMethod),
        Some(MSG_SELECT_PAYMENT)
    );
    assert!(session.tracker().is_none());
    assert_eq!(session.cart().item_count(), 3);
}

#[test]
fn test_expired_new_card_blocks_order() {
    let mut session = fixture_session();
    let form = session.checkout_form_mut();
    form.begin_new_card();
    form.new_card.name = "John Doe".into();
    form.new_card.number = "4242424242424242".into();
    form.new_card.expiry = "09/26".into();
    form.new_card.cvc = "123".into();

    let err = session.place_order(test_now()).unwrap_err();
    assert_eq!(err.user_message(), MSG_CARD_EXPIRY);
}

#[test]
fn test_empty_cart_blocks_order() {
    let mut session = fixture_session().with_cart(Cart::new());
    let err = session.place_order(test_now()).unwrap_err();
    assert!(matches!(err, AppError::Checkout(CheckoutError::EmptyCart)));
    assert_eq!(err.user_message(), "Your cart is empty.");
    assert!(session.tracker().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_placed_order_serializes() {
    let mut session = fixture_session();
    let order = session.place_order(test_now()).unwrap();

    let json = serde_json::to_value(&order).unwrap();
    assert_eq!(json["status"], "CONFIRMED");
    assert_eq!(json["payment"]["kind"], "stored");
    assert_eq!(json["summary"]["grand_total"]["amount"], "24.4292");
}
