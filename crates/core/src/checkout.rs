//! Checkout form validation and order placement.
//!
//! The form mirrors what the checkout page collects: one selected delivery
//! address, one selected payment method (or the new-card sentinel with the
//! card fields), and an optional promo code. Validation reports every
//! offending field at once so the view can place each message next to its
//! input.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem};
use crate::pricing::OrderSummary;
use crate::types::{
    AddressBook, AddressId, NEW_CARD_PAYMENT_ID, OrderId, OrderStatus, PaymentChoice,
    PaymentMethod, PaymentMethodId,
};

pub const MSG_SELECT_ADDRESS: &str = "Please select a delivery address.";
pub const MSG_SELECT_PAYMENT: &str = "Please select a payment method.";
pub const MSG_CARD_NAME: &str = "Please enter the name on the card.";
pub const MSG_CARD_NUMBER: &str = "Card number must be 13-19 digits.";
pub const MSG_CARD_EXPIRY: &str = "Expiry must be a valid future date (MM/YY).";
pub const MSG_CARD_CVC: &str = "CVC must be 3 or 4 digits.";

const CARD_NUMBER_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;
const CVC_DIGITS: std::ops::RangeInclusive<usize> = 3..=4;

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckoutField {
    SelectedAddress,
    PaymentMethod,
    NewCardName,
    NewCardNumber,
    NewCardExpiry,
    NewCardCvc,
}

/// A message scoped to one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: CheckoutField,
    pub message: &'static str,
}

/// Every field-scoped violation found in one validation pass.
#[derive(thiserror::Error, Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[error("{}", .errors.iter().map(|e| e.message).collect::<Vec<_>>().join(" "))]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// The message for a field, if it failed.
    #[must_use]
    pub fn for_field(&self, field: CheckoutField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    fn push(&mut self, field: CheckoutField, message: &'static str) {
        self.errors.push(FieldError { field, message });
    }
}

/// Why an order could not be placed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more fields are invalid.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// There is nothing to order.
    #[error("Your cart is empty.")]
    EmptyCart,
}

/// Card fields typed in when the new-card option is selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCardDetails {
    pub name: String,
    pub number: String,
    /// `MM/YY`.
    pub expiry: String,
    pub cvc: String,
}

impl NewCardDetails {
    /// Card number with spaces and dashes removed.
    #[must_use]
    pub fn normalized_number(&self) -> String {
        self.number
            .chars()
            .filter(|c| !matches!(c, ' ' | '-'))
            .collect()
    }

    /// Last four digits of the normalized number.
    #[must_use]
    pub fn last4(&self) -> String {
        let digits = self.normalized_number();
        let start = digits.len().saturating_sub(4);
        digits.get(start..).unwrap_or_default().to_owned()
    }

    fn validate_into(&self, today: NaiveDate, errors: &mut ValidationErrors) {
        if self.name.trim().is_empty() {
            errors.push(CheckoutField::NewCardName, MSG_CARD_NAME);
        }
        if !is_digits_in(&self.normalized_number(), CARD_NUMBER_DIGITS) {
            errors.push(CheckoutField::NewCardNumber, MSG_CARD_NUMBER);
        }
        if !parse_expiry(&self.expiry).is_some_and(|exp| !is_expired(exp, today)) {
            errors.push(CheckoutField::NewCardExpiry, MSG_CARD_EXPIRY);
        }
        if !is_digits_in(self.cvc.trim(), CVC_DIGITS) {
            errors.push(CheckoutField::NewCardCvc, MSG_CARD_CVC);
        }
    }
}

fn is_digits_in(s: &str, len: std::ops::RangeInclusive<usize>) -> bool {
    len.contains(&s.len()) && s.chars().all(|c| c.is_ascii_digit())
}

/// Parse `MM/YY` into `(year, month)`.
fn parse_expiry(expiry: &str) -> Option<(i32, u32)> {
    let (mm, yy) = expiry.trim().split_once('/')?;
    if !is_digits_in(mm, 2..=2) || !is_digits_in(yy, 2..=2) {
        return None;
    }
    let month: u32 = mm.parse().ok()?;
    let year: i32 = yy.parse().ok()?;
    (1..=12).contains(&month).then_some((2000 + year, month))
}

/// A card is usable through the last day of its expiry month.
fn is_expired((year, month): (i32, u32), today: NaiveDate) -> bool {
    (year, month) < (today.year(), today.month())
}

/// The user's saved addresses and cards.
///
/// When given to validation, the selected address and stored card must be
/// one of these.
#[derive(Debug, Clone, Copy)]
pub struct SavedAccount<'a> {
    pub addresses: &'a AddressBook,
    pub payment_methods: &'a [PaymentMethod],
}

impl SavedAccount<'_> {
    fn has_address(&self, id: &str) -> bool {
        self.addresses.get(&AddressId::new(id)).is_some()
    }

    fn has_payment_method(&self, id: &PaymentMethodId) -> bool {
        self.payment_methods.iter().any(|method| method.id() == id)
    }
}

/// The checkout page's form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutForm {
    pub selected_address: String,
    pub payment_method: String,
    pub new_card: NewCardDetails,
    pub promo_code: Option<String>,
}

impl CheckoutForm {
    #[must_use]
    pub fn new(address_id: impl Into<String>, payment_id: impl Into<String>) -> Self {
        Self {
            selected_address: address_id.into(),
            payment_method: payment_id.into(),
            ..Self::default()
        }
    }

    /// Preselect the default address and the first stored card.
    #[must_use]
    pub fn prefilled(addresses: &AddressBook, payment_methods: &[PaymentMethod]) -> Self {
        Self::new(
            addresses
                .default_address()
                .map(|a| a.id().to_string())
                .unwrap_or_default(),
            payment_methods
                .first()
                .map(|p| p.id().to_string())
                .unwrap_or_default(),
        )
    }

    pub fn select_address(&mut self, id: &AddressId) {
        self.selected_address = id.to_string();
    }

    /// Select a payment method by its raw id (the sentinel included).
    pub fn select_payment(&mut self, id: &str) {
        self.payment_method = id.to_owned();
    }

    /// Switch to entering a new card.
    pub fn begin_new_card(&mut self) {
        self.payment_method = NEW_CARD_PAYMENT_ID.to_owned();
    }

    /// Whether the new-card fields should be shown.
    #[must_use]
    pub fn shows_new_card_form(&self) -> bool {
        self.payment_method == NEW_CARD_PAYMENT_ID
    }

    /// Store a promo code; blank input clears it.
    pub fn set_promo_code(&mut self, code: &str) {
        let code = code.trim();
        self.promo_code = (!code.is_empty()).then(|| code.to_owned());
    }

    /// Check every rule against the form.
    ///
    /// `today` decides whether a new card's expiry lies in the past.
    ///
    /// # Errors
    ///
    /// Returns all field-scoped violations.
    pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        self.check(today, None)
    }

    /// [`CheckoutForm::validate`], also rejecting an address or stored card
    /// the account does not have.
    ///
    /// # Errors
    ///
    /// Returns all field-scoped violations.
    pub fn validate_for(
        &self,
        today: NaiveDate,
        account: SavedAccount<'_>,
    ) -> Result<(), ValidationErrors> {
        self.check(today, Some(account))
    }

    fn check(
        &self,
        today: NaiveDate,
        account: Option<SavedAccount<'_>>,
    ) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let address = self.selected_address.trim();
        if address.is_empty() || account.is_some_and(|a| !a.has_address(address)) {
            errors.push(CheckoutField::SelectedAddress, MSG_SELECT_ADDRESS);
        }
        match PaymentChoice::parse(&self.payment_method) {
            None => errors.push(CheckoutField::PaymentMethod, MSG_SELECT_PAYMENT),
            Some(PaymentChoice::Stored { id })
                if account.is_some_and(|a| !a.has_payment_method(&id)) =>
            {
                errors.push(CheckoutField::PaymentMethod, MSG_SELECT_PAYMENT);
            }
            Some(choice) if choice.is_new_card() => {
                self.new_card.validate_into(today, &mut errors);
            }
            Some(_) => {}
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Place the order for the cart's current contents.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart, otherwise
    /// [`CheckoutError::Validation`] if any field is invalid.
    pub fn submit(&self, cart: &Cart, now: DateTime<Utc>) -> Result<PlacedOrder, CheckoutError> {
        self.place(cart, now, None)
    }

    /// [`CheckoutForm::submit`], checking selections against the account.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] for an empty cart, otherwise
    /// [`CheckoutError::Validation`] if any field is invalid or refers to an
    /// unknown address or card.
    pub fn submit_for(
        &self,
        cart: &Cart,
        account: SavedAccount<'_>,
        now: DateTime<Utc>,
    ) -> Result<PlacedOrder, CheckoutError> {
        self.place(cart, now, Some(account))
    }

    fn place(
        &self,
        cart: &Cart,
        now: DateTime<Utc>,
        account: Option<SavedAccount<'_>>,
    ) -> Result<PlacedOrder, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.check(now.date_naive(), account)
            .map_err(CheckoutError::Validation)?;

        let payment = match PaymentChoice::parse(&self.payment_method) {
            Some(PaymentChoice::NewCard { .. }) => PaymentChoice::NewCard {
                last4: self.new_card.last4(),
            },
            Some(stored) => stored,
            None => return Err(CheckoutError::Validation(ValidationErrors::default())),
        };

        Ok(PlacedOrder {
            order_id: OrderId::generate(),
            status: OrderStatus::Confirmed,
            items: cart.items().to_vec(),
            summary: cart.summary(),
            address_id: AddressId::new(self.selected_address.trim()),
            payment,
            promo_code: self
                .promo_code
                .clone()
                .or_else(|| cart.promo_code().map(str::to_owned)),
            special_instructions: Some(cart.special_instructions().trim().to_owned())
                .filter(|s| !s.is_empty()),
            placed_at: now,
        })
    }
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
    pub address_id: AddressId,
    pub payment: PaymentChoice,
    pub promo_code: Option<String>,
    pub special_instructions: Option<String>,
    pub placed_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    use super::*;
    use crate::types::{Address, AddressKind, PaymentMethodId};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap()
    }

    fn cart() -> Cart {
        Cart::with_items([
            CartItem::new("m1", "Margherita Pizza", Decimal::new(1299, 2), 1).unwrap(),
            CartItem::new("m4", "Coca-Cola", Decimal::new(250, 2), 2).unwrap(),
        ])
    }

    fn new_card_form() -> CheckoutForm {
        let mut form = CheckoutForm::new("addr1", "");
        form.begin_new_card();
        form.new_card = NewCardDetails {
            name: "John Doe".into(),
            number: "4242 4242 4242 4242".into(),
            expiry: "11/27".into(),
            cvc: "123".into(),
        };
        form
    }

    #[test]
    fn test_missing_address() {
        let form = CheckoutForm::new("", "pay1");
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.for_field(CheckoutField::SelectedAddress),
            Some("Please select a delivery address.")
        );
    }

    #[test]
    fn test_missing_both_reports_both() {
        let errors = CheckoutForm::default().validate(today()).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(CheckoutField::PaymentMethod),
            Some("Please select a payment method.")
        );
        assert_eq!(
            errors.to_string(),
            "Please select a delivery address. Please select a payment method."
        );
    }

    #[test]
    fn test_stored_card_ignores_new_card_fields() {
        let form = CheckoutForm::new("addr1", "pay1");
        assert!(form.validate(today()).is_ok());
        assert!(!form.shows_new_card_form());
    }

    #[test]
    fn test_valid_new_card() {
        let form = new_card_form();
        assert!(form.shows_new_card_form());
        assert!(form.validate(today()).is_ok());
    }

    #[test]
    fn test_blank_new_card_reports_every_field() {
        let mut form = CheckoutForm::new("addr1", "");
        form.begin_new_card();
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.for_field(CheckoutField::NewCardName), Some(MSG_CARD_NAME));
        assert_eq!(errors.for_field(CheckoutField::NewCardNumber), Some(MSG_CARD_NUMBER));
        assert_eq!(errors.for_field(CheckoutField::NewCardExpiry), Some(MSG_CARD_EXPIRY));
        assert_eq!(errors.for_field(CheckoutField::NewCardCvc), Some(MSG_CARD_CVC));
    }

    #[test]
    fn test_card_number_length_bounds() {
        let mut form = new_card_form();
        form.new_card.number = "1".repeat(12);
        assert!(form.validate(today()).is_err());
        form.new_card.number = "1".repeat(13);
        assert!(form.validate(today()).is_ok());
        form.new_card.number = "1".repeat(19);
        assert!(form.validate(today()).is_ok());
        form.new_card.number = "1".repeat(20);
        assert!(form.validate(today()).is_err());
        form.new_card.number = "4242-4242-4242-424x".into();
        assert!(form.validate(today()).is_err());
    }

    #[test]
    fn test_cvc_length_bounds() {
        let mut form = new_card_form();
        for (cvc, ok) in [("12", false), ("123", true), ("1234", true), ("12345", false), ("12a", false)] {
            form.new_card.cvc = cvc.into();
            assert_eq!(form.validate(today()).is_ok(), ok, "cvc {cvc}");
        }
    }

    #[test]
    fn test_expiry_rules() {
        let mut form = new_card_form();
        for (expiry, ok) in [
            ("10/26", true),
            ("09/26", false),
            ("12/25", false),
            ("01/30", true),
            ("13/27", false),
            ("00/27", false),
            ("1/27", false),
            ("11-27", false),
            ("+1/30", false),
            ("01/+3", false),
            ("", false),
        ] {
            form.new_card.expiry = expiry.into();
            assert_eq!(form.validate(today()).is_ok(), ok, "expiry {expiry:?}");
        }
    }

    #[test]
    fn test_submit_empty_cart_is_blocked() {
        let form = CheckoutForm::new("addr1", "pay1");
        assert_eq!(
            form.submit(&Cart::new(), now()),
            Err(CheckoutError::EmptyCart)
        );
    }

    #[test]
    fn test_submit_invalid_form_surfaces_errors() {
        let form = CheckoutForm::new("", "pay1");
        let Err(CheckoutError::Validation(errors)) = form.submit(&cart(), now()) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.for_field(CheckoutField::SelectedAddress), Some(MSG_SELECT_ADDRESS));
    }

    #[test]
    fn test_submit_stored_card() {
        let mut form = CheckoutForm::new("addr1", "pay2");
        form.set_promo_code("SPRING");
        let order = form.submit(&cart(), now()).unwrap();

        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.address_id.as_str(), "addr1");
        assert_eq!(
            order.payment,
            PaymentChoice::Stored {
                id: PaymentMethodId::new("pay2")
            }
        );
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.summary.display_grand_total(), "$24.43");
        assert_eq!(order.promo_code.as_deref(), Some("SPRING"));
        assert_eq!(order.placed_at, now());
    }

    #[test]
    fn test_submit_new_card_masks_number() {
        let order = new_card_form().submit(&cart(), now()).unwrap();
        assert_eq!(
            order.payment,
            PaymentChoice::NewCard {
                last4: "4242".into()
            }
        );
    }

    #[test]
    fn test_submit_carries_cart_extras() {
        let mut cart = cart();
        cart.set_promo_code("CARTCODE");
        cart.set_special_instructions("  extra spicy ");
        let order = CheckoutForm::new("addr1", "pay1").submit(&cart, now()).unwrap();
        assert_eq!(order.promo_code.as_deref(), Some("CARTCODE"));
        assert_eq!(order.special_instructions.as_deref(), Some("extra spicy"));
    }

    #[test]
    fn test_prefilled_uses_default_address_and_first_card() {
        let book: AddressBook = [
            Address::new("addr2", AddressKind::Work, "456 Office Ave", None, "Anytown", "12346")
                .unwrap(),
            Address::new("addr1", AddressKind::Home, "123 Main St", None, "Anytown", "12345")
                .unwrap()
                .as_default(),
        ]
        .into_iter()
        .collect();
        let cards = [
            PaymentMethod::new("pay1", "Visa", "1234", "12/25").unwrap(),
            PaymentMethod::new("pay2", "Mastercard", "5678", "10/26").unwrap(),
        ];

        let form = CheckoutForm::prefilled(&book, &cards);
        assert_eq!(form.selected_address, "addr1");
        assert_eq!(form.payment_method, "pay1");

        let empty = CheckoutForm::prefilled(&AddressBook::new(), &[]);
        assert!(empty.validate(today()).is_err());
    }

    #[test]
    fn test_submit_for_rejects_unknown_selections() {
        let book: AddressBook = [Address::new(
            "addr1",
            AddressKind::Home,
            "123 Main St",
            None,
            "Anytown",
            "12345",
        )
        .unwrap()]
        .into_iter()
        .collect();
        let cards = [PaymentMethod::new("pay1", "Visa", "1234", "12/25").unwrap()];
        let account = SavedAccount {
            addresses: &book,
            payment_methods: &cards,
        };

        let form = CheckoutForm::new("bogus", "pay9");
        let Err(CheckoutError::Validation(errors)) = form.submit_for(&cart(), account, now())
        else {
            panic!("expected validation errors");
        };
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.for_field(CheckoutField::SelectedAddress),
            Some(MSG_SELECT_ADDRESS)
        );
        assert_eq!(
            errors.for_field(CheckoutField::PaymentMethod),
            Some(MSG_SELECT_PAYMENT)
        );

        // Without the account only presence is checked.
        assert!(form.submit(&cart(), now()).is_ok());

        let mut new_card = new_card_form();
        new_card.selected_address = " addr1 ".into();
        assert!(new_card.validate_for(today(), account).is_ok());
        assert!(CheckoutForm::new("addr1", "pay1").submit_for(&cart(), account, now()).is_ok());
    }

    #[test]
    fn test_last4() {
        let card = NewCardDetails {
            number: "4000-0000-0000-0002".into(),
            ..NewCardDetails::default()
        };
        assert_eq!(card.last4(), "0002");
        assert_eq!(NewCardDetails::default().last4(), "");
    }
}
