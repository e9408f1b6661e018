//! Stored payment methods and the payment selection of a checkout form.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::PaymentMethodId;

/// Payment id meaning "the user is entering a new card".
pub const NEW_CARD_PAYMENT_ID: &str = "new";

/// Errors that can occur when constructing a [`PaymentMethod`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentError {
    /// The identifier is blank.
    #[error("payment method id cannot be empty")]
    EmptyId,
    /// The identifier collides with the new-card sentinel.
    #[error("payment method id \"{NEW_CARD_PAYMENT_ID}\" is reserved")]
    ReservedId,
    /// The card network label is blank.
    #[error("card network cannot be empty")]
    EmptyNetwork,
    /// The last-4 value is not exactly four digits.
    #[error("last4 must be exactly 4 digits, got {0:?}")]
    InvalidLast4(String),
    /// The expiry string is blank.
    #[error("expiry cannot be empty")]
    EmptyExpiry,
}

/// A card the user has stored previously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    id: PaymentMethodId,
    network: String,
    last4: String,
    expiry: String,
}

impl PaymentMethod {
    /// Create a validated stored payment method.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is blank or equals the new-card sentinel,
    /// the network or expiry is blank, or `last4` is not four digits.
    pub fn new(
        id: impl Into<PaymentMethodId>,
        network: &str,
        last4: &str,
        expiry: &str,
    ) -> Result<Self, PaymentError> {
        let id = id.into();
        if id.is_empty() {
            return Err(PaymentError::EmptyId);
        }
        if id.as_str() == NEW_CARD_PAYMENT_ID {
            return Err(PaymentError::ReservedId);
        }
        if network.trim().is_empty() {
            return Err(PaymentError::EmptyNetwork);
        }
        if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(PaymentError::InvalidLast4(last4.to_owned()));
        }
        if expiry.trim().is_empty() {
            return Err(PaymentError::EmptyExpiry);
        }

        Ok(Self {
            id,
            network: network.trim().to_owned(),
            last4: last4.to_owned(),
            expiry: expiry.trim().to_owned(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> &PaymentMethodId {
        &self.id
    }

    #[must_use]
    pub fn network(&self) -> &str {
        &self.network
    }

    #[must_use]
    pub fn last4(&self) -> &str {
        &self.last4
    }

    #[must_use]
    pub fn expiry(&self) -> &str {
        &self.expiry
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ending in **** {} (Expires {})",
            self.network, self.last4, self.expiry
        )
    }
}

/// What a payment selection refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PaymentChoice {
    /// A previously stored card.
    Stored { id: PaymentMethodId },
    /// A card entered during checkout.
    NewCard {
        /// Last four digits of the entered number, for display.
        last4: String,
    },
}

impl PaymentChoice {
    /// Classify a raw payment selection.
    ///
    /// Returns `None` for a blank selection. The new-card variant carries an
    /// empty `last4`; checkout fills it once the card number is validated.
    #[must_use]
    pub fn parse(selected: &str) -> Option<Self> {
        let selected = selected.trim();
        if selected.is_empty() {
            None
        } else if selected == NEW_CARD_PAYMENT_ID {
            Some(Self::NewCard {
                last4: String::new(),
            })
        } else {
            Some(Self::Stored {
                id: PaymentMethodId::new(selected),
            })
        }
    }

    #[must_use]
    pub const fn is_new_card(&self) -> bool {
        matches!(self, Self::NewCard { .. })
    }
}
