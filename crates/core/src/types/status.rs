//! Order status values and their display mapping.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a placed order.
///
/// Exactly one status is current for an order at any time. `Delivered` ends
/// the happy path; `Cancelled` and `Failed` are alternate terminal states
/// that are never reached by automatic progression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    #[default]
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
    Cancelled,
    Failed,
}

impl OrderStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
        Self::Failed,
    ];

    /// Progress bar value shown for this status (0-100).
    #[must_use]
    pub const fn progress_percent(self) -> u8 {
        match self {
            Self::Pending | Self::Cancelled | Self::Failed => 0,
            Self::Confirmed => 25,
            Self::Preparing => 50,
            Self::OutForDelivery => 75,
            Self::Delivered => 100,
        }
    }

    /// Whether no further automatic transition can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled | Self::Failed)
    }

    /// Whether this is one of the off-path terminal states.
    #[must_use]
    pub const fn is_aborted(self) -> bool {
        matches!(self, Self::Cancelled | Self::Failed)
    }

    /// Human-readable label for the status display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Order Pending",
            Self::Confirmed => "Order Confirmed",
            Self::Preparing => "Preparing Food",
            Self::OutForDelivery => "Out for Delivery",
            Self::Delivered => "Delivered",
            Self::Cancelled => "Order Cancelled",
            Self::Failed => "Order Failed",
        }
    }

    /// The wire name, e.g. `OUT_FOR_DELIVERY`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Preparing => "PREPARING",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
            Self::Failed => "FAILED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == wanted)
            .ok_or_else(|| format!("invalid order status: {s}"))
    }
}
