//! Order status progression.
//!
//! [`StatusProgression`] is the pure state machine behind the order tracking
//! page. It walks the happy path one step per tick and knows nothing about
//! time; the runtime decides when ticks happen.

use serde::Serialize;

use crate::types::OrderStatus;

/// The happy-path sequence an order advances through.
pub const HAPPY_PATH: [OrderStatus; 4] = [
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

/// Estimated-delivery text once the order has arrived.
pub const DELIVERED_MESSAGE: &str = "Delivered!";

/// Estimated-delivery text used when none is supplied.
pub const DEFAULT_ESTIMATED_DELIVERY: &str = "4:30 PM - 4:45 PM";

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingError {
    #[error("order is already {0}")]
    AlreadyTerminal(OrderStatus),

    /// Updates were stopped before the order ended; it sits at this status.
    #[error("tracking stopped while order was {0}")]
    Stopped(OrderStatus),
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Moved to a new non-final status.
    Advanced(OrderStatus),
    /// Moved to `Delivered`; no further ticks will do anything.
    Delivered,
    /// Already terminal; nothing changed.
    Halted,
}

/// One row of the status display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepView {
    pub status: OrderStatus,
    pub label: &'static str,
    /// Reached or passed.
    pub active: bool,
    /// The status the order is in right now.
    pub current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusProgression {
    index: usize,
    /// Set when the order was cancelled or failed.
    aborted: Option<OrderStatus>,
    estimated_delivery: String,
}

impl Default for StatusProgression {
    fn default() -> Self {
        Self::new(OrderStatus::Confirmed)
    }
}

impl StatusProgression {
    /// Start at `initial`.
    ///
    /// Statuses outside the happy path start at its first step, except
    /// `Cancelled` and `Failed`, which start halted.
    #[must_use]
    pub fn new(initial: OrderStatus) -> Self {
        Self {
            index: HAPPY_PATH.iter().position(|s| *s == initial).unwrap_or(0),
            aborted: initial.is_aborted().then_some(initial),
            estimated_delivery: if initial == OrderStatus::Delivered {
                DELIVERED_MESSAGE.to_owned()
            } else {
                DEFAULT_ESTIMATED_DELIVERY.to_owned()
            },
        }
    }

    /// Replace the estimated-delivery text shown before delivery.
    #[must_use]
    pub fn with_estimated_delivery(mut self, estimate: impl Into<String>) -> Self {
        if !self.is_delivered() {
            self.estimated_delivery = estimate.into();
        }
        self
    }

    #[must_use]
    pub fn current(&self) -> OrderStatus {
        self.aborted.unwrap_or_else(|| {
            HAPPY_PATH
                .get(self.index)
                .copied()
                .unwrap_or(OrderStatus::Delivered)
        })
    }

    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        self.current().progress_percent()
    }

    #[must_use]
    pub fn estimated_delivery(&self) -> &str {
        &self.estimated_delivery
    }

    /// Whether further ticks are no-ops.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.current().is_terminal()
    }

    fn is_delivered(&self) -> bool {
        self.current() == OrderStatus::Delivered
    }

    /// Advance one step along the happy path.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_halted() || self.index + 1 >= HAPPY_PATH.len() {
            return TickOutcome::Halted;
        }
        self.index += 1;

        let status = self.current();
        if status == OrderStatus::Delivered {
            DELIVERED_MESSAGE.clone_into(&mut self.estimated_delivery);
            TickOutcome::Delivered
        } else {
            TickOutcome::Advanced(status)
        }
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::AlreadyTerminal`] if the order already ended.
    pub fn cancel(&mut self) -> Result<(), TrackingError> {
        self.abort(OrderStatus::Cancelled)
    }

    /// Mark the order as failed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::AlreadyTerminal`] if the order already ended.
    pub fn fail(&mut self) -> Result<(), TrackingError> {
        self.abort(OrderStatus::Failed)
    }

    fn abort(&mut self, status: OrderStatus) -> Result<(), TrackingError> {
        let current = self.current();
        if current.is_terminal() {
            return Err(TrackingError::AlreadyTerminal(current));
        }
        self.aborted = Some(status);
        Ok(())
    }

    /// Display rows for the happy path.
    ///
    /// Cancelled and failed orders render as a single status label instead,
    /// so every row is inactive for them.
    #[must_use]
    pub fn steps(&self) -> Vec<StepView> {
        let live = self.aborted.is_none();
        HAPPY_PATH
            .iter()
            .enumerate()
            .map(|(i, status)| StepView {
                status: *status,
                label: status.label(),
                active: live && i <= self.index,
                current: live && i == self.index,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_three_ticks_reach_delivered() {
        let mut progression = StatusProgression::default();
        assert_eq!(progression.current(), OrderStatus::Confirmed);
        assert_eq!(progression.progress_percent(), 25);

        assert_eq!(progression.tick(), TickOutcome::Advanced(OrderStatus::Preparing));
        assert_eq!(
            progression.tick(),
            TickOutcome::Advanced(OrderStatus::OutForDelivery)
        );
        assert_eq!(progression.estimated_delivery(), DEFAULT_ESTIMATED_DELIVERY);
        assert_eq!(progression.tick(), TickOutcome::Delivered);

        assert_eq!(progression.current(), OrderStatus::Delivered);
        assert_eq!(progression.progress_percent(), 100);
        assert_eq!(progression.estimated_delivery(), "Delivered!");
        assert!(progression.is_halted());
    }

    #[test]
    fn test_ticks_after_delivered_are_noops() {
        let mut progression = StatusProgression::new(OrderStatus::OutForDelivery);
        assert_eq!(progression.tick(), TickOutcome::Delivered);
        for _ in 0..5 {
            assert_eq!(progression.tick(), TickOutcome::Halted);
        }
        assert_eq!(progression.current(), OrderStatus::Delivered);
    }

    #[test]
    fn test_starting_delivered_is_halted() {
        let mut progression = StatusProgression::new(OrderStatus::Delivered);
        assert!(progression.is_halted());
        assert_eq!(progression.estimated_delivery(), DELIVERED_MESSAGE);
        assert_eq!(progression.tick(), TickOutcome::Halted);
    }

    #[test]
    fn test_pending_starts_at_first_step() {
        let progression = StatusProgression::new(OrderStatus::Pending);
        assert_eq!(progression.current(), OrderStatus::Confirmed);
    }

    #[test]
    fn test_cancel_stops_progression() {
        let mut progression = StatusProgression::default();
        progression.tick();
        progression.cancel().unwrap();

        assert_eq!(progression.current(), OrderStatus::Cancelled);
        assert_eq!(progression.progress_percent(), 0);
        assert_eq!(progression.tick(), TickOutcome::Halted);
        assert_eq!(progression.current(), OrderStatus::Cancelled);
        assert!(progression.steps().iter().all(|s| !s.active));
    }

    #[test]
    fn test_cannot_abort_terminal_order() {
        let mut progression = StatusProgression::new(OrderStatus::Delivered);
        assert_eq!(
            progression.cancel(),
            Err(TrackingError::AlreadyTerminal(OrderStatus::Delivered))
        );

        let mut failed = StatusProgression::new(OrderStatus::Failed);
        assert!(failed.is_halted());
        assert_eq!(
            failed.cancel(),
            Err(TrackingError::AlreadyTerminal(OrderStatus::Failed))
        );
    }

    #[test]
    fn test_fail() {
        let mut progression = StatusProgression::new(OrderStatus::Preparing);
        progression.fail().unwrap();
        assert_eq!(progression.current(), OrderStatus::Failed);
        assert_eq!(progression.current().label(), "Order Failed");
    }

    #[test]
    fn test_steps_mark_active_and_current() {
        let progression = StatusProgression::new(OrderStatus::Preparing);
        let steps = progression.steps();
        let flags: Vec<_> = steps.iter().map(|s| (s.active, s.current)).collect();
        assert_eq!(
            flags,
            vec![(true, false), (true, true), (false, false), (false, false)]
        );
        assert_eq!(steps[0].label, "Order Confirmed");
        assert_eq!(steps[3].label, "Delivered");
    }

    #[test]
    fn test_custom_estimate_is_replaced_on_delivery() {
        let mut progression =
            StatusProgression::new(OrderStatus::OutForDelivery).with_estimated_delivery("6:00 PM");
        assert_eq!(progression.estimated_delivery(), "6:00 PM");
        progression.tick();
        assert_eq!(progression.estimated_delivery(), DELIVERED_MESSAGE);
    }
}
