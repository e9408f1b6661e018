//! Timer-driven order tracking.
//!
//! An [`OrderTracker`] owns one background task that advances a
//! [`StatusProgression`] every `period`. Views read the latest
//! [`TrackingSnapshot`] through a watch channel.
//!
//! The task ends on its own once the order reaches a terminal status, and is
//! aborted by [`OrderTracker::stop`] or when the tracker is dropped, so a
//! tracker never leaves a timer running behind it.

use std::time::Duration;

use chrono::{DateTime, Utc};
use quickbite_core::tracking::{StatusProgression, StepView, TickOutcome, TrackingError};
use quickbite_core::{OrderId, OrderStatus};
use serde::Serialize;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, info, instrument};

/// What the status page renders for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackingSnapshot {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub label: &'static str,
    pub progress_percent: u8,
    pub estimated_delivery: String,
    pub steps: Vec<StepView>,
    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl TrackingSnapshot {
    fn capture(order_id: &OrderId, progression: &StatusProgression) -> Self {
        let status = progression.current();
        Self {
            order_id: order_id.clone(),
            status,
            label: status.label(),
            progress_percent: progression.progress_percent(),
            estimated_delivery: progression.estimated_delivery().to_owned(),
            steps: progression.steps(),
            updated_at: Utc::now(),
        }
    }

    /// Whether the order has stopped moving.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

type Reply = oneshot::Sender<Result<(), TrackingError>>;

enum Command {
    Cancel(Reply),
    Fail(Reply),
}

/// Handle to a running order progression.
pub struct OrderTracker {
    order_id: OrderId,
    snapshots: watch::Receiver<TrackingSnapshot>,
    commands: mpsc::Sender<Command>,
    task: Option<JoinHandle<()>>,
}

impl OrderTracker {
    /// Start tracking an order.
    ///
    /// The first status change happens one full `period` after start. No
    /// background task is spawned when `initial` is already terminal.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    #[instrument(skip(order_id, estimated_delivery), fields(order_id = %order_id))]
    pub fn start(
        order_id: OrderId,
        initial: OrderStatus,
        period: Duration,
        estimated_delivery: &str,
    ) -> Self {
        let progression = StatusProgression::new(initial).with_estimated_delivery(estimated_delivery);
        let (snapshot_tx, snapshots) =
            watch::channel(TrackingSnapshot::capture(&order_id, &progression));
        let (commands, command_rx) = mpsc::channel(4);

        let task = if progression.is_halted() {
            debug!(status = %progression.current(), "Order already terminal, not scheduling updates");
            None
        } else {
            info!(status = %progression.current(), ?period, "Order tracking started");
            Some(tokio::spawn(run(
                order_id.clone(),
                progression,
                Instant::now() + period,
                period,
                snapshot_tx,
                command_rx,
            )))
        };

        Self {
            order_id,
            snapshots,
            commands,
            task,
        }
    }

    #[must_use]
    pub const fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> TrackingSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every status change.
    ///
    /// `changed()` on the receiver errors once updates have stopped.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TrackingSnapshot> {
        self.snapshots.clone()
    }

    /// Whether the background task is still scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the order.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::AlreadyTerminal`] if the order already ended,
    /// or [`TrackingError::Stopped`] after [`OrderTracker::stop`].
    pub async fn cancel(&self) -> Result<(), TrackingError> {
        self.send(Command::Cancel).await
    }

    /// Mark the order as failed.
    ///
    /// # Errors
    ///
    /// Returns [`TrackingError::AlreadyTerminal`] if the order already ended,
    /// or [`TrackingError::Stopped`] after [`OrderTracker::stop`].
    pub async fn fail(&self) -> Result<(), TrackingError> {
        self.send(Command::Fail).await
    }

    async fn send(&self, command: fn(Reply) -> Command) -> Result<(), TrackingError> {
        if self.task.is_none() {
            return Err(self.rejection());
        }

        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .await
            .map_err(|_| self.rejection())?;
        response.await.map_err(|_| self.rejection())?
    }

    /// Why the task can no longer take commands.
    fn rejection(&self) -> TrackingError {
        let status = self.snapshots.borrow().status;
        if status.is_terminal() {
            TrackingError::AlreadyTerminal(status)
        } else {
            TrackingError::Stopped(status)
        }
    }

    /// Wait for the order to reach a terminal status.
    ///
    /// Returns immediately if no task is running. Dropping the returned future
    /// early leaves the task owned by the tracker, so `stop` still aborts it.
    pub async fn finished(&mut self) {
        if let Some(task) = self.task.as_mut() {
            // An aborted task is the only error and means we're done anyway.
            let _ = task.await;
            self.task = None;
        }
    }

    /// Stop scheduled updates. The last snapshot stays readable.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!(order_id = %self.order_id, "Order tracking stopped");
        }
    }
}

impl Drop for OrderTracker {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for OrderTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderTracker")
            .field("order_id", &self.order_id)
            .field("status", &self.snapshots.borrow().status)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

/// Background loop: one progression step per period until terminal.
async fn run(
    order_id: OrderId,
    mut progression: StatusProgression,
    first_tick: Instant,
    period: Duration,
    snapshots: watch::Sender<TrackingSnapshot>,
    mut commands: mpsc::Receiver<Command>,
) {
    let mut ticker = interval_at(first_tick, period);
    let publish = |progression: &StatusProgression| {
        snapshots.send_replace(TrackingSnapshot::capture(&order_id, progression));
    };

    loop {
        tokio::select! {
            _ = ticker.tick() => match progression.tick() {
                TickOutcome::Advanced(status) => {
                    info!(order_id = %order_id, %status, "Order status advanced");
                    publish(&progression);
                }
                TickOutcome::Delivered => {
                    info!(order_id = %order_id, "Order delivered");
                    publish(&progression);
                    break;
                }
                TickOutcome::Halted => break,
            },
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };
                let (result, reply) = match command {
                    Command::Cancel(reply) => (progression.cancel(), reply),
                    Command::Fail(reply) => (progression.fail(), reply),
                };
                if result.is_ok() {
                    info!(order_id = %order_id, status = %progression.current(), "Order aborted");
                    publish(&progression);
                }
                // The caller may have stopped waiting; the state change stands either way.
                let _ = reply.send(result);
                if progression.is_halted() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_secs(15);

    fn start(initial: OrderStatus) -> OrderTracker {
        OrderTracker::start(OrderId::new("ORD-TEST"), initial, PERIOD, "4:30 PM - 4:45 PM")
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_snapshot() {
        let tracker = start(OrderStatus::Confirmed);
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.status, OrderStatus::Confirmed);
        assert_eq!(snapshot.progress_percent, 25);
        assert_eq!(snapshot.label, "Order Confirmed");
        assert_eq!(snapshot.estimated_delivery, "4:30 PM - 4:45 PM");
        assert!(tracker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_full_period() {
        let tracker = start(OrderStatus::Confirmed);

        tokio::time::sleep(PERIOD - Duration::from_secs(1)).await;
        assert_eq!(tracker.snapshot().status, OrderStatus::Confirmed);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(tracker.snapshot().status, OrderStatus::Preparing);
        assert_eq!(tracker.snapshot().progress_percent, 50);
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_periods_reach_delivered_and_release_timer() {
        let mut tracker = start(OrderStatus::Confirmed);
        let mut updates = tracker.subscribe();

        let mut seen = Vec::new();
        while updates.changed().await.is_ok() {
            seen.push(updates.borrow_and_update().status);
        }
        assert_eq!(
            seen,
            vec![
                OrderStatus::Preparing,
                OrderStatus::OutForDelivery,
                OrderStatus::Delivered
            ]
        );

        tracker.finished().await;
        assert!(!tracker.is_running());
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.estimated_delivery, "Delivered!");
        assert_eq!(snapshot.progress_percent, 100);
        assert!(snapshot.is_terminal());
    }

    #[tokio::test(start_paused = true)]
    async fn test_starting_delivered_spawns_nothing() {
        let tracker = start(OrderStatus::Delivered);
        assert!(!tracker.is_running());
        assert_eq!(tracker.snapshot().estimated_delivery, "Delivered!");

        tokio::time::sleep(PERIOD * 10).await;
        assert_eq!(tracker.snapshot().status, OrderStatus::Delivered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_halts_progression() {
        let mut tracker = start(OrderStatus::Confirmed);
        tokio::time::sleep(PERIOD + Duration::from_secs(1)).await;
        assert_eq!(tracker.snapshot().status, OrderStatus::Preparing);

        tracker.cancel().await.unwrap();
        tracker.finished().await;
        assert!(!tracker.is_running());

        tokio::time::sleep(PERIOD * 10).await;
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.status, OrderStatus::Cancelled);
        assert_eq!(snapshot.label, "Order Cancelled");
        assert_eq!(snapshot.progress_percent, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_then_cancel_is_rejected() {
        let tracker = start(OrderStatus::Preparing);
        tracker.fail().await.unwrap();
        assert_eq!(tracker.snapshot().status, OrderStatus::Failed);
        assert_eq!(
            tracker.cancel().await,
            Err(TrackingError::AlreadyTerminal(OrderStatus::Failed))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_after_delivery_is_rejected() {
        let mut tracker = start(OrderStatus::OutForDelivery);
        tracker.finished().await;
        assert_eq!(
            tracker.cancel().await,
            Err(TrackingError::AlreadyTerminal(OrderStatus::Delivered))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_task() {
        let tracker = start(OrderStatus::Confirmed);
        let mut updates = tracker.subscribe();
        drop(tracker);

        assert!(updates.changed().await.is_err());
        assert_eq!(updates.borrow().status, OrderStatus::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshot_json() {
        let tracker = start(OrderStatus::OutForDelivery);
        let json = serde_json::to_value(tracker.snapshot()).unwrap();
        assert_eq!(json["status"], "OUT_FOR_DELIVERY");
        assert_eq!(json["label"], "Out for Delivery");
        assert_eq!(json["progress_percent"], 75);
        assert_eq!(json["steps"].as_array().unwrap().len(), 4);
        assert_eq!(json["steps"][2]["current"], true);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_keeps_last_snapshot() {
        let mut tracker = start(OrderStatus::Confirmed);
        tokio::time::sleep(PERIOD * 2 + Duration::from_secs(1)).await;
        tracker.stop();
        assert!(!tracker.is_running());

        tokio::time::sleep(PERIOD * 5).await;
        assert_eq!(tracker.snapshot().status, OrderStatus::OutForDelivery);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_after_abandoned_wait_halts_timer() {
        let mut tracker = start(OrderStatus::Confirmed);

        let waited = tokio::time::timeout(Duration::from_secs(1), tracker.finished()).await;
        assert!(waited.is_err());
        assert!(tracker.is_running());

        tracker.stop();
        assert!(!tracker.is_running());

        tokio::time::sleep(PERIOD * 5).await;
        assert_eq!(tracker.snapshot().status, OrderStatus::Confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_commands_after_stop_report_stopped() {
        let mut tracker = start(OrderStatus::Confirmed);
        tokio::time::sleep(PERIOD + Duration::from_secs(1)).await;
        tracker.stop();

        assert_eq!(
            tracker.cancel().await,
            Err(TrackingError::Stopped(OrderStatus::Preparing))
        );
        assert_eq!(
            tracker.fail().await,
            Err(TrackingError::Stopped(OrderStatus::Preparing))
        );
    }
}
