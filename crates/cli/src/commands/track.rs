//! Order tracking command.
//!
//! # Usage
//!
//! ```bash
//! # Follow a confirmed order with the configured interval
//! qb-cli track
//!
//! # Start out for delivery, one second per step
//! qb-cli track --status OUT_FOR_DELIVERY --interval-secs 1
//!
//! # Cancel after five seconds
//! qb-cli track --interval-secs 3 --cancel-after-secs 5
//! ```
//!
//! Each snapshot is printed as it changes; the command exits once the order
//! reaches a terminal status.

use std::time::Duration;

use quickbite_core::{OrderId, OrderStatus};
use quickbite_storefront::{OrderTracker, StorefrontConfig};
use tokio::time::{Instant, sleep_until};

use super::{CommandError, print_json};

/// Run a tracker and print every snapshot until it ends.
///
/// # Errors
///
/// Returns an error if output fails or the cancel request is rejected.
pub async fn run(
    config: &StorefrontConfig,
    status: OrderStatus,
    interval_secs: Option<u64>,
    cancel_after_secs: Option<u64>,
) -> Result<(), CommandError> {
    let period = interval_secs
        .filter(|secs| *secs > 0)
        .map_or(config.tracking_interval, Duration::from_secs);

    let mut tracker = OrderTracker::start(
        OrderId::generate(),
        status,
        period,
        &config.estimated_delivery,
    );
    let mut updates = tracker.subscribe();
    print_json(&*updates.borrow_and_update())?;

    let mut cancel_at = cancel_after_secs.map(|secs| Instant::now() + Duration::from_secs(secs));

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                print_json(&snapshot)?;
                if snapshot.is_terminal() {
                    break;
                }
            }
            () = async move {
                match cancel_at {
                    Some(deadline) => sleep_until(deadline).await,
                    None => std::future::pending().await,
                }
            } => {
                cancel_at = None;
                tracker.cancel().await.map_err(quickbite_storefront::AppError::from)?;
            }
        }
    }

    tracker.finished().await;
    tracing::info!(
        order_id = %tracker.order_id(),
        status = %tracker.snapshot().status,
        "Tracking finished"
    );
    Ok(())
}
