//! Simulated delivery timeline for the current order.
//!
//! Tracking an order spawns one tokio task that walks the order through
//! [`OrderStatus::ALL`] at fixed offsets from the moment tracking starts:
//!
//! | status           | offset (time units) |
//! |------------------|---------------------|
//! | confirmed        | 0                   |
//! | preparing        | 2                   |
//! | out-for-delivery | 6                   |
//! | delivered        | 12                  |
//!
//! The current status is published on a [`tokio::sync::watch`] channel.
//! Timelines are keyed by order id: tracking a different order, calling
//! [`OrderTracker::stop`] or dropping the tracker aborts the pending
//! transitions so a superseded order never receives late updates.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info};

use grado_core::{Order, OrderId, OrderStatus};

/// Length of one timeline unit unless configured otherwise.
pub const DEFAULT_TIME_UNIT: Duration = Duration::from_secs(1);

/// When each status is reached, in time units after tracking starts.
pub const STATUS_SCHEDULE: [(OrderStatus, u32); 4] = [
    (OrderStatus::Confirmed, 0),
    (OrderStatus::Preparing, 2),
    (OrderStatus::OutForDelivery, 6),
    (OrderStatus::Delivered, 12),
];

/// Drives the delivery timeline of at most one order at a time.
#[derive(Debug)]
pub struct OrderTracker {
    unit: Duration,
    active: Option<Timeline>,
}

#[derive(Debug)]
struct Timeline {
    order_id: OrderId,
    status: Arc<watch::Sender<OrderStatus>>,
    task: JoinHandle<()>,
}

impl Drop for Timeline {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl Default for OrderTracker {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_UNIT)
    }
}

impl OrderTracker {
    /// Create a tracker whose schedule is measured in `unit`s.
    #[must_use]
    pub const fn new(unit: Duration) -> Self {
        Self { unit, active: None }
    }

    /// Start (or keep) the timeline for `order`.
    ///
    /// Tracking the order that is already tracked keeps its timeline;
    /// tracking any other order cancels the previous one first.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn track(&mut self, order: &Order) -> watch::Receiver<OrderStatus> {
        if let Some(timeline) = self.active.as_ref().filter(|t| t.order_id == order.id) {
            return timeline.status.subscribe();
        }

        self.stop();

        let (sender, receiver) = watch::channel(order.status);
        let status = Arc::new(sender);
        let task = tokio::spawn(run_schedule(Arc::clone(&status), self.unit));

        info!(order_id = %order.id, "Tracking order");
        self.active = Some(Timeline {
            order_id: order.id.clone(),
            status,
            task,
        });
        receiver
    }

    /// Cancel any pending transitions.
    pub fn stop(&mut self) {
        if let Some(timeline) = self.active.take() {
            debug!(order_id = %timeline.order_id, "Stopped tracking");
        }
    }

    /// Skip ahead one status, stopping at delivered.
    ///
    /// Returns the status after advancing, or `None` if nothing is tracked.
    pub fn advance(&self) -> Option<OrderStatus> {
        let timeline = self.active.as_ref()?;
        timeline.status.send_if_modified(|current| match current.next() {
            Some(next) => {
                *current = next;
                true
            }
            None => false,
        });
        let status = *timeline.status.borrow();
        debug!(order_id = %timeline.order_id, %status, "Advanced manually");
        Some(status)
    }

    /// Id of the tracked order.
    #[must_use]
    pub fn order_id(&self) -> Option<&OrderId> {
        self.active.as_ref().map(|t| &t.order_id)
    }

    /// Current status of the tracked order.
    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.active.as_ref().map(|t| *t.status.borrow())
    }

    /// Current one-based step of the tracked order.
    #[must_use]
    pub fn step(&self) -> Option<u8> {
        self.status().map(OrderStatus::step)
    }

    /// New receiver for the tracked order's status.
    #[must_use]
    pub fn subscribe(&self) -> Option<watch::Receiver<OrderStatus>> {
        self.active.as_ref().map(|t| t.status.subscribe())
    }
}

/// Share of the timeline completed, from 0 at confirmed to 100 at delivered.
#[must_use]
pub fn progress_percent(status: OrderStatus) -> u8 {
    let last = OrderStatus::Delivered.step() - 1;
    (status.step() - 1) * 100 / last
}

async fn run_schedule(status: Arc<watch::Sender<OrderStatus>>, unit: Duration) {
    let start = Instant::now();
    for (target, offset) in STATUS_SCHEDULE {
        sleep_until(start + unit * offset).await;
        // Manual advances may already be past this step.
        status.send_if_modified(|current| {
            if *current < target {
                *current = target;
                true
            } else {
                false
            }
        });
    }
}
