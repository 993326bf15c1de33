//! Placed orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CartLine, OrderId, OrderStatus, PaymentMethod, Rupees};

/// Estimated delivery window quoted for every order.
pub const ESTIMATED_DELIVERY: &str = "25-30 mins";

/// An order captured at checkout.
///
/// The line items are a snapshot of the cart at placement time; later cart
/// changes do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub items: Vec<CartLine>,
    pub total: Rupees,
    pub address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub estimated_time: String,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total number of units across all line items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }
}
