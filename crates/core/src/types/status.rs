//! Status and choice enums for orders.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Delivery status of an order.
///
/// Statuses only move forward: confirmed, preparing, out for delivery,
/// delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Confirmed,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    /// All statuses in delivery order.
    pub const ALL: [Self; 4] = [
        Self::Confirmed,
        Self::Preparing,
        Self::OutForDelivery,
        Self::Delivered,
    ];

    /// One-based position on the tracking timeline.
    #[must_use]
    pub const fn step(self) -> u8 {
        match self {
            Self::Confirmed => 1,
            Self::Preparing => 2,
            Self::OutForDelivery => 3,
            Self::Delivered => 4,
        }
    }

    /// The following status, or `None` once delivered.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Confirmed => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }

    /// Headline shown for the current step.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Confirmed => "Order Confirmed!",
            Self::Preparing => "Preparing Your Food...",
            Self::OutForDelivery => "On the Way to Your Hostel!",
            Self::Delivered => "Delivered! Enjoy Your Meal!",
        }
    }

    /// Longer description shown under the headline.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Confirmed => "Your order has been confirmed and sent to the restaurant.",
            Self::Preparing => "Our chefs are preparing your delicious food.",
            Self::OutForDelivery => "Your order is on the way to your hostel.",
            Self::Delivered => "Your order has been delivered successfully!",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Confirmed => write!(f, "confirmed"),
            Self::Preparing => write!(f, "preparing"),
            Self::OutForDelivery => write!(f, "out-for-delivery"),
            Self::Delivered => write!(f, "delivered"),
        }
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// UPI transfer; requires an explicit confirmation step.
    Upi,
    /// Cash on delivery.
    Cod,
}

impl PaymentMethod {
    /// Returns true if the method needs the customer to confirm the charge.
    #[must_use]
    pub const fn requires_confirmation(self) -> bool {
        matches!(self, Self::Upi)
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upi => write!(f, "upi"),
            Self::Cod => write!(f, "cod"),
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upi" => Ok(Self::Upi),
            "cod" => Ok(Self::Cod),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}
