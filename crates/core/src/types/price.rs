//! Whole-unit rupee amounts and the storefront's fixed fees.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// An amount in whole rupees.
///
/// The menu has no fractional prices, so amounts are plain integers.
/// Arithmetic saturates instead of overflowing.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Rupees(u32);

impl Rupees {
    /// Zero rupees.
    pub const ZERO: Self = Self(0);

    /// Create an amount from whole rupees.
    #[must_use]
    pub const fn new(amount: u32) -> Self {
        Self(amount)
    }

    /// Get the amount in whole rupees.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₹{}", self.0)
    }
}

impl Add for Rupees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Rupees {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity))
    }
}

impl Sum for Rupees {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<u32> for Rupees {
    fn from(amount: u32) -> Self {
        Self(amount)
    }
}

/// Flat delivery fee charged on every non-empty cart.
pub const DELIVERY_FEE: Rupees = Rupees::new(20);

/// Flat platform fee charged on every non-empty cart.
pub const PLATFORM_FEE: Rupees = Rupees::new(5);
