//! Cart contents and the pricing rules derived from them.
//!
//! A [`Cart`] holds at most one [`CartLine`] per menu item and every line
//! has a quantity of at least one. All totals are recomputed from the lines
//! on each call.

use serde::{Deserialize, Serialize};

use super::{DELIVERY_FEE, MenuItem, MenuItemId, PLATFORM_FEE, Rupees};

/// One distinct menu item and its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: MenuItemId,
    pub name: String,
    pub price: Rupees,
    pub quantity: u32,
}

impl CartLine {
    /// Create a line with quantity one for a menu item.
    #[must_use]
    pub fn for_item(item: &MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name.to_owned(),
            price: item.price,
            quantity: 1,
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Rupees {
        self.price * self.quantity
    }
}

/// The active cart.
///
/// Serializes as a plain list of lines. Deserialization goes through
/// [`Cart::from_lines`], so a stored cart always satisfies the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from raw lines, restoring the cart invariants.
    ///
    /// Lines with quantity zero are dropped and repeated ids are merged into
    /// the first occurrence.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if line.quantity == 0 {
                continue;
            }
            match cart.line_mut(line.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Line for a menu item, if present.
    #[must_use]
    pub fn line(&self, id: MenuItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    fn line_mut(&mut self, id: MenuItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.id == id)
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a menu item.
    pub fn add(&mut self, item: &MenuItem) {
        match self.line_mut(item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::for_item(item)),
        }
    }

    /// Remove the line for `id`. Returns true if a line was removed.
    pub fn remove(&mut self, id: MenuItemId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != id);
        self.lines.len() != before
    }

    /// Change the quantity of a line by `delta`.
    ///
    /// A resulting quantity of zero or less removes the line. Returns true if
    /// the cart changed; an unknown id leaves the cart untouched.
    pub fn update_quantity(&mut self, id: MenuItemId, delta: i64) -> bool {
        let Some(line) = self.line_mut(id) else {
            return false;
        };

        let updated = i64::from(line.quantity).saturating_add(delta);
        if updated <= 0 {
            return self.remove(id);
        }

        line.quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        true
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of price times quantity over all lines.
    #[must_use]
    pub fn subtotal(&self) -> Rupees {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Total number of units, not the number of distinct lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    /// Delivery fee; zero for an empty cart.
    #[must_use]
    pub fn delivery_fee(&self) -> Rupees {
        if self.subtotal().is_zero() {
            Rupees::ZERO
        } else {
            DELIVERY_FEE
        }
    }

    /// Platform fee; zero for an empty cart.
    #[must_use]
    pub fn platform_fee(&self) -> Rupees {
        if self.subtotal().is_zero() {
            Rupees::ZERO
        } else {
            PLATFORM_FEE
        }
    }

    /// Amount charged at checkout: subtotal plus fees, or zero when empty.
    #[must_use]
    pub fn final_total(&self) -> Rupees {
        let subtotal = self.subtotal();
        if subtotal.is_zero() {
            return Rupees::ZERO;
        }
        subtotal + self.delivery_fee() + self.platform_fee()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
