//! Command implementations.
//!
//! Each command drives the store and writes plain text to `out`. Nothing
//! here keeps state between runs; the store's snapshot does that.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod menu;
pub mod reviews;

use std::io::{self, Write};

use grado_core::Cart;

/// Write cart lines followed by the bill breakdown.
fn write_cart(out: &mut impl Write, cart: &Cart) -> io::Result<()> {
    for line in cart.lines() {
        writeln!(
            out,
            "  [{}] {:<22} {} x {:<3} {}",
            line.id,
            line.name,
            line.price,
            line.quantity,
            line.line_total()
        )?;
    }
    writeln!(out)?;
    writeln!(out, "  {:<14} {}", "Subtotal", cart.subtotal())?;
    writeln!(out, "  {:<14} {}", "Delivery Fee", cart.delivery_fee())?;
    writeln!(out, "  {:<14} {}", "Platform Fee", cart.platform_fee())?;
    writeln!(out, "  {:<14} {}", "Total", cart.final_total())
}
