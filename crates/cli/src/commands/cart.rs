//! `grado cart`

use std::io::Write;

use grado_core::MenuItemId;
use grado_storefront::{AppError, AppStore, catalog};

use super::write_cart;
use crate::error::CliError;

/// Show cart contents and the bill.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show(store: &AppStore, out: &mut impl Write) -> Result<(), CliError> {
    if store.cart().is_empty() {
        writeln!(out, "Your cart is empty")?;
        return Ok(());
    }
    writeln!(out, "Your Cart ({} items)", store.cart_item_count())?;
    write_cart(out, store.cart())?;
    Ok(())
}

/// Add one of a dish.
///
/// # Errors
///
/// Returns `AppError::UnknownMenuItem` if no dish has this id.
pub fn add(store: &mut AppStore, out: &mut impl Write, id: MenuItemId) -> Result<(), CliError> {
    let item = catalog::find(id).ok_or(AppError::UnknownMenuItem(id))?;
    store.add_to_cart(item);

    let badge = if store.is_recently_added(id) { "Added!" } else { "Added" };
    writeln!(
        out,
        "{badge} {} ({} in cart, total {})",
        item.name,
        quantity(store, id),
        store.final_total()
    )?;
    store.acknowledge_added(id);
    Ok(())
}

/// Remove a dish entirely.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn remove(store: &mut AppStore, out: &mut impl Write, id: MenuItemId) -> Result<(), CliError> {
    match store.cart().line(id).map(|line| line.name.clone()) {
        Some(name) => {
            store.remove_from_cart(id);
            writeln!(out, "Removed {name}")?;
        }
        None => writeln!(out, "Item {id} is not in your cart")?,
    }
    Ok(())
}

/// Change a dish's quantity by `delta`; dropping to zero removes it.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn update(
    store: &mut AppStore,
    out: &mut impl Write,
    id: MenuItemId,
    delta: i64,
) -> Result<(), CliError> {
    let Some(name) = store.cart().line(id).map(|line| line.name.clone()) else {
        writeln!(out, "Item {id} is not in your cart")?;
        return Ok(());
    };

    store.update_quantity(id, delta);
    match quantity(store, id) {
        0 => writeln!(out, "Removed {name}")?,
        n => writeln!(out, "{name} x {n}")?,
    }
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn clear(store: &mut AppStore, out: &mut impl Write) -> Result<(), CliError> {
    store.clear_cart();
    writeln!(out, "Cart cleared")?;
    Ok(())
}

fn quantity(store: &AppStore, id: MenuItemId) -> u32 {
    store.cart().line(id).map_or(0, |line| line.quantity)
}
