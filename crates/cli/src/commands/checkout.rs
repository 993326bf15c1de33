//! `grado checkout`
//!
//! Places the order, then follows the simulated delivery until it lands
//! unless told not to.

use std::io::{BufRead, Write};
use std::time::Duration;

use grado_core::{Order, OrderStatus, PaymentMethod, Rupees};
use grado_storefront::services::checkout::{self, AutoConfirm, CheckoutForm, PaymentConfirmation};
use grado_storefront::tracking::progress_percent;
use grado_storefront::{AppStore, OrderTracker};

use super::write_cart;
use crate::error::CliError;

/// Everything `grado checkout` was asked to do.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub address: String,
    pub payment_method: Option<PaymentMethod>,
    /// Approve UPI payment without prompting.
    pub auto_confirm: bool,
    /// Follow the delivery timeline until delivered.
    pub follow: bool,
    pub timeline_unit: Duration,
}

/// Asks on the terminal before charging.
struct Prompt<'a, R, W> {
    input: &'a mut R,
    out: &'a mut W,
}

impl<R: BufRead, W: Write> PaymentConfirmation for Prompt<'_, R, W> {
    fn confirm(&mut self, method: PaymentMethod, amount: Rupees) -> bool {
        let asked = write!(self.out, "Confirm {method} payment of {amount}? [y/N] ")
            .and_then(|()| self.out.flush());
        if let Err(e) = asked {
            tracing::warn!(error = %e, "Could not ask for payment confirmation");
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read payment confirmation");
                false
            }
        }
    }
}

/// Place an order from the cart and optionally follow its delivery.
///
/// # Errors
///
/// Returns `CartError::Empty` for an empty cart and `CheckoutError` when
/// the order cannot be placed.
pub async fn run(
    store: &mut AppStore,
    input: &mut impl BufRead,
    out: &mut impl Write,
    request: CheckoutRequest,
) -> Result<(), CliError> {
    store.begin_checkout()?;

    writeln!(out, "Order Summary")?;
    write_cart(out, store.cart())?;
    writeln!(out)?;

    let form = CheckoutForm {
        address: request.address,
        payment_method: request.payment_method,
    };
    let order = if request.auto_confirm {
        checkout::place_order(store, &form, &mut AutoConfirm)?
    } else {
        let mut prompt = Prompt {
            input,
            out: &mut *out,
        };
        checkout::place_order(store, &form, &mut prompt)?
    };

    write_order(out, &order)?;

    if request.follow {
        follow(out, &order, request.timeline_unit).await?;
    }
    Ok(())
}

fn write_order(out: &mut impl Write, order: &Order) -> std::io::Result<()> {
    writeln!(out, "Order #{} placed!", order.id)?;
    writeln!(out, "  Deliver to:  {}", order.address)?;
    writeln!(out, "  Payment:     {} ({})", order.total, order.payment_method)?;
    writeln!(out, "  Estimated:   {}", order.estimated_time)
}

async fn follow(out: &mut impl Write, order: &Order, unit: Duration) -> Result<(), CliError> {
    let mut tracker = OrderTracker::new(unit);
    let mut status = tracker.track(order);

    loop {
        let current = *status.borrow_and_update();
        writeln!(
            out,
            "[{}/4] {:>3}%  {}",
            current.step(),
            progress_percent(current),
            current.title()
        )?;
        writeln!(out, "        {}", current.description())?;
        out.flush()?;

        if current == OrderStatus::Delivered || status.changed().await.is_err() {
            break;
        }
    }

    tracker.stop();
    writeln!(out, "Your order has been delivered! Enjoy your meal!")?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grado_core::{MenuItemId, Page};
    use grado_storefront::catalog;
    use grado_storefront::services::auth;
    use secrecy::SecretString;

    use super::*;

    fn ready_store() -> AppStore {
        let mut store = AppStore::new();
        store.add_to_cart(catalog::find(MenuItemId::new(1)).unwrap());
        store.add_to_cart(catalog::find(MenuItemId::new(3)).unwrap());
        auth::login_with_credentials(&mut store, "21CSE042", &SecretString::from("pw")).unwrap();
        store
    }

    fn request(payment: PaymentMethod, auto_confirm: bool, follow: bool) -> CheckoutRequest {
        CheckoutRequest {
            address: "Block A, Room 201".to_string(),
            payment_method: Some(payment),
            auto_confirm,
            follow,
            timeline_unit: Duration::from_secs(1),
        }
    }

    #[tokio::test]
    async fn test_cod_without_follow() {
        let mut store = ready_store();
        let mut out = Vec::new();
        run(&mut store, &mut &b""[..], &mut out, request(PaymentMethod::Cod, false, false))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Total          ₹355"));
        assert!(text.contains("placed!"));
        assert!(text.contains("Payment:     ₹355 (cod)"));
        assert!(!text.contains("[1/4]"));
        assert!(store.cart().is_empty());
        assert_eq!(store.current_page(), Page::Tracking);
    }

    #[tokio::test]
    async fn test_upi_prompt_declined() {
        let mut store = ready_store();
        let mut out = Vec::new();
        let upi = request(PaymentMethod::Upi, false, false);
        let err = run(&mut store, &mut &b"n\n"[..], &mut out, upi).await.unwrap_err();

        assert_eq!(err.to_string(), "Payment was cancelled");
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Confirm upi payment of ₹355? [y/N] "));
        assert_eq!(store.cart_item_count(), 2);
        assert!(store.current_order().is_none());
    }

    #[tokio::test]
    async fn test_upi_prompt_accepted() {
        let mut store = ready_store();
        let upi = request(PaymentMethod::Upi, false, false);
        run(&mut store, &mut &b"yes\n"[..], &mut Vec::new(), upi).await.unwrap();
        assert!(store.current_order().is_some());
    }

    #[tokio::test]
    async fn test_empty_cart() {
        let mut store = AppStore::new();
        let cod = request(PaymentMethod::Cod, true, false);
        let err = run(&mut store, &mut &b""[..], &mut Vec::new(), cod).await.unwrap_err();
        assert_eq!(err.to_string(), "Your cart is empty!");
    }

    #[tokio::test(start_paused = true)]
    async fn test_follows_timeline_to_delivery() {
        let mut store = ready_store();
        let mut out = Vec::new();
        run(&mut store, &mut &b""[..], &mut out, request(PaymentMethod::Upi, true, true))
            .await
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let steps: Vec<_> = text.lines().filter(|line| line.starts_with('[')).collect();
        assert_eq!(
            steps,
            [
                "[1/4]   0%  Order Confirmed!",
                "[2/4]  33%  Preparing Your Food...",
                "[3/4]  66%  On the Way to Your Hostel!",
                "[4/4] 100%  Delivered! Enjoy Your Meal!",
            ]
        );
        assert!(text.ends_with("Your order has been delivered! Enjoy your meal!\n"));
    }
}
