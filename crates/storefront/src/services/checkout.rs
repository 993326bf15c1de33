//! Mock checkout.
//!
//! Validates the checkout form against the store, asks for an explicit
//! confirmation when paying by UPI, then turns the cart into the current
//! order and moves to the tracking page. No payment is taken.

use chrono::Utc;
use rand::Rng;
use thiserror::Error;
use tracing::{info, instrument, warn};

use grado_core::{ESTIMATED_DELIVERY, Order, OrderId, OrderStatus, Page, PaymentMethod, Rupees};

use crate::error::add_breadcrumb;
use crate::store::AppStore;

/// Prefix of generated order ids.
pub const ORDER_ID_PREFIX: &str = "GRD";

/// Reasons an order was not placed.
///
/// The `Display` text is the message shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nothing to order; the customer is sent back to the menu.
    #[error("Your cart is empty")]
    EmptyCart,

    /// No user is signed in; the login modal is opened.
    #[error("Please login to place an order")]
    NotLoggedIn,

    /// Delivery address left blank.
    #[error("Please enter your delivery address")]
    MissingAddress,

    /// No payment method chosen.
    #[error("Please select a payment method")]
    MissingPaymentMethod,

    /// The customer declined the UPI confirmation.
    #[error("Payment was cancelled")]
    PaymentCancelled,
}

/// Values entered on the checkout page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub address: String,
    pub payment_method: Option<PaymentMethod>,
}

/// Asks the customer to approve a charge before the order is created.
pub trait PaymentConfirmation {
    /// Returns true if the customer approves paying `amount` by `method`.
    fn confirm(&mut self, method: PaymentMethod, amount: Rupees) -> bool;
}

impl<F> PaymentConfirmation for F
where
    F: FnMut(PaymentMethod, Rupees) -> bool,
{
    fn confirm(&mut self, method: PaymentMethod, amount: Rupees) -> bool {
        self(method, amount)
    }
}

/// Confirmation that approves every charge.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoConfirm;

impl PaymentConfirmation for AutoConfirm {
    fn confirm(&mut self, _method: PaymentMethod, _amount: Rupees) -> bool {
        true
    }
}

/// Generate an order id: the prefix followed by six random digits.
#[must_use]
pub fn generate_order_id() -> OrderId {
    let digits: u32 = rand::rng().random_range(0..1_000_000);
    OrderId::new(format!("{ORDER_ID_PREFIX}{digits:06}"))
}

/// Place an order from the current cart.
///
/// On success the order becomes the store's current order, the cart is
/// cleared and the store navigates to the tracking page.
///
/// # Errors
///
/// Checks run in this order and stop at the first failure:
/// - [`CheckoutError::EmptyCart`] (navigates to the menu)
/// - [`CheckoutError::NotLoggedIn`] (opens the login modal)
/// - [`CheckoutError::MissingAddress`]
/// - [`CheckoutError::MissingPaymentMethod`]
/// - [`CheckoutError::PaymentCancelled`] when UPI confirmation is refused
///
/// The cart, user and current order are untouched on every failure.
#[instrument(skip_all, fields(payment = ?form.payment_method))]
pub fn place_order(
    store: &mut AppStore,
    form: &CheckoutForm,
    confirmation: &mut impl PaymentConfirmation,
) -> Result<Order, CheckoutError> {
    if store.cart().is_empty() {
        store.set_current_page(Page::Menu);
        return Err(CheckoutError::EmptyCart);
    }

    if store.user().is_none() {
        store.set_login_modal_open(true);
        return Err(CheckoutError::NotLoggedIn);
    }

    if form.address.trim().is_empty() {
        return Err(CheckoutError::MissingAddress);
    }

    let payment_method = form
        .payment_method
        .ok_or(CheckoutError::MissingPaymentMethod)?;

    let total = store.final_total();
    if payment_method.requires_confirmation() && !confirmation.confirm(payment_method, total) {
        warn!(%total, "Customer cancelled payment");
        return Err(CheckoutError::PaymentCancelled);
    }

    let order = Order {
        id: generate_order_id(),
        items: store.cart().lines().to_vec(),
        total,
        address: form.address.clone(),
        payment_method,
        status: OrderStatus::Confirmed,
        estimated_time: ESTIMATED_DELIVERY.to_owned(),
        created_at: Utc::now(),
    };

    info!(order_id = %order.id, %total, items = order.item_count(), "Order placed");
    add_breadcrumb("checkout", "Order placed", Some(&[("order_id", order.id.as_str())]));

    store.set_current_order(Some(order.clone()));
    store.clear_cart();
    store.set_current_page(Page::Tracking);

    Ok(order)
}
