//! Core types for the Grado storefront.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts and the pure pricing rules over a cart.

pub mod cart;
pub mod email;
pub mod id;
pub mod menu;
pub mod order;
pub mod page;
pub mod price;
pub mod review;
pub mod status;
pub mod user;

pub use cart::{Cart, CartLine};
pub use email::Email;
pub use id::*;
pub use menu::{Category, MenuItem};
pub use order::{ESTIMATED_DELIVERY, Order};
pub use page::Page;
pub use price::{DELIVERY_FEE, PLATFORM_FEE, Rupees};
pub use review::{MAX_RATING, MIN_RATING, Review, ReviewDraft};
pub use status::{OrderStatus, PaymentMethod};
pub use user::User;
