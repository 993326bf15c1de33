//! Mock collaborators that validate user input and drive the store.
//!
//! # Services
//!
//! - `auth` - Student id and Google login (no real verification)
//! - `checkout` - Order placement with a simulated UPI confirmation
//! - `reviews` - Review submission

pub mod auth;
pub mod checkout;
pub mod reviews;
