//! Grado Core - Shared types library.
//!
//! This crate provides the domain types used across the Grado storefront:
//! - `storefront` - Application store, persistence and mock collaborators
//! - `cli` - Terminal front end driving the store
//!
//! # Architecture
//!
//! The core crate contains only types and pure derivations - no I/O, no
//! clocks, no randomness. Cart totals and fees live here so every caller
//! computes them the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, menu, cart, order and review types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
