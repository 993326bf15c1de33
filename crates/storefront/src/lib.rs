//! Grado storefront library.
//!
//! The application store and everything that drives it: the static menu
//! catalog, snapshot persistence, the mock login, checkout and review
//! flows, and the simulated delivery timeline. Rendering is left to the
//! caller; see the `grado` CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod persistence;
pub mod services;
pub mod store;
pub mod tracking;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use persistence::{FileSnapshotStore, MemorySnapshotStore, Persistence, Snapshot};
pub use store::{AppStore, StoreEvent};
pub use tracking::OrderTracker;
