//! Integration tests for the Grado storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p grado-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_properties` - Cart and totals invariants through the store
//! - `checkout_flow` - Browse, sign in, order and track end to end
//! - `persistence_reload` - What survives a restart and what resets
//! - `order_tracking` - Delivery timeline scheduling and cancellation
//!
//! The helpers below build stores the way the CLI does, against in-memory
//! or temporary-file snapshot storage.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use secrecy::SecretString;

use grado_core::{MenuItem, MenuItemId};
use grado_storefront::persistence::{FileSnapshotStore, MemorySnapshotStore, Persistence};
use grado_storefront::services::auth;
use grado_storefront::{AppStore, catalog};

/// Look up a seed menu item.
///
/// # Panics
///
/// Panics if `id` is not on the menu.
#[must_use]
pub fn item(id: u32) -> &'static MenuItem {
    catalog::find(MenuItemId::new(id)).unwrap_or_else(|| panic!("no menu item {id}"))
}

/// Open a store over shared in-memory storage.
#[must_use]
pub fn memory_store(backend: &MemorySnapshotStore) -> AppStore {
    AppStore::init(Persistence::new(backend.clone()))
}

/// Open a store over a snapshot file.
#[must_use]
pub fn file_store(path: &Path) -> AppStore {
    AppStore::init(Persistence::new(FileSnapshotStore::new(path)))
}

/// Sign in as a student.
///
/// # Panics
///
/// Panics if the mock login rejects the fixed credentials.
pub fn sign_in(store: &mut AppStore) {
    let password = SecretString::from("hunter2");
    if let Err(e) = auth::login_with_credentials(store, "21CSE042", &password) {
        panic!("student login failed: {e}");
    }
}
