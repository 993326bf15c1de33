//! What survives a restart and what resets.

#![allow(clippy::unwrap_used)]

use std::fs;

use grado_core::{MenuItemId, Page, PaymentMethod};
use grado_integration_tests::{file_store, item, memory_store, sign_in};
use grado_storefront::persistence::{
    DEFAULT_SNAPSHOT_FILE, MemorySnapshotStore, Snapshot, seed_reviews,
};
use grado_storefront::services::checkout::{self, AutoConfirm, CheckoutForm};

#[test]
fn test_cart_survives_reload_but_navigation_resets() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_SNAPSHOT_FILE);

    let mut store = file_store(&path);
    store.add_to_cart(item(1));
    store.add_to_cart(item(1));
    store.set_current_page(Page::Menu);
    store.set_search_query("egg");
    store.toggle_cart();
    drop(store);

    let reloaded = file_store(&path);
    let line = reloaded.cart().line(MenuItemId::new(1)).unwrap();
    assert_eq!(line.quantity, 2);
    assert_eq!(reloaded.cart().lines().len(), 1);
    assert_eq!(reloaded.current_page(), Page::Home);
    assert_eq!(reloaded.search_query(), "");
    assert!(!reloaded.is_cart_open());
}

#[test]
fn test_user_and_reviews_survive_but_current_order_does_not() {
    let backend = MemorySnapshotStore::new();
    let mut store = memory_store(&backend);
    sign_in(&mut store);
    store.add_to_cart(item(4));
    checkout::place_order(
        &mut store,
        &CheckoutForm {
            address: "Block B".to_string(),
            payment_method: Some(PaymentMethod::Cod),
        },
        &mut AutoConfirm,
    )
    .unwrap();
    assert!(store.current_order().is_some());
    store.teardown();

    let reloaded = memory_store(&backend);
    assert_eq!(reloaded.user().map(|u| u.name.as_str()), Some("Student 21CSE042"));
    assert!(reloaded.current_order().is_none());
    assert!(reloaded.cart().is_empty());
    assert_eq!(reloaded.reviews(), seed_reviews().as_slice());
}

#[test]
fn test_snapshot_contains_only_persisted_fields() {
    let backend = MemorySnapshotStore::new();
    let mut store = memory_store(&backend);
    store.add_to_cart(item(2));
    store.set_search_query("mutton");

    let saved: serde_json::Value = serde_json::from_str(&backend.contents().unwrap()).unwrap();
    let mut keys: Vec<_> = saved["state"].as_object().unwrap().keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["cart", "reviews", "user"]);
    assert_eq!(saved["state"]["cart"][0]["quantity"], 1);
    assert_eq!(saved["version"], 0);
}

#[test]
fn test_corrupt_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_SNAPSHOT_FILE);
    fs::write(&path, "{\"state\": [").unwrap();

    let store = file_store(&path);
    assert_eq!(store.snapshot(), &Snapshot::default());
}

#[test]
fn test_rehydrated_cart_is_normalized() {
    let raw = r#"{"state":{"cart":[
        {"id":1,"name":"Chicken Biryani","price":180,"quantity":1},
        {"id":1,"name":"Chicken Biryani","price":180,"quantity":2},
        {"id":6,"name":"Veg Fried Rice","price":130,"quantity":0}
    ]},"version":0}"#;
    let store = memory_store(&MemorySnapshotStore::with_contents(raw));

    assert_eq!(store.cart().lines().len(), 1);
    assert_eq!(store.cart_item_count(), 3);
    assert_eq!(store.reviews().len(), 2);
}
