//! The application store.
//!
//! [`AppStore`] is the single source of truth for everything the screens
//! show: navigation, cart, user, modal flags, current order, reviews and the
//! search query. Commands mutate it in place and notify subscribers; queries
//! recompute derived values from the current state on every call.
//!
//! The store is single-threaded. Each command runs to completion before the
//! next, and commands never fail: unknown ids are no-ops for removal and
//! quantity updates.
//!
//! # Lifecycle
//!
//! ```rust
//! use grado_storefront::persistence::{MemorySnapshotStore, Persistence};
//! use grado_storefront::store::AppStore;
//! use grado_storefront::catalog;
//! # use grado_core::MenuItemId;
//!
//! let mut store = AppStore::init(Persistence::new(MemorySnapshotStore::new()));
//! let item = catalog::find(MenuItemId::new(1)).unwrap();
//! store.add_to_cart(item);
//! assert_eq!(store.final_total().get(), 205);
//! let _persistence = store.teardown();
//! ```

mod events;
mod feedback;

use std::collections::HashSet;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use grado_core::{
    Cart, Category, MenuItem, MenuItemId, Order, Page, Review, ReviewDraft, ReviewId, Rupees, User,
};

use crate::catalog;
use crate::persistence::{Persistence, Snapshot};

pub use events::{StoreEvent, SubscriptionId};
pub use feedback::{DEFAULT_FEEDBACK_WINDOW, RecentlyAdded};

use events::Subscribers;

/// Errors from cart entry points that require a non-empty cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cart has no items.
    #[error("Your cart is empty!")]
    Empty,
}

/// Single authoritative state container.
pub struct AppStore {
    persisted: Snapshot,
    page: Page,
    cart_open: bool,
    login_modal_open: bool,
    current_order: Option<Order>,
    search_query: String,
    recently_added: RecentlyAdded,
    subscribers: Subscribers,
    persistence: Option<Persistence>,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("persisted", &self.persisted)
            .field("page", &self.page)
            .field("cart_open", &self.cart_open)
            .field("login_modal_open", &self.login_modal_open)
            .field("current_order", &self.current_order)
            .field("search_query", &self.search_query)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    /// Create an in-memory store with default state and no persistence.
    #[must_use]
    pub fn new() -> Self {
        Self::from_snapshot(Snapshot::default(), None)
    }

    /// Create a store seeded from persisted state.
    ///
    /// A missing or corrupt snapshot yields the defaults. Every later change
    /// to the cart, user or reviews is written back through `persistence`.
    #[must_use]
    pub fn init(persistence: Persistence) -> Self {
        let snapshot = persistence.load();
        info!(
            cart_lines = snapshot.cart.lines().len(),
            reviews = snapshot.reviews.len(),
            "Store initialized"
        );
        Self::from_snapshot(snapshot, Some(persistence))
    }

    fn from_snapshot(persisted: Snapshot, persistence: Option<Persistence>) -> Self {
        Self {
            persisted,
            page: Page::default(),
            cart_open: false,
            login_modal_open: false,
            current_order: None,
            search_query: String::new(),
            recently_added: RecentlyAdded::default(),
            subscribers: Subscribers::default(),
            persistence,
        }
    }

    /// Replace the "recently added" feedback window.
    #[must_use]
    pub fn with_feedback_window(mut self, window: Duration) -> Self {
        self.recently_added = RecentlyAdded::new(window);
        self
    }

    /// Shut the store down.
    ///
    /// Writes a final snapshot, drops all subscribers and hands back the
    /// persistence adapter.
    pub fn teardown(mut self) -> Option<Persistence> {
        self.subscribers.clear();
        if let Some(persistence) = self.persistence.as_mut() {
            persistence.save(&self.persisted);
        }
        debug!("Store torn down");
        self.persistence.take()
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) -> SubscriptionId {
        self.subscribers.add(Box::new(listener))
    }

    /// Remove a change listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    fn emit(&mut self, event: StoreEvent) {
        if event.affects_snapshot() {
            if let Some(persistence) = self.persistence.as_mut() {
                persistence.save(&self.persisted);
            }
        }
        self.subscribers.notify(&event);
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Navigate to `page`, closing the cart panel.
    pub fn set_current_page(&mut self, page: Page) {
        debug!(?page, "Navigate");
        self.page = page;
        self.emit(StoreEvent::PageChanged(page));
        if self.cart_open {
            self.cart_open = false;
            self.emit(StoreEvent::CartPanelToggled { open: false });
        }
    }

    /// Flip the cart panel open or closed.
    pub fn toggle_cart(&mut self) {
        self.cart_open = !self.cart_open;
        let open = self.cart_open;
        self.emit(StoreEvent::CartPanelToggled { open });
    }

    /// Show or hide the login modal.
    pub fn set_login_modal_open(&mut self, open: bool) {
        self.login_modal_open = open;
        self.emit(StoreEvent::LoginModalToggled { open });
    }

    /// Replace the search text verbatim.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
        self.emit(StoreEvent::SearchChanged);
    }

    /// Move from the cart panel to checkout.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] without changing state if the cart is
    /// empty.
    pub fn begin_checkout(&mut self) -> Result<(), CartError> {
        if self.persisted.cart.is_empty() {
            return Err(CartError::Empty);
        }
        self.set_current_page(Page::Checkout);
        Ok(())
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of `item`.
    pub fn add_to_cart(&mut self, item: &MenuItem) {
        self.persisted.cart.add(item);
        self.recently_added.mark(item.id);
        debug!(item_id = %item.id, item_count = self.cart_item_count(), "Added to cart");
        self.emit(StoreEvent::CartChanged);
    }

    /// Remove the line for `item_id`, if any.
    pub fn remove_from_cart(&mut self, item_id: MenuItemId) {
        if self.persisted.cart.remove(item_id) {
            debug!(%item_id, "Removed from cart");
            self.emit(StoreEvent::CartChanged);
        }
    }

    /// Change a line's quantity by `delta`, removing it at zero or below.
    pub fn update_quantity(&mut self, item_id: MenuItemId, delta: i64) {
        if self.persisted.cart.update_quantity(item_id, delta) {
            debug!(%item_id, delta, "Updated cart quantity");
            self.emit(StoreEvent::CartChanged);
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&mut self) {
        self.persisted.cart.clear();
        self.emit(StoreEvent::CartChanged);
    }

    /// Clear the "recently added" marker for an item early.
    pub fn acknowledge_added(&mut self, item_id: MenuItemId) {
        self.recently_added.acknowledge(item_id);
    }

    // =========================================================================
    // User, Orders, Reviews
    // =========================================================================

    /// Replace the signed-in user; `None` signs out.
    pub fn set_user(&mut self, user: Option<User>) {
        debug!(signed_in = user.is_some(), "Set user");
        self.persisted.user = user;
        self.emit(StoreEvent::UserChanged);
    }

    /// Replace the order shown on the tracking page.
    pub fn set_current_order(&mut self, order: Option<Order>) {
        self.current_order = order;
        self.emit(StoreEvent::CurrentOrderChanged);
    }

    /// Post a review at the top of the list and return its new id.
    pub fn add_review(&mut self, draft: ReviewDraft) -> ReviewId {
        let id = self.next_review_id();
        self.persisted.reviews.insert(0, Review::new(id, draft));
        debug!(review_id = %id, "Review added");
        self.emit(StoreEvent::ReviewAdded(id));
        id
    }

    /// Fresh review id: the current time in milliseconds, bumped past every
    /// existing id. Ids stay unique; they only stop increasing once an
    /// existing id is `i64::MAX`, after which the lowest unused id is taken.
    fn next_review_id(&self) -> ReviewId {
        let now = Utc::now().timestamp_millis();
        let newest = self.persisted.reviews.iter().map(|review| review.id.get()).max();
        let next = match newest {
            None => Some(now),
            Some(newest) => newest.checked_add(1).map(|floor| floor.max(now)),
        };
        ReviewId::new(next.unwrap_or_else(|| self.lowest_free_review_id()))
    }

    fn lowest_free_review_id(&self) -> i64 {
        let taken: HashSet<i64> = self
            .persisted
            .reviews
            .iter()
            .map(|review| review.id.get())
            .collect();
        (0..=i64::MAX).find(|id| !taken.contains(id)).unwrap_or(i64::MIN)
    }

    // =========================================================================
    // State
    // =========================================================================

    #[must_use]
    pub const fn current_page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub const fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    #[must_use]
    pub const fn is_login_modal_open(&self) -> bool {
        self.login_modal_open
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.persisted.cart
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.persisted.user.as_ref()
    }

    #[must_use]
    pub const fn current_order(&self) -> Option<&Order> {
        self.current_order.as_ref()
    }

    /// Reviews, newest first.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.persisted.reviews
    }

    #[must_use]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// The persisted projection of the current state.
    #[must_use]
    pub const fn snapshot(&self) -> &Snapshot {
        &self.persisted
    }

    /// Returns true while `item_id` shows as just added.
    #[must_use]
    pub fn is_recently_added(&self, item_id: MenuItemId) -> bool {
        self.recently_added.contains(item_id)
    }

    // =========================================================================
    // Derived Queries
    // =========================================================================

    /// Sum of price times quantity. Alias of [`Self::subtotal`].
    #[must_use]
    pub fn cart_total(&self) -> Rupees {
        self.subtotal()
    }

    /// Sum of price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Rupees {
        self.persisted.cart.subtotal()
    }

    /// Total units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.persisted.cart.item_count()
    }

    #[must_use]
    pub fn delivery_fee(&self) -> Rupees {
        self.persisted.cart.delivery_fee()
    }

    #[must_use]
    pub fn platform_fee(&self) -> Rupees {
        self.persisted.cart.platform_fee()
    }

    /// Amount charged at checkout; zero for an empty cart.
    #[must_use]
    pub fn final_total(&self) -> Rupees {
        self.persisted.cart.final_total()
    }

    /// Menu items in `category` matching the current search query.
    #[must_use]
    pub fn filtered_menu(&self, category: Category) -> Vec<&'static MenuItem> {
        catalog::filter_items(catalog::by_category(category), &self.search_query)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use grado_core::{Email, UserId};

    use super::*;
    use crate::persistence::MemorySnapshotStore;

    fn menu_item(id: u32) -> &'static MenuItem {
        catalog::find(MenuItemId::new(id)).unwrap()
    }

    fn draft(text: &str) -> ReviewDraft {
        ReviewDraft {
            text: text.to_string(),
            rating: 5,
            date: "2024-02-01".to_string(),
            author: "Anonymous Student".to_string(),
            images: None,
        }
    }

    fn recorder(store: &mut AppStore) -> Rc<RefCell<Vec<StoreEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        store.subscribe(move |event| sink.borrow_mut().push(*event));
        events
    }

    #[test]
    fn test_defaults() {
        let store = AppStore::new();
        assert_eq!(store.current_page(), Page::Home);
        assert!(store.cart().is_empty());
        assert!(store.user().is_none());
        assert_eq!(store.reviews().len(), 2);
        assert_eq!(store.search_query(), "");
        assert!(!store.is_cart_open());
        assert!(!store.is_login_modal_open());
    }

    #[test]
    fn test_set_current_page_closes_cart() {
        let mut store = AppStore::new();
        store.toggle_cart();
        assert!(store.is_cart_open());

        store.set_current_page(Page::Menu);
        assert_eq!(store.current_page(), Page::Menu);
        assert!(!store.is_cart_open());
    }

    #[test]
    fn test_toggle_cart_flips() {
        let mut store = AppStore::new();
        store.toggle_cart();
        store.toggle_cart();
        assert!(!store.is_cart_open());
        assert_eq!(store.current_page(), Page::Home);
    }

    #[test]
    fn test_totals_follow_mutations() {
        let mut store = AppStore::new();
        store.add_to_cart(menu_item(1));
        store.add_to_cart(menu_item(3));
        assert_eq!(store.subtotal(), Rupees::new(330));
        assert_eq!(store.cart_total(), store.subtotal());
        assert_eq!(store.final_total(), Rupees::new(355));

        store.update_quantity(MenuItemId::new(1), 1);
        assert_eq!(store.subtotal(), Rupees::new(510));
        assert_eq!(store.cart_item_count(), 3);

        store.clear_cart();
        assert_eq!(store.final_total(), Rupees::ZERO);
        assert_eq!(store.delivery_fee(), Rupees::ZERO);
    }

    #[test]
    fn test_add_review_prepends_with_increasing_ids() {
        let mut store = AppStore::new();
        let first = store.add_review(draft("R1"));
        let second = store.add_review(draft("R2"));
        assert!(second > first);

        let texts: Vec<_> = store.reviews().iter().map(|r| r.body.text.as_str()).collect();
        assert_eq!(texts[..2], ["R2", "R1"]);
        assert_eq!(store.reviews().len(), 4);
    }

    #[test]
    fn test_search_query_kept_verbatim() {
        let mut store = AppStore::new();
        store.set_search_query("  Chicken ");
        assert_eq!(store.search_query(), "  Chicken ");
    }

    #[test]
    fn test_filtered_menu_uses_query() {
        let mut store = AppStore::new();
        assert_eq!(store.filtered_menu(Category::Biryani).len(), 4);
        store.set_search_query("chicken");
        let rice: Vec<_> = store
            .filtered_menu(Category::Rice)
            .iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(rice, ["Chicken Fried Rice"]);
    }

    #[test]
    fn test_begin_checkout_requires_items() {
        let mut store = AppStore::new();
        assert_eq!(store.begin_checkout(), Err(CartError::Empty));
        assert_eq!(store.current_page(), Page::Home);

        store.add_to_cart(menu_item(2));
        store.toggle_cart();
        assert!(store.begin_checkout().is_ok());
        assert_eq!(store.current_page(), Page::Checkout);
        assert!(!store.is_cart_open());
    }

    #[test]
    fn test_recently_added_marker() {
        let mut store = AppStore::new().with_feedback_window(Duration::from_secs(60));
        store.add_to_cart(menu_item(4));
        assert!(store.is_recently_added(MenuItemId::new(4)));
        store.acknowledge_added(MenuItemId::new(4));
        assert!(!store.is_recently_added(MenuItemId::new(4)));
    }

    #[test]
    fn test_subscribers_see_events() {
        let mut store = AppStore::new();
        let events = recorder(&mut store);
        store.toggle_cart();
        store.set_current_page(Page::Menu);
        store.add_to_cart(menu_item(1));

        assert_eq!(
            *events.borrow(),
            [
                StoreEvent::CartPanelToggled { open: true },
                StoreEvent::PageChanged(Page::Menu),
                StoreEvent::CartPanelToggled { open: false },
                StoreEvent::CartChanged,
            ]
        );
    }

    #[test]
    fn test_noop_commands_emit_nothing() {
        let mut store = AppStore::new();
        let events = recorder(&mut store);
        store.remove_from_cart(MenuItemId::new(1));
        store.update_quantity(MenuItemId::new(1), -1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut store = AppStore::new();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);
        store.clear_cart();
        assert!(store.unsubscribe(id));
        store.clear_cart();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_persisted_fields_write_through() {
        let backend = MemorySnapshotStore::new();
        let mut store = AppStore::init(Persistence::new(backend.clone()));
        assert!(backend.contents().is_none());

        store.set_search_query("egg");
        store.set_current_page(Page::Menu);
        assert!(backend.contents().is_none());

        store.add_to_cart(menu_item(1));
        let saved = Snapshot::decode(&backend.contents().unwrap()).unwrap();
        assert_eq!(saved.cart.item_count(), 1);

        store.set_user(Some(User {
            id: UserId::new("u-7"),
            name: "John Doe".to_string(),
            email: Email::on_domain("john.doe", "gitam.edu"),
            student_id: None,
        }));
        let saved = Snapshot::decode(&backend.contents().unwrap()).unwrap();
        assert_eq!(saved.user.map(|u| u.name), Some("John Doe".to_string()));
    }

    #[test]
    fn test_teardown_flushes_and_returns_persistence() {
        let backend = MemorySnapshotStore::new();
        let store = AppStore::init(Persistence::new(backend.clone()));
        let persistence = store.teardown();
        assert!(persistence.is_some());
        assert_eq!(
            Snapshot::decode(&backend.contents().unwrap()).unwrap(),
            Snapshot::default()
        );
    }

    #[test]
    fn test_review_ids_stay_above_rehydrated_ids() {
        let mut snapshot = Snapshot::default();
        let future = Utc::now().timestamp_millis() + 1_000_000;
        snapshot.reviews.insert(0, Review::new(ReviewId::new(future), draft("later")));
        let backend = MemorySnapshotStore::with_contents(snapshot.encode().unwrap());

        let mut store = AppStore::init(Persistence::new(backend));
        let id = store.add_review(draft("new"));
        assert_eq!(id, ReviewId::new(future + 1));
    }

    #[test]
    fn test_review_id_after_max_is_still_unique() {
        let mut snapshot = Snapshot::default();
        snapshot.reviews = vec![
            Review::new(ReviewId::new(i64::MAX), draft("max")),
            Review::new(ReviewId::new(0), draft("zero")),
        ];
        let backend = MemorySnapshotStore::with_contents(snapshot.encode().unwrap());

        let mut store = AppStore::init(Persistence::new(backend));
        let first = store.add_review(draft("a"));
        let second = store.add_review(draft("b"));
        assert_eq!(first, ReviewId::new(1));
        assert_eq!(second, ReviewId::new(2));
    }
}
