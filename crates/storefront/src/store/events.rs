//! Change notifications for store subscribers.

use grado_core::{Page, ReviewId};

/// What changed after a store command.
///
/// Listeners receive the event only; they read the new values back from the
/// store afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    PageChanged(Page),
    CartChanged,
    CartPanelToggled { open: bool },
    UserChanged,
    LoginModalToggled { open: bool },
    CurrentOrderChanged,
    ReviewAdded(ReviewId),
    SearchChanged,
}

impl StoreEvent {
    /// Returns true if the event touches a persisted field.
    #[must_use]
    pub const fn affects_snapshot(&self) -> bool {
        matches!(
            self,
            Self::CartChanged | Self::UserChanged | Self::ReviewAdded(_)
        )
    }
}

/// Handle returned by [`crate::store::AppStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&StoreEvent)>;

/// Registered listeners, notified in subscription order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub(crate) fn notify(&mut self, event: &StoreEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.listeners.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_notify_reaches_listeners_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            subscribers.add(Box::new(move |_| seen.borrow_mut().push(tag)));
        }

        subscribers.notify(&StoreEvent::CartChanged);
        assert_eq!(*seen.borrow(), ["first", "second"]);
    }

    #[test]
    fn test_removed_listener_is_not_called() {
        let calls = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::default();
        let counter = Rc::clone(&calls);
        let id = subscribers.add(Box::new(move |_| *counter.borrow_mut() += 1));

        assert!(subscribers.remove(id));
        assert!(!subscribers.remove(id));
        subscribers.notify(&StoreEvent::SearchChanged);
        assert_eq!(*calls.borrow(), 0);
    }

    #[test]
    fn test_affects_snapshot() {
        assert!(StoreEvent::CartChanged.affects_snapshot());
        assert!(StoreEvent::ReviewAdded(ReviewId::new(3)).affects_snapshot());
        assert!(!StoreEvent::SearchChanged.affects_snapshot());
        assert!(!StoreEvent::PageChanged(Page::Menu).affects_snapshot());
    }
}
