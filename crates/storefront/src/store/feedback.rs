//! Short-lived "added to cart" markers for menu buttons.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use grado_core::MenuItemId;

/// How long an item shows as recently added.
pub const DEFAULT_FEEDBACK_WINDOW: Duration = Duration::from_secs(1);

/// Tracks which menu items were added within the feedback window.
#[derive(Debug, Clone)]
pub struct RecentlyAdded {
    window: Duration,
    marks: HashMap<MenuItemId, Instant>,
}

impl Default for RecentlyAdded {
    fn default() -> Self {
        Self::new(DEFAULT_FEEDBACK_WINDOW)
    }
}

impl RecentlyAdded {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            marks: HashMap::new(),
        }
    }

    /// Mark `id` as just added, dropping marks that have expired.
    pub fn mark(&mut self, id: MenuItemId) {
        let now = Instant::now();
        let window = self.window;
        self.marks
            .retain(|_, at| now.saturating_duration_since(*at) < window);
        self.marks.insert(id, now);
    }

    /// Returns true while `id` is inside its feedback window.
    #[must_use]
    pub fn contains(&self, id: MenuItemId) -> bool {
        self.marks
            .get(&id)
            .is_some_and(|at| at.elapsed() < self.window)
    }

    /// Clear the marker for `id` early.
    pub fn acknowledge(&mut self, id: MenuItemId) -> bool {
        self.marks.remove(&id).is_some()
    }
}
