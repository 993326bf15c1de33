//! Navigation pages.

use serde::{Deserialize, Serialize};

/// Screen currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Menu,
    Checkout,
    Tracking,
}
