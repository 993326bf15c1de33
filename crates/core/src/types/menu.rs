//! Menu items and categories.

use core::fmt;
use core::str::FromStr;

use serde::Serialize;

use super::{MenuItemId, Rupees};

/// Menu section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Biryani,
    Rice,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Self; 2] = [Self::Biryani, Self::Rice];

    /// Section heading for the menu page.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Biryani => "Biryani",
            Self::Rice => "Fried Rice",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Biryani => write!(f, "biryani"),
            Self::Rice => write!(f, "rice"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "biryani" => Ok(Self::Biryani),
            "rice" => Ok(Self::Rice),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// A purchasable dish.
///
/// Menu items are compiled into the binary and never change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: &'static str,
    pub price: Rupees,
    pub description: &'static str,
    pub category: Category,
}

impl MenuItem {
    /// Returns true if the item name contains `needle`, ignoring case.
    ///
    /// An empty needle matches every item.
    #[must_use]
    pub fn name_matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}
