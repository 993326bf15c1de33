//! The vendor's fixed menu and search filtering over it.

use grado_core::{Category, MenuItem, MenuItemId, Rupees};

const fn item(
    id: u32,
    name: &'static str,
    price: u32,
    description: &'static str,
    category: Category,
) -> MenuItem {
    MenuItem {
        id: MenuItemId::new(id),
        name,
        price: Rupees::new(price),
        description,
        category,
    }
}

/// Every dish the vendor sells, in menu order.
pub static MENU: [MenuItem; 8] = [
    item(1, "Chicken Biryani", 180, "Aromatic basmati rice with tender chicken", Category::Biryani),
    item(2, "Mutton Biryani", 220, "Rich and flavorful mutton biryani", Category::Biryani),
    item(3, "Veg Biryani", 150, "Fragrant vegetable biryani with saffron", Category::Biryani),
    item(4, "Egg Biryani", 140, "Delicious biryani topped with boiled eggs", Category::Biryani),
    item(
        5,
        "Chicken Fried Rice",
        160,
        "Wok-tossed rice with chicken and vegetables",
        Category::Rice,
    ),
    item(6, "Veg Fried Rice", 130, "Colorful vegetable fried rice", Category::Rice),
    item(7, "Schezwan Fried Rice", 170, "Spicy Indo-Chinese fried rice", Category::Rice),
    item(8, "Egg Fried Rice", 140, "Classic fried rice with scrambled eggs", Category::Rice),
];

/// Look up a menu item by id.
#[must_use]
pub fn find(id: MenuItemId) -> Option<&'static MenuItem> {
    MENU.iter().find(|item| item.id == id)
}

/// Items in one menu section.
pub fn by_category(category: Category) -> impl Iterator<Item = &'static MenuItem> {
    MENU.iter().filter(move |item| item.category == category)
}

/// Filter items by a search query.
///
/// Matches case-insensitively against the item name only. An empty query
/// returns every item.
pub fn filter_items<'a, I>(items: I, query: &str) -> Vec<&'a MenuItem>
where
    I: IntoIterator<Item = &'a MenuItem>,
{
    items
        .into_iter()
        .filter(|item| item.name_matches(query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&MenuItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.name).collect()
    }

    #[test]
    fn test_ids_are_unique() {
        for (index, item) in MENU.iter().enumerate() {
            assert!(
                MENU.iter().skip(index + 1).all(|other| other.id != item.id),
                "duplicate id {}",
                item.id
            );
        }
    }

    #[test]
    fn test_filter_chicken() {
        let matches = filter_items(&MENU, "chicken");
        assert_eq!(names(&matches), ["Chicken Biryani", "Chicken Fried Rice"]);
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        assert_eq!(filter_items(&MENU, "EGG").len(), 2);
    }

    #[test]
    fn test_empty_query_returns_everything() {
        assert_eq!(filter_items(&MENU, "").len(), MENU.len());
    }

    #[test]
    fn test_filter_within_category() {
        let matches = filter_items(by_category(Category::Rice), "veg");
        assert_eq!(names(&matches), ["Veg Fried Rice"]);
    }

    #[test]
    fn test_query_is_not_trimmed() {
        assert!(filter_items(&MENU, " chicken").is_empty());
    }

    #[test]
    fn test_find() {
        assert_eq!(find(MenuItemId::new(3)).map(|item| item.name), Some("Veg Biryani"));
        assert!(find(MenuItemId::new(99)).is_none());
    }

    #[test]
    fn test_categories_partition_menu() {
        let total: usize = Category::ALL
            .iter()
            .map(|category| by_category(*category).count())
            .sum();
        assert_eq!(total, MENU.len());
    }
}
