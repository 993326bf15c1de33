//! `grado menu`

use std::io::{self, Write};

use grado_core::Category;
use grado_storefront::AppStore;

/// List the menu by section, honouring the search query.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn show(
    store: &mut AppStore,
    out: &mut impl Write,
    search: Option<String>,
    category: Option<Category>,
) -> io::Result<()> {
    if let Some(query) = search {
        store.set_search_query(query);
    }

    let categories = category.map_or_else(|| Category::ALL.to_vec(), |c| vec![c]);
    let mut shown = 0;

    for category in categories {
        let items = store.filtered_menu(category);
        if items.is_empty() {
            continue;
        }
        if shown > 0 {
            writeln!(out)?;
        }
        writeln!(out, "{}", category.heading())?;
        for item in items {
            let in_cart = store
                .cart()
                .line(item.id)
                .map(|line| format!("  ({} in cart)", line.quantity))
                .unwrap_or_default();
            writeln!(out, "  [{}] {:<22} {}{in_cart}", item.id, item.name, item.price)?;
            writeln!(out, "      {}", item.description)?;
        }
        shown += 1;
    }

    if shown == 0 {
        writeln!(out, "No dishes match \"{}\"", store.search_query())?;
    }
    Ok(())
}
