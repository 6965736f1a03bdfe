//! Category filtering for the menu list.
//!
//! Applied client-side over whatever the text search returned, as a logical
//! AND: an item survives only if it matched the query *and* the selected
//! category. Result order is untouched (cache order, no ranking).

use crate::types::MenuItem;

/// The category chips shown above the menu list. "All" disables filtering.
pub const DISPLAY_CATEGORIES: [&str; 5] = ["All", "Starters", "Mains", "Desserts", "Drinks"];

/// Sentinel category that passes every item through.
pub const ALL_CATEGORIES: &str = "All";

/// Filters items by display category.
///
/// `None` or `"All"` passes everything; otherwise the item's capitalized
/// category must match exactly.
pub fn filter_by_category(items: Vec<MenuItem>, selected: Option<&str>) -> Vec<MenuItem> {
    match selected {
        None => items,
        Some(category) if category == ALL_CATEGORIES => items,
        Some(category) => items.into_iter().filter(|i| i.category == category).collect(),
    }
}
