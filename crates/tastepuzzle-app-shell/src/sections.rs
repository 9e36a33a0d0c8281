//! Browser sections and their ordering.

use std::cmp::Ordering;

use tastepuzzle_ui::{CategoryHeader, RecipeCard};
use tastepuzzle_ui_layout::FlowLayout;

/// Categories pinned to the top of the browser, in this order. Everything
/// else follows alphabetically.
pub const PRIORITY_CATEGORIES: [&str; 9] = [
    "Salads",
    "Desserts",
    "Main courses",
    "Breakfasts",
    "Side dishes",
    "Soups",
    "Snacks",
    "Drinks",
    "Sauces",
];

fn priority(category: &str) -> usize {
    PRIORITY_CATEGORIES
        .iter()
        .position(|c| *c == category)
        .unwrap_or(PRIORITY_CATEGORIES.len())
}

/// Priority categories first in their fixed order, the rest alphabetical.
pub fn compare_categories(a: &str, b: &str) -> Ordering {
    priority(a).cmp(&priority(b)).then_with(|| a.cmp(b))
}

/// One category in the browser: a header plus its card grid.
pub struct BrowserSection {
    pub header: CategoryHeader,
    pub cards: FlowLayout<RecipeCard>,
}

impl BrowserSection {
    pub fn new(category: &str, cards: FlowLayout<RecipeCard>) -> Self {
        Self {
            header: CategoryHeader::new(category, cards.count()),
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_categories_come_first() {
        let mut categories = vec!["Breads", "Soups", "Salads", "Aspics"];
        categories.sort_by(|a, b| compare_categories(a, b));
        assert_eq!(categories, vec!["Salads", "Soups", "Aspics", "Breads"]);
    }

    #[test]
    fn test_priority_order_is_fixed_not_alphabetical() {
        let mut categories = vec!["Soups", "Desserts", "Main courses"];
        categories.sort_by(|a, b| compare_categories(a, b));
        assert_eq!(categories, vec!["Desserts", "Main courses", "Soups"]);
    }
}
