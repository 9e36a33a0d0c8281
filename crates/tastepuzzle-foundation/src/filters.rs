//! The recipe filter model.
//!
//! One plain value shared by the filter bar and the data layer; the shell
//! passes it whole into every reload.

/// Time-to-cook choices offered by the filter bar, in minutes.
pub const TIME_CHOICES_MINUTES: [u32; 5] = [15, 30, 60, 90, 120];

/// Everything the recipe browser filters by. `Default` means "show all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecipeFilters {
    /// Exact cuisine name; `None` matches any cuisine.
    pub cuisine: Option<String>,
    /// Upper bound on time-to-cook in minutes; `None` means unlimited.
    pub max_time: Option<u32>,
    pub favorites_only: bool,
    pub cooked_only: bool,
    /// A recipe matches only if it contains every listed ingredient.
    pub ingredients: Vec<String>,
    /// Case-insensitive substring of the recipe name. Empty matches all.
    pub name: String,
}

impl RecipeFilters {
    /// True when every filter is at its "show all" value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
