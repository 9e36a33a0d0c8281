//! SQLite-backed persistence for recipes, per-user flags, and the cart.
//!
//! The application talks to this layer exclusively through the
//! [`DataAccess`] trait so the shell can be exercised against failing or
//! fake implementations. [`Store`] is the real, single-connection,
//! synchronous implementation.
//!
//! Records use named fields throughout; there is no positional row
//! contract between this layer and the presentation code.

mod store;
mod types;

pub use store::Store;
pub use types::{NewIngredient, NewRecipe, ProfileStats, Recipe, RecipeId, UserId};

use anyhow::Result;
use indexmap::IndexMap;
use tastepuzzle_foundation::{CartEntry, RecipeFilters};

/// The query surface the shell depends on. Synchronous; callers block
/// for the duration of a call (single local user, small datasets).
pub trait DataAccess {
    /// Recipes matching `filters`, grouped by dish-type name in
    /// dish-type order. Categories with no matches are absent.
    fn recipes_with_filters(
        &self,
        user: UserId,
        filters: &RecipeFilters,
    ) -> Result<IndexMap<String, Vec<Recipe>>>;

    /// Flips the favorite flag for `(user, recipe)` and returns the new
    /// state.
    fn toggle_favorite(&self, user: UserId, recipe: RecipeId) -> Result<bool>;

    fn set_cooked(&self, user: UserId, recipe: RecipeId, cooked: bool) -> Result<()>;

    fn favorite_recipes(&self, user: UserId) -> Result<Vec<Recipe>>;

    fn cooked_recipes(&self, user: UserId) -> Result<Vec<Recipe>>;

    /// Ingredient lines of one recipe, in insertion order.
    fn recipe_ingredients(&self, recipe: RecipeId) -> Result<Vec<NewIngredient>>;

    /// Raw cart rows for `user`, unmerged. Aggregation is the cart
    /// layer's job.
    fn cart_items(&self, user: UserId) -> Result<Vec<CartEntry>>;

    fn add_cart_item(&self, user: UserId, name: &str, quantity: &str, unit: &str) -> Result<()>;

    /// Removes every row whose `(name, unit)` appears in `keys` and
    /// returns the number of rows deleted.
    fn remove_cart_items(&self, user: UserId, keys: &[(String, String)]) -> Result<usize>;

    fn clear_cart(&self, user: UserId) -> Result<()>;

    /// Distinct cuisine names, alphabetical.
    fn cuisines(&self) -> Result<Vec<String>>;

    /// Distinct ingredient names, sorted case-insensitively.
    fn ingredients(&self) -> Result<Vec<String>>;

    /// All recipe names, for search suggestions.
    fn recipe_names(&self) -> Result<Vec<String>>;

    fn profile_stats(&self, user: UserId) -> Result<ProfileStats>;

    fn user_login(&self, user: UserId) -> Result<Option<String>>;

    fn avatar(&self, user: UserId) -> Result<Option<Vec<u8>>>;

    fn update_avatar(&self, user: UserId, avatar: &[u8]) -> Result<()>;

    fn add_recipe(&self, recipe: &NewRecipe) -> Result<RecipeId>;

    fn delete_recipe(&self, recipe: RecipeId) -> Result<()>;
}
