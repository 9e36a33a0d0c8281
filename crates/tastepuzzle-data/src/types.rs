//! Record types shared between the data layer and the presentation code.

pub type UserId = i64;
pub type RecipeId = i64;

/// One recipe row as the rest of the application sees it: named fields,
/// per-user flags already joined in.
#[derive(Clone, Debug, PartialEq)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub description: String,
    /// Minutes; `None` when the author never filled it in.
    pub time_to_cook: Option<u32>,
    pub favorite: bool,
    pub cooked: bool,
    pub cuisine: Option<String>,
    pub dish_type: String,
}

/// One ingredient line of a recipe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    /// Free-form, like the cart quantity column.
    pub quantity: String,
    pub unit: String,
}

impl NewIngredient {
    pub fn new(
        name: impl Into<String>,
        quantity: impl Into<String>,
        unit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            unit: unit.into(),
        }
    }
}

/// Input for inserting a recipe. Cuisine, dish type, and ingredient
/// names are created on first use.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NewRecipe {
    pub name: String,
    pub description: String,
    pub time_to_cook: Option<u32>,
    pub cuisine: Option<String>,
    pub dish_type: String,
    pub ingredients: Vec<NewIngredient>,
}

/// Aggregate counters shown on the profile tab.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProfileStats {
    pub recipes_count: u32,
    pub favorites_count: u32,
    pub cooked_count: u32,
    pub cart_count: u32,
}
