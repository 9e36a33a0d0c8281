//! Widgets: fixed-size visual units that paint into a
//! [`Scene`](tastepuzzle_ui_graphics::Scene) and answer hit tests.
//!
//! Widgets hold no references into the data layer; the shell feeds them
//! records and patches them after mutations.

mod cart_row;
mod category_header;
mod recipe_card;
pub mod theme;

pub use cart_row::{CartRow, CART_ROW_HEIGHT};
pub use category_header::{CategoryHeader, CATEGORY_HEADER_HEIGHT};
pub use recipe_card::{CardAction, RecipeCard, CARD_HEIGHT, CARD_WIDTH};
