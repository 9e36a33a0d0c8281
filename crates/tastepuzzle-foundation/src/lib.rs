//! Behavior building blocks with no widget code: cart aggregation, the
//! shopping-list exporter, the filter model, the debounce timer, and the
//! persisted application settings.

mod cart;
mod debounce;
mod export;
mod filters;
mod settings;

pub use cart::{aggregate, AggregatedEntry, CartEntry, Quantity};
pub use debounce::{Debouncer, DEFAULT_DELAY};
pub use export::{export_shopping_list, write_shopping_list};
pub use filters::{RecipeFilters, TIME_CHOICES_MINUTES};
pub use settings::Settings;
