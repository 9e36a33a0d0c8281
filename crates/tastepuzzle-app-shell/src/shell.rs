//! The application state machine.
//!
//! One single-threaded owner of everything shared: the data handle, the
//! settings, the filter state, the debounce timer, the widget trees of
//! all three tabs, and the error banner. The windowed frontend forwards
//! events here and rasterizes the [`Scene`] this produces; tests drive
//! the same surface headlessly.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tastepuzzle_data::{DataAccess, NewRecipe, ProfileStats, Recipe, RecipeId, UserId};
use tastepuzzle_foundation::{aggregate, CartEntry, Debouncer, RecipeFilters, Settings};
use tastepuzzle_ui::{
    CardAction, CartRow, RecipeCard, CART_ROW_HEIGHT, CATEGORY_HEADER_HEIGHT,
};
use tastepuzzle_ui::theme;
use tastepuzzle_ui_graphics::{Point, Rect, Scene};
use tastepuzzle_ui_layout::{FlowLayout, Margins};

use crate::sections::{compare_categories, BrowserSection};

pub const ERROR_BANNER_HEIGHT: f32 = 32.0;

const CARD_SPACING: f32 = 10.0;
const CONTENT_MARGIN: f32 = 15.0;
const CART_ROW_GAP: f32 = 4.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Browser,
    Cart,
    Profile,
}

/// Everything the profile tab shows.
#[derive(Clone, Debug, Default)]
pub struct ProfileView {
    pub login: Option<String>,
    pub stats: ProfileStats,
    pub favorites: Vec<Recipe>,
    pub cooked: Vec<Recipe>,
    pub avatar: Option<Vec<u8>>,
}

pub struct AppShell<D: DataAccess> {
    data: D,
    user: UserId,
    settings: Settings,
    filters: RecipeFilters,
    debouncer: Debouncer,
    tab: Tab,
    sections: Vec<BrowserSection>,
    cart_raw: Vec<CartEntry>,
    cart_rows: Vec<CartRow>,
    profile: ProfileView,
    error: Option<String>,
    scroll: f32,
    content_height: f32,
    viewport_width: f32,
}

impl<D: DataAccess> AppShell<D> {
    pub fn new(data: D, user: UserId, settings: Settings) -> Self {
        let mut shell = Self {
            data,
            user,
            settings,
            filters: RecipeFilters::default(),
            debouncer: Debouncer::default(),
            tab: Tab::default(),
            sections: Vec::new(),
            cart_raw: Vec::new(),
            cart_rows: Vec::new(),
            profile: ProfileView::default(),
            error: None,
            scroll: 0.0,
            content_height: 0.0,
            viewport_width: 0.0,
        };
        shell.reload_recipes();
        shell.reload_cart();
        shell
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn filters(&self) -> &RecipeFilters {
        &self.filters
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn sections(&self) -> &[BrowserSection] {
        &self.sections
    }

    pub fn cart_rows(&self) -> &[CartRow] {
        &self.cart_rows
    }

    pub fn cart_rows_mut(&mut self) -> &mut [CartRow] {
        &mut self.cart_rows
    }

    pub fn profile(&self) -> &ProfileView {
        &self.profile
    }

    /// The current error banner text, if a data operation failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Switching tabs re-reads that tab's data and resets the scroll.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        self.scroll = 0.0;
        match tab {
            Tab::Browser => {}
            Tab::Cart => self.reload_cart(),
            Tab::Profile => self.refresh_profile(),
        }
    }

    // ---- filters ----

    /// The debounced path: every keystroke re-arms the timer; the reload
    /// happens from [`tick`](Self::tick) once typing settles.
    pub fn set_name_filter(&mut self, name: impl Into<String>, now: Instant) {
        self.filters.name = name.into();
        self.debouncer.restart(now);
    }

    /// Fires a due debounce. Returns true when a reload happened and the
    /// frontend should redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.fire_if_due(now) {
            self.reload_recipes();
            true
        } else {
            false
        }
    }

    /// The wake-up time the event loop should use, if a debounce is
    /// pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    // The non-text filters reload immediately.

    pub fn set_cuisine_filter(&mut self, cuisine: Option<String>) {
        self.filters.cuisine = cuisine;
        self.reload_recipes();
    }

    pub fn set_max_time_filter(&mut self, max_time: Option<u32>) {
        self.filters.max_time = max_time;
        self.reload_recipes();
    }

    pub fn set_favorites_only(&mut self, on: bool) {
        self.filters.favorites_only = on;
        self.reload_recipes();
    }

    pub fn set_cooked_only(&mut self, on: bool) {
        self.filters.cooked_only = on;
        self.reload_recipes();
    }

    pub fn set_ingredient_filters(&mut self, ingredients: Vec<String>) {
        self.filters.ingredients = ingredients;
        self.reload_recipes();
    }

    pub fn reset_filters(&mut self) {
        self.filters.reset();
        self.debouncer.cancel();
        self.reload_recipes();
    }

    // ---- filter bar options ----

    pub fn cuisine_options(&mut self) -> Vec<String> {
        let result = self.data.cuisines();
        self.guard("Loading cuisines", result).unwrap_or_default()
    }

    pub fn ingredient_options(&mut self) -> Vec<String> {
        let result = self.data.ingredients();
        self.guard("Loading ingredients", result).unwrap_or_default()
    }

    /// Recipe names for search suggestions.
    pub fn name_suggestions(&mut self) -> Vec<String> {
        let result = self.data.recipe_names();
        self.guard("Loading recipe names", result).unwrap_or_default()
    }

    // ---- reloads ----

    /// Full teardown and rebuild of the card set. No diffing; the card
    /// count is small and the reload is synchronous.
    pub fn reload_recipes(&mut self) {
        let result = self.data.recipes_with_filters(self.user, &self.filters);
        let Some(grouped) = self.guard("Loading recipes", result) else {
            return;
        };

        let mut categories: Vec<_> = grouped.into_iter().collect();
        categories.sort_by(|(a, _), (b, _)| compare_categories(a, b));

        self.sections = categories
            .into_iter()
            .map(|(category, recipes)| {
                let mut cards =
                    FlowLayout::new(Margins::default(), CARD_SPACING, CARD_SPACING);
                for recipe in recipes {
                    cards.add(RecipeCard::new(recipe));
                }
                BrowserSection::new(&category, cards)
            })
            .collect();
    }

    pub fn reload_cart(&mut self) {
        let result = self.data.cart_items(self.user);
        let Some(raw) = self.guard("Loading cart", result) else {
            return;
        };
        self.cart_rows = aggregate(&raw).into_iter().map(CartRow::new).collect();
        self.cart_raw = raw;
    }

    pub fn refresh_profile(&mut self) {
        let result = self.load_profile();
        if let Some(profile) = self.guard("Loading profile", result) {
            self.profile = profile;
        }
    }

    fn load_profile(&self) -> Result<ProfileView> {
        Ok(ProfileView {
            login: self.data.user_login(self.user)?,
            stats: self.data.profile_stats(self.user)?,
            favorites: self.data.favorite_recipes(self.user)?,
            cooked: self.data.cooked_recipes(self.user)?,
            avatar: self.data.avatar(self.user)?,
        })
    }

    // ---- recipe mutations ----

    pub fn toggle_favorite(&mut self, recipe: RecipeId) {
        let result = self.data.toggle_favorite(self.user, recipe);
        if let Some(favorite) = self.guard("Updating favorite", result) {
            self.patch_card(recipe, |card| card.set_favorite(favorite));
        }
    }

    pub fn toggle_cooked(&mut self, recipe: RecipeId) {
        let Some(current) = self.find_card(recipe).map(|c| c.recipe().cooked) else {
            return;
        };
        let result = self.data.set_cooked(self.user, recipe, !current);
        if self.guard("Updating cooked", result).is_some() {
            self.patch_card(recipe, |card| card.set_cooked(!current));
        }
    }

    pub fn add_recipe(&mut self, recipe: &NewRecipe) {
        let result = self.data.add_recipe(recipe);
        if self.guard("Adding recipe", result).is_some() {
            self.reload_recipes();
        }
    }

    pub fn delete_recipe(&mut self, recipe: RecipeId) {
        let result = self.data.delete_recipe(recipe);
        if self.guard("Deleting recipe", result).is_some() {
            self.reload_recipes();
        }
    }

    fn find_card(&self, recipe: RecipeId) -> Option<&RecipeCard> {
        self.sections
            .iter()
            .flat_map(|s| s.cards.items())
            .find(|c| c.recipe().id == recipe)
    }

    fn patch_card(&mut self, recipe: RecipeId, patch: impl Fn(&mut RecipeCard)) {
        for section in &mut self.sections {
            for card in section.cards.items_mut() {
                if card.recipe().id == recipe {
                    patch(card);
                }
            }
        }
    }

    // ---- cart mutations ----

    pub fn add_cart_item(&mut self, name: &str, quantity: &str, unit: &str) {
        let result = self.data.add_cart_item(self.user, name, quantity, unit);
        if self.guard("Adding cart item", result).is_some() {
            self.reload_cart();
        }
    }

    /// Puts every ingredient line of a recipe into the cart.
    pub fn add_recipe_to_cart(&mut self, recipe: RecipeId) {
        let result = self.data.recipe_ingredients(recipe).and_then(|lines| {
            for line in &lines {
                self.data
                    .add_cart_item(self.user, &line.name, &line.quantity, &line.unit)?;
            }
            Ok(lines.len())
        });
        if let Some(added) = self.guard("Adding recipe to cart", result) {
            log::info!("added {} ingredients to the cart", added);
            self.reload_cart();
        }
    }

    /// Removes every checked line from the store, then reloads.
    pub fn remove_checked_cart_items(&mut self) {
        let keys: Vec<_> = self
            .cart_rows
            .iter()
            .filter(|row| row.checked())
            .map(|row| row.key())
            .collect();
        if keys.is_empty() {
            return;
        }
        let result = self.data.remove_cart_items(self.user, &keys);
        if let Some(removed) = self.guard("Removing cart items", result) {
            log::info!("removed {} cart rows", removed);
            self.reload_cart();
        }
    }

    pub fn clear_cart(&mut self) {
        let result = self.data.clear_cart(self.user);
        if self.guard("Clearing cart", result).is_some() {
            self.reload_cart();
        }
    }

    /// Exports the aggregated cart. An empty cart is refused with a
    /// banner; no file is created or truncated.
    pub fn export_cart(&mut self, path: &Path) {
        if self.cart_raw.is_empty() {
            log::warn!("refusing to export an empty cart");
            self.error = Some("Cart is empty".into());
            return;
        }
        let entries = aggregate(&self.cart_raw);
        let result = tastepuzzle_foundation::export_shopping_list(path, &entries);
        self.guard("Exporting shopping list", result);
    }

    pub fn update_avatar(&mut self, bytes: &[u8]) {
        let result = self.data.update_avatar(self.user, bytes);
        if self.guard("Updating avatar", result).is_some() {
            self.refresh_profile();
        }
    }

    // ---- geometry, paint, input ----

    /// Lays out the active tab's content for `width` and returns the
    /// total content height. Resize re-runs this; no data is re-read.
    pub fn layout(&mut self, width: f32) -> f32 {
        self.viewport_width = width;
        let mut y = -self.scroll;
        let top = y;

        match self.tab {
            Tab::Browser => {
                for section in &mut self.sections {
                    section
                        .header
                        .set_geometry(Rect::new(0.0, y, width, CATEGORY_HEADER_HEIGHT));
                    y += CATEGORY_HEADER_HEIGHT;

                    let height = section.cards.height_for_width(width);
                    section
                        .cards
                        .compute_layout(Rect::new(0.0, y, width, height), false);
                    y += height;
                }
            }
            Tab::Cart => {
                y += CONTENT_MARGIN;
                for row in &mut self.cart_rows {
                    row.set_geometry(Rect::new(
                        CONTENT_MARGIN,
                        y,
                        width - 2.0 * CONTENT_MARGIN,
                        CART_ROW_HEIGHT,
                    ));
                    y += CART_ROW_HEIGHT + CART_ROW_GAP;
                }
                y += CONTENT_MARGIN;
            }
            Tab::Profile => {
                let line = self.settings.font_size as f32 + 8.0;
                // Login, four stat lines, and the two recipe lists.
                let lines = 5
                    + self.profile.favorites.len()
                    + self.profile.cooked.len()
                    + 2;
                y += 2.0 * CONTENT_MARGIN + lines as f32 * line;
            }
        }

        self.content_height = y - top;
        self.content_height
    }

    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    /// Scrolls the active tab, clamped to the content.
    pub fn scroll_by(&mut self, delta: f32, viewport_height: f32) {
        let max = (self.content_height - viewport_height).max(0.0);
        self.scroll = (self.scroll + delta).clamp(0.0, max);
        self.layout(self.viewport_width);
    }

    pub fn paint(&self, scene: &mut Scene) {
        match self.tab {
            Tab::Browser => {
                for section in &self.sections {
                    section.header.paint(scene, self.settings.title_font_size);
                    for card in section.cards.items() {
                        card.paint(scene, &self.settings);
                    }
                }
            }
            Tab::Cart => {
                for row in &self.cart_rows {
                    row.paint(scene, self.settings.font_size);
                }
            }
            Tab::Profile => self.paint_profile(scene),
        }

        if let Some(message) = &self.error {
            let banner = Rect::new(0.0, 0.0, self.viewport_width, ERROR_BANNER_HEIGHT);
            scene.push_rect(banner, theme::ERROR_BANNER, 0.0);
            scene.push_text(
                Point::new(CONTENT_MARGIN, (ERROR_BANNER_HEIGHT - 12.0) / 2.0),
                message.clone(),
                12.0,
                theme::ERROR_TEXT,
            );
        }
    }

    fn paint_profile(&self, scene: &mut Scene) {
        let size = self.settings.font_size as f32;
        let line = size + 8.0;
        let mut y = -self.scroll + CONTENT_MARGIN;
        let put = |scene: &mut Scene, text: String, y: f32| {
            scene.push_text(Point::new(CONTENT_MARGIN, y), text, size, theme::TEXT_PRIMARY);
        };

        let login = self.profile.login.as_deref().unwrap_or("(no user)");
        put(scene, format!("User: {}", login), y);
        y += line;
        put(scene, format!("Recipes: {}", self.profile.stats.recipes_count), y);
        y += line;
        put(scene, format!("Favorites: {}", self.profile.stats.favorites_count), y);
        y += line;
        put(scene, format!("Cooked: {}", self.profile.stats.cooked_count), y);
        y += line;
        put(scene, format!("In cart: {}", self.profile.stats.cart_count), y);
        y += line;

        put(scene, "Favorite recipes:".to_string(), y);
        y += line;
        for recipe in &self.profile.favorites {
            put(scene, format!("  {}", recipe.name), y);
            y += line;
        }
        put(scene, "Cooked recipes:".to_string(), y);
        y += line;
        for recipe in &self.profile.cooked {
            put(scene, format!("  {}", recipe.name), y);
            y += line;
        }
    }

    /// Routes a click to the widget under it. Returns true when state
    /// changed and the frontend should redraw.
    pub fn click(&mut self, point: Point) -> bool {
        if self.error.is_some() && point.y < ERROR_BANNER_HEIGHT {
            self.error = None;
            return true;
        }

        match self.tab {
            Tab::Browser => {
                let mut action = None;
                'outer: for section in &self.sections {
                    for card in section.cards.items() {
                        if card.rect().contains(point) {
                            action = card.click(point).map(|a| (card.recipe().id, a));
                            break 'outer;
                        }
                    }
                }
                match action {
                    Some((id, CardAction::ToggleFavorite)) => {
                        self.toggle_favorite(id);
                        true
                    }
                    Some((id, CardAction::ToggleCooked)) => {
                        self.toggle_cooked(id);
                        true
                    }
                    None => false,
                }
            }
            Tab::Cart => self
                .cart_rows
                .iter_mut()
                .any(|row| row.rect().contains(point) && row.click(point)),
            Tab::Profile => false,
        }
    }

    /// Error-banner policy: log with context, surface the message, keep
    /// whatever was displayed before. Never panics.
    fn guard<T>(&mut self, what: &str, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                log::error!("{}: {:#}", what, err);
                self.error = Some(format!("{} failed", what));
                None
            }
        }
    }
}
