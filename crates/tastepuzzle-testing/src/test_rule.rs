//! The application test rule.

use std::time::{Duration, Instant};

use tastepuzzle_app_shell::{AppShell, Tab};
use tastepuzzle_data::{NewIngredient, NewRecipe, Store, UserId};
use tastepuzzle_foundation::Settings;
use tastepuzzle_ui::RecipeCard;
use tastepuzzle_ui_graphics::{Point, Scene};

pub const DEFAULT_TEST_WIDTH: f32 = 800.0;

/// A recipe fixture with sensible defaults. Tests override what they
/// care about.
pub fn recipe_fixture(name: &str, dish_type: &str) -> NewRecipe {
    NewRecipe {
        name: name.into(),
        description: format!("{} description", name),
        time_to_cook: Some(30),
        cuisine: None,
        dish_type: dish_type.into(),
        ingredients: vec![NewIngredient::new("Salt", "5", "g")],
    }
}

/// A complete application on an in-memory database, with a virtual
/// clock. Harness methods panic on setup failure; that is a broken test,
/// not a recoverable condition.
pub struct AppTestRule {
    shell: AppShell<Store>,
    user: UserId,
    now: Instant,
    width: f32,
}

impl AppTestRule {
    pub fn new() -> Self {
        let store = Store::open_in_memory().expect("in-memory store");
        let user = store.ensure_user("tester").expect("test user");
        Self {
            shell: AppShell::new(store, user, Settings::default()),
            user,
            now: Instant::now(),
            width: DEFAULT_TEST_WIDTH,
        }
    }

    pub fn user(&self) -> UserId {
        self.user
    }

    pub fn shell(&self) -> &AppShell<Store> {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut AppShell<Store> {
        &mut self.shell
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Seeds a recipe and reloads the browser.
    pub fn given_recipe(&mut self, recipe: NewRecipe) -> &mut Self {
        self.shell.add_recipe(&recipe);
        assert!(self.shell.error().is_none(), "fixture insert failed");
        self
    }

    pub fn given_cart_item(&mut self, name: &str, quantity: &str, unit: &str) -> &mut Self {
        self.shell.add_cart_item(name, quantity, unit);
        assert!(self.shell.error().is_none(), "fixture insert failed");
        self
    }

    // ---- clock ----

    /// Advances the virtual clock and ticks the shell, firing any due
    /// debounce.
    pub fn advance(&mut self, duration: Duration) -> bool {
        self.now += duration;
        self.shell.tick(self.now)
    }

    pub fn type_name_filter(&mut self, text: &str) {
        self.shell.set_name_filter(text, self.now);
    }

    /// Advances past the debounce delay so the name filter applies.
    pub fn settle(&mut self) {
        self.advance(tastepuzzle_foundation::DEFAULT_DELAY + Duration::from_millis(1));
    }

    // ---- frames and queries ----

    /// Lays out at the current width and paints one frame.
    pub fn frame(&mut self) -> Scene {
        self.shell.layout(self.width);
        let mut scene = Scene::new();
        self.shell.paint(&mut scene);
        scene
    }

    pub fn section_titles(&self) -> Vec<String> {
        self.shell
            .sections()
            .iter()
            .map(|s| s.header.category().to_string())
            .collect()
    }

    pub fn card(&self, name: &str) -> &RecipeCard {
        self.shell
            .sections()
            .iter()
            .flat_map(|s| s.cards.items())
            .find(|c| c.recipe().name == name)
            .unwrap_or_else(|| panic!("No card named {:?} on screen", name))
    }

    pub fn assert_shows(&mut self, text: &str) {
        let scene = self.frame();
        assert!(
            scene.texts().any(|t| t == text),
            "Expected frame to show {:?}",
            text
        );
    }

    pub fn assert_does_not_show(&mut self, text: &str) {
        let scene = self.frame();
        assert!(
            scene.texts().all(|t| t != text),
            "Expected frame not to show {:?}",
            text
        );
    }

    // ---- input ----

    pub fn click(&mut self, point: Point) -> bool {
        self.shell.click(point)
    }

    /// Clicks the favorite toggle of the named card.
    pub fn click_favorite(&mut self, name: &str) {
        self.shell.layout(self.width);
        let rect = self.card(name).rect();
        let point = Point::new(rect.x + 30.0, rect.bottom() - 20.0);
        assert!(self.shell.click(point), "favorite toggle missed on {:?}", name);
    }

    /// Clicks the cooked toggle of the named card.
    pub fn click_cooked(&mut self, name: &str) {
        self.shell.layout(self.width);
        let rect = self.card(name).rect();
        let point = Point::new(rect.right() - 30.0, rect.bottom() - 20.0);
        assert!(self.shell.click(point), "cooked toggle missed on {:?}", name);
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.shell.select_tab(tab);
    }
}

impl Default for AppTestRule {
    fn default() -> Self {
        Self::new()
    }
}
