//! The recipe card: one fixed-size tile in the browser grid.

use tastepuzzle_data::Recipe;
use tastepuzzle_foundation::Settings;
use tastepuzzle_ui_graphics::{Point, Rect, Scene, Size};
use tastepuzzle_ui_layout::FlowItem;

use crate::theme;

pub const CARD_WIDTH: f32 = 250.0;
pub const CARD_HEIGHT: f32 = 280.0;

const PADDING: f32 = 10.0;
const IMAGE_HEIGHT: f32 = 100.0;
const BADGE_HEIGHT: f32 = 18.0;
const BADGE_FONT: f32 = 10.0;
const TOGGLE_HEIGHT: f32 = 32.0;

/// What a click inside the card asks the shell to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    ToggleFavorite,
    ToggleCooked,
}

/// A recipe tile. Fixed preferred size; placed by the flow layout.
#[derive(Clone, Debug)]
pub struct RecipeCard {
    recipe: Recipe,
    rect: Rect,
}

impl RecipeCard {
    pub fn new(recipe: Recipe) -> Self {
        Self {
            recipe,
            rect: Rect::default(),
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Patches the favorite flag after the data layer confirmed the write.
    pub fn set_favorite(&mut self, favorite: bool) {
        self.recipe.favorite = favorite;
    }

    pub fn set_cooked(&mut self, cooked: bool) {
        self.recipe.cooked = cooked;
    }

    fn favorite_rect(&self) -> Rect {
        let inner = self.rect.inset(PADDING, 0.0, PADDING, PADDING);
        let half = (inner.width - PADDING) / 2.0;
        Rect::new(
            inner.x,
            inner.bottom() - TOGGLE_HEIGHT,
            half,
            TOGGLE_HEIGHT,
        )
    }

    fn cooked_rect(&self) -> Rect {
        let favorite = self.favorite_rect();
        favorite.translated(favorite.width + PADDING, 0.0)
    }

    /// Maps a click inside the card to an action. Points outside the
    /// toggle regions do nothing.
    pub fn click(&self, point: Point) -> Option<CardAction> {
        if self.favorite_rect().contains(point) {
            Some(CardAction::ToggleFavorite)
        } else if self.cooked_rect().contains(point) {
            Some(CardAction::ToggleCooked)
        } else {
            None
        }
    }

    pub fn paint(&self, scene: &mut Scene, settings: &Settings) {
        scene.push_rect(self.rect, theme::CARD_BORDER, 8.0);
        scene.push_rect(self.rect.inset(1.0, 1.0, 1.0, 1.0), theme::CARD_BACKGROUND, 8.0);

        let inner = self.rect.inset(PADDING, PADDING, PADDING, PADDING);
        let mut y = inner.y;

        if settings.show_images {
            let image = Rect::new(inner.x, y, inner.width, IMAGE_HEIGHT);
            scene.push_rect(image, theme::IMAGE_PLACEHOLDER, 4.0);
            y += IMAGE_HEIGHT + PADDING;
        }

        let title_size = settings.title_font_size as f32;
        let title = truncated(&self.recipe.name, inner.width, title_size);
        scene.push_text(Point::new(inner.x, y), title, title_size, theme::TEXT_PRIMARY);
        y += title_size + PADDING;

        let mut badge_x = inner.x;
        if let Some(cuisine) = &self.recipe.cuisine {
            badge_x = paint_badge(scene, badge_x, y, cuisine, theme::BADGE_CUISINE);
        }
        if let Some(minutes) = self.recipe.time_to_cook {
            let label = format!("{} min", minutes);
            badge_x = paint_badge(scene, badge_x, y, &label, theme::BADGE_TIME);
        }
        paint_badge(scene, badge_x, y, &self.recipe.dish_type, theme::BADGE_DISH_TYPE);
        y += BADGE_HEIGHT + PADDING;

        let body_size = settings.font_size as f32;
        if !self.recipe.description.is_empty() {
            let line = truncated(&self.recipe.description, inner.width, body_size);
            scene.push_text(Point::new(inner.x, y), line, body_size, theme::TEXT_SECONDARY);
        }

        paint_toggle(
            scene,
            self.favorite_rect(),
            "Favorite",
            self.recipe.favorite,
            theme::FAVORITE_ON,
        );
        paint_toggle(
            scene,
            self.cooked_rect(),
            "Cooked",
            self.recipe.cooked,
            theme::COOKED_ON,
        );
    }
}

impl FlowItem for RecipeCard {
    fn preferred_size(&self) -> Option<Size> {
        Some(Size::new(CARD_WIDTH, CARD_HEIGHT))
    }

    fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }
}

fn paint_badge(
    scene: &mut Scene,
    x: f32,
    y: f32,
    label: &str,
    color: tastepuzzle_ui_graphics::Color,
) -> f32 {
    let width = text_width(label, BADGE_FONT) + 8.0;
    let rect = Rect::new(x, y, width, BADGE_HEIGHT);
    scene.push_rect(rect, color, 4.0);
    scene.push_text(
        Point::new(x + 4.0, y + (BADGE_HEIGHT - BADGE_FONT) / 2.0),
        label,
        BADGE_FONT,
        theme::BADGE_TEXT,
    );
    rect.right() + 6.0
}

fn paint_toggle(
    scene: &mut Scene,
    rect: Rect,
    label: &str,
    on: bool,
    on_color: tastepuzzle_ui_graphics::Color,
) {
    let color = if on { on_color } else { theme::TOGGLE_OFF };
    scene.push_rect(rect, color, 6.0);
    let size = BADGE_FONT;
    let x = rect.x + (rect.width - text_width(label, size)).max(0.0) / 2.0;
    let y = rect.y + (rect.height - size) / 2.0;
    scene.push_text(Point::new(x, y), label, size, theme::BADGE_TEXT);
}

/// Glyph cells are square, so a run of `n` characters at `size` spans
/// `n * size` pixels.
fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size
}

fn truncated(text: &str, max_width: f32, size: f32) -> String {
    let max_chars = (max_width / size).floor() as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}
