//! The section header above each category's card grid.

use tastepuzzle_ui_graphics::{Point, Rect, Scene};

use crate::theme;

pub const CATEGORY_HEADER_HEIGHT: f32 = 40.0;

/// `<category> (<count>)` with a rule underneath.
#[derive(Clone, Debug)]
pub struct CategoryHeader {
    category: String,
    count: usize,
    rect: Rect,
}

impl CategoryHeader {
    pub fn new(category: impl Into<String>, count: usize) -> Self {
        Self {
            category: category.into(),
            count,
            rect: Rect::default(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn label(&self) -> String {
        format!("{} ({})", self.category, self.count)
    }

    pub fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn paint(&self, scene: &mut Scene, title_font_size: u32) {
        let size = title_font_size as f32;
        scene.push_text(
            Point::new(self.rect.x + 15.0, self.rect.y + (self.rect.height - size) / 2.0),
            self.label(),
            size,
            theme::HEADER_TEXT,
        );
        scene.push_rect(
            Rect::new(self.rect.x, self.rect.bottom() - 1.0, self.rect.width, 1.0),
            theme::HEADER_RULE,
            0.0,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label() {
        let header = CategoryHeader::new("Soups", 3);
        assert_eq!(header.label(), "Soups (3)");
    }
}
