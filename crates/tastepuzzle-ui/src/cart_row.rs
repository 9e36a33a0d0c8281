//! One line of the cart list: a checkbox plus the aggregated entry.

use tastepuzzle_foundation::AggregatedEntry;
use tastepuzzle_ui_graphics::{Point, Rect, Scene};

use crate::theme;

pub const CART_ROW_HEIGHT: f32 = 36.0;

const PADDING: f32 = 10.0;
const CHECKBOX_SIZE: f32 = 18.0;

/// A selectable cart line. Selection drives batch removal.
#[derive(Clone, Debug)]
pub struct CartRow {
    entry: AggregatedEntry,
    checked: bool,
    rect: Rect,
}

impl CartRow {
    pub fn new(entry: AggregatedEntry) -> Self {
        Self {
            entry,
            checked: false,
            rect: Rect::default(),
        }
    }

    pub fn entry(&self) -> &AggregatedEntry {
        &self.entry
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    pub fn set_geometry(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The removal key for this line.
    pub fn key(&self) -> (String, String) {
        (self.entry.name.clone(), self.entry.unit.clone())
    }

    /// `name: quantity unit`, with integral quantities shown without
    /// decimals.
    pub fn label(&self) -> String {
        format!(
            "{}: {} {}",
            self.entry.name, self.entry.quantity, self.entry.unit
        )
    }

    fn checkbox_rect(&self) -> Rect {
        Rect::new(
            self.rect.x + PADDING,
            self.rect.y + (self.rect.height - CHECKBOX_SIZE) / 2.0,
            CHECKBOX_SIZE,
            CHECKBOX_SIZE,
        )
    }

    /// True when the click toggled the checkbox.
    pub fn click(&mut self, point: Point) -> bool {
        if self.checkbox_rect().contains(point) {
            self.checked = !self.checked;
            true
        } else {
            false
        }
    }

    pub fn paint(&self, scene: &mut Scene, font_size: u32) {
        scene.push_rect(self.rect, theme::CARD_BACKGROUND, 4.0);

        let checkbox = self.checkbox_rect();
        scene.push_rect(checkbox, theme::CARD_BORDER, 3.0);
        if self.checked {
            scene.push_rect(checkbox.inset(3.0, 3.0, 3.0, 3.0), theme::COOKED_ON, 2.0);
        }

        let size = font_size as f32;
        scene.push_text(
            Point::new(
                checkbox.right() + PADDING,
                self.rect.y + (self.rect.height - size) / 2.0,
            ),
            self.label(),
            size,
            theme::TEXT_PRIMARY,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tastepuzzle_foundation::Quantity;

    fn entry() -> AggregatedEntry {
        AggregatedEntry {
            name: "Salt".into(),
            quantity: Quantity::Number(8.0),
            unit: "g".into(),
        }
    }

    #[test]
    fn test_label_uses_display_formatting() {
        let row = CartRow::new(entry());
        assert_eq!(row.label(), "Salt: 8 g");
    }

    #[test]
    fn test_checkbox_click_toggles() {
        let mut row = CartRow::new(entry());
        row.set_geometry(Rect::new(0.0, 0.0, 400.0, CART_ROW_HEIGHT));

        let inside = Point::new(PADDING + 2.0, CART_ROW_HEIGHT / 2.0);
        assert!(row.click(inside));
        assert!(row.checked());
        assert!(row.click(inside));
        assert!(!row.checked());

        // A click on the label does not toggle.
        assert!(!row.click(Point::new(200.0, CART_ROW_HEIGHT / 2.0)));
    }
}
