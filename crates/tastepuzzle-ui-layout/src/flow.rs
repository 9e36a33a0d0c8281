//! The flow layout engine.
//!
//! Arranges a variable-length sequence of variable-width items
//! left-to-right inside a container of dynamically changing width,
//! wrapping to a new row when the next item would cross the container's
//! right edge. Placement is recomputed in full on every pass; nothing is
//! diffed or persisted between passes.
//!
//! The required height is a function of the width the caller intends to
//! allocate. Callers must go through [`FlowLayout::height_for_width`]
//! (or a measure-only pass) with that width rather than assuming the
//! height is width-independent.

use tastepuzzle_ui_graphics::{Point, Rect, Size};

/// Outer margins between the container edge and the first/last rows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(15.0)
    }
}

/// An item the flow layout can place.
///
/// The layout engine owns no presentation state; it queries the preferred
/// size on demand and writes the computed placement back through
/// [`FlowItem::set_geometry`].
pub trait FlowItem {
    /// The natural (unconstrained) size the item wants. Items that cannot
    /// report a size are skipped entirely by the layout pass — treated as
    /// absent, not zero-sized.
    fn preferred_size(&self) -> Option<Size>;

    /// Receives the placement computed for this item. Only called on
    /// placing passes, never on measure-only passes.
    fn set_geometry(&mut self, rect: Rect);
}

/// Left-to-right, row-wrapping layout with configurable spacing.
///
/// # Example
///
/// ```rust,ignore
/// let mut flow = FlowLayout::new(Margins::uniform(15.0), 15.0, 15.0);
/// for card in cards {
///     flow.add(card);
/// }
/// let height = flow.height_for_width(container_width);
/// flow.compute_layout(Rect::new(0.0, y, container_width, height), false);
/// ```
#[derive(Debug)]
pub struct FlowLayout<T: FlowItem> {
    items: Vec<T>,
    margins: Margins,
    h_spacing: f32,
    v_spacing: f32,
    // Memoized result of the last measure-only pass, keyed by width.
    height_cache: Option<(f32, f32)>,
}

impl<T: FlowItem> Default for FlowLayout<T> {
    fn default() -> Self {
        Self::new(Margins::default(), 15.0, 15.0)
    }
}

impl<T: FlowItem> FlowLayout<T> {
    pub fn new(margins: Margins, h_spacing: f32, v_spacing: f32) -> Self {
        Self {
            items: Vec::new(),
            margins,
            h_spacing,
            v_spacing,
            height_cache: None,
        }
    }

    /// Appends an item to the ordered sequence.
    pub fn add(&mut self, item: T) {
        self.items.push(item);
        self.height_cache = None;
    }

    /// Removes and returns the item at `index`, or `None` when the index
    /// is out of range. Out-of-range removal is not an error.
    pub fn remove(&mut self, index: usize) -> Option<T> {
        if index < self.items.len() {
            self.height_cache = None;
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    /// Drops every item. The browser tears the card set down and rebuilds
    /// it on each reload.
    pub fn clear(&mut self) {
        self.items.clear();
        self.height_cache = None;
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [T] {
        &mut self.items
    }

    pub fn horizontal_spacing(&self) -> f32 {
        self.h_spacing
    }

    pub fn vertical_spacing(&self) -> f32 {
        self.v_spacing
    }

    /// The total height required to lay the items out at `width`,
    /// including margins. Memoized until the item set changes or a
    /// different width is asked for.
    pub fn height_for_width(&mut self, width: f32) -> f32 {
        if let Some((cached_width, cached_height)) = self.height_cache {
            if cached_width == width {
                return cached_height;
            }
        }
        let height = self.do_layout(Rect::new(0.0, 0.0, width, 0.0), true);
        self.height_cache = Some((width, height));
        height
    }

    /// Places every item inside `rect` (or only measures when
    /// `measure_only` is set) and returns the total required height.
    ///
    /// Deterministic in the items' preferred sizes, the container width,
    /// and the margins/spacings; calling it twice with identical inputs
    /// yields identical placements.
    pub fn compute_layout(&mut self, rect: Rect, measure_only: bool) -> f32 {
        self.do_layout(rect, measure_only)
    }

    /// The width/height bounding the largest single item, plus margins.
    /// A sizing hint, not the packed size.
    pub fn minimum_size(&self) -> Size {
        let mut size = Size::ZERO;
        for item in &self.items {
            if let Some(preferred) = item.preferred_size() {
                size = size.expanded_to(preferred);
            }
        }
        Size::new(
            size.width + self.margins.left + self.margins.right,
            size.height + self.margins.top + self.margins.bottom,
        )
    }

    fn do_layout(&mut self, rect: Rect, measure_only: bool) -> f32 {
        let effective = rect.inset(
            self.margins.left,
            self.margins.top,
            self.margins.right,
            self.margins.bottom,
        );
        // inset() clamps the size; the right edge must stay where the
        // margins put it even for degenerate container widths.
        let right_edge = rect.right() - self.margins.right;

        let mut x = effective.x;
        let mut y = effective.y;
        let mut line_height = 0.0f32;

        for item in &mut self.items {
            let size = match item.preferred_size() {
                Some(size) => size,
                None => continue,
            };

            let mut next_x = x + size.width + self.h_spacing;

            // Wrap only when the current row already holds an item;
            // an item wider than the container gets a row of its own and
            // may overhang the right edge.
            if next_x - self.h_spacing > right_edge && line_height > 0.0 {
                x = effective.x;
                y += line_height + self.v_spacing;
                line_height = 0.0;
                next_x = x + size.width + self.h_spacing;
            }

            if x + size.width > right_edge && line_height == 0.0 {
                log::warn!(
                    "flow item of width {} overflows container width {}",
                    size.width,
                    rect.width
                );
            }

            if !measure_only {
                item.set_geometry(Rect::from_origin_size(Point::new(x, y), size));
            }

            x = next_x;
            line_height = line_height.max(size.height);
        }

        y + line_height - rect.y + self.margins.bottom
    }
}
