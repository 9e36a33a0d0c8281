//! Geometry and paint primitives shared by the layout, widget, and
//! renderer crates.

mod color;
mod geometry;
mod scene;

pub use color::Color;
pub use geometry::{Point, Rect, Size};
pub use scene::{DrawCommand, Scene, TextRun};
