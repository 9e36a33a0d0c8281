//! Layout contracts and policies for tastepuzzle.
//!
//! The only non-trivial policy in the application is the flow layout:
//! cards pack left-to-right and wrap to a new row when the container's
//! right edge would be crossed, like word-wrapped text.

mod flow;

pub use flow::{FlowItem, FlowLayout, Margins};
