//! A retained display list.
//!
//! Widgets paint into a [`Scene`]; the renderer backend walks the command
//! list in order and rasterizes it. Commands are deliberately coarse
//! (rects and text runs) — this keeps widget code free of any pixel work.

use crate::{Color, Point, Rect};

/// A single run of text anchored at a baseline-less top-left origin.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub origin: Point,
    pub text: String,
    /// Logical pixel height of a glyph cell.
    pub size: f32,
    pub color: Color,
}

/// One paint operation. Later commands draw over earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A filled rectangle with an optional rounded-corner radius.
    Rect {
        rect: Rect,
        color: Color,
        corner_radius: f32,
    },
    /// A horizontal line of text.
    Text(TextRun),
}

/// An ordered list of paint commands for one frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    commands: Vec<DrawCommand>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push_rect(&mut self, rect: Rect, color: Color, corner_radius: f32) {
        self.commands.push(DrawCommand::Rect {
            rect,
            color,
            corner_radius,
        });
    }

    pub fn push_text(&mut self, origin: Point, text: impl Into<String>, size: f32, color: Color) {
        self.commands.push(DrawCommand::Text(TextRun {
            origin,
            text: text.into(),
            size,
            color,
        }));
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Texts in paint order. Test helper for asserting on what a frame
    /// would show without rasterizing it.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text(run) => Some(run.text.as_str()),
            _ => None,
        })
    }
}
