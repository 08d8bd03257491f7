//! Receipt layout: turns a receipt and a store profile into draw commands.
//!
//! The engine never touches a device. It measures text through a
//! [`TextMeasure`] implementation and returns an ordered list of
//! [`DrawCommand`]s that a render surface executes afterwards.

mod canvas;
mod engine;
pub mod logo;
pub mod metrics;

pub use canvas::{Canvas, Column};
pub use engine::LayoutEngine;
pub use metrics::{MonospaceMetrics, TextMeasure, wrap_text};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A position on the page, in layout units from the top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair, in layout units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Font style of a text command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
}

/// Horizontal alignment of text inside its column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// One atomic instruction for a render surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Draw `text` with its top-left corner at `position`.
    Text {
        text: String,
        position: Point,
        font_size: f32,
        style: FontStyle,
    },
    /// Draw a straight rule.
    Line { from: Point, to: Point },
    /// Draw the image at `source` scaled to `size`.
    Image {
        source: PathBuf,
        position: Point,
        size: Size,
    },
}

impl DrawCommand {
    /// Text content, for text commands.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawCommand::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Top edge of the command on the page.
    pub fn top(&self) -> f32 {
        match self {
            DrawCommand::Text { position, .. } | DrawCommand::Image { position, .. } => position.y,
            DrawCommand::Line { from, to } => from.y.min(to.y),
        }
    }
}
