//! Cursor-tracking accumulator for draw commands.

use std::path::Path;

use super::metrics::{TextMeasure, wrap_text};
use super::{Alignment, DrawCommand, FontStyle, Point, Size};

/// Inset of horizontal rules from both page edges.
const RULE_INSET: f32 = 5.0;

/// Vertical space a horizontal rule consumes.
const RULE_HEIGHT: f32 = 2.0;

/// One column of a multi-column row.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub text: String,
    /// Fraction of the page width.
    pub width: f32,
    pub alignment: Alignment,
    pub font_size: f32,
    pub style: FontStyle,
}

impl Column {
    pub fn new(text: impl Into<String>, width: f32, alignment: Alignment, font_size: f32) -> Self {
        Self {
            text: text.into(),
            width,
            alignment,
            font_size,
            style: FontStyle::Regular,
        }
    }

    pub fn left(text: impl Into<String>, width: f32, font_size: f32) -> Self {
        Self::new(text, width, Alignment::Left, font_size)
    }

    pub fn center(text: impl Into<String>, width: f32, font_size: f32) -> Self {
        Self::new(text, width, Alignment::Center, font_size)
    }

    pub fn right(text: impl Into<String>, width: f32, font_size: f32) -> Self {
        Self::new(text, width, Alignment::Right, font_size)
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }
}

/// Accumulates draw commands below a vertical cursor.
///
/// Every draw method places its output at the cursor, advances the cursor
/// by the height it consumed and returns that height.
pub struct Canvas<'m, M: TextMeasure + ?Sized> {
    metrics: &'m M,
    page_width: f32,
    cursor: f32,
    commands: Vec<DrawCommand>,
}

impl<'m, M: TextMeasure + ?Sized> Canvas<'m, M> {
    pub fn new(metrics: &'m M, page_width: f32, top_margin: f32) -> Self {
        Self {
            metrics,
            page_width,
            cursor: top_margin,
            commands: Vec::new(),
        }
    }

    pub fn page_width(&self) -> f32 {
        self.page_width
    }

    /// Current vertical position.
    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Leave `space` units blank.
    pub fn gap(&mut self, space: f32) {
        self.cursor += space;
    }

    /// Draw text centered across the page, wrapping at the page width.
    pub fn centered(&mut self, text: &str, font_size: f32, style: FontStyle) -> f32 {
        let mut height = 0.0;
        for line in wrap_text(self.metrics, text, font_size, self.page_width) {
            let size = self.metrics.measure_text(&line, font_size);
            let x = (self.page_width - size.width) / 2.0;
            self.push_text(line, Point::new(x, self.cursor + height), font_size, style);
            height += size.height;
        }
        self.cursor += height;
        height
    }

    /// Draw one row of columns sharing the cursor as their top edge.
    ///
    /// Text wraps inside its column; the row is as tall as its tallest
    /// column.
    pub fn row(&mut self, columns: &[Column]) -> f32 {
        let mut left = 0.0;
        let mut row_height: f32 = 0.0;

        for column in columns {
            let box_width = column.width * self.page_width;
            let mut column_height = 0.0;

            for line in wrap_text(self.metrics, &column.text, column.font_size, box_width) {
                let size = self.metrics.measure_text(&line, column.font_size);
                let x = match column.alignment {
                    Alignment::Left => left,
                    Alignment::Center => left + (box_width - size.width) / 2.0,
                    Alignment::Right => left + box_width - size.width,
                };
                let y = self.cursor + column_height;
                if !line.is_empty() {
                    self.push_text(line, Point::new(x, y), column.font_size, column.style);
                }
                column_height += size.height;
            }

            row_height = row_height.max(column_height);
            left += box_width;
        }

        self.cursor += row_height;
        row_height
    }

    /// Draw a horizontal rule across the page.
    pub fn rule(&mut self) -> f32 {
        let y = self.cursor;
        self.commands.push(DrawCommand::Line {
            from: Point::new(RULE_INSET, y),
            to: Point::new(self.page_width - RULE_INSET, y),
        });
        self.cursor += RULE_HEIGHT;
        RULE_HEIGHT
    }

    /// Draw an image of `size` centered across the page.
    pub fn image(&mut self, source: &Path, size: Size) -> f32 {
        let x = (self.page_width - size.width) / 2.0;
        self.commands.push(DrawCommand::Image {
            source: source.to_path_buf(),
            position: Point::new(x, self.cursor),
            size,
        });
        self.cursor += size.height;
        size.height
    }

    /// Finished command sequence.
    pub fn finish(self) -> Vec<DrawCommand> {
        self.commands
    }

    fn push_text(&mut self, text: String, position: Point, font_size: f32, style: FontStyle) {
        self.commands.push(DrawCommand::Text {
            text,
            position,
            font_size,
            style,
        });
    }
}
