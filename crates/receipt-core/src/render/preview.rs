//! Plain-text preview surface.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::RenderError;
use crate::layout::{FontStyle, MonospaceMetrics, Point, Size, TextMeasure};
use crate::models::profile::DEFAULT_PAGE_WIDTH;

use super::RenderSurface;

/// Font size whose character width defines one grid column.
const GRID_FONT_SIZE: f32 = 10.0;

const LOGO_MARKER: &str = "[logo]";

#[derive(Debug, Clone)]
enum Mark {
    Text { x: f32, text: String },
    Rule,
    Image,
}

/// Renders draw commands onto a monospace character grid.
///
/// Commands sharing a top edge land on the same text line; horizontal rules
/// become dashes and images a centered `[logo]` marker.
#[derive(Debug, Clone)]
pub struct TextPreview {
    metrics: MonospaceMetrics,
    page_width: f32,
    lines: BTreeMap<i64, Vec<Mark>>,
    cash_drawer_opened: bool,
}

impl TextPreview {
    pub fn new(page_width: f32) -> Self {
        Self {
            metrics: MonospaceMetrics::new(),
            page_width,
            lines: BTreeMap::new(),
            cash_drawer_opened: false,
        }
    }

    /// Number of character columns on the grid.
    pub fn columns(&self) -> usize {
        (self.page_width / self.metrics.char_width(GRID_FONT_SIZE)).floor().max(1.0) as usize
    }

    /// Whether the cash drawer was pulsed.
    pub fn cash_drawer_opened(&self) -> bool {
        self.cash_drawer_opened
    }

    /// Text of each line, left to right, joined with `" | "`.
    ///
    /// Rules and images are left out.
    pub fn rows(&self) -> Vec<String> {
        self.lines
            .values()
            .filter_map(|marks| {
                let texts: Vec<&str> = sorted_texts(marks).into_iter().map(|(_, t)| t).collect();
                (!texts.is_empty()).then(|| texts.join(" | "))
            })
            .collect()
    }

    /// The rendered picture, one grid line per output line.
    pub fn into_string(self) -> String {
        let columns = self.columns();
        let char_width = self.metrics.char_width(GRID_FONT_SIZE);
        let mut out = String::new();

        for marks in self.lines.values() {
            for mark in marks {
                match mark {
                    Mark::Rule => {
                        out.push_str(&"-".repeat(columns));
                        out.push('\n');
                    }
                    Mark::Image => {
                        let pad = columns.saturating_sub(LOGO_MARKER.len()) / 2;
                        out.push_str(&" ".repeat(pad));
                        out.push_str(LOGO_MARKER);
                        out.push('\n');
                    }
                    Mark::Text { .. } => {}
                }
            }

            let texts = sorted_texts(marks);
            if texts.is_empty() {
                continue;
            }

            let mut line = String::new();
            let mut used = 0;
            for (x, text) in texts {
                let column = (x / char_width).round().max(0.0) as usize;
                if column > used {
                    line.push_str(&" ".repeat(column - used));
                    used = column;
                } else if used > 0 {
                    line.push(' ');
                    used += 1;
                }
                line.push_str(text);
                used += text.chars().count();
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out
    }

    fn mark(&mut self, y: f32, mark: Mark) {
        let key = (y * 100.0).round() as i64;
        self.lines.entry(key).or_default().push(mark);
    }
}

impl Default for TextPreview {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_WIDTH)
    }
}

fn sorted_texts(marks: &[Mark]) -> Vec<(f32, &str)> {
    let mut texts: Vec<(f32, &str)> = marks
        .iter()
        .filter_map(|mark| match mark {
            Mark::Text { x, text } => Some((*x, text.as_str())),
            _ => None,
        })
        .collect();
    texts.sort_by(|a, b| a.0.total_cmp(&b.0));
    texts
}

impl TextMeasure for TextPreview {
    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        self.metrics.measure_text(text, font_size)
    }
}

impl RenderSurface for TextPreview {
    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        _font_size: f32,
        _style: FontStyle,
    ) -> Result<(), RenderError> {
        self.mark(
            position.y,
            Mark::Text {
                x: position.x,
                text: text.to_string(),
            },
        );
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), RenderError> {
        self.mark(from.y.min(to.y), Mark::Rule);
        Ok(())
    }

    fn draw_image(&mut self, _source: &Path, position: Point, _size: Size) -> Result<(), RenderError> {
        self.mark(position.y, Mark::Image);
        Ok(())
    }

    fn open_cash_drawer(&mut self) -> Result<(), RenderError> {
        self.cash_drawer_opened = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(preview: &mut TextPreview, text: &str, x: f32, y: f32) {
        preview
            .draw_text(text, Point::new(x, y), 10.0, FontStyle::Regular)
            .unwrap();
    }

    #[test]
    fn test_rows_join_same_line() {
        let mut preview = TextPreview::new(280.0);
        text(&mut preview, "$18.99", 244.0, 40.0);
        text(&mut preview, "Pizza", 0.0, 40.0);
        text(&mut preview, "1", 160.0, 40.0);
        text(&mut preview, "$18.99", 195.0, 40.0);
        text(&mut preview, "Store", 100.0, 10.0);

        assert_eq!(preview.rows(), vec!["Store", "Pizza | 1 | $18.99 | $18.99"]);
    }

    #[test]
    fn test_into_string_grid() {
        let mut preview = TextPreview::new(60.0);
        preview
            .draw_image(Path::new("logo.png"), Point::new(20.0, 0.0), Size::new(20.0, 20.0))
            .unwrap();
        text(&mut preview, "Total", 0.0, 30.0);
        text(&mut preview, "$5", 48.0, 30.0);
        preview
            .draw_line(Point::new(5.0, 20.0), Point::new(55.0, 20.0))
            .unwrap();

        assert_eq!(preview.columns(), 10);
        assert_eq!(preview.into_string(), "  [logo]\n----------\nTotal   $5\n");
    }

    #[test]
    fn test_overlapping_text_stays_separated() {
        let mut preview = TextPreview::new(60.0);
        text(&mut preview, "Subtotal:", 0.0, 0.0);
        text(&mut preview, "$5", 6.0, 0.0);
        assert_eq!(preview.into_string(), "Subtotal: $5\n");
    }

    #[test]
    fn test_cash_drawer_flag() {
        let mut preview = TextPreview::default();
        assert!(!preview.cash_drawer_opened());
        preview.open_cash_drawer().unwrap();
        assert!(preview.cash_drawer_opened());
    }
}
