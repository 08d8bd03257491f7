//! Text measurement.

use super::Size;

/// Measures rendered text.
pub trait TextMeasure {
    /// Size of `text` rendered on a single line at `font_size`.
    fn measure_text(&self, text: &str, font_size: f32) -> Size;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        (**self).measure_text(text, font_size)
    }
}

/// Fixed-pitch metrics: every character has the same advance.
///
/// Good enough for thermal printer fonts, and deterministic, which keeps
/// layouts reproducible without a live device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Character advance as a fraction of the font size.
    pub advance_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f32,
}

impl MonospaceMetrics {
    pub fn new() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }

    /// Width of one character at `font_size`.
    pub fn char_width(&self, font_size: f32) -> f32 {
        font_size * self.advance_ratio
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasure for MonospaceMetrics {
    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        let chars = text.chars().count() as f32;
        Size::new(chars * self.char_width(font_size), font_size * self.line_height_ratio)
    }
}

/// Break `text` into lines no wider than `max_width`, at whitespace.
///
/// A single word wider than `max_width` gets a line of its own and is not
/// split. Always returns at least one line.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    metrics: &M,
    text: &str,
    font_size: f32,
    max_width: f32,
) -> Vec<String> {
    if max_width <= 0.0 || metrics.measure_text(text, font_size).width <= max_width {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate = format!("{} {}", current, word);
        if metrics.measure_text(&candidate, font_size).width <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
