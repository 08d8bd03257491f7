//! Render surfaces: the devices that execute draw commands.

mod preview;

pub use preview::TextPreview;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::RenderError;
use crate::layout::{DrawCommand, FontStyle, Point, Size, TextMeasure};

/// A device that draws text, rules and images.
///
/// Surfaces also measure text, so a layout can be computed with the exact
/// metrics of the device that will print it.
pub trait RenderSurface: TextMeasure {
    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        font_size: f32,
        style: FontStyle,
    ) -> Result<(), RenderError>;

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), RenderError>;

    fn draw_image(&mut self, source: &Path, position: Point, size: Size) -> Result<(), RenderError>;

    /// Pulse the cash drawer attached to the device, if any.
    fn open_cash_drawer(&mut self) -> Result<(), RenderError> {
        debug!("Surface has no cash drawer");
        Ok(())
    }
}

/// Execute `commands` on `surface` in order.
///
/// Stops at the first command the surface rejects.
pub fn execute<S: RenderSurface + ?Sized>(
    commands: &[DrawCommand],
    surface: &mut S,
) -> Result<(), RenderError> {
    for (index, command) in commands.iter().enumerate() {
        let result = match command {
            DrawCommand::Text {
                text,
                position,
                font_size,
                style,
            } => surface.draw_text(text, *position, *font_size, *style),
            DrawCommand::Line { from, to } => surface.draw_line(*from, *to),
            DrawCommand::Image {
                source,
                position,
                size,
            } => surface.draw_image(source, *position, *size),
        };

        if let Err(e) = result {
            warn!("Rendering stopped at command {} of {}: {}", index + 1, commands.len(), e);
            return Err(e);
        }
    }

    debug!("Rendered {} commands", commands.len());
    Ok(())
}
