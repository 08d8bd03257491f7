//! Store logo sizing.

use std::path::Path;

use tracing::{debug, warn};

use super::Size;

/// Largest edge of the printed logo, in layout units.
pub const MAX_LOGO_EDGE: f32 = 60.0;

/// Decode the logo at `path` and return its pixel dimensions.
///
/// The whole image is decoded, so a truncated or corrupt file is rejected
/// here rather than by the render surface. Returns `None`, with a warning,
/// when the file is missing or cannot be decoded.
pub fn load_logo(path: &Path) -> Option<(u32, u32)> {
    let decoded = image::open(path).map(|logo| (logo.width(), logo.height()));
    match decoded {
        Ok((width, height)) if width > 0 && height > 0 => {
            debug!("Loaded logo {:?}: {}x{}", path, width, height);
            Some((width, height))
        }
        Ok(_) => {
            warn!("Skipping logo {:?}: image has no pixels", path);
            None
        }
        Err(e) => {
            warn!("Skipping logo {:?}: {}", path, e);
            None
        }
    }
}

/// Printed size of a `width` x `height` pixel logo.
///
/// The logo keeps its aspect ratio and neither edge exceeds
/// [`MAX_LOGO_EDGE`].
pub fn logo_size(width: u32, height: u32) -> Size {
    let (w, h) = (width as f32, height as f32);
    let display_width = MAX_LOGO_EDGE.min(w * MAX_LOGO_EDGE / h);
    let display_height = (h * display_width / w).min(MAX_LOGO_EDGE);
    Size::new(display_width, display_height)
}
