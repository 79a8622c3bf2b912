//! Interface to the display surface.

use crate::{
    error::SurfaceError,
    event::Event,
    layout::{LayoutItem, Marker},
};

/// Rasterization switches forwarded with every glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub antialias: bool,
    /// Flip the outline's fill-rule flag (reveals overlaps).
    pub flip_fill_rule: bool,
    /// Flip the outline's overlap flag.
    pub flip_overlap: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { antialias: true, flip_fill_rule: false, flip_overlap: false }
    }
}

/// Where frames are drawn and input comes from.
///
/// Implementations own their display resources and release them on drop.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Start a new frame.
    fn clear(&mut self);

    /// Write one line of text with its top-left corner at `(x, y)`.
    fn write_line(&mut self, x: i32, y: i32, text: &str);

    /// Fill the zero-advance marker square.
    fn fill_marker(&mut self, marker: Marker);

    /// Rasterize and draw one placed glyph.
    fn draw_glyph(&mut self, item: &LayoutItem, options: RenderOptions);

    /// Show the finished frame.
    fn present(&mut self) -> Result<(), SurfaceError>;

    /// Block until the next input event.
    fn wait_event(&mut self) -> Result<Event, SurfaceError>;
}
