//! Configuration constants and start-up settings for the viewer.

use std::path::PathBuf;

use read_fonts::types::{Fixed, Tag};

/// Default window width in pixels.
pub const DEFAULT_WIDTH: u32 = 640;

/// Default window height in pixels.
pub const DEFAULT_HEIGHT: u32 = 480;

/// Height of one header text row in pixels.
pub const HEADER_HEIGHT: i32 = 12;

/// Default point size when none is given on the command line.
pub const DEFAULT_POINT_SIZE: u32 = 64;

/// Largest selectable point size.
pub const MAX_POINT_SIZE: u32 = 500;

/// Default resolution in dpi. At 72 dpi the point size equals the ppem.
pub const DEFAULT_DPI: u32 = 72;

/// Maximum number of variation axes under operator control.
pub const MAX_AXES: usize = 16;

/// Default axis step as a fraction of the axis range.
pub const DEFAULT_INCREMENT: f64 = 0.025;

/// Smallest axis step.
pub const MIN_INCREMENT: f64 = 0.01;

/// Largest axis step.
pub const MAX_INCREMENT: f64 = 0.1;

/// Axis ranges wider than this many design units are rounded to whole units.
pub const WHOLE_UNIT_RANGE: f64 = 32.0;

/// Left margin reserved for the axis readout.
pub const AXIS_PANEL_WIDTH: i32 = 18 * 8;

/// Left margin when no axes are shown.
pub const PLAIN_MARGIN: i32 = 12;

/// Right-hand slack before a line wraps.
pub const RIGHT_MARGIN: i32 = 4;

/// Text shown in sample-text mode.
pub const SAMPLE_TEXT: &str = "The quick brown fox jumps over the lazy dog 0123456789 \
     âêîûôäëïöüÿàùéèç &#~\"'(-`_^@)=+° ABCDEFGHIJKLMNOPQRSTUVWXYZ $£^¨*µù%!§:/;.,?<>";

/// Start-up settings collected from the command line.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Resolution in dpi.
    pub dpi: u32,
    /// Point size every font is opened at.
    pub point_size: u32,
    /// First glyph index, reduced modulo the glyph count on load.
    pub first_glyph: i64,
    /// Charmap to select, if any.
    pub encoding: Option<Tag>,
    /// Design coordinates by axis index, applied on every load.
    pub requested_coords: Vec<Fixed>,
    /// Font files to browse, in order.
    pub fonts: Vec<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            dpi: DEFAULT_DPI,
            point_size: DEFAULT_POINT_SIZE,
            first_glyph: 0,
            encoding: None,
            requested_coords: Vec::new(),
            fonts: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Unit suffix for sizes: `ppem` at 72 dpi, `pt` otherwise.
    pub fn size_unit(&self) -> &'static str {
        if self.dpi == DEFAULT_DPI { "ppem" } else { "pt" }
    }
}
