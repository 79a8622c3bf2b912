//! Interfaces to the font engine that loads faces and measures glyphs.

use std::{fmt, path::Path};

use read_fonts::types::{Fixed, Tag};

use crate::{axis::Axis, error::Result};

/// A glyph to place: either a glyph index or a character to map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphRef {
    Index(u32),
    Char(char),
}

/// Pixel metrics of a face at its current size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeMetrics {
    pub x_ppem: i32,
    pub y_ppem: i32,
    /// Baseline-to-baseline distance, truncated to whole pixels.
    pub line_height: i32,
}

/// The hinting implementation an engine is using.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HintingEngine {
    /// The font's own instructions.
    #[default]
    Interpreter,
    /// Automatic hinting derived from the outlines.
    Auto,
}

impl HintingEngine {
    /// The other engine.
    pub fn cycle(self) -> Self {
        match self {
            HintingEngine::Interpreter => HintingEngine::Auto,
            HintingEngine::Auto => HintingEngine::Interpreter,
        }
    }
}

impl fmt::Display for HintingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintingEngine::Interpreter => f.write_str("interpreter"),
            HintingEngine::Auto => f.write_str("autohinter"),
        }
    }
}

/// Per-glyph horizontal advances at the current size and coordinates.
pub trait AdvanceProvider {
    /// Advance width in pixels, or `None` if the glyph cannot be loaded.
    fn advance(&self, glyph: GlyphRef) -> Option<f32>;
}

/// Opens faces.
pub trait FontEngine {
    type Face: FontFace;

    /// Open face `face_index` of the file at `path`, selecting the charmap
    /// for `encoding` when one is given.
    fn load_face(&mut self, path: &Path, face_index: u32, encoding: Option<Tag>)
    -> Result<Self::Face>;

    fn hinting_engine(&self) -> HintingEngine;

    /// Switch to the other hinting engine. Faces opened afterwards use it.
    fn cycle_hinting_engine(&mut self);
}

/// An opened face.
pub trait FontFace {
    type Advances<'a>: AdvanceProvider
    where
        Self: 'a;

    /// Number of faces in the file this face came from.
    fn face_count(&self) -> u32;
    fn family_name(&self) -> String;
    fn style_name(&self) -> String;
    fn postscript_name(&self) -> String;
    /// Name of the outline format driver (e.g. `truetype`, `cff`).
    fn driver_name(&self) -> &str;
    /// Whether this is an SFNT-wrapped (TrueType/OpenType) face.
    fn is_sfnt(&self) -> bool;
    fn glyph_count(&self) -> u32;

    /// Declared variation axes; `None` if the face has no variation data.
    fn axes(&self) -> Option<Vec<Axis>>;
    fn named_instance_count(&self) -> u32;
    /// 1-based named instance matching the default coordinates, or 0.
    fn default_named_instance(&self) -> u32;
    /// Move to 1-based named instance `index` and return its coordinates.
    fn select_named_instance(&mut self, index: u32) -> Result<Vec<Fixed>>;
    fn variation_coordinates(&self) -> Vec<Fixed>;
    fn set_variation_coordinates(&mut self, coords: &[Fixed]) -> Result<()>;

    fn set_char_size(&mut self, point_size: u32, dpi: u32) -> Result<()>;
    fn size_metrics(&self) -> SizeMetrics;
    fn set_hinting(&mut self, hinting: bool);

    /// Advance lookup for the current size and coordinates.
    fn advances(&self) -> Self::Advances<'_>;
}
