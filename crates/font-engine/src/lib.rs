//! [`FontEngine`] implementation on top of skrifa.
//!
//! Faces are read fully into memory and parsed with read-fonts. Design
//! coordinates are normalized per axis through `fvar` and mapped through
//! `avar`, so axes sharing a tag keep independent positions.

mod face;

use std::{fs, path::Path};

use log::debug;
use read_fonts::types::Tag;
use vfview_core::{FontEngine, FontError, HintingEngine, Result};

pub use face::{SkrifaAdvances, SkrifaFace};

/// The only charmap encoding skrifa exposes.
pub const UNICODE_ENCODING: Tag = Tag::new(b"unic");

/// Opens font files from disk.
#[derive(Debug, Default)]
pub struct SkrifaEngine {
    hinting: HintingEngine,
}

impl SkrifaEngine {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FontEngine for SkrifaEngine {
    type Face = SkrifaFace;

    fn load_face(
        &mut self,
        path: &Path,
        face_index: u32,
        encoding: Option<Tag>,
    ) -> Result<SkrifaFace> {
        if let Some(tag) = encoding
            && tag != UNICODE_ENCODING
        {
            return Err(FontError::UnsupportedEncoding(tag));
        }
        let data = fs::read(path)
            .map_err(|source| FontError::Io { path: path.to_path_buf(), source })?;
        debug!("read {} bytes from {}", data.len(), path.display());
        SkrifaFace::from_data(data, face_index)
    }

    fn hinting_engine(&self) -> HintingEngine {
        self.hinting
    }

    fn cycle_hinting_engine(&mut self) {
        self.hinting = self.hinting.cycle();
    }
}
