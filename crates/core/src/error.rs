use std::{io, path::PathBuf, result};

use read_fonts::types::Tag;

/// Errors raised while opening or configuring a font face.
///
/// None of these are fatal: the session shows a status line for the file
/// and keeps accepting navigation.
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    #[error("failed to read '{path}': {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("failed to parse font: {0}")]
    Parse(String),

    #[error("face index {index} out of range ({count} faces)")]
    FaceIndex { index: u32, count: u32 },

    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(Tag),

    #[error("invalid size {0}")]
    InvalidSize(u32),

    #[error("expected {expected} coordinates, got {actual}")]
    CoordinateCount { expected: usize, actual: usize },

    #[error("named instance {index} out of range ({count} instances)")]
    NamedInstance { index: u32, count: u32 },
}

/// Errors raised by the render surface. These end the session.
#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("could not allocate display surface: {0}")]
    Allocation(String),

    #[error("surface I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = result::Result<T, FontError>;
