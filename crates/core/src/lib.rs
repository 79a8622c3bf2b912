//! # vfview core
//!
//! Variation axis control and glyph layout for an interactive variable
//! font viewer.
//!
//! The crate does no font parsing or rasterization itself. Faces are
//! reached through the [`FontEngine`] and [`FontFace`] traits and frames are
//! drawn through a [`RenderSurface`]; everything in between lives here:
//!
//! - [`VisibleAxes`] decides which axes the operator controls, folding
//!   hidden axes into a visible axis with the same tag;
//! - [`adjust`] steps a coordinate with wraparound, font-specific rounding
//!   and propagation to aliased hidden axes;
//! - [`NamedInstances`] cycles through named instances;
//! - [`Layout`] wraps glyphs into the viewport one placement at a time;
//! - [`ViewerSession`] ties them to input events.
//!
//! ## Example
//!
//! ```
//! use read_fonts::types::{Fixed, Tag};
//! use vfview_core::{Axis, VariationSpace, VisibleAxes, adjust};
//!
//! let space = VariationSpace::new(vec![
//!     Axis::new(Tag::new(b"wght"), "Weight", 100.0, 400.0, 900.0),
//!     Axis::new(Tag::new(b"wght"), "Weight", 100.0, 400.0, 900.0).with_hidden(true),
//! ]);
//! let visible = VisibleAxes::resolve(space.axes(), true);
//! assert_eq!(visible.len(), 1);
//!
//! let coords = adjust(&space, &visible, 0, 0.025, true, true).unwrap();
//! assert_eq!(coords, [Fixed::from_f64(420.0), Fixed::from_f64(420.0)]);
//! ```

pub mod axis;
pub mod config;
pub mod controller;
pub mod engine;
mod error;
pub mod event;
pub mod instances;
pub mod layout;
pub mod session;
pub mod status;
pub mod surface;
pub mod visibility;

pub use axis::{Axis, VariationSpace};
pub use config::ViewerConfig;
pub use controller::{Increment, Rounding, adjust};
pub use engine::{AdvanceProvider, FontEngine, FontFace, GlyphRef, HintingEngine, SizeMetrics};
pub use error::{FontError, Result, SurfaceError};
pub use event::{Command, Direction, Event, Key, Transition};
pub use instances::NamedInstances;
pub use layout::{Content, Layout, LayoutItem, Marker, Viewport};
pub use session::{RenderMode, ViewState, ViewerSession};
pub use surface::{RenderOptions, RenderSurface};
pub use visibility::VisibleAxes;
