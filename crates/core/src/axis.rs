//! Variation axes and the live design-coordinate vector.

use log::warn;
use read_fonts::types::{Fixed, Tag};

use crate::config::MAX_AXES;

/// A variation axis as declared by the font.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    /// Four-byte axis tag (e.g. `wght`).
    pub tag: Tag,
    /// Human-readable axis name.
    pub name: String,
    pub minimum: Fixed,
    pub default: Fixed,
    pub maximum: Fixed,
    /// Whether the font asks for the axis to stay out of user interfaces.
    pub hidden: bool,
}

impl Axis {
    /// Create a visible axis from user-space values.
    ///
    /// Inverted bounds are swapped and the default is clamped into them, so
    /// `minimum <= default <= maximum` always holds.
    pub fn new(
        tag: Tag,
        name: impl Into<String>,
        minimum: f64,
        default: f64,
        maximum: f64,
    ) -> Self {
        let (minimum, maximum) =
            if maximum < minimum { (maximum, minimum) } else { (minimum, maximum) };
        let minimum = Fixed::from_f64(minimum);
        let maximum = Fixed::from_f64(maximum);
        let default = Fixed::from_f64(default).clamp(minimum, maximum);
        Self { tag, name: name.into(), minimum, default, maximum, hidden: false }
    }

    /// Mark the axis as hidden (or not).
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Width of the axis, `maximum - minimum`.
    pub fn range(&self) -> Fixed {
        self.maximum - self.minimum
    }

    /// Saturate `value` into the axis bounds.
    pub fn clamp(&self, value: Fixed) -> Fixed {
        value.clamp(self.minimum, self.maximum)
    }
}

/// The axes of the active face together with the current coordinates.
///
/// `coords[i]` always lies within the bounds of `axes[i]`.
#[derive(Debug, Clone, Default)]
pub struct VariationSpace {
    axes: Vec<Axis>,
    coords: Vec<Fixed>,
    declared: usize,
}

impl VariationSpace {
    /// Build a space with every coordinate at its axis default.
    ///
    /// Fonts declaring more than [`MAX_AXES`] axes keep only the first
    /// [`MAX_AXES`]; the overflow is logged and queryable via
    /// [`declared_axis_count`](Self::declared_axis_count).
    pub fn new(mut axes: Vec<Axis>) -> Self {
        let declared = axes.len();
        if declared > MAX_AXES {
            warn!("only handling first {MAX_AXES} variation axes (of {declared})");
            axes.truncate(MAX_AXES);
        }
        let coords = axes.iter().map(|axis| axis.default).collect();
        Self { axes, coords, declared }
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn axis(&self, index: usize) -> Option<&Axis> {
        self.axes.get(index)
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// Number of axes the font declared, before truncation.
    pub fn declared_axis_count(&self) -> usize {
        self.declared
    }

    /// Whether some declared axes are not under control.
    pub fn is_truncated(&self) -> bool {
        self.declared > self.axes.len()
    }

    pub fn coords(&self) -> &[Fixed] {
        &self.coords
    }

    pub fn coord(&self, index: usize) -> Option<Fixed> {
        self.coords.get(index).copied()
    }

    /// Set the start-up position.
    ///
    /// Axis `n` takes `requested[n]` when present, otherwise its default;
    /// the value is saturated into the axis bounds. Multiple-master style
    /// fonts want whole design units, which `round_to_integer` requests.
    pub fn initialize(&mut self, requested: &[Fixed], round_to_integer: bool) {
        for (n, (axis, coord)) in self.axes.iter().zip(self.coords.iter_mut()).enumerate() {
            let value = axis.clamp(requested.get(n).copied().unwrap_or(axis.default));
            *coord = if round_to_integer { axis.clamp(value.round()) } else { value };
        }
    }

    /// Replace the coordinates, saturating each into its axis bounds.
    ///
    /// Extra values are ignored; missing ones leave the current value.
    pub fn set_coords(&mut self, coords: &[Fixed]) {
        for ((axis, coord), value) in self.axes.iter().zip(self.coords.iter_mut()).zip(coords) {
            *coord = axis.clamp(*value);
        }
    }
}
