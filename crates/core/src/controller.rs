//! Interactive adjustment of design coordinates.

use log::debug;
use read_fonts::types::Fixed;

use crate::{
    axis::VariationSpace,
    config::{DEFAULT_INCREMENT, MAX_INCREMENT, MIN_INCREMENT, WHOLE_UNIT_RANGE},
    visibility::VisibleAxes,
};

/// Axis step size as a fraction of an axis' range.
///
/// Only ever doubled or halved, and kept within
/// [`MIN_INCREMENT`]..=[`MAX_INCREMENT`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Increment(f64);

impl Default for Increment {
    fn default() -> Self {
        Self(DEFAULT_INCREMENT)
    }
}

impl Increment {
    pub fn get(self) -> f64 {
        self.0
    }

    /// Double the step unless that would exceed the maximum.
    pub fn double(&mut self) {
        if self.0 * 2.0 <= MAX_INCREMENT {
            self.0 *= 2.0;
        }
    }

    /// Halve the step unless that would fall below the minimum.
    pub fn halve(&mut self) {
        if self.0 * 0.5 >= MIN_INCREMENT {
            self.0 *= 0.5;
        }
    }

    /// The step as a percentage, for display.
    pub fn percent(self) -> f64 {
        self.0 * 100.0
    }
}

/// How a freshly stepped coordinate is snapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Whole design units: ceiling after an increase, floor after a decrease.
    WholeUnit,
    /// Two decimal digits, keeping generated PostScript names short.
    TwoDecimals,
}

impl Rounding {
    /// Pick the policy for an axis of width `range`.
    ///
    /// Non-SFNT (multiple master) fonts and wide axes use whole units.
    pub fn select(is_sfnt: bool, range: Fixed) -> Self {
        if !is_sfnt || range > Fixed::from_f64(WHOLE_UNIT_RANGE) {
            Rounding::WholeUnit
        } else {
            Rounding::TwoDecimals
        }
    }

    /// Snap `value`; `delta` is the signed step that produced it.
    pub fn apply(self, value: Fixed, delta: f64) -> Fixed {
        match self {
            Rounding::WholeUnit if delta > 0.0 => Fixed::from_f64(value.to_f64().ceil()),
            Rounding::WholeUnit => value.floor(),
            // `f64::round` and `Fixed::from_f64` both round half away from zero
            Rounding::TwoDecimals => Fixed::from_f64((value.to_f64() * 100.0).round() / 100.0),
        }
    }
}

/// Step the axis behind visible `slot` by `delta` times its range.
///
/// Stepping past either end wraps around to the other end. The result is
/// rounded per [`Rounding::select`], and with `grouping` copied to every
/// hidden axis sharing the tag. Returns the complete new coordinate
/// vector, or `None` if `slot` is not a visible slot.
pub fn adjust(
    space: &VariationSpace,
    visible: &VisibleAxes,
    slot: usize,
    delta: f64,
    is_sfnt: bool,
    grouping: bool,
) -> Option<Vec<Fixed>> {
    let index = visible.get(slot)?;
    let axis = space.axis(index)?;
    let mut coords = space.coords().to_vec();

    let range = axis.range();
    let mut value = coords[index] + Fixed::from_f64(delta * range.to_f64());
    if value < axis.minimum {
        value = axis.maximum;
    }
    if value > axis.maximum {
        value = axis.minimum;
    }
    let value = axis.clamp(Rounding::select(is_sfnt, range).apply(value, delta));
    coords[index] = value;

    if grouping {
        for (coord, _) in coords
            .iter_mut()
            .zip(space.axes())
            .filter(|(_, other)| other.hidden && other.tag == axis.tag)
        {
            *coord = value;
        }
    }

    debug!("axis {} ({}) -> {value}", axis.tag, axis.name);
    Some(coords)
}

#[cfg(test)]
mod tests {
    use read_fonts::types::Tag;

    use super::*;
    use crate::axis::Axis;

    fn space(axes: Vec<Axis>) -> (VariationSpace, VisibleAxes) {
        let space = VariationSpace::new(axes);
        let visible = VisibleAxes::resolve(space.axes(), true);
        (space, visible)
    }

    fn wght() -> Axis {
        Axis::new(Tag::new(b"wght"), "Weight", 100.0, 400.0, 900.0)
    }

    #[test]
    fn increment_doubles_and_halves_within_bounds() {
        let mut inc = Increment::default();
        inc.double();
        inc.double();
        assert_eq!(inc.get(), 0.1);
        inc.double();
        assert_eq!(inc.get(), 0.1);

        let mut inc = Increment::default();
        inc.halve();
        assert_eq!(inc.get(), 0.0125);
        inc.halve();
        assert_eq!(inc.get(), 0.0125);
    }

    #[test]
    fn step_up_rounds_to_ceiling_on_wide_axis() {
        let (space, visible) = space(vec![wght()]);
        let coords = adjust(&space, &visible, 0, 0.025, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(420.0)]);
    }

    #[test]
    fn step_down_rounds_to_floor() {
        let mut space = VariationSpace::new(vec![wght()]);
        space.set_coords(&[Fixed::from_f64(400.5)]);
        let visible = VisibleAxes::resolve(space.axes(), true);
        let coords = adjust(&space, &visible, 0, -0.001, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(399.0)]);
    }

    #[test]
    fn stepping_past_maximum_wraps_to_minimum() {
        let mut space = VariationSpace::new(vec![wght()]);
        space.set_coords(&[Fixed::from_f64(890.0)]);
        let visible = VisibleAxes::resolve(space.axes(), true);
        let coords = adjust(&space, &visible, 0, 0.1, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(100.0)]);
    }

    #[test]
    fn stepping_past_minimum_wraps_to_maximum() {
        let mut space = VariationSpace::new(vec![wght()]);
        space.set_coords(&[Fixed::from_f64(100.0)]);
        let visible = VisibleAxes::resolve(space.axes(), true);
        let coords = adjust(&space, &visible, 0, -0.025, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(900.0)]);
    }

    #[test]
    fn wrapping_to_fractional_bound_rounds_inward() {
        let axis = Axis::new(Tag::new(b"XOPQ"), "Thin stroke", -0.333, 0.0, 0.333);
        let mut space = VariationSpace::new(vec![axis]);
        let visible = VisibleAxes::resolve(space.axes(), true);

        space.set_coords(&[Fixed::from_f64(0.333)]);
        let coords = adjust(&space, &visible, 0, 0.1, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(-0.33)]);

        space.set_coords(&[Fixed::from_f64(-0.333)]);
        let coords = adjust(&space, &visible, 0, -0.1, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(0.33)]);
    }

    #[test]
    fn narrow_axis_rounds_to_two_decimals() {
        let (space, visible) =
            space(vec![Axis::new(Tag::new(b"ital"), "Italic", 0.0, 0.0, 1.0)]);
        let coords = adjust(&space, &visible, 0, 0.0125, true, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(0.01)]);
    }

    #[test]
    fn non_sfnt_narrow_axis_uses_whole_units() {
        let (space, visible) =
            space(vec![Axis::new(Tag::new(b"ital"), "Italic", 0.0, 0.0, 10.0)]);
        let coords = adjust(&space, &visible, 0, 0.025, false, true).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(1.0)]);
    }

    #[test]
    fn two_decimal_rounding_is_idempotent() {
        for raw in [0.123456, -0.555, 0.005, 12.349, -7.0049] {
            let once = Rounding::TwoDecimals.apply(Fixed::from_f64(raw), 1.0);
            let twice = Rounding::TwoDecimals.apply(once, 1.0);
            assert_eq!(once, twice, "{raw}");
        }
    }

    #[test]
    fn coordinates_stay_in_bounds_over_many_steps() {
        let (mut space, visible) = space(vec![
            Axis::new(Tag::new(b"opsz"), "Optical size", 8.0, 12.0, 24.5),
            Axis::new(Tag::new(b"slnt"), "Slant", -15.0, 0.0, 0.0),
        ]);
        for delta in [0.1, -0.1, 0.05, -0.0125] {
            for slot in 0..visible.len() {
                for _ in 0..50 {
                    let coords = adjust(&space, &visible, slot, delta, true, true).unwrap();
                    space.set_coords(&coords);
                    for (axis, coord) in space.axes().iter().zip(&coords) {
                        assert!(axis.minimum <= *coord && *coord <= axis.maximum);
                    }
                }
            }
        }
    }

    #[test]
    fn hidden_axes_follow_visible_axis() {
        let (space, visible) = space(vec![
            wght(),
            wght().with_hidden(true),
            Axis::new(Tag::new(b"wdth"), "Width", 50.0, 100.0, 200.0).with_hidden(true),
            wght().with_hidden(true),
        ]);
        assert_eq!(visible.as_slice(), &[0, 2]);
        let coords = adjust(&space, &visible, 0, 0.1, true, true).unwrap();
        assert_eq!(coords[0], Fixed::from_f64(480.0));
        assert_eq!(coords[1], coords[0]);
        assert_eq!(coords[3], coords[0]);
        assert_eq!(coords[2], Fixed::from_f64(100.0));
    }

    #[test]
    fn no_propagation_without_grouping() {
        let space = VariationSpace::new(vec![wght(), wght().with_hidden(true)]);
        let visible = VisibleAxes::resolve(space.axes(), false);
        let coords = adjust(&space, &visible, 0, 0.1, true, false).unwrap();
        assert_eq!(coords, vec![Fixed::from_f64(480.0), Fixed::from_f64(400.0)]);
    }

    #[test]
    fn invalid_slot_is_ignored() {
        let (space, visible) = space(vec![wght()]);
        assert!(adjust(&space, &visible, 3, 0.1, true, true).is_none());
    }
}
