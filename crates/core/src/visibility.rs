//! Which axes are offered to the operator.
//!
//! With grouping enabled, a hidden axis that shares its tag with a visible
//! axis is not shown on its own; it follows the visible axis instead. The
//! resolution tolerates pathological fonts: several visible axes with the
//! same tag are all shown, and several same-tag hidden axes without a
//! visible counterpart collapse into a single slot.

use crate::axis::Axis;

/// Ordered axis indices, one per operator-visible slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibleAxes {
    order: Vec<usize>,
}

impl VisibleAxes {
    /// Compute the visible slots for `axes`.
    pub fn resolve(axes: &[Axis], grouping: bool) -> Self {
        if !grouping {
            return Self { order: (0..axes.len()).collect() };
        }

        let mut order: Vec<usize> = Vec::with_capacity(axes.len());
        for (i, axis) in axes.iter().enumerate() {
            let skip = if axis.hidden {
                order.iter().any(|&j| axes[j].tag == axis.tag)
            } else {
                order.contains(&i)
            };
            if skip {
                continue;
            }

            // the last visible axis declared later takes over the hidden axis' slot
            let representative = if axis.hidden {
                axes.iter()
                    .enumerate()
                    .skip(i + 1)
                    .rev()
                    .find(|(_, other)| !other.hidden && other.tag == axis.tag)
                    .map_or(i, |(j, _)| j)
            } else {
                i
            };
            order.push(representative);
        }

        Self { order }
    }

    /// Underlying axis index for a visible slot.
    pub fn get(&self, slot: usize) -> Option<usize> {
        self.order.get(slot).copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }
}
