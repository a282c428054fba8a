//! Quarter turns of a single slice.

use crate::cube::CubeState;
use crate::error::{EngineError, Result};
use crate::geometry::{Axis, Pos, Turn};
use std::fmt;

/// One quarter turn of the slice at `slice` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SliceTurn {
    pub axis: Axis,
    pub slice: usize,
    pub turn: Turn,
}

impl SliceTurn {
    pub fn new(axis: Axis, slice: usize, turn: Turn) -> Self {
        Self { axis, slice, turn }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self {
            turn: -self.turn,
            ..self
        }
    }

    pub fn check(self, size: usize) -> Result<()> {
        if self.slice < size {
            Ok(())
        } else {
            Err(EngineError::SliceOutOfRange {
                index: self.slice,
                size,
            })
        }
    }

    pub fn contains(self, p: Pos) -> bool {
        p.coord(self.axis) == self.slice
    }

    /// Every slice turn available on a cube of `size`.
    pub fn all(size: usize) -> impl Iterator<Item = SliceTurn> {
        Axis::ALL.into_iter().flat_map(move |axis| {
            (0..size).flat_map(move |slice| Turn::ALL.map(|turn| SliceTurn::new(axis, slice, turn)))
        })
    }

    /// Apply this turn to `state`, returning the new state.
    pub fn apply(self, state: &CubeState) -> Result<CubeState> {
        let size = state.size();
        self.check(size)?;

        let mut next = state.clone();
        for (p, cell) in state.cells().filter(|(p, _)| self.contains(*p)) {
            let moved = cell.rotated(|d| d.rotated(self.axis, self.turn));
            next.set_cell(p.rotated(self.axis, self.turn, size), moved);
        }
        Ok(next)
    }
}

impl fmt::Display for SliceTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.axis, self.slice, self.turn)
    }
}

/// Turn one slice of `state` by a quarter turn.
///
/// `size` must match the state; an out-of-range slice is rejected before
/// anything is copied.
pub fn rotate_slice(
    state: &CubeState,
    size: usize,
    axis: Axis,
    slice_index: usize,
    turn: Turn,
) -> Result<CubeState> {
    if size != state.size() {
        return Err(EngineError::SizeMismatch {
            expected: state.size(),
            found: size,
        });
    }
    SliceTurn::new(axis, slice_index, turn).apply(state)
}
