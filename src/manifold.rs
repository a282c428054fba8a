//! The antipodal identification of the cube surface.
//!
//! Every surface slot is paired with its reflection through the cube center
//! (see [`Slot::antipode`]). A [`ManifoldMap`] is a read-only view built from
//! one state snapshot; it answers "which sticker currently sits opposite this
//! one" and backs the pair-flip operation.

use crate::cube::{CubeState, Slot, Sticker};
use crate::error::{EngineError, Result};
use crate::geometry::{sticker_world_position, Direction, Pos};
use std::collections::HashMap;

/// Derived lookup over one state. Rebuild it after any mutation.
#[derive(Debug, Clone)]
pub struct ManifoldMap<'a> {
    state: &'a CubeState,
    // Home slot of each sticker -> slot it occupies now.
    located: HashMap<Slot, Slot>,
}

impl<'a> ManifoldMap<'a> {
    pub fn build(state: &'a CubeState) -> Self {
        let located = state.stickers().map(|(slot, s)| (s.home(), slot)).collect();
        Self { state, located }
    }

    pub fn size(&self) -> usize {
        self.state.size()
    }

    /// Where `sticker` currently sits, if it belongs to this cube.
    pub fn locate(&self, sticker: &Sticker) -> Option<Slot> {
        self.located.get(&sticker.home()).copied()
    }

    /// The sticker currently occupying the slot antipodal to `sticker`'s.
    ///
    /// `None` means the sticker is not part of this cube or the cube is
    /// malformed.
    pub fn find_antipodal_partner(&self, sticker: &Sticker) -> Option<&'a Sticker> {
        let slot = self.locate(sticker)?;
        self.state.sticker_at(slot.antipode(self.size())).ok()
    }

    /// Partner of whatever sticker is at `slot`, with its slot.
    pub fn partner_of_slot(&self, slot: Slot) -> Result<(Slot, &'a Sticker)> {
        let sticker = self.state.sticker_at(slot)?;
        let missing = || EngineError::MissingPartner {
            position: slot.position,
            direction: slot.direction,
        };
        let here = self.locate(sticker).ok_or_else(missing)?;
        let there = here.antipode(self.size());
        let partner = self.find_antipodal_partner(sticker).ok_or_else(missing)?;
        Ok((there, partner))
    }
}

/// Build the map for `state`, checking it has the expected size.
pub fn build_manifold_map(state: &CubeState, size: usize) -> Result<ManifoldMap<'_>> {
    if state.size() != size {
        return Err(EngineError::SizeMismatch {
            expected: state.size(),
            found: size,
        });
    }
    Ok(ManifoldMap::build(state))
}

pub fn find_antipodal_partner<'a>(map: &ManifoldMap<'a>, sticker: &Sticker) -> Option<&'a Sticker> {
    map.find_antipodal_partner(sticker)
}

/// Both ends of a flipped pair, with world-space sticker centers for
/// whatever draws the tether between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipEvent {
    pub slots: [Slot; 2],
    pub world: [[f32; 3]; 2],
}

/// Flip the sticker at `(position, direction)` and its antipodal partner:
/// each takes the antipode of the color it showed. Flipping the same slot
/// twice restores the colors.
pub fn flip_pair(
    state: &CubeState,
    position: Pos,
    direction: Direction,
) -> Result<(CubeState, FlipEvent)> {
    let slot = Slot::new(position, direction);
    let (partner_slot, _) = ManifoldMap::build(state).partner_of_slot(slot)?;

    let mut next = state.clone();
    for s in [slot, partner_slot] {
        next.cell_mut(s.position)?
            .sticker_mut(s.direction)
            .ok_or(EngineError::NoSticker {
                position: s.position,
                direction: s.direction,
            })?
            .flip();
    }

    let size = state.size();
    let event = FlipEvent {
        slots: [slot, partner_slot],
        world: [slot, partner_slot].map(|s| sticker_world_position(s.position, s.direction, size)),
    };
    Ok((next, event))
}
