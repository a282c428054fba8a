//! Engine for an N×N×N twisty puzzle whose surface is folded into a real
//! projective plane: every sticker slot is identified with its reflection
//! through the cube's center.
//!
//! Two representations are kept side by side and driven by the same command
//! stream:
//!
//! - [`CubeState`], a grid of cells carrying their stickers, turned by
//!   [`rotate_slice`] and recolored by [`flip_pair`];
//! - the [`TilingGraph`] state array, a plain vertex permutation moved by
//!   precomputed cycles.
//!
//! [`compute_integrity`] and [`regime`] summarise how much of the antipodal
//! color relation survives. [`Puzzle`] ties it all together with undo.

pub mod config;
pub mod cube;
pub mod error;
pub mod geometry;
pub mod integrity;
pub mod io;
pub mod manifold;
pub mod moves;
pub mod rotation;
pub mod session;
pub mod tiling;

pub use config::EngineConfig;
pub use cube::{CubeState, Slot, Sticker};
pub use error::{EngineError, Result};
pub use geometry::{Axis, Color, Direction, Pos, Turn};
pub use integrity::{
    compute_commutator_norm, compute_integrity, regime, IntegrityReport, Regime, K_STAR,
};
pub use manifold::{build_manifold_map, find_antipodal_partner, flip_pair, FlipEvent, ManifoldMap};
pub use moves::{parse_script, Command, Layer, MoveKey};
pub use rotation::{rotate_slice, SliceTurn};
pub use session::{Puzzle, Report};
pub use tiling::{
    apply_move, build_tiling_graph, cubies_to_tiling_state, parity, CycleList, TilingCache,
    TilingGraph,
};

/// Smallest supported cube.
pub const MIN_SIZE: usize = 2;
/// Largest supported cube. Tiling graphs grow with the cube of the size.
pub const MAX_SIZE: usize = 64;

/// A solved cube of `size`.
pub fn make_cube_state(size: usize) -> Result<CubeState> {
    CubeState::new(size)
}

/// True when every tiling vertex holds its own sticker.
pub fn is_tiling_state_solved(state: &[usize]) -> bool {
    tiling::is_solved(state)
}
