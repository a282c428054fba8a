//! The tiling graph: a purely combinatorial model of the cube surface.
//!
//! Vertices are sticker slots, numbered `face * N² + row * N + col` using the
//! same face grids as [`crate::cube`]. Edges join
//!
//! - grid neighbours on one face,
//! - the stickers of one edge or corner cell (the fold between faces),
//! - each slot and its antipode.
//!
//! Every slice turn induces a permutation of the vertices. Those are worked
//! out once per size, stored as disjoint cycles, and applied to a state array
//! `state[v] = origin vertex of the sticker now at v` in time proportional
//! to the cycles' total length.

use crate::cube::{check_size, face_grid, face_grid_position, CubeState, Slot};
use crate::error::{EngineError, Result};
use crate::geometry::Direction;
use crate::moves::MoveKey;
use crate::rotation::SliceTurn;
use log::debug;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

pub fn vertex_count(size: usize) -> usize {
    6 * size * size
}

/// Vertex of the slot at `slot`.
pub fn encode_vertex(slot: Slot, size: usize) -> usize {
    let (row, col) = face_grid(slot.direction, slot.position, size);
    slot.direction.index() * size * size + row * size + col
}

/// Slot of vertex `v`.
pub fn decode_vertex(v: usize, size: usize) -> Result<Slot> {
    let count = vertex_count(size);
    let out_of_range = EngineError::VertexIndexOutOfRange { vertex: v, count };
    if v >= count {
        return Err(out_of_range);
    }
    let direction = Direction::from_index(v / (size * size)).ok_or(out_of_range)?;
    let rest = v % (size * size);
    Ok(Slot::new(
        face_grid_position(direction, rest / size, rest % size, size),
        direction,
    ))
}

/// The antipodal vertex, via decode, reflect, re-encode.
pub fn antipodal_vertex(v: usize, size: usize) -> Result<usize> {
    Ok(encode_vertex(decode_vertex(v, size)?.antipode(size), size))
}

/// Why two vertices are adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EdgeKind {
    /// Neighbouring squares on one face.
    Grid,
    /// Two stickers of the same edge or corner cell.
    Fold,
    /// A slot and its reflection through the center.
    Antipodal,
}

/// A permutation of the vertices as a list of disjoint cycles. Each cycle
/// `[a, b, c]` sends the sticker at `a` to `b`, `b` to `c` and `c` to `a`.
/// Fixed points are left out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CycleList {
    vertex_count: usize,
    cycles: Vec<Vec<usize>>,
}

impl CycleList {
    /// Decompose `perm`, where `perm[v]` is the vertex the sticker at `v`
    /// moves to.
    pub fn from_permutation(perm: &[usize]) -> Self {
        let mut seen = vec![false; perm.len()];
        let mut cycles = vec![];
        for start in 0..perm.len() {
            if seen[start] || perm[start] == start {
                continue;
            }
            let mut cycle = vec![];
            let mut v = start;
            while !seen[v] {
                seen[v] = true;
                cycle.push(v);
                v = perm[v];
            }
            cycles.push(cycle);
        }
        Self {
            vertex_count: perm.len(),
            cycles,
        }
    }

    pub fn cycles(&self) -> &[Vec<usize>] {
        &self.cycles
    }

    /// Total number of vertices moved.
    pub fn support(&self) -> usize {
        self.cycles.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn inverse(&self) -> Self {
        let cycles = self
            .cycles
            .iter()
            .map(|c| c.iter().rev().copied().collect())
            .collect();
        Self {
            vertex_count: self.vertex_count,
            cycles,
        }
    }

    /// Move every value one step along its cycle, leaving `state` untouched.
    ///
    /// Only the length of `state` is checked. Values are carried along as
    /// they are; run [`validate`] or [`parity`] to catch a corrupted state.
    pub fn apply(&self, state: &[usize]) -> Result<Vec<usize>> {
        if state.len() != self.vertex_count {
            return Err(EngineError::StateLength {
                found: state.len(),
                expected: self.vertex_count,
            });
        }
        let mut next = state.to_vec();
        for cycle in &self.cycles {
            let k = cycle.len();
            for i in 0..k {
                next[cycle[(i + 1) % k]] = state[cycle[i]];
            }
        }
        Ok(next)
    }
}

/// The vertex permutation of one slice turn, `perm[v] = destination of v`.
pub fn slice_permutation(turn: SliceTurn, size: usize) -> Result<Vec<usize>> {
    check_size(size)?;
    turn.check(size)?;
    (0..vertex_count(size))
        .map(|v| -> Result<usize> {
            let slot = decode_vertex(v, size)?;
            if !turn.contains(slot.position) {
                return Ok(v);
            }
            let moved = Slot::new(
                slot.position.rotated(turn.axis, turn.turn, size),
                slot.direction.rotated(turn.axis, turn.turn),
            );
            Ok(encode_vertex(moved, size))
        })
        .collect()
}

/// Adjacency plus precomputed move cycles for one cube size. Expensive to
/// build; share it through a [`TilingCache`].
#[derive(Debug, Clone)]
pub struct TilingGraph {
    size: usize,
    adjacency: Vec<BTreeSet<usize>>,
    move_cycles: BTreeMap<MoveKey, CycleList>,
    slice_cycles: HashMap<SliceTurn, CycleList>,
}

impl TilingGraph {
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        let count = vertex_count(size);

        let mut adjacency = vec![BTreeSet::new(); count];
        let mut link = |a: usize, b: usize| {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        };
        for v in 0..count {
            let slot = decode_vertex(v, size)?;
            let face = slot.direction.index() * size * size;
            let (row, col) = slot.face_grid(size);
            if row + 1 < size {
                link(v, face + (row + 1) * size + col);
            }
            if col + 1 < size {
                link(v, face + row * size + col + 1);
            }
            for other in Direction::ALL {
                if other != slot.direction && slot.position.on_face(other, size) {
                    link(v, encode_vertex(Slot::new(slot.position, other), size));
                }
            }
            link(v, antipodal_vertex(v, size)?);
        }

        let mut slice_cycles = HashMap::new();
        for turn in SliceTurn::all(size) {
            let perm = slice_permutation(turn, size)?;
            slice_cycles.insert(turn, CycleList::from_permutation(&perm));
        }

        let mut move_cycles = BTreeMap::new();
        for key in MoveKey::standard(size) {
            let turn = key.slice_turn(size)?;
            if let Some(cycles) = slice_cycles.get(&turn) {
                move_cycles.insert(key, cycles.clone());
            }
        }

        debug!(
            "built tiling graph for size {}: {} vertices, {} edges, {} slice turns",
            size,
            count,
            adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2,
            slice_cycles.len()
        );

        Ok(Self {
            size,
            adjacency,
            move_cycles,
            slice_cycles,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn adjacency(&self) -> &[BTreeSet<usize>] {
        &self.adjacency
    }

    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency.get(v).into_iter().flatten().copied()
    }

    /// How `a` and `b` are joined, if at all.
    pub fn edge_kind(&self, a: usize, b: usize) -> Option<EdgeKind> {
        if !self.adjacency.get(a)?.contains(&b) {
            return None;
        }
        let sa = decode_vertex(a, self.size).ok()?;
        let sb = decode_vertex(b, self.size).ok()?;
        if sb == sa.antipode(self.size) {
            Some(EdgeKind::Antipodal)
        } else if sa.position == sb.position {
            Some(EdgeKind::Fold)
        } else {
            Some(EdgeKind::Grid)
        }
    }

    /// The standard moves with their cycles.
    pub fn move_cycles(&self) -> &BTreeMap<MoveKey, CycleList> {
        &self.move_cycles
    }

    pub fn cycles_for_move(&self, key: MoveKey) -> Result<&CycleList> {
        self.move_cycles
            .get(&key)
            .ok_or_else(|| EngineError::UnknownMove(key.to_string()))
    }

    pub fn cycles_for_turn(&self, turn: SliceTurn) -> Result<&CycleList> {
        turn.check(self.size)?;
        self.slice_cycles
            .get(&turn)
            .ok_or(EngineError::SliceOutOfRange {
                index: turn.slice,
                size: self.size,
            })
    }

    pub fn identity(&self) -> Vec<usize> {
        (0..self.vertex_count()).collect()
    }

    pub fn apply_turn(&self, state: &[usize], turn: SliceTurn) -> Result<Vec<usize>> {
        self.cycles_for_turn(turn)?.apply(state)
    }

    pub fn apply_move(&self, state: &[usize], key: MoveKey) -> Result<Vec<usize>> {
        self.cycles_for_move(key)?.apply(state)
    }
}

pub fn build_tiling_graph(size: usize) -> Result<TilingGraph> {
    TilingGraph::new(size)
}

/// Per-size memo of tiling graphs.
#[derive(Debug, Default)]
pub struct TilingCache {
    graphs: HashMap<usize, Arc<TilingGraph>>,
}

impl TilingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, size: usize) -> Result<Arc<TilingGraph>> {
        if let Some(graph) = self.graphs.get(&size) {
            return Ok(Arc::clone(graph));
        }
        let graph = Arc::new(TilingGraph::new(size)?);
        self.graphs.insert(size, Arc::clone(&graph));
        Ok(graph)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

/// Read the tiling state off a cube: for every slot, the vertex its current
/// sticker started at.
pub fn cubies_to_tiling_state(state: &CubeState, size: usize) -> Result<Vec<usize>> {
    if state.size() != size {
        return Err(EngineError::SizeMismatch {
            expected: state.size(),
            found: size,
        });
    }
    let mut out = vec![usize::MAX; vertex_count(size)];
    for (slot, sticker) in state.stickers() {
        out[encode_vertex(slot, size)] = encode_vertex(sticker.home(), size);
    }
    if let Some(v) = out.iter().position(|&o| o == usize::MAX) {
        let slot = decode_vertex(v, size)?;
        return Err(EngineError::NoSticker {
            position: slot.position,
            direction: slot.direction,
        });
    }
    Ok(out)
}

pub fn apply_move(state: &[usize], cycles: &CycleList) -> Result<Vec<usize>> {
    cycles.apply(state)
}

pub fn is_solved(state: &[usize]) -> bool {
    state.iter().enumerate().all(|(v, &o)| v == o)
}

/// Check that `state` is a permutation of `0..state.len()`.
pub fn validate(state: &[usize]) -> Result<()> {
    let mut seen = vec![false; state.len()];
    for (vertex, &value) in state.iter().enumerate() {
        match seen.get_mut(value) {
            None => return Err(EngineError::VertexOutOfRange { vertex, value }),
            Some(true) => return Err(EngineError::NotAPermutation(value)),
            Some(s) => *s = true,
        }
    }
    Ok(())
}

/// Permutation parity: the number of even-length cycles, mod 2.
pub fn parity(state: &[usize]) -> Result<u8> {
    validate(state)?;
    let mut seen = vec![false; state.len()];
    let mut even = 0usize;
    for start in 0..state.len() {
        if seen[start] {
            continue;
        }
        let mut len = 0;
        let mut v = start;
        while !seen[v] {
            seen[v] = true;
            v = state[v];
            len += 1;
        }
        if len % 2 == 0 {
            even += 1;
        }
    }
    Ok((even % 2) as u8)
}
