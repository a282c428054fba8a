//! A playable puzzle: both models driven by one command stream, with a
//! bounded undo history.

use crate::config::EngineConfig;
use crate::cube::CubeState;
use crate::error::{EngineError, Result};
use crate::geometry::{Axis, Turn};
use crate::integrity::{compute_integrity, Regime};
use crate::manifold::{flip_pair, FlipEvent};
use crate::moves::{Command, MoveKey};
use crate::rotation::SliceTurn;
use crate::tiling::{self, cubies_to_tiling_state, TilingCache, TilingGraph};
use log::{debug, trace, warn};
use rand::Rng;
use std::collections::VecDeque;
use std::sync::Arc;

/// Everything an observer (HUD, win check, solver) reads after a move.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total: usize,
    pub preserved: usize,
    pub broken: usize,
    pub integrity: f64,
    pub commutator_norm: usize,
    pub regime: Regime,
    pub parity: u8,
    pub solved: bool,
}

#[derive(Debug)]
pub struct Puzzle {
    config: EngineConfig,
    graphs: TilingCache,
    graph: Arc<TilingGraph>,
    cube: CubeState,
    tiling: Vec<usize>,
    history: VecDeque<Command>,
}

impl Puzzle {
    pub fn new(size: usize, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let mut graphs = TilingCache::new();
        let graph = graphs.get(size)?;
        let cube = CubeState::new(size)?;
        let tiling = graph.identity();
        Ok(Self {
            config,
            graphs,
            graph,
            cube,
            tiling,
            history: VecDeque::new(),
        })
    }

    pub fn size(&self) -> usize {
        self.cube.size()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cube(&self) -> &CubeState {
        &self.cube
    }

    pub fn tiling_state(&self) -> &[usize] {
        &self.tiling
    }

    pub fn graph(&self) -> &TilingGraph {
        &self.graph
    }

    /// Applied commands, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &Command> {
        self.history.iter()
    }

    /// Throw everything away and start from a solved cube of `size`.
    pub fn resize(&mut self, size: usize) -> Result<()> {
        let graph = self.graphs.get(size)?;
        self.cube = CubeState::new(size)?;
        self.tiling = graph.identity();
        self.graph = graph;
        self.history.clear();
        debug!("puzzle reset to size {}", size);
        Ok(())
    }

    pub fn reset(&mut self) -> Result<()> {
        self.resize(self.size())
    }

    fn execute(&mut self, command: Command) -> Result<Option<FlipEvent>> {
        trace!("applying {}", command);
        match command {
            Command::Rotate(turn) => {
                let cube = turn.apply(&self.cube)?;
                let tiling = self.graph.apply_turn(&self.tiling, turn)?;
                self.cube = cube;
                self.tiling = tiling;
                Ok(None)
            }
            Command::Flip {
                position,
                direction,
            } => {
                let (cube, event) = flip_pair(&self.cube, position, direction)?;
                self.cube = cube;
                Ok(Some(event))
            }
        }
    }

    /// Apply one command to both models and record it. Returns the flip
    /// event for flips.
    pub fn apply(&mut self, command: Command) -> Result<Option<FlipEvent>> {
        let event = self.execute(command)?;
        if self.history.len() == self.config.history_capacity {
            self.history.pop_front();
        }
        self.history.push_back(command);
        Ok(event)
    }

    pub fn apply_all(&mut self, commands: &[Command]) -> Result<()> {
        for &c in commands {
            self.apply(c)?;
        }
        Ok(())
    }

    pub fn apply_move(&mut self, key: MoveKey) -> Result<()> {
        let turn = key.slice_turn(self.size())?;
        self.apply(turn.into()).map(|_| ())
    }

    /// Undo the most recent command. `None` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<Option<Command>> {
        let Some(command) = self.history.pop_back() else {
            return Ok(None);
        };
        if let Err(e) = self.execute(command.inverse()) {
            self.history.push_back(command);
            return Err(e);
        }
        Ok(Some(command))
    }

    /// Apply `count` uniformly random slice turns.
    pub fn scramble<R: Rng>(&mut self, rng: &mut R, count: usize) -> Result<Vec<Command>> {
        let size = self.size();
        let mut applied = Vec::with_capacity(count);
        for _ in 0..count {
            let axis = Axis::ALL[rng.gen_range(0..3)];
            let turn = if rng.gen_bool(0.5) { Turn::Pos } else { Turn::Neg };
            let command = Command::Rotate(SliceTurn::new(axis, rng.gen_range(0..size), turn));
            self.apply(command)?;
            applied.push(command);
        }
        debug!("scrambled with {} turns", count);
        Ok(applied)
    }

    /// Re-derive the tiling state from the cube and compare.
    pub fn check_consistency(&self) -> Result<()> {
        let derived = cubies_to_tiling_state(&self.cube, self.size())?;
        match derived.iter().zip(&self.tiling).position(|(a, b)| a != b) {
            Some(vertex) => {
                warn!("cube and tiling models disagree at vertex {}", vertex);
                Err(EngineError::Diverged { vertex })
            }
            None => Ok(()),
        }
    }

    pub fn report(&self) -> Result<Report> {
        let integrity = compute_integrity(&self.cube, self.size())?;
        Ok(Report {
            total: integrity.total,
            preserved: integrity.preserved,
            broken: integrity.broken,
            integrity: integrity.integrity,
            commutator_norm: 2 * integrity.broken,
            regime: Regime::classify(integrity.integrity, self.config.critical_band),
            parity: tiling::parity(&self.tiling)?,
            solved: tiling::is_solved(&self.tiling) && self.cube.is_solved(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Direction, Pos};
    use crate::moves::parse_script;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn undo_restores_solved() {
        let mut p = Puzzle::new(3, EngineConfig::default()).unwrap();
        p.apply_all(&parse_script("R U R' U' M F2", 3).unwrap()).unwrap();
        p.check_consistency().unwrap();
        assert!(!p.report().unwrap().solved);
        while p.undo().unwrap().is_some() {}
        assert!(p.report().unwrap().solved);
        assert_eq!(p.cube(), &CubeState::new(3).unwrap());
    }

    #[test]
    fn flips_leave_the_tiling_alone() {
        let mut p = Puzzle::new(3, EngineConfig::default()).unwrap();
        let event = p
            .apply(Command::Flip {
                position: Pos::new(2, 2, 2),
                direction: Direction::PosY,
            })
            .unwrap();
        assert!(event.is_some());
        assert!(tiling::is_solved(p.tiling_state()));
        assert!(!p.report().unwrap().solved);
        p.undo().unwrap();
        assert!(p.report().unwrap().solved);
    }

    #[test]
    fn history_is_bounded() {
        let config = EngineConfig::new(0.05, 3).unwrap();
        let mut p = Puzzle::new(2, config).unwrap();
        let mut rng = SmallRng::seed_from_u64(7);
        p.scramble(&mut rng, 10).unwrap();
        assert_eq!(p.history().count(), 3);
        p.check_consistency().unwrap();
    }

    #[test]
    fn failed_commands_change_nothing() {
        let mut p = Puzzle::new(3, EngineConfig::default()).unwrap();
        let bad = Command::Rotate(SliceTurn::new(Axis::Z, 7, Turn::Pos));
        assert!(p.apply(bad).is_err());
        assert_eq!(p.history().count(), 0);
        assert!(p.report().unwrap().solved);
    }

    #[test]
    fn resize_rebuilds() {
        let mut p = Puzzle::new(3, EngineConfig::default()).unwrap();
        p.apply_move("R".parse().unwrap()).unwrap();
        p.resize(4).unwrap();
        assert_eq!(p.size(), 4);
        assert_eq!(p.tiling_state().len(), 96);
        assert_eq!(p.history().count(), 0);
        assert!(p.report().unwrap().solved);
        assert!(p.resize(1).is_err());
    }

    #[test]
    fn reset_keeps_size_and_graph() {
        let mut p = Puzzle::new(3, EngineConfig::default()).unwrap();
        let graph: *const TilingGraph = p.graph();
        p.apply_all(&parse_script("R U2 @2,0,0,+X", 3).unwrap()).unwrap();
        p.reset().unwrap();
        assert_eq!(p.size(), 3);
        assert_eq!(p.history().count(), 0);
        assert!(p.cube().is_solved());
        assert!(std::ptr::eq(graph, p.graph()));
        assert!(p.undo().unwrap().is_none());
    }
}
