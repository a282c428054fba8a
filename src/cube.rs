//! The canonical cube state: an `N×N×N` grid of cells, each owning the
//! stickers on its exposed faces.

use crate::error::{EngineError, Result};
use crate::geometry::{Color, Direction, Pos};
use crate::{MAX_SIZE, MIN_SIZE};

/// A single colored facet.
///
/// The `original_*` fields record where the sticker lives on a solved cube
/// and are fixed at construction. Rotations move the sticker (inside its
/// cell) without touching any field; flips change `current_color` and bump
/// `flip_count`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sticker {
    current_color: Color,
    original_color: Color,
    original_direction: Direction,
    original_position: Pos,
    flip_count: u32,
}

impl Sticker {
    fn new(position: Pos, direction: Direction) -> Self {
        let color = Color::solved_on(direction);
        Self {
            current_color: color,
            original_color: color,
            original_direction: direction,
            original_position: position,
            flip_count: 0,
        }
    }

    pub fn current_color(&self) -> Color {
        self.current_color
    }

    pub fn original_color(&self) -> Color {
        self.original_color
    }

    pub fn original_direction(&self) -> Direction {
        self.original_direction
    }

    pub fn original_position(&self) -> Pos {
        self.original_position
    }

    pub fn flip_count(&self) -> u32 {
        self.flip_count
    }

    /// The slot this sticker occupies on a solved cube.
    pub fn home(&self) -> Slot {
        Slot::new(self.original_position, self.original_direction)
    }

    /// Replace the color with its antipode.
    pub(crate) fn flip(&mut self) {
        self.current_color = self.current_color.antipode();
        self.flip_count += 1;
    }
}

/// One grid cell. Interior cells own no stickers, face centers one, edges
/// two and corners three.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cell {
    home: Pos,
    stickers: [Option<Sticker>; 6],
}

impl Cell {
    fn new(home: Pos, size: usize) -> Self {
        let stickers = Direction::ALL.map(|d| home.on_face(d, size).then(|| Sticker::new(home, d)));
        Self { home, stickers }
    }

    /// Position of this cell on a solved cube.
    pub fn home(&self) -> Pos {
        self.home
    }

    pub fn sticker(&self, direction: Direction) -> Option<&Sticker> {
        self.stickers[direction.index()].as_ref()
    }

    pub(crate) fn sticker_mut(&mut self, direction: Direction) -> Option<&mut Sticker> {
        self.stickers[direction.index()].as_mut()
    }

    pub fn stickers(&self) -> impl Iterator<Item = (Direction, &Sticker)> + '_ {
        Direction::ALL
            .into_iter()
            .zip(self.stickers.iter())
            .filter_map(|(d, s)| s.as_ref().map(|s| (d, s)))
    }

    pub fn sticker_count(&self) -> usize {
        self.stickers.iter().filter(|s| s.is_some()).count()
    }

    /// The same cell re-homed after a quarter turn: every sticker moves to the
    /// rotated direction key.
    pub(crate) fn rotated(&self, rotate: impl Fn(Direction) -> Direction) -> Self {
        let mut stickers: [Option<Sticker>; 6] = Default::default();
        for (d, s) in self.stickers() {
            stickers[rotate(d).index()] = Some(s.clone());
        }
        Self {
            home: self.home,
            stickers,
        }
    }
}

/// A surface location: a cell position plus the face direction it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub position: Pos,
    pub direction: Direction,
}

impl Slot {
    pub fn new(position: Pos, direction: Direction) -> Self {
        Self {
            position,
            direction,
        }
    }

    /// The antipodal slot: opposite direction, coordinates reflected through
    /// the center. This is a fixed involution over slots.
    #[must_use]
    pub fn antipode(self, size: usize) -> Self {
        Self::new(self.position.reflected(size), self.direction.opposite())
    }

    /// `(row, col)` of this slot on its face grid.
    pub fn face_grid(self, size: usize) -> (usize, usize) {
        face_grid(self.direction, self.position, size)
    }
}

/// Projection of a surface position onto the face grid of `direction`, as
/// seen from outside the cube with +Y up on the side faces and the front
/// (+Z) face toward the bottom edge of +Y and the top edge of -Y.
pub fn face_grid(direction: Direction, p: Pos, size: usize) -> (usize, usize) {
    let n = size - 1;
    match direction {
        Direction::PosX => (n - p.y, n - p.z),
        Direction::NegX => (n - p.y, p.z),
        Direction::PosY => (p.z, p.x),
        Direction::NegY => (n - p.z, p.x),
        Direction::PosZ => (n - p.y, p.x),
        Direction::NegZ => (n - p.y, n - p.x),
    }
}

/// Inverse of [`face_grid`].
pub fn face_grid_position(direction: Direction, row: usize, col: usize, size: usize) -> Pos {
    let n = size - 1;
    match direction {
        Direction::PosX => Pos::new(n, n - row, n - col),
        Direction::NegX => Pos::new(0, n - row, col),
        Direction::PosY => Pos::new(col, n, row),
        Direction::NegY => Pos::new(col, 0, n - row),
        Direction::PosZ => Pos::new(col, n - row, n),
        Direction::NegZ => Pos::new(n - col, n - row, 0),
    }
}

/// Every surface slot, face by face in row-major face-grid order. This is
/// also tiling-graph vertex order.
pub fn surface_slots(size: usize) -> impl Iterator<Item = Slot> {
    Direction::ALL.into_iter().flat_map(move |d| {
        (0..size * size).map(move |i| Slot::new(face_grid_position(d, i / size, i % size, size), d))
    })
}

pub fn check_size(size: usize) -> Result<()> {
    if (MIN_SIZE..=MAX_SIZE).contains(&size) {
        Ok(())
    } else {
        Err(EngineError::InvalidSize(size))
    }
}

/// Full cube state. Values are never shared: every mutation produces a new
/// state and leaves the old one intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeState {
    size: usize,
    cells: Vec<Cell>,
}

impl CubeState {
    /// A solved cube of the given size.
    pub fn new(size: usize) -> Result<Self> {
        check_size(size)?;
        let mut cells = Vec::with_capacity(size * size * size);
        for z in 0..size {
            for y in 0..size {
                for x in 0..size {
                    cells.push(Cell::new(Pos::new(x, y, z), size));
                }
            }
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, p: Pos) -> usize {
        p.x + self.size * (p.y + self.size * p.z)
    }

    pub fn check_position(&self, position: Pos) -> Result<()> {
        if position.in_bounds(self.size) {
            Ok(())
        } else {
            Err(EngineError::PositionOutOfRange {
                position,
                size: self.size,
            })
        }
    }

    pub fn cell(&self, position: Pos) -> Result<&Cell> {
        self.check_position(position)?;
        Ok(&self.cells[self.index(position)])
    }

    pub(crate) fn cell_mut(&mut self, position: Pos) -> Result<&mut Cell> {
        self.check_position(position)?;
        let i = self.index(position);
        Ok(&mut self.cells[i])
    }

    pub(crate) fn set_cell(&mut self, position: Pos, cell: Cell) {
        let i = self.index(position);
        self.cells[i] = cell;
    }

    /// The sticker currently showing at `slot`.
    pub fn sticker_at(&self, slot: Slot) -> Result<&Sticker> {
        self.cell(slot.position)?
            .sticker(slot.direction)
            .ok_or(EngineError::NoSticker {
                position: slot.position,
                direction: slot.direction,
            })
    }

    pub fn color_at(&self, slot: Slot) -> Result<Color> {
        self.sticker_at(slot).map(Sticker::current_color)
    }

    /// All cells with their current positions.
    pub fn cells(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Pos::new(i % size, (i / size) % size, i / (size * size)), c))
    }

    /// All visible stickers with the slots they occupy.
    pub fn stickers(&self) -> impl Iterator<Item = (Slot, &Sticker)> + '_ {
        self.cells()
            .flat_map(|(p, c)| c.stickers().map(move |(d, s)| (Slot::new(p, d), s)))
    }

    /// Current colors of one face in row-major face-grid order.
    pub fn face_colors(&self, direction: Direction) -> Result<Vec<Color>> {
        let n = self.size;
        (0..n * n)
            .map(|i| {
                let position = face_grid_position(direction, i / n, i % n, n);
                self.color_at(Slot::new(position, direction))
            })
            .collect()
    }

    /// Every sticker back in its home slot showing its original color.
    pub fn is_solved(&self) -> bool {
        self.stickers()
            .all(|(slot, s)| slot == s.home() && s.current_color() == s.original_color())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sticker_counts() {
        for size in 2..=5 {
            let cube = CubeState::new(size).unwrap();
            assert_eq!(cube.stickers().count(), 6 * size * size);
            for d in Direction::ALL {
                let on_face = cube.stickers().filter(|(slot, _)| slot.direction == d).count();
                assert_eq!(on_face, size * size);
            }
            for (p, cell) in cube.cells() {
                let extremal = Direction::ALL.iter().filter(|&&d| p.on_face(d, size)).count();
                assert_eq!(cell.sticker_count(), extremal);
                assert!(cell.sticker_count() <= 3);
            }
            assert!(cube.is_solved());
        }
    }

    #[test]
    fn interior_cells_are_bare() {
        let cube = CubeState::new(4).unwrap();
        assert_eq!(cube.cell(Pos::new(1, 2, 1)).unwrap().sticker_count(), 0);
        assert_eq!(cube.cell(Pos::new(0, 0, 0)).unwrap().sticker_count(), 3);
        assert_eq!(cube.cell(Pos::new(0, 1, 0)).unwrap().sticker_count(), 2);
        assert_eq!(cube.cell(Pos::new(0, 1, 2)).unwrap().sticker_count(), 1);
    }

    #[test]
    fn rejects_bad_sizes_and_positions() {
        assert_eq!(CubeState::new(1), Err(EngineError::InvalidSize(1)));
        assert_eq!(CubeState::new(MAX_SIZE + 1), Err(EngineError::InvalidSize(MAX_SIZE + 1)));
        let cube = CubeState::new(3).unwrap();
        assert!(matches!(
            cube.cell(Pos::new(3, 0, 0)),
            Err(EngineError::PositionOutOfRange { .. })
        ));
        assert!(matches!(
            cube.sticker_at(Slot::new(Pos::new(1, 1, 1), Direction::PosX)),
            Err(EngineError::NoSticker { .. })
        ));
    }

    #[test]
    fn face_grid_is_a_bijection() {
        for size in 2..=5 {
            for d in Direction::ALL {
                for row in 0..size {
                    for col in 0..size {
                        let p = face_grid_position(d, row, col, size);
                        assert!(p.on_face(d, size), "{d} {p}");
                        assert_eq!(face_grid(d, p, size), (row, col));
                    }
                }
            }
            assert_eq!(surface_slots(size).count(), 6 * size * size);
        }
    }

    #[test]
    fn antipode_is_an_involution() {
        let size = 3;
        for slot in surface_slots(size) {
            let a = slot.antipode(size);
            assert_ne!(a, slot);
            assert_eq!(a.antipode(size), slot);
            assert!(a.position.on_face(a.direction, size));
        }
    }

    #[test]
    fn solved_faces_are_uniform() {
        let cube = CubeState::new(3).unwrap();
        for d in Direction::ALL {
            let colors = cube.face_colors(d).unwrap();
            assert!(colors.iter().all(|&c| c == Color::solved_on(d)));
        }
    }
}
