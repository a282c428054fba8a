//! Closed enumerations for axes, face directions, turn senses and colors,
//! plus the exact quarter-turn rotation math shared by every model.
//!
//! Grid coordinates are rotated in "doubled" form, `2c - (N - 1)`, which
//! puts the cube center at the origin while keeping every coordinate an
//! integer for both even and odd sizes.

use crate::error::{EngineError, Result};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::X => 'X',
            Self::Y => 'Y',
            Self::Z => 'Z',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' | 'X' => Some(Self::X),
            'y' | 'Y' => Some(Self::Y),
            'z' | 'Z' => Some(Self::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Axis {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        match (chars.next().and_then(Axis::from_char), chars.next()) {
            (Some(axis), None) => Ok(axis),
            _ => Err(EngineError::UnknownAxis(s.to_string())),
        }
    }
}

/// Sense of a quarter turn, +90° or -90° by the right-hand rule about the
/// positive axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Turn {
    Pos,
    Neg,
}

impl Turn {
    pub const ALL: [Turn; 2] = [Turn::Pos, Turn::Neg];

    pub fn sign(self) -> i32 {
        match self {
            Self::Pos => 1,
            Self::Neg => -1,
        }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        -self
    }
}

impl Neg for Turn {
    type Output = Self;
    fn neg(self) -> Self {
        match self {
            Self::Pos => Self::Neg,
            Self::Neg => Self::Pos,
        }
    }
}

impl TryFrom<i32> for Turn {
    type Error = EngineError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            1 => Ok(Self::Pos),
            -1 => Ok(Self::Neg),
            other => Err(EngineError::InvalidTurn(other)),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pos => write!(f, "+"),
            Self::Neg => write!(f, "-"),
        }
    }
}

/// One of the six outward face normals. The declaration order is the face
/// index used by the tiling graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::PosX,
        Direction::NegX,
        Direction::PosY,
        Direction::NegY,
        Direction::PosZ,
        Direction::NegZ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn new(axis: Axis, turn: Turn) -> Self {
        match (axis, turn) {
            (Axis::X, Turn::Pos) => Self::PosX,
            (Axis::X, Turn::Neg) => Self::NegX,
            (Axis::Y, Turn::Pos) => Self::PosY,
            (Axis::Y, Turn::Neg) => Self::NegY,
            (Axis::Z, Turn::Pos) => Self::PosZ,
            (Axis::Z, Turn::Neg) => Self::NegZ,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::PosX | Self::NegX => Axis::X,
            Self::PosY | Self::NegY => Axis::Y,
            Self::PosZ | Self::NegZ => Axis::Z,
        }
    }

    /// Positive or negative end of the axis.
    pub fn sense(self) -> Turn {
        match self {
            Self::PosX | Self::PosY | Self::PosZ => Turn::Pos,
            Self::NegX | Self::NegY | Self::NegZ => Turn::Neg,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        Self::new(self.axis(), -self.sense())
    }

    pub fn vector(self) -> [i32; 3] {
        let mut v = [0; 3];
        v[self.axis().index()] = self.sense().sign();
        v
    }

    /// Inverse of [`Direction::vector`]; `None` unless `v` is a unit axis vector.
    pub fn from_vector(v: [i32; 3]) -> Option<Self> {
        match v {
            [1, 0, 0] => Some(Self::PosX),
            [-1, 0, 0] => Some(Self::NegX),
            [0, 1, 0] => Some(Self::PosY),
            [0, -1, 0] => Some(Self::NegY),
            [0, 0, 1] => Some(Self::PosZ),
            [0, 0, -1] => Some(Self::NegZ),
            _ => None,
        }
    }

    /// Quarter turn about `axis`; directions along `axis` are fixed.
    #[must_use]
    pub fn rotated(self, axis: Axis, turn: Turn) -> Self {
        // Successive positive quarter turns about each axis.
        let cycle = match axis {
            Axis::X => [Self::PosY, Self::PosZ, Self::NegY, Self::NegZ],
            Axis::Y => [Self::PosX, Self::NegZ, Self::NegX, Self::PosZ],
            Axis::Z => [Self::PosX, Self::PosY, Self::NegX, Self::NegY],
        };
        let step = match turn {
            Turn::Pos => 1,
            Turn::Neg => 3,
        };
        match cycle.iter().position(|&d| d == self) {
            Some(i) => cycle[(i + step) % 4],
            None => self,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sense(), self.axis())
    }
}

impl FromStr for Direction {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || EngineError::UnknownDirection(s.to_string());
        let mut chars = s.trim().chars();
        let sense = match chars.next() {
            Some('+') => Turn::Pos,
            Some('-') => Turn::Neg,
            _ => return Err(unknown()),
        };
        match (chars.next().and_then(Axis::from_char), chars.next()) {
            (Some(axis), None) => Ok(Self::new(axis, sense)),
            _ => Err(unknown()),
        }
    }
}

/// Quarter turn of an integer vector about `axis`.
pub fn rotate_vector([x, y, z]: [i32; 3], axis: Axis, turn: Turn) -> [i32; 3] {
    match (axis, turn) {
        (Axis::X, Turn::Pos) => [x, -z, y],
        (Axis::X, Turn::Neg) => [x, z, -y],
        (Axis::Y, Turn::Pos) => [z, y, -x],
        (Axis::Y, Turn::Neg) => [-z, y, x],
        (Axis::Z, Turn::Pos) => [-y, x, z],
        (Axis::Z, Turn::Neg) => [y, -x, z],
    }
}

/// A cell coordinate in the `N×N×N` index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

impl Pos {
    pub fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    pub fn coord(self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn in_bounds(self, size: usize) -> bool {
        self.x < size && self.y < size && self.z < size
    }

    /// True when the coordinate along `direction` is extremal, i.e. the cell
    /// carries a sticker facing that way.
    pub fn on_face(self, direction: Direction, size: usize) -> bool {
        let c = self.coord(direction.axis());
        match direction.sense() {
            Turn::Pos => c == size - 1,
            Turn::Neg => c == 0,
        }
    }

    pub fn doubled(self, size: usize) -> [i32; 3] {
        let n = size as i32 - 1;
        [self.x, self.y, self.z].map(|c| 2 * c as i32 - n)
    }

    pub fn from_doubled(d: [i32; 3], size: usize) -> Self {
        let n = size as i32 - 1;
        let [x, y, z] = d.map(|c| ((c + n) / 2) as usize);
        Self { x, y, z }
    }

    /// Point reflection through the cube center.
    #[must_use]
    pub fn reflected(self, size: usize) -> Self {
        let n = size - 1;
        Self::new(n - self.x, n - self.y, n - self.z)
    }

    #[must_use]
    pub fn rotated(self, axis: Axis, turn: Turn, size: usize) -> Self {
        Self::from_doubled(rotate_vector(self.doubled(size), axis, turn), size)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// World-space center of the sticker at `pos` facing `direction`, with the
/// cube spanning `[-1, 1]` on every axis.
pub fn sticker_world_position(pos: Pos, direction: Direction, size: usize) -> [f32; 3] {
    let d = pos.doubled(size);
    let v = direction.vector();
    [0, 1, 2].map(|i| (d[i] + v[i]) as f32 / size as f32)
}

/// Sticker colors. The declaration order matches [`Direction::ALL`]: a
/// solved cube shows `Color::ALL[i]` on face `Direction::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Red,
    Orange,
    White,
    Yellow,
    Green,
    Blue,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Orange,
        Color::White,
        Color::Yellow,
        Color::Green,
        Color::Blue,
    ];

    /// Color of `direction`'s face on a solved cube.
    pub fn solved_on(direction: Direction) -> Self {
        Self::ALL[direction.index()]
    }

    /// The static color-antipode map. Pairs are Red/Orange, White/Yellow
    /// and Green/Blue, i.e. the solved colors of opposite faces.
    #[must_use]
    pub fn antipode(self) -> Self {
        match self {
            Self::Red => Self::Orange,
            Self::Orange => Self::Red,
            Self::White => Self::Yellow,
            Self::Yellow => Self::White,
            Self::Green => Self::Blue,
            Self::Blue => Self::Green,
        }
    }

    pub fn rgb(self) -> [u8; 3] {
        match self {
            Self::Red => [0xc4, 0x1e, 0x3a],
            Self::Orange => [0xff, 0x58, 0x00],
            Self::White => [0xff, 0xff, 0xff],
            Self::Yellow => [0xff, 0xd5, 0x00],
            Self::Green => [0x00, 0x9e, 0x60],
            Self::Blue => [0x00, 0x51, 0xba],
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::Red => 'r',
            Self::Orange => 'o',
            Self::White => 'w',
            Self::Yellow => 'y',
            Self::Green => 'g',
            Self::Blue => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_are_quarter_turns() {
        for axis in Axis::ALL {
            for turn in Turn::ALL {
                let v = [1, 2, 3];
                let mut w = v;
                for _ in 0..4 {
                    w = rotate_vector(w, axis, turn);
                }
                assert_eq!(w, v);
                assert_eq!(rotate_vector(rotate_vector(v, axis, turn), axis, -turn), v);
                // The axis component is fixed.
                assert_eq!(rotate_vector(v, axis, turn)[axis.index()], v[axis.index()]);
            }
        }
    }

    #[test]
    fn right_hand_rule() {
        assert_eq!(Direction::PosY.rotated(Axis::X, Turn::Pos), Direction::PosZ);
        assert_eq!(Direction::PosZ.rotated(Axis::Y, Turn::Pos), Direction::PosX);
        assert_eq!(Direction::PosX.rotated(Axis::Z, Turn::Pos), Direction::PosY);
    }

    #[test]
    fn direction_turns_follow_the_vector_turns() {
        for d in Direction::ALL {
            for axis in Axis::ALL {
                for turn in Turn::ALL {
                    let by_vector = Direction::from_vector(rotate_vector(d.vector(), axis, turn));
                    assert_eq!(by_vector, Some(d.rotated(axis, turn)), "{d} about {axis}{turn}");
                }
                assert_eq!(d.rotated(axis, Turn::Pos).rotated(axis, Turn::Neg), d);
            }
        }
    }

    #[test]
    fn direction_roundtrips() {
        for (i, d) in Direction::ALL.into_iter().enumerate() {
            assert_eq!(d.index(), i);
            assert_eq!(Direction::from_index(i), Some(d));
            assert_eq!(Direction::from_vector(d.vector()), Some(d));
            assert_eq!(d.opposite().opposite(), d);
            assert_ne!(d.opposite(), d);
            assert_eq!(d.to_string().parse::<Direction>(), Ok(d));
        }
        assert_eq!(Direction::from_index(6), None);
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert_eq!("y".parse::<Axis>(), Ok(Axis::Y));
        assert!(matches!("w".parse::<Axis>(), Err(EngineError::UnknownAxis(_))));
        assert!(matches!("X".parse::<Direction>(), Err(EngineError::UnknownDirection(_))));
        assert!(matches!("+Q".parse::<Direction>(), Err(EngineError::UnknownDirection(_))));
        assert_eq!(Turn::try_from(-1), Ok(Turn::Neg));
        assert_eq!(Turn::try_from(0), Err(EngineError::InvalidTurn(0)));
    }

    #[test]
    fn color_antipode_is_opposite_face() {
        for d in Direction::ALL {
            let c = Color::solved_on(d);
            assert_eq!(c.antipode(), Color::solved_on(d.opposite()));
            assert_eq!(c.antipode().antipode(), c);
            assert_ne!(c.antipode(), c);
        }
    }

    #[test]
    fn doubled_coordinates() {
        for size in 2..6 {
            let corner = Pos::new(0, size - 1, 0);
            assert_eq!(Pos::from_doubled(corner.doubled(size), size), corner);
            assert_eq!(corner.reflected(size), Pos::new(size - 1, 0, size - 1));
        }
        // Odd sizes have an exact center cell.
        assert_eq!(Pos::new(1, 1, 1).doubled(3), [0, 0, 0]);
    }

    #[test]
    fn world_positions_sit_on_the_surface() {
        let p = sticker_world_position(Pos::new(2, 0, 1), Direction::PosX, 3);
        assert_eq!(p[0], 1.0);
        let q = sticker_world_position(Pos::new(0, 2, 1), Direction::NegX, 3);
        assert_eq!(q[0], -1.0);
        assert_eq!(p.map(|c| -c), q);
    }
}
