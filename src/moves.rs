//! Standard move notation, command records and the plain-text move script
//! format.
//!
//! Scripts are whitespace separated tokens, `#` comments running to the end
//! of the line:
//!
//! ```text
//! # trigger, then a middle slice and two generic slice turns
//! R U R' U'
//! M2
//! X1+ Z2-
//! @2,0,0,+X    # flip the pair at (2, 0, 0) facing +X
//! ```

use crate::error::{EngineError, Result};
use crate::geometry::{Axis, Direction, Pos, Turn};
use crate::rotation::SliceTurn;
use std::fmt;
use std::str::FromStr;

/// A named layer: one of the six outer faces, or a central slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    R,
    L,
    U,
    D,
    F,
    B,
    /// Middle X slice, turning like L.
    M,
    /// Middle Y slice, turning like D.
    E,
    /// Middle Z slice, turning like F.
    S,
}

impl Layer {
    pub const FACES: [Layer; 6] = [Layer::R, Layer::L, Layer::U, Layer::D, Layer::F, Layer::B];
    pub const MIDDLES: [Layer; 3] = [Layer::M, Layer::E, Layer::S];

    /// The face a face layer sits on.
    pub fn face(self) -> Option<Direction> {
        match self {
            Self::R => Some(Direction::PosX),
            Self::L => Some(Direction::NegX),
            Self::U => Some(Direction::PosY),
            Self::D => Some(Direction::NegY),
            Self::F => Some(Direction::PosZ),
            Self::B => Some(Direction::NegZ),
            Self::M | Self::E | Self::S => None,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            Self::R | Self::L | Self::M => Axis::X,
            Self::U | Self::D | Self::E => Axis::Y,
            Self::F | Self::B | Self::S => Axis::Z,
        }
    }

    /// Turn sense of the unprimed move. Clockwise seen from outside a face
    /// is a negative turn about that face's outward normal.
    fn clockwise(self) -> Turn {
        match self {
            Self::R | Self::U | Self::F | Self::S => Turn::Neg,
            Self::L | Self::D | Self::B | Self::M | Self::E => Turn::Pos,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Self::R => 'R',
            Self::L => 'L',
            Self::U => 'U',
            Self::D => 'D',
            Self::F => 'F',
            Self::B => 'B',
            Self::M => 'M',
            Self::E => 'E',
            Self::S => 'S',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'R' => Self::R,
            'L' => Self::L,
            'U' => Self::U,
            'D' => Self::D,
            'F' => Self::F,
            'B' => Self::B,
            'M' => Self::M,
            'E' => Self::E,
            'S' => Self::S,
            _ => return None,
        })
    }
}

/// A standard move: a layer turned clockwise, or counter-clockwise if
/// `prime`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveKey {
    pub layer: Layer,
    pub prime: bool,
}

impl MoveKey {
    pub fn new(layer: Layer, prime: bool) -> Self {
        Self { layer, prime }
    }

    #[must_use]
    pub fn inverse(self) -> Self {
        Self::new(self.layer, !self.prime)
    }

    /// The slice turn this move performs on a cube of `size`.
    pub fn slice_turn(self, size: usize) -> Result<SliceTurn> {
        let slice = match self.layer.face() {
            Some(d) if d.sense() == Turn::Pos => size - 1,
            Some(_) => 0,
            None if size % 2 == 1 => size / 2,
            None => {
                return Err(EngineError::MiddleSliceOnEvenSize {
                    token: self.to_string(),
                    size,
                })
            }
        };
        let turn = self.layer.clockwise();
        let turn = if self.prime { -turn } else { turn };
        Ok(SliceTurn::new(self.layer.axis(), slice, turn))
    }

    /// The moves every tiling graph precomputes: both senses of the six face
    /// turns, plus the three central slices on odd sizes.
    pub fn standard(size: usize) -> Vec<MoveKey> {
        let mut keys: Vec<MoveKey> = Layer::FACES
            .into_iter()
            .flat_map(|l| [MoveKey::new(l, false), MoveKey::new(l, true)])
            .collect();
        if size % 2 == 1 {
            keys.extend(Layer::MIDDLES.map(|l| MoveKey::new(l, false)));
        }
        keys
    }
}

impl fmt::Display for MoveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.layer.to_char())?;
        if self.prime {
            write!(f, "'")?;
        }
        Ok(())
    }
}

impl FromStr for MoveKey {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let layer = chars.next().and_then(Layer::from_char);
        match (layer, chars.as_str()) {
            (Some(layer), "") => Ok(Self::new(layer, false)),
            (Some(layer), "'") => Ok(Self::new(layer, true)),
            _ => Err(EngineError::UnknownMove(s.to_string())),
        }
    }
}

/// A logical command, as kept in undo history and fed to both models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Rotate(SliceTurn),
    Flip { position: Pos, direction: Direction },
}

impl Command {
    /// The command that undoes this one. A flip is its own inverse.
    #[must_use]
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate(t) => Self::Rotate(t.inverse()),
            flip @ Self::Flip { .. } => flip,
        }
    }
}

impl From<SliceTurn> for Command {
    fn from(turn: SliceTurn) -> Self {
        Self::Rotate(turn)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rotate(t) => write!(f, "{t}"),
            Self::Flip {
                position,
                direction,
            } => write!(f, "@{},{},{},{}", position.x, position.y, position.z, direction),
        }
    }
}

/// Parse one script token into the commands it stands for.
pub fn parse_token(token: &str, size: usize) -> Result<Vec<Command>> {
    let unknown = || EngineError::UnknownMove(token.to_string());

    if let Some(flip) = token.strip_prefix('@') {
        let parts: Vec<&str> = flip.split(',').collect();
        let [x, y, z, d] = parts[..] else {
            return Err(unknown());
        };
        let coord = |s: &str| s.trim().parse::<usize>().map_err(|_| unknown());
        let position = Pos::new(coord(x)?, coord(y)?, coord(z)?);
        if !position.in_bounds(size) {
            return Err(EngineError::PositionOutOfRange { position, size });
        }
        let direction = d.parse::<Direction>()?;
        return Ok(vec![Command::Flip {
            position,
            direction,
        }]);
    }

    let mut chars = token.chars();
    let first = chars.next().ok_or_else(unknown)?;

    if let Some(axis) = Axis::from_char(first).filter(|_| first.is_ascii_uppercase()) {
        // Generic slice turn, e.g. `X1+`.
        let rest = chars.as_str();
        let turn = match rest.chars().last() {
            Some('+') => Turn::Pos,
            Some('-') => Turn::Neg,
            _ => return Err(unknown()),
        };
        let slice = rest[..rest.len() - 1].parse::<usize>().map_err(|_| unknown())?;
        let t = SliceTurn::new(axis, slice, turn);
        t.check(size)?;
        return Ok(vec![t.into()]);
    }

    let layer = Layer::from_char(first).ok_or_else(unknown)?;
    let (prime, times) = match chars.as_str() {
        "" => (false, 1),
        "'" => (true, 1),
        "2" | "2'" => (false, 2),
        _ => return Err(unknown()),
    };
    let turn = MoveKey::new(layer, prime).slice_turn(size).map_err(|e| match e {
        EngineError::MiddleSliceOnEvenSize { size, .. } => EngineError::MiddleSliceOnEvenSize {
            token: token.to_string(),
            size,
        },
        other => other,
    })?;
    Ok(vec![Command::Rotate(turn); times])
}

/// Parse a whole move script for a cube of `size`.
pub fn parse_script(text: &str, size: usize) -> Result<Vec<Command>> {
    let mut commands = vec![];
    for line in text.lines() {
        let line = match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        };
        for token in line.split_whitespace() {
            commands.extend(parse_token(token, size)?);
        }
    }
    Ok(commands)
}

/// Render commands back into script form.
pub fn format_script(commands: &[Command]) -> String {
    commands
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
