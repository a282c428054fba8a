use crate::geometry::{Direction, Pos};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Everything the engine can refuse to do.
///
/// The first group are caller mistakes and are rejected before any state is
/// touched. The second group means a state value was corrupted somewhere
/// upstream; those are reported, never repaired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("cube size {0} is outside {min}..={max}", min = crate::MIN_SIZE, max = crate::MAX_SIZE)]
    InvalidSize(usize),
    #[error("slice index {index} out of range for size {size}")]
    SliceOutOfRange { index: usize, size: usize },
    #[error("position {position} out of range for size {size}")]
    PositionOutOfRange { position: Pos, size: usize },
    #[error("unknown axis {0:?}")]
    UnknownAxis(String),
    #[error("unknown direction {0:?}")]
    UnknownDirection(String),
    #[error("turn must be +1 or -1, got {0}")]
    InvalidTurn(i32),
    #[error("size mismatch: expected size {expected}, found {found}")]
    SizeMismatch { expected: usize, found: usize },
    #[error("unknown move {0:?}")]
    UnknownMove(String),
    #[error("move {token:?} needs an odd cube size, got {size}")]
    MiddleSliceOnEvenSize { token: String, size: usize },
    #[error("vertex {vertex} out of range for {count} vertices")]
    VertexIndexOutOfRange { vertex: usize, count: usize },
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("no sticker at {position} facing {direction}")]
    NoSticker { position: Pos, direction: Direction },
    #[error("no antipodal partner for sticker at {position} facing {direction}")]
    MissingPartner { position: Pos, direction: Direction },
    #[error("tiling state has {found} entries, expected {expected}")]
    StateLength { found: usize, expected: usize },
    #[error("tiling state value {value} at vertex {vertex} is out of range")]
    VertexOutOfRange { vertex: usize, value: usize },
    #[error("tiling state repeats origin vertex {0}")]
    NotAPermutation(usize),
    #[error("cube and tiling models diverged at vertex {vertex}")]
    Diverged { vertex: usize },
}

impl EngineError {
    /// True for errors signalling a corrupted state rather than bad input.
    pub fn is_malformed_state(&self) -> bool {
        matches!(
            self,
            Self::NoSticker { .. }
                | Self::MissingPartner { .. }
                | Self::StateLength { .. }
                | Self::VertexOutOfRange { .. }
                | Self::NotAPermutation(_)
                | Self::Diverged { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_errors() {
        assert!(!EngineError::InvalidSize(0).is_malformed_state());
        assert!(!EngineError::SliceOutOfRange { index: 3, size: 3 }.is_malformed_state());
        assert!(!EngineError::VertexIndexOutOfRange { vertex: 54, count: 54 }.is_malformed_state());
        assert!(EngineError::NotAPermutation(4).is_malformed_state());
        assert!(EngineError::Diverged { vertex: 0 }.is_malformed_state());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = EngineError::SliceOutOfRange { index: 5, size: 3 };
        assert_eq!(err.to_string(), "slice index 5 out of range for size 3");
        let err = EngineError::InvalidTurn(2);
        assert_eq!(err.to_string(), "turn must be +1 or -1, got 2");
    }
}
