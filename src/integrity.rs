//! Antipodal integrity and the regime classifier.
//!
//! A pair of antipodal slots is *preserved* when the color at one end is the
//! color-antipode of the color at the other. Integrity is the preserved
//! fraction of all `3·N²` pairs.

use crate::cube::{surface_slots, CubeState, Slot};
use crate::error::{EngineError, Result};
use crate::geometry::{Color, Turn};
use std::fmt;

/// Critical integrity, `1 / (2 ln 2)`.
pub const K_STAR: f64 = 1.0 / (2.0 * std::f64::consts::LN_2);

/// Default half-width of the critical band around [`K_STAR`].
pub const DEFAULT_CRITICAL_BAND: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairReport {
    pub a: Slot,
    pub b: Slot,
    pub color_a: Color,
    pub color_b: Color,
    pub preserved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityReport {
    pub total: usize,
    pub preserved: usize,
    pub broken: usize,
    /// `preserved / total`, always within `[0, 1]`.
    pub integrity: f64,
    pub pairs: Vec<PairReport>,
}

/// The `3·N²` fixed slot pairs, each listed once from its positive-facing
/// end.
pub fn antipodal_pairs(size: usize) -> impl Iterator<Item = (Slot, Slot)> {
    surface_slots(size)
        .filter(|s| s.direction.sense() == Turn::Pos)
        .map(move |s| (s, s.antipode(size)))
}

pub fn compute_integrity(state: &CubeState, size: usize) -> Result<IntegrityReport> {
    if state.size() != size {
        return Err(EngineError::SizeMismatch {
            expected: state.size(),
            found: size,
        });
    }
    let pairs = antipodal_pairs(size)
        .map(|(a, b)| -> Result<PairReport> {
            let color_a = state.color_at(a)?;
            let color_b = state.color_at(b)?;
            Ok(PairReport {
                a,
                b,
                color_a,
                color_b,
                preserved: color_b == color_a.antipode(),
            })
        })
        .collect::<Result<Vec<PairReport>>>()?;

    let total = pairs.len();
    let preserved = pairs.iter().filter(|p| p.preserved).count();
    Ok(IntegrityReport {
        total,
        preserved,
        broken: total - preserved,
        integrity: preserved as f64 / total as f64,
        pairs,
    })
}

/// Scaled defect count, `2 · broken`. Zero exactly when integrity is 1.
pub fn compute_commutator_norm(state: &CubeState, size: usize) -> Result<usize> {
    compute_integrity(state, size).map(|r| 2 * r.broken)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Regime {
    Structure,
    Critical,
    Entropy,
}

impl Regime {
    /// Classify with an explicit band half-width.
    pub fn classify(integrity: f64, band: f64) -> Self {
        if (integrity - K_STAR).abs() <= band {
            Self::Critical
        } else if integrity > K_STAR {
            Self::Structure
        } else {
            Self::Entropy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Structure => "structure",
            Self::Critical => "critical",
            Self::Entropy => "entropy",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify with [`DEFAULT_CRITICAL_BAND`].
pub fn regime(integrity: f64) -> Regime {
    Regime::classify(integrity, DEFAULT_CRITICAL_BAND)
}
