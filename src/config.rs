use crate::error::{EngineError, Result};
use crate::integrity::DEFAULT_CRITICAL_BAND;

/// Range the critical band half-width must fall in.
pub const CRITICAL_BAND_RANGE: std::ops::Range<f64> = 0.01..0.079;

pub const DEFAULT_HISTORY_CAPACITY: usize = 256;

/// Tunables for a [`crate::session::Puzzle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Half-width of the "critical" band around `K_STAR`.
    pub critical_band: f64,
    /// Commands kept for undo; the oldest are dropped first.
    pub history_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            critical_band: DEFAULT_CRITICAL_BAND,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EngineConfig {
    pub fn new(critical_band: f64, history_capacity: usize) -> Result<Self> {
        let config = Self {
            critical_band,
            history_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !CRITICAL_BAND_RANGE.contains(&self.critical_band) {
            return Err(EngineError::InvalidConfig(format!(
                "critical band {} outside {:?}",
                self.critical_band, CRITICAL_BAND_RANGE
            )));
        }
        if self.history_capacity == 0 {
            return Err(EngineError::InvalidConfig("history capacity must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(EngineConfig::new(0.005, 10).is_err());
        assert!(EngineConfig::new(0.079, 10).is_err());
        assert!(EngineConfig::new(0.05, 0).is_err());
        assert!(EngineConfig::new(0.01, 1).is_ok());
    }
}
