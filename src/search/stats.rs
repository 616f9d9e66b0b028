//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one solve.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boards whose children were generated.
    pub expansions: u64,

    /// Child boards produced by applying a move.
    pub generated: u64,

    /// Children dropped because an equal board was already recorded.
    pub duplicates: u64,

    /// Threshold passes (iterative deepening only; 1 for best-first).
    pub passes: u32,

    /// Largest frontier (best-first) or stack (iterative deepening) seen.
    pub max_frontier: usize,

    /// Longest move sequence reached.
    pub max_depth: usize,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate expansions per second.
    #[must_use]
    pub fn expansions_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.expansions as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of generated children that were duplicates.
    #[must_use]
    pub fn duplicate_rate(&self) -> f64 {
        if self.generated == 0 {
            0.0
        } else {
            self.duplicates as f64 / self.generated as f64
        }
    }
}
