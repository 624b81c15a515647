use serde::{Deserialize, Serialize};

use super::rules::{SCORE_CEILING, SCORE_FLOOR};

/// Clamped score at or above which a fresh evaluation is labelled approved.
pub const DEFAULT_APPROVAL_CUTOFF: i16 = 50;

/// Tunable dials for the scoring engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub approval_cutoff: i16,
}

impl ScoringConfig {
    /// Builds a config, falling back to the default cutoff when the value cannot be reached by a
    /// clamped score.
    pub fn new(approval_cutoff: i16) -> Self {
        let approval_cutoff = if Self::cutoff_in_range(approval_cutoff) {
            approval_cutoff
        } else {
            DEFAULT_APPROVAL_CUTOFF
        };

        Self { approval_cutoff }
    }

    pub const fn cutoff_in_range(cutoff: i16) -> bool {
        cutoff >= SCORE_FLOOR && cutoff <= SCORE_CEILING
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            approval_cutoff: DEFAULT_APPROVAL_CUTOFF,
        }
    }
}
