//! Verdict thresholds

use serde::{Deserialize, Serialize};

/// Probability at or above which the verdict is RED
pub const RED_MIN_PROBABILITY: f64 = 0.50;

/// Probability at or above which the verdict is at least YELLOW
pub const YELLOW_MIN_PROBABILITY: f64 = 0.25;

/// Both bounds are inclusive on the higher-severity side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerdictThresholds {
    pub red_min: f64,
    pub yellow_min: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            red_min: RED_MIN_PROBABILITY,
            yellow_min: YELLOW_MIN_PROBABILITY,
        }
    }
}
