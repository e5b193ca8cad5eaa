//! Verdict Classifier
//!
//! Thứ tự đánh giá cố định:
//! 1. probability >= red_min → RED
//! 2. anomaly OR probability >= yellow_min → YELLOW
//! 3. còn lại → GREEN

use serde::{Deserialize, Serialize};

use super::rules::VerdictThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertLevel {
    /// Routine internal pattern
    Green,
    /// Unusual / anomalous pattern, verify on the ground
    Yellow,
    /// High-probability border threat
    Red,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Green => "GREEN",
            AlertLevel::Yellow => "YELLOW",
            AlertLevel::Red => "RED",
        }
    }

    /// Status line shown in the report
    pub fn status_text(&self) -> &'static str {
        match self {
            AlertLevel::Red => "🔴 RED ALERT: High Probability Border Threat",
            AlertLevel::Yellow => "🟡 YELLOW ALERT: Unusual Activity (Anomaly Detected)",
            AlertLevel::Green => "🟢 GREEN: Routine Internal Patterns",
        }
    }

}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub fn classify(probability: f64, anomaly: bool) -> AlertLevel {
    classify_with_thresholds(probability, anomaly, &VerdictThresholds::default())
}

pub fn classify_with_thresholds(probability: f64, anomaly: bool, thresholds: &VerdictThresholds) -> AlertLevel {
    if probability >= thresholds.red_min {
        AlertLevel::Red
    } else if anomaly || probability >= thresholds.yellow_min {
        AlertLevel::Yellow
    } else {
        AlertLevel::Green
    }
}
