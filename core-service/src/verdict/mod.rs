//! Verdict Module - Traffic-light classification
//!
//! CHỈ chứa logic (probability, anomaly) → RED / YELLOW / GREEN.

pub mod classifier;
pub mod rules;

pub use classifier::{classify, classify_with_thresholds, AlertLevel};
pub use rules::VerdictThresholds;
