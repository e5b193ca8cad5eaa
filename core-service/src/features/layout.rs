//! Feature Layout - Centralized Feature Definition
//!
//! **This file controls the feature schema shared with the model artifact.**
//!
//! ## Rules:
//! 1. Add / remove / reorder a column → increment FEATURE_VERSION
//! 2. Column names must match the training DataFrame exactly

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::error::{HewsError, HewsResult};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Column names in exact order they appear in the row
pub const FEATURE_LAYOUT: &[&str] = &[
    "latitude",          // 0: Sector latitude (degrees)
    "longitude",         // 1: Sector longitude (degrees)
    "year",              // 2: Forecast year
    "month",             // 3: Forecast month, 1-12
    "type_of_violence",  // 4: Conflict category code, 1-3
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 5;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 of version + column names, used to detect artifact/layout drift
pub fn layout_hash() -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(&[FEATURE_VERSION]);

    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout information for health output / logging
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Validate column names declared by a model artifact against FEATURE_LAYOUT
pub fn validate_columns(columns: &[String]) -> HewsResult<()> {
    let matches = columns.len() == FEATURE_COUNT
        && columns.iter().zip(FEATURE_LAYOUT).all(|(a, b)| a == b);

    if !matches {
        return Err(HewsError::Artifact(format!(
            "Feature layout mismatch: expected {:?}, artifact declares {:?}",
            FEATURE_LAYOUT, columns
        )));
    }

    Ok(())
}

/// Check that a per-feature parameter vector has the layout width
pub fn validate_width(name: &str, values: &[f32]) -> HewsResult<()> {
    if values.len() != FEATURE_COUNT {
        return Err(HewsError::Artifact(format!(
            "{} has {} values, expected {}",
            name,
            values.len(),
            FEATURE_COUNT
        )));
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
