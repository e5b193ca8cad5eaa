//! Feature preprocessing
//!
//! Các transform tuyến tính đơn giản được fit offline; tham số đọc từ manifest.

use ndarray::Array2;

use super::hybrid::Preprocessor;
use crate::error::{HewsError, HewsResult};
use crate::features::layout::validate_width;

/// Wrap one row as a (1, n) matrix
pub(crate) fn single_row(values: Vec<f32>) -> HewsResult<Array2<f32>> {
    let n = values.len();
    Array2::from_shape_vec((1, n), values).map_err(|e| HewsError::Inference(format!("Array error: {}", e)))
}

// ============================================================================
// IDENTITY
// ============================================================================

/// Pass-through, for artifacts whose models embed their own scaling
#[derive(Debug, Clone, Default)]
pub struct IdentityScaler;

impl Preprocessor for IdentityScaler {
    fn transform(&self, row: &[f32]) -> HewsResult<Array2<f32>> {
        single_row(row.to_vec())
    }
}

// ============================================================================
// STANDARD SCALER
// ============================================================================

/// z = (x - mean) / scale
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Vec<f32>,
    scale: Vec<f32>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f32>, scale: Vec<f32>) -> HewsResult<Self> {
        validate_width("standard_scaler.mean", &mean)?;
        validate_width("standard_scaler.scale", &scale)?;

        if scale.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(HewsError::Artifact("standard_scaler.scale must be finite and non-zero".to_string()));
        }

        Ok(Self { mean, scale })
    }
}

impl Preprocessor for StandardScaler {
    fn transform(&self, row: &[f32]) -> HewsResult<Array2<f32>> {
        if row.len() != self.mean.len() {
            return Err(HewsError::Inference(format!(
                "Row has {} features, scaler expects {}",
                row.len(),
                self.mean.len()
            )));
        }

        let scaled = row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| (x - mean) / scale)
            .collect();

        single_row(scaled)
    }
}

// ============================================================================
// MIN-MAX SCALER
// ============================================================================

/// x' = (x - min) / (max - min), not clamped.
///
/// A constant column (max == min) divides by 1.0, as sklearn's MinMaxScaler does.
#[derive(Debug, Clone)]
pub struct MinMaxScaler {
    min_vals: Vec<f32>,
    max_vals: Vec<f32>,
}

impl MinMaxScaler {
    pub fn new(min_vals: Vec<f32>, max_vals: Vec<f32>) -> HewsResult<Self> {
        validate_width("min_max.min", &min_vals)?;
        validate_width("min_max.max", &max_vals)?;

        let inverted = min_vals
            .iter()
            .zip(&max_vals)
            .any(|(min, max)| !min.is_finite() || !max.is_finite() || max < min);
        if inverted {
            return Err(HewsError::Artifact("min_max bounds must be finite with max >= min".to_string()));
        }

        Ok(Self { min_vals, max_vals })
    }
}

impl Preprocessor for MinMaxScaler {
    fn transform(&self, row: &[f32]) -> HewsResult<Array2<f32>> {
        if row.len() != self.min_vals.len() {
            return Err(HewsError::Inference(format!(
                "Row has {} features, scaler expects {}",
                row.len(),
                self.min_vals.len()
            )));
        }

        let mut normalized = Vec::with_capacity(row.len());
        for (i, x) in row.iter().enumerate() {
            let min_val = self.min_vals[i];
            let range = self.max_vals[i] - min_val;
            let range = if range == 0.0 { 1.0 } else { range };
            normalized.push((x - min_val) / range);
        }

        single_row(normalized)
    }
}
