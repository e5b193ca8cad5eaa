//! ONNX Runtime backend
//!
//! Load ONNX model và chạy inference cho một row đã preprocess.
//! Dùng cho cả probability model lẫn anomaly model.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};

use super::hybrid::{AnomalyModel, ProbabilityModel};
use crate::error::{HewsError, HewsResult};

/// Which session output to read when the manifest doesn't name one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultOutput {
    First,
    Last,
}

/// One loaded ONNX session.
///
/// `Session::run` needs `&mut`, so the session sits behind a mutex; the model
/// itself is never mutated after load.
pub struct OnnxModel {
    session: Mutex<Session>,
    output_name: String,
    path: PathBuf,
}

impl std::fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnnxModel")
            .field("path", &self.path)
            .field("output_name", &self.output_name)
            .finish()
    }
}

// ============================================================================
// CHECKSUM
// ============================================================================

/// Hex SHA-256 of a file
pub fn file_sha256(path: &Path) -> HewsResult<String> {
    let bytes = std::fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(hex::encode(hasher.finalize()))
}

/// Compare file digest with the expected hex digest (case-insensitive)
pub fn verify_checksum(path: &Path, expected: &str) -> HewsResult<()> {
    let actual = file_sha256(path)?;
    if !actual.eq_ignore_ascii_case(expected.trim()) {
        return Err(HewsError::Artifact(format!(
            "Checksum mismatch for {}: expected {}, got {}",
            path.display(),
            expected,
            actual
        )));
    }
    Ok(())
}

// ============================================================================
// LOADING
// ============================================================================

impl OnnxModel {
    /// Load an ONNX model from file.
    ///
    /// `output` selects the session output by name; otherwise `default` picks
    /// the first or last declared output.
    pub fn load(
        path: &Path,
        output: Option<&str>,
        default: DefaultOutput,
        sha256: Option<&str>,
    ) -> HewsResult<Self> {
        log::info!("Loading ONNX model from: {}", path.display());

        if !path.exists() {
            return Err(HewsError::Artifact(format!("Model not found: {}", path.display())));
        }

        if let Some(expected) = sha256 {
            verify_checksum(path, expected)?;
            log::debug!("Checksum OK for {}", path.display());
        }

        let session = Session::builder()
            .map_err(|e| HewsError::Artifact(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| HewsError::Artifact(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(path)
            .map_err(|e| HewsError::Artifact(format!("Failed to load model: {}", e)))?;

        let output_name = match output {
            Some(name) => {
                if !session.outputs.iter().any(|o| o.name == name) {
                    return Err(HewsError::Artifact(format!(
                        "Output '{}' not found in {}",
                        name,
                        path.display()
                    )));
                }
                name.to_string()
            }
            None => {
                let picked = match default {
                    DefaultOutput::First => session.outputs.first(),
                    DefaultOutput::Last => session.outputs.last(),
                };
                picked
                    .map(|o| o.name.clone())
                    .ok_or_else(|| HewsError::Artifact(format!("No output defined in {}", path.display())))?
            }
        };

        log::info!("ONNX model loaded: {} (output '{}')", path.display(), output_name);

        Ok(Self {
            session: Mutex::new(session),
            output_name,
            path: path.to_path_buf(),
        })
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    // ========================================================================
    // INFERENCE
    // ========================================================================

    /// Raw f32 output, used when the model is itself a preprocessing pipeline
    pub(crate) fn transform_row(&self, x: &Array2<f32>) -> HewsResult<Vec<f32>> {
        self.run_f32(x)
    }

    fn run_f32(&self, x: &Array2<f32>) -> HewsResult<Vec<f32>> {
        let input_tensor = Value::from_array(x.clone())
            .map_err(|e| HewsError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| HewsError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| HewsError::Inference(format!("No output '{}'", self.output_name)))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| HewsError::Inference(format!("Extract error: {}", e)))?;

        Ok(data.to_vec())
    }

    fn run_i64(&self, x: &Array2<f32>) -> HewsResult<Vec<i64>> {
        let input_tensor = Value::from_array(x.clone())
            .map_err(|e| HewsError::Inference(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| HewsError::Inference(format!("Inference failed: {}", e)))?;

        let output = outputs
            .get(self.output_name.as_str())
            .ok_or_else(|| HewsError::Inference(format!("No output '{}'", self.output_name)))?;

        // sklearn exporters emit int64 labels; some converters emit float
        if let Ok((_, data)) = output.try_extract_tensor::<i64>() {
            return Ok(data.to_vec());
        }

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| HewsError::Inference(format!("Extract error: {}", e)))?;

        Ok(float_labels(data))
    }
}

// ============================================================================
// OUTPUT DECODING
// ============================================================================

/// `probabilities[0][1]` from the flattened (1, n_classes) output
pub fn positive_class_probability(data: &[f32]) -> HewsResult<f64> {
    if data.len() < 2 {
        return Err(HewsError::Inference(format!(
            "Probability output has {} values, expected 2",
            data.len()
        )));
    }
    Ok(data[1] as f64)
}

/// Labels emitted as floats (-1.0 / 1.0) by some converters
pub fn float_labels(data: &[f32]) -> Vec<i64> {
    data.iter().map(|v| v.round() as i64).collect()
}

pub fn first_label(data: &[i64]) -> HewsResult<i64> {
    data.first()
        .copied()
        .ok_or_else(|| HewsError::Inference("Anomaly output is empty".to_string()))
}

// ============================================================================
// TRAIT IMPLS
// ============================================================================

impl ProbabilityModel for OnnxModel {
    /// Reads `probabilities[0][1]`, the positive-class column
    fn predict_proba(&self, x: &Array2<f32>) -> HewsResult<f64> {
        positive_class_probability(&self.run_f32(x)?)
    }
}

impl AnomalyModel for OnnxModel {
    fn predict(&self, x: &Array2<f32>) -> HewsResult<i64> {
        first_label(&self.run_i64(x)?)
    }
}
