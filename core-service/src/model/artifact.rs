//! Model Artifact
//!
//! Manifest JSON mô tả preprocessor + 2 file ONNX. Load một lần khi khởi động.
//!
//! ```json
//! {
//!   "feature_layout": ["latitude", "longitude", "year", "month", "type_of_violence"],
//!   "preprocessor": { "kind": "standard_scaler", "mean": [...], "scale": [...] },
//!   "probability_model": { "path": "adaboost.onnx", "output": "probabilities" },
//!   "anomaly_model": { "path": "ocsvm.onnx", "sha256": "..." }
//! }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hybrid::{HybridModel, Preprocessor};
use super::onnx::{DefaultOutput, OnnxModel};
use super::preprocess::{IdentityScaler, MinMaxScaler, StandardScaler};
use crate::error::{HewsError, HewsResult};
use crate::features::layout::{layout_hash, validate_columns};

// ============================================================================
// MANIFEST
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PreprocessorSpec {
    #[default]
    Identity,
    StandardScaler { mean: Vec<f32>, scale: Vec<f32> },
    MinMax { min: Vec<f32>, max: Vec<f32> },
    /// Opaque pipeline exported to ONNX; its first output is the processed row
    Onnx(OnnxModelSpec),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnnxModelSpec {
    pub path: PathBuf,
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelManifest {
    #[serde(default)]
    pub feature_layout: Option<Vec<String>>,
    #[serde(default)]
    pub preprocessor: PreprocessorSpec,
    pub probability_model: OnnxModelSpec,
    pub anomaly_model: OnnxModelSpec,
}

impl ModelManifest {
    pub fn from_file(path: &Path) -> HewsResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> HewsResult<Self> {
        let manifest: ModelManifest = serde_json::from_str(content)
            .map_err(|e| HewsError::Artifact(format!("Invalid manifest: {}", e)))?;

        if let Some(columns) = &manifest.feature_layout {
            validate_columns(columns)?;
        }

        Ok(manifest)
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// What was loaded, for health output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactMetadata {
    pub manifest_path: String,
    pub preprocessor: String,
    pub probability_model: String,
    /// Session output read for P(positive class)
    pub probability_output: String,
    pub anomaly_model: String,
    /// Session output read for the outlier label
    pub anomaly_output: String,
    pub layout_hash: u32,
    pub loaded_at: DateTime<Utc>,
}

pub struct LoadedArtifact {
    pub model: HybridModel,
    pub metadata: ArtifactMetadata,
}

// ============================================================================
// LOADING
// ============================================================================

/// Resolve a model path relative to the manifest's directory
fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Preprocessor that runs an ONNX pipeline and returns its output as a row
struct OnnxPreprocessor(OnnxModel);

impl Preprocessor for OnnxPreprocessor {
    fn transform(&self, row: &[f32]) -> HewsResult<ndarray::Array2<f32>> {
        let x = super::preprocess::single_row(row.to_vec())?;
        let processed = self.0.transform_row(&x)?;
        super::preprocess::single_row(processed)
    }
}

fn build_preprocessor(base: &Path, spec: &PreprocessorSpec) -> HewsResult<(Box<dyn Preprocessor>, String)> {
    Ok(match spec {
        PreprocessorSpec::Identity => (Box::new(IdentityScaler), "identity".to_string()),
        PreprocessorSpec::StandardScaler { mean, scale } => (
            Box::new(StandardScaler::new(mean.clone(), scale.clone())?),
            "standard_scaler".to_string(),
        ),
        PreprocessorSpec::MinMax { min, max } => {
            (Box::new(MinMaxScaler::new(min.clone(), max.clone())?), "min_max".to_string())
        }
        PreprocessorSpec::Onnx(model) => {
            let path = resolve(base, &model.path);
            let onnx = OnnxModel::load(&path, model.output.as_deref(), DefaultOutput::First, model.sha256.as_deref())?;
            (Box::new(OnnxPreprocessor(onnx)), format!("onnx:{}", path.display()))
        }
    })
}

/// Load manifest + all models. Any failure here is fatal for the caller.
pub fn load_artifact(manifest_path: &Path) -> HewsResult<LoadedArtifact> {
    log::info!("Loading model artifact: {}", manifest_path.display());

    let manifest = ModelManifest::from_file(manifest_path)
        .map_err(|e| HewsError::Artifact(format!("{}: {}", manifest_path.display(), e)))?;
    let base = manifest_path.parent().unwrap_or_else(|| Path::new("."));

    let (preprocessor, preprocessor_name) = build_preprocessor(base, &manifest.preprocessor)?;

    let prob_spec = &manifest.probability_model;
    let prob_path = resolve(base, &prob_spec.path);
    // Classifiers export (label, probabilities); probabilities come last
    let prob_model = OnnxModel::load(
        &prob_path,
        prob_spec.output.as_deref(),
        DefaultOutput::Last,
        prob_spec.sha256.as_deref(),
    )?;

    let anomaly_spec = &manifest.anomaly_model;
    let anomaly_path = resolve(base, &anomaly_spec.path);
    // Outlier detectors export (label, scores); label comes first
    let anomaly_model = OnnxModel::load(
        &anomaly_path,
        anomaly_spec.output.as_deref(),
        DefaultOutput::First,
        anomaly_spec.sha256.as_deref(),
    )?;

    let metadata = ArtifactMetadata {
        manifest_path: manifest_path.display().to_string(),
        preprocessor: preprocessor_name,
        probability_model: prob_path.display().to_string(),
        probability_output: prob_model.output_name().to_string(),
        anomaly_model: anomaly_path.display().to_string(),
        anomaly_output: anomaly_model.output_name().to_string(),
        layout_hash: layout_hash(),
        loaded_at: Utc::now(),
    };

    log::info!("Model artifact loaded ({} + {})", metadata.probability_model, metadata.anomaly_model);

    Ok(LoadedArtifact {
        model: HybridModel::new(preprocessor, Box::new(prob_model), Box::new(anomaly_model)),
        metadata,
    })
}
