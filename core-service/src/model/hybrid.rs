//! Hybrid Model - Inference Facade
//!
//! Chỉ delegate: preprocess → predict_proba (cột positive) → anomaly predict.
//! Không train, không cache, không batch.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{HewsError, HewsResult};
use crate::features::FeatureRecord;

/// One preprocessed row, shape (1, n)
pub type ProcessedRow = Array2<f32>;

/// Label the anomaly detector emits for an outlier
pub const OUTLIER_LABEL: i64 = -1;

// ============================================================================
// COLLABORATOR TRAITS
// ============================================================================

/// Fitted feature transform (scaling / encoding)
pub trait Preprocessor: Send + Sync {
    fn transform(&self, row: &[f32]) -> HewsResult<ProcessedRow>;
}

/// Classifier returning P(positive class) for a single processed row
pub trait ProbabilityModel: Send + Sync {
    fn predict_proba(&self, x: &ProcessedRow) -> HewsResult<f64>;
}

/// Outlier detector returning its raw label (-1 outlier, 1 inlier)
pub trait AnomalyModel: Send + Sync {
    fn predict(&self, x: &ProcessedRow) -> HewsResult<i64>;
}

// ============================================================================
// RESULT
// ============================================================================

/// Output of one `analyze` call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InferenceResult {
    /// Historical pattern match probability, 0.0 - 1.0
    pub probability: f64,
    /// Outlier flag from the anomaly detector
    pub anomaly: bool,
}

// ============================================================================
// FACADE
// ============================================================================

pub struct HybridModel {
    preprocessor: Box<dyn Preprocessor>,
    prob_model: Box<dyn ProbabilityModel>,
    anomaly_model: Box<dyn AnomalyModel>,
}

impl HybridModel {
    pub fn new(
        preprocessor: Box<dyn Preprocessor>,
        prob_model: Box<dyn ProbabilityModel>,
        anomaly_model: Box<dyn AnomalyModel>,
    ) -> Self {
        Self {
            preprocessor,
            prob_model,
            anomaly_model,
        }
    }

    pub fn analyze(&self, record: &FeatureRecord) -> HewsResult<InferenceResult> {
        let x = self.preprocessor.transform(&record.to_row())?;

        let probability = self.prob_model.predict_proba(&x)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(HewsError::Inference(format!(
                "Probability model returned {} (expected 0.0 - 1.0)",
                probability
            )));
        }

        let anomaly = self.anomaly_model.predict(&x)? == OUTLIER_LABEL;

        log::debug!(
            "analyze: features={:?} probability={:.4} anomaly={}",
            record.to_row(),
            probability,
            anomaly
        );

        Ok(InferenceResult { probability, anomaly })
    }
}

impl std::fmt::Debug for HybridModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HybridModel").finish_non_exhaustive()
    }
}
