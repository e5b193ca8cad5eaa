//! Request Pipeline
//!
//! Feature Assembler → Inference Facade → Verdict Classifier → Report Builder.
//! Một request = một lần chạy đồng bộ, không giữ state giữa các lần gọi.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HewsError, HewsResult};
use crate::features::{assemble, record::year_to_int};
use crate::model::{load_artifact, ArtifactMetadata, HybridModel};
use crate::report::{build_report, InputContext, Report};
use crate::tables;
use crate::verdict::classify;


// ============================================================================
// CONTEXT
// ============================================================================

/// Read-only state built once at startup and shared by every request
#[derive(Debug)]
pub struct HewsContext {
    model: HybridModel,
    metadata: Option<ArtifactMetadata>,
}

impl HewsContext {
    pub fn new(model: HybridModel) -> Self {
        Self {
            model,
            metadata: None,
        }
    }

    /// Load the model artifact from a manifest path
    pub fn from_artifact(manifest_path: &Path) -> HewsResult<Self> {
        let loaded = load_artifact(manifest_path)?;
        Ok(Self::new(loaded.model).with_metadata(loaded.metadata))
    }

    pub fn with_metadata(mut self, metadata: ArtifactMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn model(&self) -> &HybridModel {
        &self.model
    }

    pub fn metadata(&self) -> Option<&ArtifactMetadata> {
        self.metadata.as_ref()
    }
}

// ============================================================================
// REQUEST / RESPONSE
// ============================================================================

fn default_year() -> f64 {
    tables::DEFAULT_YEAR
}

fn default_sector() -> String {
    tables::DEFAULT_SECTOR.to_string()
}

fn default_month() -> String {
    tables::DEFAULT_MONTH.to_string()
}

fn default_conflict_type() -> String {
    tables::DEFAULT_CONFLICT_TYPE.to_string()
}

/// The four form inputs; missing fields take the form defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    #[serde(default = "default_year")]
    pub year: f64,
    #[serde(default = "default_sector")]
    pub sector: String,
    #[serde(default = "default_month")]
    pub month: String,
    #[serde(default = "default_conflict_type")]
    pub conflict_type: String,
}

impl PredictRequest {
    pub fn new(year: f64, sector: &str, month: &str, conflict_type: &str) -> Self {
        Self {
            year,
            sector: sector.to_string(),
            month: month.to_string(),
            conflict_type: conflict_type.to_string(),
        }
    }
}

impl Default for PredictRequest {
    fn default() -> Self {
        Self {
            year: default_year(),
            sector: default_sector(),
            month: default_month(),
            conflict_type: default_conflict_type(),
        }
    }
}

/// Either the full report or `{"Error": "<message>"}`, never both
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictResponse {
    Report(Report),
    Error {
        #[serde(rename = "Error")]
        message: String,
    },
}

impl PredictResponse {
    pub fn error(message: impl Into<String>) -> Self {
        PredictResponse::Error { message: message.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, PredictResponse::Error { .. })
    }
}

// ============================================================================
// HANDLER
// ============================================================================

/// Run one request through the whole chain
pub fn hybrid_predict(ctx: &HewsContext, request: &PredictRequest) -> HewsResult<Report> {
    let record = assemble(request.year, &request.sector, &request.month, &request.conflict_type)?;
    let analysis = ctx.model().analyze(&record)?;
    let level = classify(analysis.probability, analysis.anomaly);

    let input_context = InputContext {
        year: year_to_int(request.year)?,
        sector: request.sector.clone(),
        month: request.month.clone(),
        conflict_type: request.conflict_type.clone(),
    };

    log::info!(
        "{} / {} / {} {}: {} (p={:.4}, anomaly={})",
        request.sector,
        request.conflict_type,
        request.month,
        input_context.year,
        level,
        analysis.probability,
        analysis.anomaly
    );

    Ok(build_report(level, &analysis, input_context))
}

/// Boundary: every error becomes an `Error` payload, no partial report
pub fn respond(ctx: &HewsContext, request: &PredictRequest) -> PredictResponse {
    match hybrid_predict(ctx, request) {
        Ok(report) => PredictResponse::Report(report),
        Err(e) => {
            log_failure(&e);
            PredictResponse::error(e.to_string())
        }
    }
}

fn log_failure(e: &HewsError) {
    if e.is_input_error() {
        log::warn!("Rejected request: {}", e);
    } else {
        log::error!("Prediction failed: {}", e);
    }
}
