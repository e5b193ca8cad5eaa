//! Health check handler

use axum::{extract::State, Json};
use hews_core::features::LayoutInfo;
use hews_core::model::ArtifactMetadata;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model: Option<ArtifactMetadata>,
    feature_layout: LayoutInfo,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model: state.ctx.metadata().cloned(),
        feature_layout: LayoutInfo::current(),
    })
}
