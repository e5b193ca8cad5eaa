//! Prediction handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use hews_core::{respond, PredictRequest, PredictResponse};

use crate::{AppError, AppResult, AppState};

/// Runs the pipeline on the blocking pool; inference is CPU-bound.
///
/// Pipeline errors come back as 200 with `{"Error": ...}`; a body that is not
/// a valid request is a 400 with the same shape.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> AppResult<Json<PredictResponse>> {
    let Json(request) = payload.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
    tracing::debug!(?request, "predict");

    let ctx = state.ctx.clone();
    let response = tokio::task::spawn_blocking(move || respond(&ctx, &request)).await?;

    Ok(Json(response))
}
