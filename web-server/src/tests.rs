//! Router tests against stub models

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use hews_core::model::{AnomalyModel, ArtifactMetadata, HybridModel, IdentityScaler, ProbabilityModel, ProcessedRow};
use hews_core::{HewsContext, HewsResult};
use serde_json::Value;
use tower::ServiceExt;

use crate::config::Config;
use crate::{create_router, AppState};

struct StubProb(f64);

impl ProbabilityModel for StubProb {
    fn predict_proba(&self, _x: &ProcessedRow) -> HewsResult<f64> {
        Ok(self.0)
    }
}

struct StubAnomaly(bool);

impl AnomalyModel for StubAnomaly {
    fn predict(&self, _x: &ProcessedRow) -> HewsResult<i64> {
        Ok(if self.0 { -1 } else { 1 })
    }
}

fn app(probability: f64, anomaly: bool) -> Router {
    let model = HybridModel::new(
        Box::new(IdentityScaler),
        Box::new(StubProb(probability)),
        Box::new(StubAnomaly(anomaly)),
    );
    create_router(AppState {
        ctx: Arc::new(HewsContext::new(model)),
        config: Config::default(),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_predict_red() {
    let body = r#"{"year": 2026, "sector": "Teknaf Border", "month": "Jan", "conflict_type": "State-based Action"}"#;
    let response = app(0.60, false).oneshot(post_json("/api/v1/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["Tactical_Status"].as_str().unwrap().contains("RED ALERT"));
    assert_eq!(json["Intelligence_Signals"]["Historical_Pattern_Match_Prob"], "60.00%");
    assert_eq!(json["Intelligence_Signals"]["Outlier_Detection_Warning"], "None");
    assert_eq!(json["Input_Context"]["Year"], 2026);
    assert_eq!(json["Input_Context"]["Sector"], "Teknaf Border");
}

#[tokio::test]
async fn test_predict_uses_form_defaults() {
    let response = app(0.10, true).oneshot(post_json("/api/v1/predict", "{}")).await.unwrap();
    let json = body_json(response).await;

    assert!(json["Tactical_Status"].as_str().unwrap().contains("YELLOW ALERT"));
    assert_eq!(json["Intelligence_Signals"]["Outlier_Detection_Warning"], "ACTIVE");
    assert_eq!(json["Input_Context"]["Month"], "Jan");
}

#[tokio::test]
async fn test_predict_unknown_sector_is_error_payload() {
    let body = r#"{"sector": "Atlantis"}"#;
    let response = app(0.05, false).oneshot(post_json("/api/v1/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1);
    assert_eq!(obj["Error"], "unknown sector: 'Atlantis'");
}

/// Status 400 and a body holding only `Error`
async fn assert_bad_request_payload(body: &str) {
    let response = app(0.05, false).oneshot(post_json("/api/v1/predict", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), 1, "unexpected body: {}", json);
    assert!(!obj["Error"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_predict_malformed_json_is_error_payload() {
    assert_bad_request_payload("{not json").await;
}

#[tokio::test]
async fn test_predict_wrong_typed_fields_are_error_payload() {
    assert_bad_request_payload(r#"{"sector": 5}"#).await;
    assert_bad_request_payload(r#"{"year": "2026"}"#).await;
}

#[tokio::test]
async fn test_predict_null_year_is_error_payload() {
    assert_bad_request_payload(r#"{"year": null, "sector": "Teknaf Border"}"#).await;
}

#[tokio::test]
async fn test_predict_missing_content_type_is_error_payload() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/predict")
        .body(Body::from("{}"))
        .unwrap();
    let response = app(0.05, false).oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let json = body_json(response).await;
    assert!(json["Error"].is_string());
}

#[tokio::test]
async fn test_options() {
    let request = Request::builder().uri("/api/v1/options").body(Body::empty()).unwrap();
    let response = app(0.0, false).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["sectors"].as_array().unwrap().len(), 12);
    assert_eq!(json["months"][0], "Jan");
    assert_eq!(json["conflict_types"][2], "Civilian Attacks");
    assert_eq!(json["defaults"]["sector"], "Teknaf Border");
    assert_eq!(json["defaults"]["year"], 2026.0);
}

#[tokio::test]
async fn test_health_without_artifact_metadata() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = app(0.0, false).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(json["model"].is_null());
    assert_eq!(json["feature_layout"]["feature_count"], 5);
}

#[tokio::test]
async fn test_health_reports_artifact_outputs() {
    let model = HybridModel::new(Box::new(IdentityScaler), Box::new(StubProb(0.0)), Box::new(StubAnomaly(false)));
    let ctx = HewsContext::new(model).with_metadata(ArtifactMetadata {
        manifest_path: "/srv/hews/model.json".to_string(),
        preprocessor: "standard_scaler".to_string(),
        probability_model: "/srv/hews/adaboost.onnx".to_string(),
        probability_output: "probabilities".to_string(),
        anomaly_model: "/srv/hews/ocsvm.onnx".to_string(),
        anomaly_output: "label".to_string(),
        layout_hash: 42,
        loaded_at: chrono::Utc::now(),
    });
    let app = create_router(AppState {
        ctx: Arc::new(ctx),
        config: Config::default(),
    });

    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let json = body_json(app.oneshot(request).await.unwrap()).await;
    assert_eq!(json["model"]["probability_output"], "probabilities");
    assert_eq!(json["model"]["anomaly_output"], "label");
    assert_eq!(json["model"]["preprocessor"], "standard_scaler");
}

#[tokio::test]
async fn test_index_page() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app(0.0, false).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Hybrid Early Warning System (HEWS)"));
    assert!(html.contains("/api/v1/predict"));
}

#[tokio::test]
async fn test_unknown_route() {
    let request = Request::builder().uri("/api/v1/nope").body(Body::empty()).unwrap();
    let response = app(0.0, false).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["Error"], "No route for /api/v1/nope");
}
