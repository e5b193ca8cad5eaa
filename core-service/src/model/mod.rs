//! Model Module - Hybrid Inference
//!
//! Preprocessor + probability model + anomaly model, gom lại sau một facade.
//! Mỗi thành phần nằm sau một trait để dễ swap (ONNX, stub cho test).

pub mod artifact;
pub mod hybrid;
pub mod onnx;
pub mod preprocess;

// Re-export common types
pub use artifact::{load_artifact, ArtifactMetadata, LoadedArtifact, ModelManifest};
pub use hybrid::{AnomalyModel, HybridModel, InferenceResult, Preprocessor, ProbabilityModel, ProcessedRow};
pub use onnx::OnnxModel;
pub use preprocess::{IdentityScaler, MinMaxScaler, StandardScaler};
