//! HEWS Core - Hybrid Early Warning System
//!
//! Map (year, sector, month, conflict type) → feature row → hybrid model
//! (probability + anomaly) → RED / YELLOW / GREEN report.
//!
//! ```text
//! PredictRequest
//!   → features::assemble      (Label Tables)
//!   → HybridModel::analyze    (preprocessor + 2 ONNX models)
//!   → verdict::classify
//!   → report::build_report
//! ```

pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod tables;
pub mod verdict;

pub use error::{HewsError, HewsResult};
pub use model::{HybridModel, InferenceResult};
pub use pipeline::{hybrid_predict, respond, HewsContext, PredictRequest, PredictResponse};
pub use report::Report;
pub use verdict::AlertLevel;
