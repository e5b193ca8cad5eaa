//! Error types
//!
//! Một taxonomy duy nhất cho toàn bộ pipeline. Mọi lỗi per-request được
//! `pipeline::respond` chuyển thành payload `{"Error": ...}`.

use thiserror::Error;

pub type HewsResult<T> = Result<T, HewsError>;

#[derive(Debug, Error)]
pub enum HewsError {
    /// Sector, month or conflict category not present in its table
    #[error("unknown {table}: '{key}'")]
    LookupFailure { table: &'static str, key: String },

    /// Request value that cannot be mapped to a feature (e.g. NaN year)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Preprocessing or model run failed, or produced unusable output
    #[error("inference error: {0}")]
    Inference(String),

    /// Model artifact could not be loaded or validated
    #[error("artifact error: {0}")]
    Artifact(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl HewsError {
    pub fn lookup(table: &'static str, key: &str) -> Self {
        HewsError::LookupFailure {
            table,
            key: key.to_string(),
        }
    }

    /// True for errors caused by the caller's input rather than the model
    pub fn is_input_error(&self) -> bool {
        matches!(self, HewsError::LookupFailure { .. } | HewsError::InvalidInput(_))
    }
}
