//! Report Builder
//!
//! Chỉ format, không tính toán. Tên field giữ nguyên như JSON viewer hiển thị.

use serde::{Deserialize, Serialize};

use crate::model::InferenceResult;
use crate::verdict::AlertLevel;

pub const COMMANDER_NOTE: &str = "Yellow alerts indicate events that don't match standard internal conflict patterns and should be verified by ground sensors/scouts.";

pub const OUTLIER_ACTIVE: &str = "ACTIVE";
pub const OUTLIER_NONE: &str = "None";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "Tactical_Status")]
    pub tactical_status: String,
    #[serde(rename = "Intelligence_Signals")]
    pub intelligence_signals: IntelligenceSignals,
    #[serde(rename = "Commander_Note")]
    pub commander_note: String,
    #[serde(rename = "Input_Context")]
    pub input_context: InputContext,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntelligenceSignals {
    #[serde(rename = "Historical_Pattern_Match_Prob")]
    pub historical_pattern_match_prob: String,
    #[serde(rename = "Outlier_Detection_Warning")]
    pub outlier_detection_warning: String,
}

/// Echo of the request, year normalized to an integer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputContext {
    #[serde(rename = "Year")]
    pub year: i64,
    #[serde(rename = "Sector")]
    pub sector: String,
    #[serde(rename = "Month")]
    pub month: String,
    #[serde(rename = "Conflict_Type")]
    pub conflict_type: String,
}

/// 0.8675 → "86.75%"
pub fn format_probability(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

pub fn format_outlier(anomaly: bool) -> &'static str {
    if anomaly {
        OUTLIER_ACTIVE
    } else {
        OUTLIER_NONE
    }
}

pub fn build_report(level: AlertLevel, result: &InferenceResult, input_context: InputContext) -> Report {
    Report {
        tactical_status: level.status_text().to_string(),
        intelligence_signals: IntelligenceSignals {
            historical_pattern_match_prob: format_probability(result.probability),
            outlier_detection_warning: format_outlier(result.anomaly).to_string(),
        },
        commander_note: COMMANDER_NOTE.to_string(),
        input_context,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> InputContext {
        InputContext {
            year: 2026,
            sector: "Ukhiya Zone".to_string(),
            month: "Feb".to_string(),
            conflict_type: "Non-state Activity".to_string(),
        }
    }

    #[test]
    fn test_format_probability() {
        assert_eq!(format_probability(0.8675), "86.75%");
        assert_eq!(format_probability(0.0), "0.00%");
        assert_eq!(format_probability(1.0), "100.00%");
        assert_eq!(format_probability(0.6), "60.00%");
    }

    #[test]
    fn test_format_outlier() {
        assert_eq!(format_outlier(true), "ACTIVE");
        assert_eq!(format_outlier(false), "None");
    }

    #[test]
    fn test_report_json_shape() {
        let result = InferenceResult { probability: 0.3, anomaly: true };
        let report = build_report(AlertLevel::Yellow, &result, context());

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "Tactical_Status": "🟡 YELLOW ALERT: Unusual Activity (Anomaly Detected)",
                "Intelligence_Signals": {
                    "Historical_Pattern_Match_Prob": "30.00%",
                    "Outlier_Detection_Warning": "ACTIVE"
                },
                "Commander_Note": COMMANDER_NOTE,
                "Input_Context": {
                    "Year": 2026,
                    "Sector": "Ukhiya Zone",
                    "Month": "Feb",
                    "Conflict_Type": "Non-state Activity"
                }
            })
        );
    }
}
