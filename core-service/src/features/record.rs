//! Feature Record
//!
//! Một row duy nhất cho mỗi request. Tạo ra, đưa vào model, rồi bỏ.

use serde::{Deserialize, Serialize};

use super::layout::FEATURE_COUNT;
use crate::error::{HewsError, HewsResult};
use crate::tables;

/// Ordered feature row: (latitude, longitude, year, month, type_of_violence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub year: i64,
    pub month: u8,
    pub conflict_code: u8,
}

impl FeatureRecord {
    /// Values as f32 in FEATURE_LAYOUT order (model input dtype)
    pub fn to_row(&self) -> [f32; FEATURE_COUNT] {
        [
            self.latitude as f32,
            self.longitude as f32,
            self.year as f32,
            self.month as f32,
            self.conflict_code as f32,
        ]
    }
}

/// Convert a numeric year to an integer, truncating toward zero
pub fn year_to_int(year: f64) -> HewsResult<i64> {
    if !year.is_finite() {
        return Err(HewsError::InvalidInput(format!("year must be a finite number, got {}", year)));
    }
    Ok(year.trunc() as i64)
}

/// Build the feature record for one request.
///
/// Lookups run in order sector → month → conflict type; the first miss wins.
pub fn assemble(year: f64, sector: &str, month: &str, conflict_type: &str) -> HewsResult<FeatureRecord> {
    let (latitude, longitude) = tables::sector_coordinates(sector)?;
    let month = tables::month_number(month)?;
    let conflict_code = tables::conflict_code(conflict_type)?;

    Ok(FeatureRecord {
        latitude,
        longitude,
        year: year_to_int(year)?,
        month,
        conflict_code,
    })
}
