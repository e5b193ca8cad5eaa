//! Form choices and defaults, in dropdown order

use axum::Json;
use hews_core::tables::{self, CONFLICT_TYPES, MONTHS, SECTORS};
use serde::Serialize;

#[derive(Serialize)]
pub struct OptionsResponse {
    sectors: Vec<&'static str>,
    months: Vec<&'static str>,
    conflict_types: Vec<&'static str>,
    defaults: Defaults,
}

#[derive(Serialize)]
pub struct Defaults {
    year: f64,
    sector: &'static str,
    month: &'static str,
    conflict_type: &'static str,
}

pub async fn list() -> Json<OptionsResponse> {
    Json(OptionsResponse {
        sectors: tables::names(SECTORS),
        months: tables::names(MONTHS),
        conflict_types: tables::names(CONFLICT_TYPES),
        defaults: Defaults {
            year: tables::DEFAULT_YEAR,
            sector: tables::DEFAULT_SECTOR,
            month: tables::DEFAULT_MONTH,
            conflict_type: tables::DEFAULT_CONFLICT_TYPE,
        },
    })
}
