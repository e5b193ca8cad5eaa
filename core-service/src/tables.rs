//! Label Tables
//!
//! Bảng tra cứu cố định: tên hiển thị -> giá trị số cho model.
//! Thứ tự các entry cũng là thứ tự hiển thị trong dropdown.

use crate::error::{HewsError, HewsResult};

// ============================================================================
// SECTORS
// ============================================================================

/// Sector name -> (latitude, longitude) in degrees
pub const SECTORS: &[(&str, (f64, f64))] = &[
    ("Teknaf Border", (20.86, 92.30)),
    ("Ukhiya Zone", (21.16, 92.14)),
    ("Bandarban Hills", (22.19, 92.21)),
    ("Sylhet Border", (24.89, 91.86)),
    ("Dhaka Central", (23.81, 90.41)),
    ("Chittagong Port", (22.34, 91.83)),
    ("Cox's Bazar Coast", (21.42, 91.98)),
    ("Rangamati Hills", (22.65, 92.19)),
    ("Khulna Sundarbans", (22.45, 89.54)),
    ("Rajshahi Border", (24.37, 88.60)),
    ("Comilla Border", (23.47, 91.18)),
    ("Dinajpur Border", (25.63, 88.67)),
];

// ============================================================================
// MONTHS
// ============================================================================

pub const MONTHS: &[(&str, u8)] = &[
    ("Jan", 1),
    ("Feb", 2),
    ("Mar", 3),
    ("Apr", 4),
    ("May", 5),
    ("Jun", 6),
    ("Jul", 7),
    ("Aug", 8),
    ("Sep", 9),
    ("Oct", 10),
    ("Nov", 11),
    ("Dec", 12),
];

// ============================================================================
// CONFLICT TYPES
// ============================================================================

/// Conflict category -> `type_of_violence` code
pub const CONFLICT_TYPES: &[(&str, u8)] = &[
    ("State-based Action", 1),
    ("Non-state Activity", 2),
    ("Civilian Attacks", 3),
];

// ============================================================================
// DEFAULTS (form initial values)
// ============================================================================

pub const DEFAULT_YEAR: f64 = 2026.0;
pub const DEFAULT_SECTOR: &str = "Teknaf Border";
pub const DEFAULT_MONTH: &str = "Jan";
pub const DEFAULT_CONFLICT_TYPE: &str = "State-based Action";

// ============================================================================
// LOOKUPS
// ============================================================================

fn find<V: Copy>(table: &[(&str, V)], key: &str) -> Option<V> {
    table.iter().find(|(name, _)| *name == key).map(|(_, v)| *v)
}

pub fn sector_coordinates(sector: &str) -> HewsResult<(f64, f64)> {
    find(SECTORS, sector).ok_or_else(|| HewsError::lookup("sector", sector))
}

pub fn month_number(month: &str) -> HewsResult<u8> {
    find(MONTHS, month).ok_or_else(|| HewsError::lookup("month", month))
}

pub fn conflict_code(conflict_type: &str) -> HewsResult<u8> {
    find(CONFLICT_TYPES, conflict_type).ok_or_else(|| HewsError::lookup("conflict type", conflict_type))
}

/// Names only, in display order
pub fn names<V>(table: &'static [(&'static str, V)]) -> Vec<&'static str> {
    table.iter().map(|(name, _)| *name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_sizes() {
        assert_eq!(SECTORS.len(), 12);
        assert_eq!(MONTHS.len(), 12);
        assert_eq!(CONFLICT_TYPES.len(), 3);
    }

    #[test]
    fn test_months_are_one_to_twelve_in_order() {
        for (i, (_, num)) in MONTHS.iter().enumerate() {
            assert_eq!(*num as usize, i + 1);
        }
    }

    #[test]
    fn test_sector_lookup() {
        assert_eq!(sector_coordinates("Teknaf Border").unwrap(), (20.86, 92.30));
        assert_eq!(sector_coordinates("Cox's Bazar Coast").unwrap(), (21.42, 91.98));
        assert_eq!(sector_coordinates("Dinajpur Border").unwrap(), (25.63, 88.67));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(sector_coordinates("teknaf border").is_err());
        assert!(month_number("JAN").is_err());
        assert!(conflict_code("civilian attacks").is_err());
    }

    #[test]
    fn test_lookup_miss_is_lookup_failure() {
        match conflict_code("Piracy") {
            Err(HewsError::LookupFailure { table, key }) => {
                assert_eq!(table, "conflict type");
                assert_eq!(key, "Piracy");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_defaults_exist_in_tables() {
        assert!(sector_coordinates(DEFAULT_SECTOR).is_ok());
        assert!(month_number(DEFAULT_MONTH).is_ok());
        assert!(conflict_code(DEFAULT_CONFLICT_TYPE).is_ok());
        assert_eq!(names(SECTORS)[0], DEFAULT_SECTOR);
    }
}
