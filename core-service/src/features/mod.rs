//! Features Module - Feature Assembler
//!
//! Map 4 input (year, sector, month, conflict type) thành một feature row
//! theo đúng layout mà model artifact đã được train.

pub mod layout;
pub mod record;

// Re-export common types
pub use layout::{LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT};
pub use record::{assemble, FeatureRecord};
