//! HTTP handlers

pub mod health;
pub mod options;
pub mod page;
pub mod predict;
