//! Core data models
//!
//! The metric vocabulary and its wire representation.

pub mod metrics;

pub use metrics::*;
