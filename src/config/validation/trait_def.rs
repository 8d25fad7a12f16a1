//! Validation trait definition

/// Validation trait for configuration sections
///
/// Returns a human readable reason on failure; callers wrap it into
/// `MetricsError::Config`.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}
