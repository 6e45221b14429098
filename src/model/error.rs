//! Error types for calgrid.
//!
//! The widget core never fails: degenerate geometry, out-of-range offsets and
//! stray pointer coordinates are all corrected silently where they occur.
//! The types here cover the edges of the system instead.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error of the `calgrid` binary
//!   - [`LayoutError`] - Strict validation of layout constants and density
//!   - [`crate::config::ConfigError`] - Config file and environment failures
//!   - [`crate::logging::LoggingError`] - Tracing subscriber setup failures
//!   - [`crate::view::TuiError`] - Terminal host failures
//!   - `serde_json::Error` - Frame dump serialization failures
//!
//! # Recovery Strategy
//!
//! `LayoutError` is opt-in: the widget accepts any constants and treats a
//! column narrower than one unit as "no visible columns". Callers that prefer to
//! reject such a configuration call [`crate::model::LayoutConstants::validate`]
//! before constructing the widget, which is what the binary does.

use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;
use crate::view::TuiError;

/// Top-level error returned by the binary's entry points.
///
/// Every domain error converts into `AppError` via `From`, so setup code
/// composes with `?`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Layout constants or pixel density rejected by strict validation.
    ///
    /// **Recovery**: Fatal for the binary. Report the offending field and exit.
    #[error("Invalid layout: {0}")]
    Layout(#[from] LayoutError),

    /// Configuration file or environment override could not be used.
    ///
    /// A missing config file is not an error and never reaches this variant.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Tracing subscriber could not be initialized.
    #[error("Logging setup failed: {0}")]
    Logging(#[from] LoggingError),

    /// Terminal setup, drawing or restore failed.
    #[error("Terminal error: {0}")]
    Tui(#[from] TuiError),

    /// A recorded frame could not be serialized to JSON.
    #[error("Failed to serialize frame: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Rejected layout configuration.
///
/// Returned only by the strict validators; see the module docs.
///
/// # Examples
///
/// ```
/// use calgrid::model::{LayoutConstants, LayoutError};
///
/// let layout = LayoutConstants { column_count: 0, ..LayoutConstants::default() };
/// assert_eq!(layout.validate(), Err(LayoutError::ZeroColumns));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    /// `column_count` is zero, so no day column could ever be drawn.
    #[error("column_count must be at least 1")]
    ZeroColumns,

    /// A size constant is negative.
    #[error("{field} must not be negative (got {value})")]
    Negative {
        /// Name of the offending constant.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },

    /// A size constant is NaN or infinite.
    #[error("{field} must be a finite number")]
    NonFinite {
        /// Name of the offending constant.
        field: &'static str,
    },

    /// Pixel density is zero, negative or not finite.
    #[error("pixel density must be a positive finite number (got {0})")]
    InvalidDensity(f32),
}
