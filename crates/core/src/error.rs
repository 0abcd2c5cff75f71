//! Error types for the gravity-basin core.

use thiserror::Error;

/// Errors produced while configuring or recording a basin render.
///
/// The simulation itself is total: [`simulate`](crate::integrator::Integrator::simulate)
/// and [`classify`](crate::classifier::classify) never fail. Errors only arise
/// from invalid configuration or from the sink side.
#[derive(Debug, Error)]
pub enum BasinError {
    /// Width or height was zero (or their product overflowed).
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A simulation or render parameter had an unusable value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParam { name: String, reason: String },

    /// An explicit attractor had a non-finite coordinate or a non-positive mass.
    #[error("invalid attractor {index}: {reason}")]
    InvalidAttractor { index: usize, reason: String },

    /// A pixel coordinate was outside the grid.
    #[error("pixel ({column}, {row}) out of bounds for grid of size ({width}, {height})")]
    OutOfBounds {
        column: usize,
        row: usize,
        width: usize,
        height: usize,
    },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A label palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in palette has the requested name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// Writing output failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl BasinError {
    /// Shorthand for [`BasinError::InvalidParam`].
    pub fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        BasinError::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}
