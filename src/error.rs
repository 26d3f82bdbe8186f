//! Error types for the molecule box.
//!
//! Construction is the only fallible phase: bodies, boxes and coordinate
//! systems reject bad parameters up front so that nothing non-finite ever
//! reaches the physics step.

use thiserror::Error;

/// Unified error type for building a scene.
#[derive(Error, Debug)]
pub enum SimError {
    /// Mass must be finite and strictly positive
    #[error("invalid mass {0}: mass must be finite and > 0")]
    InvalidMass(f32),

    /// Radius, width or height out of range
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A NaN or infinite value where a real number was expected
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// A rectangle with zero or negative extent on some axis
    #[error("degenerate {what} rectangle: ({min_x}, {min_y}) .. ({max_x}, {max_y})")]
    DegenerateRect {
        what: &'static str,
        min_x: f32,
        min_y: f32,
        max_x: f32,
        max_y: f32,
    },

    /// Configuration validation errors
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SimError {
    pub fn config(message: impl Into<String>) -> Self {
        SimError::Config(message.into())
    }

    pub fn shape(message: impl Into<String>) -> Self {
        SimError::InvalidShape(message.into())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
