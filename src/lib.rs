//! Trigview: angle, unit-circle and trigonometry core for interactive trigonometry explorers
//!
//! This crate provides the value types (angles, points on the unit circle),
//! the six trigonometric functions with explicit undefined values, inverse
//! solvers that enumerate every solution in one turn, a free-text angle
//! parser, and the pipeline that turns pointer, slider and text input into
//! normalized angles stored in a single state container.

use thiserror::Error;

pub mod config;
pub mod constants;
pub mod coordinates;
pub mod diagnostics;
pub mod formulas;
pub mod interaction;
pub mod parser;
pub mod reference;
pub mod state;
pub mod trig;

// Re-export commonly used types
pub use config::Config;
pub use coordinates::{Angle, AngleUnit, Point};
pub use parser::{parse_angle_input, AngleParseError, ParsedAngleResult};
pub use state::AppState;
pub use trig::inverse::{InverseFunction, InverseSolution};
pub use trig::{TrigFunction, TrigonometricValues};

/// Main error type for the trigview library
#[derive(Debug, Error)]
pub enum TrigError {
    #[error("Angle magnitude must be finite, got {0}")]
    NonFiniteAngle(f64),

    #[error("Point coordinates must be finite, got ({x}, {y})")]
    NonFinitePoint { x: f64, y: f64 },

    #[error("{function} is undefined for {value}: input must satisfy {domain}")]
    Domain {
        function: InverseFunction,
        value: f64,
        domain: &'static str,
    },

    #[error("Invalid surface geometry: {0}")]
    InvalidGeometry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for trigview operations
pub type Result<T> = std::result::Result<T, TrigError>;
