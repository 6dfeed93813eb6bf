//! Trigonometric evaluation for a single angle
//!
//! All six functions are derived from exactly one `sin` and one `cos` call,
//! so identities such as `sin² + cos² = 1` and `tan = sin / cos` hold by
//! construction. Functions without a real value at the angle (tan at π/2,
//! cot at 0, ...) return `None`; formatting turns that into `"undefined"`.

pub mod format;
pub mod inverse;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::UNDEFINED_EPSILON;
use crate::coordinates::Angle;

/// The six trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
}

impl TrigFunction {
    /// All functions in display order
    pub const ALL: [TrigFunction; 6] = [
        TrigFunction::Sin,
        TrigFunction::Cos,
        TrigFunction::Tan,
        TrigFunction::Cot,
        TrigFunction::Sec,
        TrigFunction::Csc,
    ];

    /// Short lowercase name (`"sin"`, `"cos"`, ...)
    pub fn name(self) -> &'static str {
        match self {
            TrigFunction::Sin => "sin",
            TrigFunction::Cos => "cos",
            TrigFunction::Tan => "tan",
            TrigFunction::Cot => "cot",
            TrigFunction::Sec => "sec",
            TrigFunction::Csc => "csc",
        }
    }
}

impl fmt::Display for TrigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrigFunction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        TrigFunction::ALL
            .iter()
            .copied()
            .find(|func| func.name() == lower)
            .ok_or_else(|| format!("Unknown trigonometric function: {}", s))
    }
}

/// Trigonometric values of one angle
///
/// `sin` and `cos` are computed once at construction; everything else is
/// derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrigonometricValues {
    angle: Angle,
    sin: f64,
    cos: f64,
}

impl TrigonometricValues {
    /// Evaluates `sin` and `cos` of the angle's radian measure
    pub fn new(angle: Angle) -> Self {
        let radians = angle.to_radians();
        let (sin, cos) = radians.sin_cos();
        Self { angle, sin, cos }
    }

    /// The angle these values belong to
    pub fn angle(&self) -> Angle {
        self.angle
    }

    /// Sine, always defined
    pub fn sin(&self) -> f64 {
        self.sin
    }

    /// Cosine, always defined
    pub fn cos(&self) -> f64 {
        self.cos
    }

    /// Tangent, `None` where `|cos| < 1e-10`
    pub fn tan(&self) -> Option<f64> {
        divide(self.sin, self.cos)
    }

    /// Cotangent, `None` where `|sin| < 1e-10`
    pub fn cot(&self) -> Option<f64> {
        divide(self.cos, self.sin)
    }

    /// Secant, `None` where `|cos| < 1e-10`
    pub fn sec(&self) -> Option<f64> {
        divide(1.0, self.cos)
    }

    /// Cosecant, `None` where `|sin| < 1e-10`
    pub fn csc(&self) -> Option<f64> {
        divide(1.0, self.sin)
    }

    /// Value of any of the six functions
    pub fn value(&self, function: TrigFunction) -> Option<f64> {
        match function {
            TrigFunction::Sin => Some(self.sin()),
            TrigFunction::Cos => Some(self.cos()),
            TrigFunction::Tan => self.tan(),
            TrigFunction::Cot => self.cot(),
            TrigFunction::Sec => self.sec(),
            TrigFunction::Csc => self.csc(),
        }
    }

    /// All six values in display order
    pub fn all(&self) -> [(TrigFunction, Option<f64>); 6] {
        TrigFunction::ALL.map(|function| (function, self.value(function)))
    }
}

fn divide(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator.abs() < UNDEFINED_EPSILON {
        None
    } else {
        Some(numerator / denominator)
    }
}
