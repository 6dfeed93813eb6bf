//! Display formatting for trigonometric values
//!
//! Keeps "undefined" distinct from zero all the way to the text shown to the
//! user, and hides floating-point noise such as `cos(π/2) = 6.1e-17`.

use serde::{Deserialize, Serialize};

use crate::constants::{DISPLAY_PRECISION, DISPLAY_ZERO_THRESHOLD};
use crate::trig::{TrigFunction, TrigonometricValues};

/// Text shown for a function without a real value
pub const UNDEFINED_TEXT: &str = "undefined";

/// Formatting options for numeric output
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Number of decimal places
    pub precision: usize,
    /// Magnitudes below this are shown as "0"
    pub zero_threshold: f64,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            precision: DISPLAY_PRECISION,
            zero_threshold: DISPLAY_ZERO_THRESHOLD,
        }
    }
}

/// Formats a possibly-undefined value
///
/// # Examples
///
/// ```rust
/// use trigview::trig::format::{format_value, DisplayOptions};
///
/// let opts = DisplayOptions::default();
/// assert_eq!(format_value(Some(0.5), &opts), "0.5000");
/// assert_eq!(format_value(Some(6.1e-17), &opts), "0");
/// assert_eq!(format_value(None, &opts), "undefined");
/// ```
pub fn format_value(value: Option<f64>, options: &DisplayOptions) -> String {
    match value {
        None => UNDEFINED_TEXT.to_string(),
        Some(v) if v.abs() < options.zero_threshold => "0".to_string(),
        Some(v) => format!("{:.*}", options.precision, v),
    }
}

/// Formats all six values of an angle as `(function, text)` pairs
pub fn format_all(
    values: &TrigonometricValues,
    options: &DisplayOptions,
) -> Vec<(TrigFunction, String)> {
    values
        .all()
        .iter()
        .map(|&(function, value)| (function, format_value(value, options)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::Angle;

    #[test]
    fn test_precision() {
        let opts = DisplayOptions {
            precision: 2,
            ..DisplayOptions::default()
        };
        assert_eq!(format_value(Some(1.0 / 3.0), &opts), "0.33");
        assert_eq!(format_value(Some(-2.0), &opts), "-2.00");
    }

    #[test]
    fn test_noise_clamped_to_zero() {
        let opts = DisplayOptions::default();
        assert_eq!(format_value(Some(-1e-12), &opts), "0");
        assert_eq!(format_value(Some(1e-9), &opts), "0.0000");
    }

    #[test]
    fn test_format_all_at_right_angle() {
        let values = TrigonometricValues::new(Angle::PI_2);
        let formatted = format_all(&values, &DisplayOptions::default());
        let texts: Vec<&str> = formatted.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(texts, vec!["1.0000", "0", "undefined", "0", "undefined", "1.0000"]);
    }
}
