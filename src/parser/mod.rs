//! Free-text angle parsing
//!
//! Accepted formats, tried in this order:
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `pi/4`, `π / 6`, `3pi/4`, `-π`, `2pi` | multiple of π, radians |
//! | `45deg`, `45 degrees`, `45°`, `1.2rad`, `2 radians` | explicit unit |
//! | `45`, `-1.5`, `.5` | the caller's current unit |
//!
//! Parse failures are returned as values (`AngleParseError`) with a message
//! that names the accepted formats, so the input layer can show it inline and
//! keep the previous angle.

use std::f64::consts::PI;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::coordinates::angle::format_magnitude;
use crate::coordinates::{Angle, AngleUnit};

/// Formats listed in every parse error message
pub const ACCEPTED_FORMATS: &str =
    "Use a number (45), a number with a unit (45deg, 1.2rad) or a fraction of pi (pi/4)";

lazy_static! {
    /// Optional signed coefficient, pi token, optional denominator
    static ref PI_FRACTION: Regex = Regex::new(
        r"(?i)^([+-])?\s*(\d+(?:\.\d*)?|\.\d+)?\s*\*?\s*(?:pi|π)(?:\s*/\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+)))?$"
    )
    .expect("pi fraction pattern is valid");

    /// Signed decimal followed by a unit suffix
    static ref WITH_UNIT: Regex = Regex::new(
        r"(?i)^([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*(degrees?|deg|°|radians?|rad)$"
    )
    .expect("unit suffix pattern is valid");

    /// Bare signed decimal
    static ref PLAIN_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)$").expect("plain number pattern is valid");
}

/// Why a piece of text is not an angle
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AngleParseError {
    #[error("Input is empty. {}", ACCEPTED_FORMATS)]
    Empty,

    #[error("Cannot divide by zero in '{input}'. {}", ACCEPTED_FORMATS)]
    DivideByZero { input: String },

    #[error("Invalid angle format: '{input}'. {}", ACCEPTED_FORMATS)]
    InvalidFormat { input: String },

    #[error("Angle '{input}' is too large to represent. {}", ACCEPTED_FORMATS)]
    OutOfRange { input: String },
}

/// Either a valid angle or a human-readable reason it is not one
pub type ParsedAngleResult = std::result::Result<Angle, AngleParseError>;

/// Parses free text into an angle
///
/// # Arguments
///
/// * `input` - The text typed by the user
/// * `current_unit` - Unit applied to bare numbers without a suffix
///
/// # Examples
///
/// ```rust
/// use trigview::coordinates::AngleUnit;
/// use trigview::parser::parse_angle_input;
///
/// let angle = parse_angle_input("30", AngleUnit::Degrees).unwrap();
/// assert_eq!(angle.to_degrees(), 30.0);
///
/// let angle = parse_angle_input("30deg", AngleUnit::Radians).unwrap();
/// assert_eq!(angle.to_degrees(), 30.0);
///
/// let err = parse_angle_input("π/0", AngleUnit::Degrees).unwrap_err();
/// assert!(err.to_string().contains("divide by zero"));
/// ```
pub fn parse_angle_input(input: &str, current_unit: AngleUnit) -> ParsedAngleResult {
    let text = input.trim();
    if text.is_empty() {
        return Err(AngleParseError::Empty);
    }

    if let Some(caps) = PI_FRACTION.captures(text) {
        let sign = match caps.get(1).map(|m| m.as_str()) {
            Some("-") => -1.0,
            _ => 1.0,
        };
        let coefficient = match caps.get(2) {
            Some(m) => parse_number(m.as_str(), text)?,
            None => 1.0,
        };
        let denominator = match caps.get(3) {
            Some(m) => parse_number(m.as_str(), text)?,
            None => 1.0,
        };
        if denominator == 0.0 {
            return Err(AngleParseError::DivideByZero {
                input: text.to_string(),
            });
        }
        return make_angle(sign * coefficient * PI / denominator, AngleUnit::Radians, text);
    }

    if let Some(caps) = WITH_UNIT.captures(text) {
        let value = parse_number(&caps[1], text)?;
        let unit = if caps[2].to_lowercase().starts_with("rad") {
            AngleUnit::Radians
        } else {
            AngleUnit::Degrees
        };
        return make_angle(value, unit, text);
    }

    if PLAIN_NUMBER.is_match(text) {
        let value = parse_number(text, text)?;
        return make_angle(value, current_unit, text);
    }

    Err(AngleParseError::InvalidFormat {
        input: text.to_string(),
    })
}

fn parse_number(number: &str, input: &str) -> std::result::Result<f64, AngleParseError> {
    number
        .parse::<f64>()
        .map_err(|_| AngleParseError::InvalidFormat {
            input: input.to_string(),
        })
}

fn make_angle(value: f64, unit: AngleUnit, input: &str) -> ParsedAngleResult {
    Angle::new(value, unit).map_err(|_| AngleParseError::OutOfRange {
        input: input.to_string(),
    })
}

/// Outcome of wrapping a typed value into one turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizationInfo {
    /// Whether the original value lay outside `[0, full turn)`
    pub wrapped: bool,
    /// Signed number of whole turns removed (negative when turns were added)
    pub full_turns: i64,
    /// Message for the user, present only when the value wrapped
    pub summary: Option<String>,
}

/// Reports whether `original` had to wrap to become `normalized`
///
/// `original` is the magnitude the user typed, in `normalized`'s unit.
///
/// # Examples
///
/// ```rust
/// use trigview::coordinates::Angle;
/// use trigview::parser::detect_normalization;
///
/// let normalized = Angle::from_degrees(725.0).unwrap().normalize();
/// let info = detect_normalization(725.0, &normalized);
/// assert!(info.wrapped);
/// assert_eq!(info.full_turns, 2);
/// assert_eq!(info.summary.unwrap(), "725° normalized to 5° (2 full rotations)");
/// ```
pub fn detect_normalization(original: f64, normalized: &Angle) -> NormalizationInfo {
    let unit = normalized.unit();
    let full_turns = ((original - normalized.magnitude()) / unit.full_turn()).round() as i64;
    if full_turns == 0 {
        return NormalizationInfo {
            wrapped: false,
            full_turns,
            summary: None,
        };
    }

    let count = full_turns.unsigned_abs();
    let plural = if count == 1 { "" } else { "s" };
    let direction = if full_turns < 0 { " backwards" } else { "" };
    let summary = format!(
        "{}{} normalized to {} ({} full rotation{}{})",
        format_magnitude(original),
        unit.suffix(),
        normalized,
        count,
        plural,
        direction
    );

    NormalizationInfo {
        wrapped: true,
        full_turns,
        summary: Some(summary),
    }
}
