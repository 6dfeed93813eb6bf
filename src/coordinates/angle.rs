//! # Angle Representation Module
//!
//! This module provides the immutable `Angle` value used throughout the crate.
//! An angle is a finite magnitude tagged with the unit it was given in
//! (degrees or radians).
//!
//! ## Design Philosophy
//!
//! The `Angle` type keeps the magnitude in the unit the user supplied, so a
//! slider in degrees reads back exactly `30.0` rather than `29.999999999999996`.
//! Conversion only occurs when explicitly requested via `to_degrees()`,
//! `to_radians()` or `to_unit()`.
//!
//! ## Invariants
//!
//! - The magnitude is always finite; construction from NaN or ±∞ fails
//! - Every transform returns a new `Angle`, nothing mutates in place
//! - Equality for the purposes of the explorer is unit-agnostic and
//!   tolerance-based, see [`Angle::approx_eq`]
//!
//! ## Normalization
//!
//! `normalize()` wraps the magnitude into `[0, 2π)` for radians and
//! `[0°, 360°)` for degrees. A full turn therefore normalizes to zero; the
//! slider compensates for this on its own, see `interaction::slider`.
//!
//! ## Examples
//!
//! ```rust
//! use trigview::coordinates::angle::{Angle, AngleUnit};
//!
//! // Create angle from degrees - stored exactly as 45.0 degrees
//! let angle_deg = Angle::from_degrees(45.0).unwrap();
//! assert_eq!(angle_deg.to_degrees(), 45.0);
//! assert_eq!(angle_deg.unit(), AngleUnit::Degrees);
//!
//! // A quarter turn in degrees equals a quarter turn in radians
//! let quarter = Angle::from_radians(std::f64::consts::FRAC_PI_2).unwrap();
//! assert!(Angle::from_degrees(90.0).unwrap().approx_eq(&quarter));
//!
//! // Normalization wraps into a single turn
//! let wrapped = Angle::from_degrees(-30.0).unwrap().normalize();
//! assert_eq!(wrapped.magnitude(), 330.0);
//! ```

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{ANGLE_TOLERANCE, DEG2RAD, FULL_TURN_DEG, RAD2DEG, TAU};
use crate::{Result, TrigError};

/// Unit an angle magnitude is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Magnitude is in radians
    Radians,
    /// Magnitude is in degrees
    Degrees,
}

impl AngleUnit {
    /// Magnitude of one full turn in this unit
    pub fn full_turn(self) -> f64 {
        match self {
            AngleUnit::Radians => TAU,
            AngleUnit::Degrees => FULL_TURN_DEG,
        }
    }

    /// Short suffix used when printing magnitudes in this unit
    pub fn suffix(self) -> &'static str {
        match self {
            AngleUnit::Radians => " rad",
            AngleUnit::Degrees => "°",
        }
    }

    /// The other unit
    pub fn other(self) -> AngleUnit {
        match self {
            AngleUnit::Radians => AngleUnit::Degrees,
            AngleUnit::Degrees => AngleUnit::Radians,
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleUnit::Radians => write!(f, "radians"),
            AngleUnit::Degrees => write!(f, "degrees"),
        }
    }
}

/// Represents an angular measurement in the unit it was created with
///
/// The derived `PartialEq` is structural (same magnitude, same unit). Use
/// [`Angle::approx_eq`] to compare rotations regardless of unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Angle {
    magnitude: f64,
    unit: AngleUnit,
}

impl Angle {
    /// Zero rotation
    pub const ZERO: Angle = Angle::radians_unchecked(0.0);
    /// π/6 (30°)
    pub const PI_6: Angle = Angle::radians_unchecked(PI / 6.0);
    /// π/4 (45°)
    pub const PI_4: Angle = Angle::radians_unchecked(PI / 4.0);
    /// π/3 (60°)
    pub const PI_3: Angle = Angle::radians_unchecked(PI / 3.0);
    /// π/2 (90°)
    pub const PI_2: Angle = Angle::radians_unchecked(PI / 2.0);
    /// π (180°)
    pub const PI: Angle = Angle::radians_unchecked(PI);
    /// 3π/2 (270°)
    pub const PI_3_2: Angle = Angle::radians_unchecked(3.0 * PI / 2.0);
    /// 2π (360°)
    pub const TAU: Angle = Angle::radians_unchecked(TAU);

    /// The named angles with their conventional labels
    pub const NAMED: [(&'static str, Angle); 8] = [
        ("0", Angle::ZERO),
        ("π/6", Angle::PI_6),
        ("π/4", Angle::PI_4),
        ("π/3", Angle::PI_3),
        ("π/2", Angle::PI_2),
        ("π", Angle::PI),
        ("3π/2", Angle::PI_3_2),
        ("2π", Angle::TAU),
    ];

    const fn radians_unchecked(magnitude: f64) -> Self {
        Angle {
            magnitude,
            unit: AngleUnit::Radians,
        }
    }

    /// For finite literals in constant tables
    pub(crate) const fn degrees_unchecked(magnitude: f64) -> Self {
        Angle {
            magnitude,
            unit: AngleUnit::Degrees,
        }
    }

    /// Creates a new angle from a magnitude and its unit
    ///
    /// # Arguments
    ///
    /// * `magnitude` - The numerical angle value
    /// * `unit` - The unit `magnitude` is expressed in
    ///
    /// # Errors
    ///
    /// Returns `TrigError::NonFiniteAngle` if `magnitude` is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trigview::coordinates::angle::{Angle, AngleUnit};
    ///
    /// let angle = Angle::new(90.0, AngleUnit::Degrees).unwrap();
    /// assert_eq!(angle.magnitude(), 90.0);
    ///
    /// assert!(Angle::new(f64::NAN, AngleUnit::Radians).is_err());
    /// ```
    pub fn new(magnitude: f64, unit: AngleUnit) -> Result<Self> {
        if !magnitude.is_finite() {
            return Err(TrigError::NonFiniteAngle(magnitude));
        }
        Ok(Angle { magnitude, unit })
    }

    /// Creates an angle from a value in degrees
    ///
    /// The value is stored exactly as provided.
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        Self::new(degrees, AngleUnit::Degrees)
    }

    /// Creates an angle from a value in radians
    ///
    /// The value is stored exactly as provided.
    pub fn from_radians(radians: f64) -> Result<Self> {
        Self::new(radians, AngleUnit::Radians)
    }

    /// Returns the stored magnitude in the angle's own unit
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Returns the unit the magnitude is expressed in
    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Returns the angle value in degrees
    ///
    /// Angles stored as degrees return their exact original value; radian
    /// angles are converted with `radians * (180 / π)`.
    pub fn to_degrees(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.magnitude,
            AngleUnit::Radians => self.magnitude * RAD2DEG,
        }
    }

    /// Returns the angle value in radians
    ///
    /// Angles stored as radians return their exact original value; degree
    /// angles are converted with `degrees * (π / 180)`.
    pub fn to_radians(&self) -> f64 {
        match self.unit {
            AngleUnit::Radians => self.magnitude,
            AngleUnit::Degrees => self.magnitude * DEG2RAD,
        }
    }

    /// Returns the magnitude of this angle expressed in `unit`
    pub fn value_in(&self, unit: AngleUnit) -> f64 {
        match unit {
            AngleUnit::Radians => self.to_radians(),
            AngleUnit::Degrees => self.to_degrees(),
        }
    }

    /// Re-expresses the same rotation in another unit
    ///
    /// Converting to the angle's own unit returns a copy.
    ///
    /// # Errors
    ///
    /// Fails only if the converted magnitude overflows to infinity, which
    /// requires a radian magnitude beyond roughly 3e306.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trigview::coordinates::angle::{Angle, AngleUnit};
    ///
    /// let angle = Angle::PI.to_unit(AngleUnit::Degrees).unwrap();
    /// assert!((angle.magnitude() - 180.0).abs() < 1e-12);
    /// ```
    pub fn to_unit(&self, unit: AngleUnit) -> Result<Angle> {
        if unit == self.unit {
            return Ok(*self);
        }
        Angle::new(self.value_in(unit), unit)
    }

    /// Wraps the angle into a single turn
    ///
    /// Returns an equivalent angle in the same unit whose magnitude lies in
    /// `[0, 2π)` (radians) or `[0°, 360°)` (degrees). Exactly one full turn
    /// normalizes to zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trigview::coordinates::angle::Angle;
    ///
    /// assert_eq!(Angle::from_degrees(725.0).unwrap().normalize().magnitude(), 5.0);
    /// assert_eq!(Angle::from_degrees(360.0).unwrap().normalize().magnitude(), 0.0);
    /// ```
    pub fn normalize(&self) -> Angle {
        let full_turn = self.unit.full_turn();
        let mut magnitude = self.magnitude % full_turn;
        if magnitude < 0.0 {
            magnitude += full_turn;
        }
        // A tiny negative remainder can round up to a whole turn
        if magnitude >= full_turn || magnitude == 0.0 {
            magnitude = 0.0;
        }
        Angle {
            magnitude,
            unit: self.unit,
        }
    }

    /// Wraps the angle into a single turn of `unit`
    ///
    /// A normalized magnitude always converts to a finite one, so unlike
    /// [`Angle::to_unit`] this cannot fail.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trigview::coordinates::angle::{Angle, AngleUnit};
    ///
    /// let angle = Angle::from_radians(-std::f64::consts::PI).unwrap();
    /// let wrapped = angle.normalize_in(AngleUnit::Degrees);
    /// assert_eq!(wrapped.unit(), AngleUnit::Degrees);
    /// assert!((wrapped.magnitude() - 180.0).abs() < 1e-9);
    /// ```
    pub fn normalize_in(&self, unit: AngleUnit) -> Angle {
        let wrapped = self.normalize();
        Angle {
            magnitude: wrapped.value_in(unit),
            unit,
        }
        .normalize()
    }

    /// Unit-agnostic, tolerance-based equality
    ///
    /// Two angles are equal when their radian measures differ by less than
    /// `ANGLE_TOLERANCE` (1e-4). No normalization is applied: 0 and 2π are
    /// different angles here, compare normalized angles for rotations.
    pub fn approx_eq(&self, other: &Angle) -> bool {
        (self.to_radians() - other.to_radians()).abs() < ANGLE_TOLERANCE
    }

    /// Returns the label of the named angle this angle lands on, if any
    ///
    /// The comparison is done on normalized angles, so 450° reports `"π/2"`.
    pub fn nearest_named(&self) -> Option<&'static str> {
        let normalized = self.normalize();
        Angle::NAMED
            .iter()
            .find(|(_, named)| named.normalize().approx_eq(&normalized))
            .map(|(label, _)| *label)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "{:.*}{}",
                precision,
                self.magnitude,
                self.unit.suffix()
            ),
            None => write!(
                f,
                "{}{}",
                format_magnitude(self.magnitude),
                self.unit.suffix()
            ),
        }
    }
}

/// Formats a magnitude with at most four decimals and no trailing zeros
pub(crate) fn format_magnitude(value: f64) -> String {
    let text = format!("{:.4}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_angle_from_degrees_exact_storage() {
        let angle = Angle::from_degrees(45.0).unwrap();
        assert_eq!(angle.to_degrees(), 45.0);
        assert_eq!(angle.magnitude(), 45.0);
        assert_eq!(angle.unit(), AngleUnit::Degrees);
    }

    #[test]
    fn test_angle_from_radians_exact_storage() {
        let angle = Angle::from_radians(PI / 4.0).unwrap();
        assert_eq!(angle.to_radians(), PI / 4.0);
        assert_eq!(angle.unit(), AngleUnit::Radians);
    }

    #[test]
    fn test_non_finite_construction_fails() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                Angle::from_degrees(value),
                Err(TrigError::NonFiniteAngle(_))
            ));
            assert!(Angle::from_radians(value).is_err());
        }
    }

    #[test]
    fn test_common_angles_degrees() {
        let test_cases = vec![
            (0.0, 0.0),
            (90.0, PI / 2.0),
            (180.0, PI),
            (270.0, 3.0 * PI / 2.0),
            (360.0, 2.0 * PI),
            (45.0, PI / 4.0),
        ];

        for (degrees, expected_radians) in test_cases {
            let angle = Angle::from_degrees(degrees).unwrap();
            assert!(
                (angle.to_radians() - expected_radians).abs() < 1e-14,
                "Failed for {} degrees",
                degrees
            );
            assert_eq!(angle.to_degrees(), degrees);
        }
    }

    #[test]
    fn test_normalize_wraps_into_one_turn() {
        let cases = vec![(725.0, 5.0), (-30.0, 330.0), (360.0, 0.0), (-360.0, 0.0), (0.0, 0.0)];
        for (input, expected) in cases {
            let normalized = Angle::from_degrees(input).unwrap().normalize();
            assert!(
                (normalized.magnitude() - expected).abs() < 1e-9,
                "{} normalized to {}",
                input,
                normalized.magnitude()
            );
            assert_eq!(normalized.unit(), AngleUnit::Degrees);
        }

        let rad = Angle::from_radians(-PI / 2.0).unwrap().normalize();
        assert!((rad.magnitude() - 3.0 * PI / 2.0).abs() < 1e-12);
        assert_eq!(Angle::TAU.normalize().magnitude(), 0.0);
    }

    #[test]
    fn test_normalize_tiny_negative_stays_half_open() {
        let angle = Angle::from_degrees(-1e-20).unwrap().normalize();
        assert!(angle.magnitude() >= 0.0 && angle.magnitude() < 360.0);

        let angle = Angle::from_radians(-1e-18).unwrap().normalize();
        assert!(angle.magnitude() >= 0.0 && angle.magnitude() < TAU);
    }

    #[test]
    fn test_normalize_never_returns_negative_zero() {
        let angle = Angle::from_degrees(-0.0).unwrap().normalize();
        assert!(angle.magnitude().is_sign_positive());
        assert_eq!(angle.to_string(), "0°");
    }

    #[test]
    fn test_unit_agnostic_equality() {
        let half = Angle::from_degrees(180.0).unwrap();
        assert!(half.approx_eq(&Angle::from_radians(PI).unwrap()));
        assert!(Angle::from_degrees(90.0).unwrap().approx_eq(&Angle::PI_2));
        assert!(!Angle::from_degrees(91.0).unwrap().approx_eq(&Angle::PI_2));

        // Structural equality still distinguishes the units
        assert_ne!(half, Angle::PI);
    }

    #[test]
    fn test_to_unit_same_unit_is_copy() {
        let angle = Angle::from_degrees(123.456).unwrap();
        assert_eq!(angle.to_unit(AngleUnit::Degrees).unwrap(), angle);

        let converted = angle.to_unit(AngleUnit::Radians).unwrap();
        assert_eq!(converted.unit(), AngleUnit::Radians);
        assert!(converted.approx_eq(&angle));
    }

    #[test]
    fn test_to_unit_overflow_fails() {
        let huge = Angle::from_radians(f64::MAX).unwrap();
        assert!(huge.to_unit(AngleUnit::Degrees).is_err());

        let wrapped = huge.normalize_in(AngleUnit::Degrees);
        assert_eq!(wrapped.unit(), AngleUnit::Degrees);
        assert!((0.0..360.0).contains(&wrapped.magnitude()));
    }

    #[test]
    fn test_normalize_in() {
        let angle = Angle::from_radians(-PI / 2.0).unwrap().normalize_in(AngleUnit::Degrees);
        assert!((angle.magnitude() - 270.0).abs() < 1e-9);

        let full = Angle::from_degrees(720.0).unwrap().normalize_in(AngleUnit::Radians);
        assert_eq!(full, Angle::ZERO);

        let same = Angle::from_degrees(405.0).unwrap().normalize_in(AngleUnit::Degrees);
        assert_eq!(same.magnitude(), 45.0);
    }

    #[test]
    fn test_nearest_named() {
        assert_eq!(Angle::from_degrees(30.0).unwrap().nearest_named(), Some("π/6"));
        assert_eq!(Angle::from_degrees(450.0).unwrap().nearest_named(), Some("π/2"));
        assert_eq!(Angle::from_degrees(360.0).unwrap().nearest_named(), Some("0"));
        assert_eq!(Angle::from_degrees(10.0).unwrap().nearest_named(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Angle::from_degrees(30.0).unwrap().to_string(), "30°");
        assert_eq!(Angle::from_degrees(12.5).unwrap().to_string(), "12.5°");
        assert_eq!(Angle::PI_6.to_string(), "0.5236 rad");
        assert_eq!(format!("{:.2}", Angle::PI), "3.14 rad");
    }
}
