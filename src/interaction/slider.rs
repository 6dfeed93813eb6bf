//! Slider ↔ angle mapping
//!
//! A slider spanning one full turn has two ends that are the same point on
//! the circle. For calculations the maximum is treated as zero (an angle is
//! always stored normalized), but a user who drags the thumb to the maximum
//! expects it to stay there. `Angle::normalize` cannot remember which end was
//! meant, so the "was at max" flag is tracked next to the angle by
//! `SliderTracker`.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::constants::{
    FULL_TURN_DEG, SLIDER_MAX_TOLERANCE_DEG, SLIDER_MAX_TOLERANCE_RAD, SLIDER_STEP_DEG,
    SLIDER_STEP_RAD,
};
use crate::coordinates::{Angle, AngleUnit};
use crate::Result;

/// Numeric range of a slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    /// 0–360 in steps of 1
    pub fn degrees() -> Self {
        Self {
            min: 0.0,
            max: FULL_TURN_DEG,
            step: SLIDER_STEP_DEG,
        }
    }

    /// 0–2π in steps of 0.01
    pub fn radians() -> Self {
        Self {
            min: 0.0,
            max: 2.0 * PI,
            step: SLIDER_STEP_RAD,
        }
    }

    /// The default range for a unit
    pub fn for_unit(unit: AngleUnit) -> Self {
        match unit {
            AngleUnit::Degrees => Self::degrees(),
            AngleUnit::Radians => Self::radians(),
        }
    }

    /// Clamps a value into the range
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub(crate) fn validate(&self) -> std::result::Result<(), String> {
        if !(self.min.is_finite() && self.max.is_finite() && self.step.is_finite()) {
            return Err("bounds and step must be finite".to_string());
        }
        if self.min >= self.max {
            return Err(format!("min {} must be below max {}", self.min, self.max));
        }
        if self.step <= 0.0 {
            return Err(format!("step must be positive, got {}", self.step));
        }
        Ok(())
    }
}

/// Distance from the maximum that still counts as "at max"
pub fn max_tolerance(unit: AngleUnit) -> f64 {
    match unit {
        AngleUnit::Degrees => SLIDER_MAX_TOLERANCE_DEG,
        AngleUnit::Radians => SLIDER_MAX_TOLERANCE_RAD,
    }
}

/// Whether a slider value sits effectively at the maximum of the default range
pub fn is_at_max(value: f64, unit: AngleUnit) -> bool {
    is_at_max_of(value, unit, &SliderRange::for_unit(unit))
}

fn is_at_max_of(value: f64, unit: AngleUnit, range: &SliderRange) -> bool {
    (range.max - value).abs() < max_tolerance(unit)
}

/// Converts a slider value to the angle it selects
///
/// The value is clamped into the default range for `unit`, and the angle is
/// normalized. Any value within [`max_tolerance`] of the maximum selects
/// zero, so the last step below 2π (6.28 rad) lands on zero too.
///
/// # Examples
///
/// ```rust
/// use trigview::coordinates::AngleUnit;
/// use trigview::interaction::slider::slider_value_to_angle;
///
/// assert_eq!(slider_value_to_angle(360.0, AngleUnit::Degrees).unwrap().to_degrees(), 0.0);
/// assert_eq!(slider_value_to_angle(6.28, AngleUnit::Radians).unwrap().to_radians(), 0.0);
/// assert_eq!(slider_value_to_angle(90.0, AngleUnit::Degrees).unwrap().to_degrees(), 90.0);
/// ```
pub fn slider_value_to_angle(value: f64, unit: AngleUnit) -> Result<Angle> {
    slider_value_to_angle_in(value, unit, &SliderRange::for_unit(unit))
}

/// Like [`slider_value_to_angle`] with an explicit range
pub fn slider_value_to_angle_in(
    value: f64,
    unit: AngleUnit,
    range: &SliderRange,
) -> Result<Angle> {
    let angle = Angle::new(range.clamp(value), unit)?;
    if is_at_max_of(angle.magnitude(), unit, range) {
        return Angle::new(0.0, unit);
    }
    Ok(angle.normalize())
}

/// Converts an angle to the slider position that displays it
///
/// When `was_at_max` is set and the angle is effectively zero, the thumb
/// stays at the maximum instead of jumping back to the minimum.
///
/// # Examples
///
/// ```rust
/// use trigview::coordinates::{Angle, AngleUnit};
/// use trigview::interaction::slider::angle_to_slider_value;
///
/// assert_eq!(angle_to_slider_value(&Angle::ZERO, AngleUnit::Degrees, true), 360.0);
/// assert_eq!(angle_to_slider_value(&Angle::ZERO, AngleUnit::Degrees, false), 0.0);
/// ```
pub fn angle_to_slider_value(angle: &Angle, unit: AngleUnit, was_at_max: bool) -> f64 {
    angle_to_slider_value_in(angle, unit, was_at_max, &SliderRange::for_unit(unit))
}

/// Like [`angle_to_slider_value`] with an explicit range
pub fn angle_to_slider_value_in(
    angle: &Angle,
    unit: AngleUnit,
    was_at_max: bool,
    range: &SliderRange,
) -> f64 {
    let value = angle.normalize().value_in(unit);
    let tolerance = max_tolerance(unit);
    let effectively_zero = value.abs() < tolerance || is_at_max_of(value, unit, range);
    if was_at_max && effectively_zero {
        range.max
    } else {
        range.clamp(value)
    }
}

/// Remembers whether the slider thumb was left at its maximum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliderTracker {
    was_at_max: bool,
}

impl SliderTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn was_at_max(&self) -> bool {
        self.was_at_max
    }

    /// Records a slider movement and returns the selected angle
    pub fn on_input(&mut self, value: f64, unit: AngleUnit, range: &SliderRange) -> Result<Angle> {
        let angle = slider_value_to_angle_in(value, unit, range)?;
        self.was_at_max = is_at_max_of(range.clamp(value), unit, range);
        Ok(angle)
    }

    /// Marks the thumb as parked at the maximum (e.g. the 360° preset)
    pub fn mark_at_max(&mut self) {
        self.was_at_max = true;
    }

    /// Forgets the maximum position, used when another input moves the angle
    pub fn reset(&mut self) {
        self.was_at_max = false;
    }

    /// Slider position for the current angle
    pub fn position(&self, angle: &Angle, unit: AngleUnit, range: &SliderRange) -> f64 {
        angle_to_slider_value_in(angle, unit, self.was_at_max, range)
    }
}
