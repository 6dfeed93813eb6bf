//! Constants module for angle and trigonometry calculations

use std::f64::consts::PI;

// Angles
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;
/// Degrees in a complete circle
pub const FULL_TURN_DEG: f64 = 360.0;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

// Tolerances
/// Two angles are equal when their radian measures differ by less than this
pub const ANGLE_TOLERANCE: f64 = 1e-4;
/// Below this |cos| (or |sin|) the derived functions are undefined
pub const UNDEFINED_EPSILON: f64 = 1e-10;
/// Magnitudes below this are displayed as "0"
pub const DISPLAY_ZERO_THRESHOLD: f64 = 1e-10;
/// Tolerance used when checking that both sides of an identity agree
pub const IDENTITY_TOLERANCE: f64 = 1e-4;

// Display
/// Decimal places used when formatting trigonometric values
pub const DISPLAY_PRECISION: usize = 4;

// Interaction
/// Default drag update rate in frames per second
pub const DEFAULT_TARGET_FPS: f64 = 60.0;
/// Default tolerance (surface units) around the circle that still counts as a hit
pub const DEFAULT_SNAP_TOLERANCE_PX: f64 = 10.0;
/// A degree slider within this distance of its maximum is "at max"
pub const SLIDER_MAX_TOLERANCE_DEG: f64 = 0.5;
/// A radian slider within this distance of its maximum is "at max"
pub const SLIDER_MAX_TOLERANCE_RAD: f64 = 0.01;
/// Step of the radian slider
pub const SLIDER_STEP_RAD: f64 = 0.01;
/// Step of the degree slider
pub const SLIDER_STEP_DEG: f64 = 1.0;

/// Preset angles offered in the quick-select menu, in degrees
pub const PRESET_DEGREES: [f64; 8] = [0.0, 30.0, 45.0, 60.0, 90.0, 180.0, 270.0, 360.0];
