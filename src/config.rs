//! Configuration for the interaction pipeline and display layer
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration and a partial file only overrides what it names:
//!
//! ```json
//! { "drag": { "target_fps": 30 }, "display": { "precision": 6 } }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SNAP_TOLERANCE_PX, DEFAULT_TARGET_FPS, IDENTITY_TOLERANCE};
use crate::coordinates::AngleUnit;
use crate::interaction::slider::SliderRange;
use crate::trig::format::DisplayOptions;
use crate::{Result, TrigError};

/// Drag gesture options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Maximum number of angle updates per second while dragging
    pub target_fps: f64,
    /// Report the point on the unit circle regardless of pointer distance
    pub lock_to_circle: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            lock_to_circle: true,
        }
    }
}

impl DragConfig {
    /// Minimum time between two emissions, in milliseconds
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps
    }
}

/// Click options
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Extra distance outside the circle (surface units) that still counts as a hit
    pub snap_tolerance_px: f64,
    /// Whether clicks further out than the tolerance still snap onto the circle
    pub snap_outside_clicks: bool,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            snap_tolerance_px: DEFAULT_SNAP_TOLERANCE_PX,
            snap_outside_clicks: true,
        }
    }
}

/// Slider ranges per unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub degrees: SliderRange,
    pub radians: SliderRange,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            degrees: SliderRange::degrees(),
            radians: SliderRange::radians(),
        }
    }
}

impl SliderConfig {
    /// The range used while `unit` is active
    pub fn range(&self, unit: AngleUnit) -> SliderRange {
        match unit {
            AngleUnit::Degrees => self.degrees,
            AngleUnit::Radians => self.radians,
        }
    }
}

/// Tolerances that are safe to tune
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    /// How closely both sides of a formula must agree to count as equal
    pub identity: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            identity: IDENTITY_TOLERANCE,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub drag: DragConfig,
    pub click: ClickConfig,
    pub slider: SliderConfig,
    pub display: DisplayOptions,
    pub tolerances: Tolerances,
}

impl Config {
    /// Parses and validates a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Config> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());
        let json = fs::read_to_string(path)?;
        Config::from_json_str(&json)
    }

    /// Rejects values the pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if !(self.drag.target_fps.is_finite() && self.drag.target_fps > 0.0) {
            return Err(TrigError::Config(format!(
                "drag.target_fps must be positive, got {}",
                self.drag.target_fps
            )));
        }
        if !(self.click.snap_tolerance_px.is_finite() && self.click.snap_tolerance_px >= 0.0) {
            return Err(TrigError::Config(format!(
                "click.snap_tolerance_px must be non-negative, got {}",
                self.click.snap_tolerance_px
            )));
        }
        for (name, range) in [("degrees", self.slider.degrees), ("radians", self.slider.radians)] {
            range
                .validate()
                .map_err(|reason| TrigError::Config(format!("slider.{}: {}", name, reason)))?;
        }
        if !(self.tolerances.identity.is_finite() && self.tolerances.identity > 0.0) {
            return Err(TrigError::Config(format!(
                "tolerances.identity must be positive, got {}",
                self.tolerances.identity
            )));
        }
        Ok(())
    }
}
