//! Central application state
//!
//! `AppState` holds the current angle and the UI selections. It is the only
//! place an angle is stored, and every write goes through a setter that
//! normalizes first, so readers never see an un-normalized angle.
//!
//! Observers register with `subscribe` and receive a `StateChange` after each
//! mutation that actually changed something. Callbacks run synchronously,
//! after the new value is in place.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::coordinates::{Angle, AngleUnit, Point};
use crate::formulas::builtin::BUILTIN_IDS;
use crate::formulas::Difficulty;
use crate::interaction::slider::angle_to_slider_value;
use crate::trig::format::{format_all, DisplayOptions};
use crate::trig::{TrigFunction, TrigonometricValues};
use crate::Result;

/// Which representation is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveView {
    #[default]
    UnitCircle,
    Graphs,
    Table,
    Formulas,
}

/// How formula visualizations are presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaDisplayMode {
    #[default]
    Visual,
    Symbolic,
    Both,
}

/// Notification sent to subscribers after an effective mutation
#[derive(Debug, Clone, PartialEq)]
pub enum StateChange {
    Angle { previous: Angle, current: Angle },
    Unit { previous: AngleUnit, current: AngleUnit },
    View(ActiveView),
    FormulaMode(FormulaDisplayMode),
    Difficulty(Difficulty),
    FormulaEnabled { id: String, enabled: bool },
    Feedback(Option<String>),
}

/// Handle returned by `AppState::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&StateChange)>;

/// Serializable view of the whole state, for renderers that poll
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateSnapshot {
    pub angle: Angle,
    pub unit: AngleUnit,
    /// The angle in the display unit, e.g. `45°`
    pub angle_text: String,
    pub point: Point,
    pub values: Vec<(TrigFunction, String)>,
    pub view: ActiveView,
    pub formula_mode: FormulaDisplayMode,
    pub difficulty: Difficulty,
    pub enabled_formulas: Vec<String>,
    pub feedback: Option<String>,
}

pub struct AppState {
    angle: Angle,
    unit: AngleUnit,
    view: ActiveView,
    formula_mode: FormulaDisplayMode,
    difficulty: Difficulty,
    enabled_formulas: BTreeSet<String>,
    feedback: Option<String>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Default for AppState {
    /// Starts at 45°, displayed in degrees, with every built-in formula enabled
    fn default() -> Self {
        Self {
            angle: Angle::degrees_unchecked(45.0),
            unit: AngleUnit::Degrees,
            view: ActiveView::default(),
            formula_mode: FormulaDisplayMode::default(),
            difficulty: Difficulty::default(),
            enabled_formulas: BUILTIN_IDS.iter().map(|id| id.to_string()).collect(),
            feedback: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("angle", &self.angle)
            .field("unit", &self.unit)
            .field("view", &self.view)
            .field("formula_mode", &self.formula_mode)
            .field("difficulty", &self.difficulty)
            .field("enabled_formulas", &self.enabled_formulas)
            .field("feedback", &self.feedback)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current angle, normalized and expressed in the display unit
    pub fn angle(&self) -> Angle {
        self.angle
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    pub fn view(&self) -> ActiveView {
        self.view
    }

    pub fn formula_mode(&self) -> FormulaDisplayMode {
        self.formula_mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_formula_enabled(&self, id: &str) -> bool {
        self.enabled_formulas.contains(id)
    }

    pub fn enabled_formulas(&self) -> impl Iterator<Item = &str> {
        self.enabled_formulas.iter().map(String::as_str)
    }

    /// The last message produced by text input, if any
    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Stores the angle normalized and re-expressed in the display unit
    ///
    /// Returns whether the stored angle changed. Subscribers are only
    /// notified on change.
    pub fn set_angle(&mut self, angle: Angle) -> bool {
        let normalized = angle.normalize_in(self.unit);
        if normalized == self.angle {
            return false;
        }
        let previous = std::mem::replace(&mut self.angle, normalized);
        log::trace!("Angle {} -> {}", previous, normalized);
        self.notify(StateChange::Angle {
            previous,
            current: normalized,
        });
        true
    }

    /// Switches the display unit and re-expresses the stored angle in it
    ///
    /// # Errors
    ///
    /// Returns `TrigError::NonFiniteAngle` if the converted magnitude is not
    /// finite; the state is unchanged in that case.
    pub fn set_unit(&mut self, unit: AngleUnit) -> Result<()> {
        if unit == self.unit {
            return Ok(());
        }
        let converted = self.angle.to_unit(unit)?.normalize();
        let previous = std::mem::replace(&mut self.unit, unit);
        self.angle = converted;
        log::debug!("Display unit {} -> {}", previous, unit);
        self.notify(StateChange::Unit {
            previous,
            current: unit,
        });
        Ok(())
    }

    pub fn set_view(&mut self, view: ActiveView) {
        if view != self.view {
            self.view = view;
            self.notify(StateChange::View(view));
        }
    }

    pub fn set_formula_mode(&mut self, mode: FormulaDisplayMode) {
        if mode != self.formula_mode {
            self.formula_mode = mode;
            self.notify(StateChange::FormulaMode(mode));
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty != self.difficulty {
            self.difficulty = difficulty;
            self.notify(StateChange::Difficulty(difficulty));
        }
    }

    /// Enables or disables a formula by id
    pub fn set_formula_enabled(&mut self, id: &str, enabled: bool) {
        let changed = if enabled {
            self.enabled_formulas.insert(id.to_string())
        } else {
            self.enabled_formulas.remove(id)
        };
        if changed {
            self.notify(StateChange::FormulaEnabled {
                id: id.to_string(),
                enabled,
            });
        }
    }

    pub fn set_feedback(&mut self, feedback: Option<String>) {
        if feedback != self.feedback {
            self.feedback = feedback.clone();
            self.notify(StateChange::Feedback(feedback));
        }
    }

    /// Registers a callback invoked after every effective mutation
    pub fn subscribe(&mut self, callback: impl FnMut(&StateChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes a callback; returns false if the id was unknown
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Trigonometric values of the current angle
    pub fn trig_values(&self) -> TrigonometricValues {
        TrigonometricValues::new(self.angle)
    }

    /// Point of the current angle on the unit circle
    pub fn point(&self) -> Point {
        Point::from_angle(&self.angle)
    }

    /// The current angle's magnitude in the display unit
    pub fn displayed_value(&self) -> f64 {
        self.angle.value_in(self.unit)
    }

    /// Slider position for the current angle in the display unit
    pub fn slider_value(&self, was_at_max: bool) -> f64 {
        angle_to_slider_value(&self.angle, self.unit, was_at_max)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.snapshot_with(&DisplayOptions::default())
    }

    /// Snapshot with trig values formatted by `display`
    pub fn snapshot_with(&self, display: &DisplayOptions) -> StateSnapshot {
        let angle_text = match self.angle.to_unit(self.unit) {
            Ok(shown) => shown.to_string(),
            Err(_) => self.angle.to_string(),
        };
        StateSnapshot {
            angle: self.angle,
            unit: self.unit,
            angle_text,
            point: self.point(),
            values: format_all(&self.trig_values(), display),
            view: self.view,
            formula_mode: self.formula_mode,
            difficulty: self.difficulty,
            enabled_formulas: self.enabled_formulas.iter().cloned().collect(),
            feedback: self.feedback.clone(),
        }
    }

    fn notify(&mut self, change: StateChange) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&change);
        }
    }
}
