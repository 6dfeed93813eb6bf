//! Turning user input into angle updates
//!
//! The submodules each handle one kind of input: [`drag`] (pointer gestures
//! with frame throttling), [`click`], [`slider`], and [`geometry`] for the
//! client → unit-circle mapping they share. [`InteractionPipeline`] routes an
//! [`InputEvent`] to the right handler and writes the result into
//! [`AppState`].

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::PRESET_DEGREES;
use crate::coordinates::{Angle, AngleUnit};
use crate::diagnostics::Diagnostics;
use crate::parser::{detect_normalization, parse_angle_input};
use crate::state::AppState;
use crate::Result;

pub mod click;
pub mod drag;
pub mod geometry;
pub mod slider;

pub use click::click_to_angle;
pub use drag::{
    DragController, DragState, FrameRequest, FrameScheduler, PointerEvent, PointerId, PointerKind,
};
pub use geometry::{AngleSample, ElementRect, SurfaceGeometry, ViewBox};
pub use slider::{SliderRange, SliderTracker};

/// Every input the pipeline understands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    PointerCancel(PointerEvent),
    /// A frame requested through the `FrameScheduler` has fired
    AnimationFrame {
        request: FrameRequest,
        timestamp_ms: f64,
    },
    Click {
        client_x: f64,
        client_y: f64,
    },
    /// Slider moved to `value`, in the current display unit
    Slider {
        value: f64,
    },
    /// Free text submitted from the angle input box
    Text {
        input: String,
    },
    /// One of the preset buttons, in degrees
    Preset {
        degrees: f64,
    },
}

/// What handling an event did to the state
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    /// An angle was produced and stored; holds the stored (normalized) angle
    Updated(Angle),
    /// The event produced no angle (throttled, foreign pointer, click outside)
    Ignored,
    /// The event was invalid; the state keeps its previous angle
    Rejected(String),
}

/// Routes input events into an `AppState`
pub struct InteractionPipeline<S: FrameScheduler> {
    config: Config,
    geometry: SurfaceGeometry,
    drag: DragController,
    slider: SliderTracker,
    scheduler: S,
    diagnostics: Rc<Diagnostics>,
}

impl<S: FrameScheduler> InteractionPipeline<S> {
    pub fn new(
        config: Config,
        geometry: SurfaceGeometry,
        scheduler: S,
        diagnostics: Rc<Diagnostics>,
    ) -> Self {
        Self {
            drag: DragController::new(config.drag),
            slider: SliderTracker::new(),
            config,
            geometry,
            scheduler,
            diagnostics,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }

    /// Replaces the surface geometry, e.g. after the element was resized
    pub fn set_geometry(&mut self, geometry: SurfaceGeometry) {
        self.geometry = geometry;
    }

    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Outstanding animation frame, if a drag move is parked
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.drag.pending_frame()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Where the slider thumb should be drawn for the state's angle
    pub fn slider_position(&self, state: &AppState) -> f64 {
        let unit = state.unit();
        self.slider
            .position(&state.angle(), unit, &self.config.slider.range(unit))
    }

    /// Handles one event and stores any resulting angle in `state`
    pub fn handle(&mut self, event: InputEvent, state: &mut AppState) -> InputOutcome {
        match self.dispatch(event, state) {
            Ok(outcome) => outcome,
            Err(err) => {
                let message = err.to_string();
                self.diagnostics.error("interaction", message.clone());
                InputOutcome::Rejected(message)
            }
        }
    }

    fn dispatch(&mut self, event: InputEvent, state: &mut AppState) -> Result<InputOutcome> {
        let sample = match event {
            InputEvent::PointerDown(event) => self.drag.pointer_down(&event, &self.geometry)?,
            InputEvent::PointerMove(event) => {
                self.drag
                    .pointer_move(&event, &self.geometry, &mut self.scheduler)?
            }
            InputEvent::PointerUp(event) => {
                self.drag
                    .pointer_up(&event, &self.geometry, &mut self.scheduler)?
            }
            InputEvent::PointerCancel(event) => {
                self.drag.pointer_cancel(&event, &mut self.scheduler);
                None
            }
            InputEvent::AnimationFrame {
                request,
                timestamp_ms,
            } => self
                .drag
                .animation_frame(request, timestamp_ms, &self.geometry)?,
            InputEvent::Click { client_x, client_y } => {
                click_to_angle(client_x, client_y, &self.geometry, &self.config.click)?
            }
            InputEvent::Slider { value } => return self.slider_input(value, state),
            InputEvent::Text { input } => return Ok(self.text_input(&input, state)),
            InputEvent::Preset { degrees } => return self.preset(degrees, state),
        };

        Ok(match sample {
            Some(sample) => self.store(sample.angle, state),
            None => InputOutcome::Ignored,
        })
    }

    fn slider_input(&mut self, value: f64, state: &mut AppState) -> Result<InputOutcome> {
        let unit = state.unit();
        let range = self.config.slider.range(unit);
        let angle = self.slider.on_input(value, unit, &range)?;
        state.set_angle(angle);
        Ok(InputOutcome::Updated(state.angle()))
    }

    fn text_input(&mut self, input: &str, state: &mut AppState) -> InputOutcome {
        match parse_angle_input(input, state.unit()) {
            Ok(angle) => {
                let normalized = angle.normalize();
                let info = detect_normalization(angle.magnitude(), &normalized);
                state.set_feedback(info.summary);
                self.store(normalized, state)
            }
            Err(err) => {
                let message = err.to_string();
                self.diagnostics.warn("parser", message.clone());
                state.set_feedback(Some(message.clone()));
                InputOutcome::Rejected(message)
            }
        }
    }

    fn preset(&mut self, degrees: f64, state: &mut AppState) -> Result<InputOutcome> {
        if !PRESET_DEGREES.contains(&degrees) {
            let message = format!("{}° is not a preset angle", degrees);
            self.diagnostics.warn("interaction", message.clone());
            return Ok(InputOutcome::Rejected(message));
        }
        let outcome = self.store(Angle::from_degrees(degrees)?, state);
        if slider::is_at_max(degrees, AngleUnit::Degrees) {
            self.slider.mark_at_max();
        }
        Ok(outcome)
    }

    /// Stores an angle that did not come from the slider
    fn store(&mut self, angle: Angle, state: &mut AppState) -> InputOutcome {
        self.slider.reset();
        state.set_angle(angle);
        log::trace!("Stored angle {}", state.angle());
        InputOutcome::Updated(state.angle())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::cell::RefCell;
    use std::f64::consts::PI;

    #[derive(Debug, Default)]
    struct CountingScheduler {
        next: u64,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&mut self) -> FrameRequest {
            self.next += 1;
            FrameRequest(self.next)
        }

        fn cancel_frame(&mut self, _request: FrameRequest) {}
    }

    fn pipeline() -> InteractionPipeline<CountingScheduler> {
        InteractionPipeline::new(
            Config::default(),
            SurfaceGeometry::square(0.0, 0.0, 300.0, 100.0).unwrap(),
            CountingScheduler::default(),
            Rc::new(Diagnostics::default()),
        )
    }

    fn text(input: &str) -> InputEvent {
        InputEvent::Text {
            input: input.to_string(),
        }
    }

    #[test]
    fn test_click_updates_state() {
        let mut pipeline = pipeline();
        let mut state = AppState::new();
        let outcome = pipeline.handle(
            InputEvent::Click {
                client_x: 150.0,
                client_y: 50.0,
            },
            &mut state,
        );
        assert!(matches!(outcome, InputOutcome::Updated(_)));
        assert_abs_diff_eq!(state.angle().to_radians(), PI / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_text_wrap_records_summary() {
        let mut pipeline = pipeline();
        let mut state = AppState::new();
        pipeline.handle(text("725"), &mut state);
        assert_abs_diff_eq!(state.angle().to_degrees(), 5.0, epsilon = 1e-9);
        assert_eq!(
            state.feedback(),
            Some("725° normalized to 5° (2 full rotations)")
        );

        pipeline.handle(text("30"), &mut state);
        assert!(state.feedback().is_none());
    }

    #[test]
    fn test_bad_text_keeps_angle_and_reports() {
        let diagnostics = Rc::new(Diagnostics::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        diagnostics.set_sink(move |d| sink.borrow_mut().push(d.source));

        let mut pipeline = InteractionPipeline::new(
            Config::default(),
            SurfaceGeometry::square(0.0, 0.0, 300.0, 100.0).unwrap(),
            CountingScheduler::default(),
            Rc::clone(&diagnostics),
        );
        let mut state = AppState::new();
        let before = state.angle();

        let outcome = pipeline.handle(text("abc"), &mut state);
        assert!(matches!(
            outcome,
            InputOutcome::Rejected(ref m) if m.contains("Invalid angle format")
        ));
        assert_eq!(state.angle(), before);
        assert!(state.feedback().unwrap().contains("Invalid angle format"));

        pipeline.handle(text("π/0"), &mut state);
        assert!(state.feedback().unwrap().contains("divide by zero"));
        assert_eq!(seen.borrow().as_slice(), &["parser", "parser"]);
    }

    #[test]
    fn test_slider_max_survives_until_other_input() {
        let mut pipeline = pipeline();
        let mut state = AppState::new();
        pipeline.handle(InputEvent::Slider { value: 360.0 }, &mut state);
        assert_eq!(state.angle().to_degrees(), 0.0);
        assert_eq!(pipeline.slider_position(&state), 360.0);

        pipeline.handle(text("0"), &mut state);
        assert_eq!(pipeline.slider_position(&state), 0.0);
    }

    #[test]
    fn test_presets() {
        let mut pipeline = pipeline();
        let mut state = AppState::new();
        pipeline.handle(InputEvent::Preset { degrees: 360.0 }, &mut state);
        assert_eq!(state.angle().to_degrees(), 0.0);
        assert_eq!(pipeline.slider_position(&state), 360.0);

        pipeline.handle(InputEvent::Preset { degrees: 60.0 }, &mut state);
        assert!(state.angle().approx_eq(&Angle::PI_3));
        assert_abs_diff_eq!(pipeline.slider_position(&state), 60.0, epsilon = 1e-9);

        let outcome = pipeline.handle(InputEvent::Preset { degrees: 17.0 }, &mut state);
        assert!(matches!(outcome, InputOutcome::Rejected(_)));
        assert!(state.angle().approx_eq(&Angle::PI_3));
    }

    #[test]
    fn test_slider_in_radians() {
        let mut pipeline = pipeline();
        let mut state = AppState::new();
        state.set_unit(AngleUnit::Radians).unwrap();
        pipeline.handle(InputEvent::Slider { value: PI }, &mut state);
        assert!(state.angle().approx_eq(&Angle::PI));
        assert_abs_diff_eq!(pipeline.slider_position(&state), PI, epsilon = 1e-12);
    }

    #[test]
    fn test_non_finite_click_is_rejected() {
        let mut pipeline = pipeline();
        let mut state = AppState::new();
        let outcome = pipeline.handle(
            InputEvent::Click {
                client_x: f64::NAN,
                client_y: 0.0,
            },
            &mut state,
        );
        assert!(matches!(outcome, InputOutcome::Rejected(_)));
        assert!(state.angle().approx_eq(&Angle::PI_4));
    }

    #[test]
    fn test_events_deserialize_from_json() {
        let events: Vec<InputEvent> = serde_json::from_str(
            r#"[
                {"type": "text", "input": "π/6"},
                {"type": "preset", "degrees": 90},
                {"type": "pointer_down", "pointer_id": 1, "kind": "mouse", "button": 0,
                 "client_x": 250, "client_y": 150, "timestamp_ms": 0}
            ]"#,
        )
        .unwrap();
        assert_eq!(events[1], InputEvent::Preset { degrees: 90.0 });
        assert!(matches!(events[2], InputEvent::PointerDown(e) if e.kind == PointerKind::Mouse));
    }
}
