//! Drag gesture state machine with frame-rate throttling
//!
//! ```text
//!            pointer_down (primary / touch)
//!   Idle  ------------------------------------>  Dragging { pointer }
//!    ^                                              |   pointer_move: emit now, or
//!    |   pointer_up (final emit) / pointer_cancel   |   park as the single pending
//!    +----------------------------------------------+   move until the next frame
//! ```
//!
//! While dragging, a move that arrives less than one frame interval after the
//! last emission is parked and one animation frame is requested. Later moves
//! overwrite the parked data instead of queuing. Ending the gesture cancels
//! the outstanding frame, and a frame callback that arrives afterwards is
//! recognized as stale and emits nothing.

use serde::{Deserialize, Serialize};

use crate::config::DragConfig;
use crate::coordinates::Point;
use crate::interaction::geometry::{direction_angle, AngleSample, SurfaceGeometry};
use crate::Result;

/// Identifier the host assigns to a pointer for the duration of a gesture
pub type PointerId = i64;

/// Kind of device that produced a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Pen,
    Touch,
}

/// Button value of the primary (left) button
pub const PRIMARY_BUTTON: i16 = 0;

/// A pointer event in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub pointer_id: PointerId,
    pub kind: PointerKind,
    /// Button that changed state (0 = primary); -1 when no button changed
    pub button: i16,
    pub client_x: f64,
    pub client_y: f64,
    /// Event time in milliseconds, monotonic within a gesture
    pub timestamp_ms: f64,
}

impl PointerEvent {
    /// Whether this event may start a drag
    pub fn is_primary(&self) -> bool {
        self.kind == PointerKind::Touch || self.button == PRIMARY_BUTTON
    }
}

/// Handle for a requested animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRequest(pub u64);

/// Host hook for deferring work to the next animation frame
///
/// The host calls `InteractionPipeline::handle` with an
/// `InputEvent::AnimationFrame` carrying the same request once the frame fires.
pub trait FrameScheduler {
    /// Requests one callback on the next animation frame
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancels a previously requested callback
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Whether a drag gesture is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging { pointer_id: PointerId },
}

/// Turns a stream of pointer events into throttled angle samples
#[derive(Debug, Clone)]
pub struct DragController {
    config: DragConfig,
    state: DragState,
    last_emit_ms: Option<f64>,
    pending: Option<PointerEvent>,
    frame: Option<FrameRequest>,
}

impl DragController {
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            state: DragState::Idle,
            last_emit_ms: None,
            pending: None,
            frame: None,
        }
    }

    pub fn config(&self) -> DragConfig {
        self.config
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The outstanding frame request, if a move is parked
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.frame
    }

    /// Starts a gesture and emits the angle under the pointer
    ///
    /// Non-primary buttons and a second pointer during an active gesture are
    /// ignored.
    pub fn pointer_down(
        &mut self,
        event: &PointerEvent,
        geometry: &SurfaceGeometry,
    ) -> Result<Option<AngleSample>> {
        if self.is_dragging() || !event.is_primary() {
            return Ok(None);
        }
        let sample = self.sample(event, geometry)?;
        self.state = DragState::Dragging {
            pointer_id: event.pointer_id,
        };
        self.last_emit_ms = Some(event.timestamp_ms);
        log::debug!("Drag started by pointer {}", event.pointer_id);
        Ok(Some(sample))
    }

    /// Emits immediately when a frame interval has passed, otherwise parks
    /// the event until the next animation frame
    pub fn pointer_move(
        &mut self,
        event: &PointerEvent,
        geometry: &SurfaceGeometry,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<Option<AngleSample>> {
        if !self.owns(event) {
            return Ok(None);
        }

        let due = self
            .last_emit_ms
            .map_or(true, |last| event.timestamp_ms - last >= self.config.frame_interval_ms());
        if due {
            let sample = self.sample(event, geometry)?;
            self.clear_pending(scheduler);
            self.last_emit_ms = Some(event.timestamp_ms);
            return Ok(Some(sample));
        }

        self.pending = Some(*event);
        if self.frame.is_none() {
            self.frame = Some(scheduler.request_frame());
        }
        Ok(None)
    }

    /// Emits the parked move if `request` is the outstanding frame
    pub fn animation_frame(
        &mut self,
        request: FrameRequest,
        timestamp_ms: f64,
        geometry: &SurfaceGeometry,
    ) -> Result<Option<AngleSample>> {
        if self.frame != Some(request) {
            log::trace!("Ignoring stale animation frame {:?}", request);
            return Ok(None);
        }
        self.frame = None;
        let Some(event) = self.pending.take() else {
            return Ok(None);
        };
        let sample = self.sample(&event, geometry)?;
        self.last_emit_ms = Some(timestamp_ms);
        Ok(Some(sample))
    }

    /// Ends the gesture with one final, unthrottled emission
    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        geometry: &SurfaceGeometry,
        scheduler: &mut impl FrameScheduler,
    ) -> Result<Option<AngleSample>> {
        if !self.owns(event) {
            return Ok(None);
        }
        self.finish(scheduler);
        log::debug!("Drag ended by pointer {}", event.pointer_id);
        self.sample(event, geometry).map(Some)
    }

    /// Aborts the gesture without emitting
    pub fn pointer_cancel(&mut self, event: &PointerEvent, scheduler: &mut impl FrameScheduler) {
        if self.owns(event) {
            self.finish(scheduler);
            log::debug!("Drag cancelled for pointer {}", event.pointer_id);
        }
    }

    fn owns(&self, event: &PointerEvent) -> bool {
        self.state
            == DragState::Dragging {
                pointer_id: event.pointer_id,
            }
    }

    fn finish(&mut self, scheduler: &mut impl FrameScheduler) {
        self.clear_pending(scheduler);
        self.state = DragState::Idle;
        self.last_emit_ms = None;
    }

    fn clear_pending(&mut self, scheduler: &mut impl FrameScheduler) {
        self.pending = None;
        if let Some(request) = self.frame.take() {
            scheduler.cancel_frame(request);
        }
    }

    fn sample(&self, event: &PointerEvent, geometry: &SurfaceGeometry) -> Result<AngleSample> {
        let unit = geometry.client_to_unit(event.client_x, event.client_y)?;
        let angle = direction_angle(&unit)?;
        let point = if self.config.lock_to_circle {
            Point::from_angle(&angle)
        } else {
            unit
        };
        Ok(AngleSample { angle, point })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[derive(Default)]
    struct RecordingScheduler {
        next: u64,
        requested: Vec<FrameRequest>,
        cancelled: Vec<FrameRequest>,
    }

    impl FrameScheduler for RecordingScheduler {
        fn request_frame(&mut self) -> FrameRequest {
            self.next += 1;
            let request = FrameRequest(self.next);
            self.requested.push(request);
            request
        }

        fn cancel_frame(&mut self, request: FrameRequest) {
            self.cancelled.push(request);
        }
    }

    fn geometry() -> SurfaceGeometry {
        SurfaceGeometry::square(0.0, 0.0, 200.0, 80.0).unwrap()
    }

    fn event(x: f64, y: f64, t: f64) -> PointerEvent {
        PointerEvent {
            pointer_id: 1,
            kind: PointerKind::Mouse,
            button: PRIMARY_BUTTON,
            client_x: x,
            client_y: y,
            timestamp_ms: t,
        }
    }

    #[test]
    fn test_down_emits_and_starts_drag() {
        let mut drag = DragController::new(DragConfig::default());
        let sample = drag.pointer_down(&event(200.0, 100.0, 0.0), &geometry()).unwrap();
        assert_abs_diff_eq!(sample.unwrap().angle.to_radians(), 0.0, epsilon = 1e-12);
        assert_eq!(drag.state(), DragState::Dragging { pointer_id: 1 });
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut drag = DragController::new(DragConfig::default());
        let right_click = PointerEvent {
            button: 2,
            ..event(200.0, 100.0, 0.0)
        };
        assert!(drag.pointer_down(&right_click, &geometry()).unwrap().is_none());
        assert_eq!(drag.state(), DragState::Idle);

        let touch = PointerEvent {
            kind: PointerKind::Touch,
            button: -1,
            ..event(200.0, 100.0, 0.0)
        };
        assert!(drag.pointer_down(&touch, &geometry()).unwrap().is_some());
    }

    #[test]
    fn test_fast_moves_are_parked_and_overwritten() {
        let mut drag = DragController::new(DragConfig::default());
        let mut scheduler = RecordingScheduler::default();
        let g = geometry();
        drag.pointer_down(&event(200.0, 100.0, 0.0), &g).unwrap();

        assert!(drag.pointer_move(&event(100.0, 0.0, 4.0), &g, &mut scheduler).unwrap().is_none());
        assert!(drag.pointer_move(&event(0.0, 100.0, 8.0), &g, &mut scheduler).unwrap().is_none());
        assert_eq!(scheduler.requested.len(), 1);

        let request = drag.pending_frame().unwrap();
        let sample = drag.animation_frame(request, 16.0, &g).unwrap().unwrap();
        // Only the latest parked move is emitted (pointing left)
        assert_abs_diff_eq!(sample.angle.to_radians(), PI, epsilon = 1e-12);
        assert!(drag.pending_frame().is_none());
    }

    #[test]
    fn test_slow_moves_emit_directly() {
        let mut drag = DragController::new(DragConfig::default());
        let mut scheduler = RecordingScheduler::default();
        let g = geometry();
        drag.pointer_down(&event(200.0, 100.0, 0.0), &g).unwrap();

        let sample = drag.pointer_move(&event(100.0, 0.0, 20.0), &g, &mut scheduler).unwrap();
        assert_abs_diff_eq!(sample.unwrap().angle.to_radians(), PI / 2.0, epsilon = 1e-12);
        assert!(scheduler.requested.is_empty());
    }

    #[test]
    fn test_up_cancels_pending_frame_and_flushes() {
        let mut drag = DragController::new(DragConfig::default());
        let mut scheduler = RecordingScheduler::default();
        let g = geometry();
        drag.pointer_down(&event(200.0, 100.0, 0.0), &g).unwrap();
        drag.pointer_move(&event(100.0, 0.0, 5.0), &g, &mut scheduler).unwrap();
        let request = drag.pending_frame().unwrap();

        let last = drag.pointer_up(&event(100.0, 200.0, 6.0), &g, &mut scheduler).unwrap();
        assert_abs_diff_eq!(last.unwrap().angle.to_radians(), 3.0 * PI / 2.0, epsilon = 1e-12);
        assert_eq!(scheduler.cancelled, vec![request]);
        assert_eq!(drag.state(), DragState::Idle);

        // The cancelled frame can no longer emit
        assert!(drag.animation_frame(request, 16.0, &g).unwrap().is_none());
    }

    #[test]
    fn test_cancel_emits_nothing() {
        let mut drag = DragController::new(DragConfig::default());
        let mut scheduler = RecordingScheduler::default();
        let g = geometry();
        drag.pointer_down(&event(200.0, 100.0, 0.0), &g).unwrap();
        drag.pointer_move(&event(100.0, 0.0, 5.0), &g, &mut scheduler).unwrap();
        drag.pointer_cancel(&event(100.0, 0.0, 6.0), &mut scheduler);
        assert_eq!(drag.state(), DragState::Idle);
        assert_eq!(scheduler.cancelled.len(), 1);
        assert!(drag
            .pointer_up(&event(100.0, 0.0, 7.0), &g, &mut scheduler)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_other_pointer_ignored() {
        let mut drag = DragController::new(DragConfig::default());
        let mut scheduler = RecordingScheduler::default();
        let g = geometry();
        drag.pointer_down(&event(200.0, 100.0, 0.0), &g).unwrap();
        let intruder = PointerEvent {
            pointer_id: 2,
            ..event(100.0, 0.0, 50.0)
        };
        assert!(drag.pointer_move(&intruder, &g, &mut scheduler).unwrap().is_none());
        assert!(drag.pointer_down(&intruder, &g).unwrap().is_none());
    }

    #[test]
    fn test_lock_to_circle_toggle() {
        let g = geometry();
        // 40 px right of center is half the radius
        let inside = event(140.0, 100.0, 0.0);

        let mut locked = DragController::new(DragConfig::default());
        let point = locked.pointer_down(&inside, &g).unwrap().unwrap().point;
        assert_abs_diff_eq!(point.x, 1.0, epsilon = 1e-12);

        let mut free = DragController::new(DragConfig {
            lock_to_circle: false,
            ..DragConfig::default()
        });
        let point = free.pointer_down(&inside, &g).unwrap().unwrap().point;
        assert_abs_diff_eq!(point.x, 0.5, epsilon = 1e-12);
    }
}
