//! Turns pointer and touch streams into geometry updates for one active sticker.

mod wheel;

use crate::config::EditorConfig;
use crate::geometry::{angle_degrees, distance, Point, Size};
use crate::history::HistoryKind;
use crate::input::{CaptureGuard, HitTarget, PointerCapture, ResizeHandle};
use crate::state::{GestureEvent, GestureMode, ModeMachine};
use crate::sticker::{Sticker, StickerId, StickerObjects};

pub use wheel::{wheel_factor, PendingScaleCommit, WheelCommitScheduler};

/// Upward pointer travel that adds 1.0 to the scale on the scale handle.
const HANDLE_SCALE_PIXELS_PER_UNIT: f64 = 100.0;

/// Clamping limits applied to every geometry update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformLimits {
    pub scale_min: f64,
    pub scale_max: f64,
    pub min_size: f64,
}

impl TransformLimits {
    pub fn from_config(config: &EditorConfig) -> Self {
        Self {
            scale_min: config.scale_min,
            scale_max: config.scale_max,
            min_size: config.min_size,
        }
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.scale_min;
        }
        scale.clamp(self.scale_min, self.scale_max)
    }
}

impl Default for TransformLimits {
    fn default() -> Self {
        Self::from_config(&EditorConfig::default())
    }
}

/// Result of a finished gesture, ready to be recorded in history.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureCommit {
    pub kind: HistoryKind,
    pub before: Sticker,
    pub after: Sticker,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    Drag {
        start_pointer: Point,
        start_position: Point,
    },
    Rotate {
        center: Point,
        initial_angle: f64,
        start_rotation: f64,
    },
    Resize {
        handle: ResizeHandle,
        start_pointer: Point,
        start_size: Size,
    },
    HandleScale {
        start_pointer_y: f64,
        start_scale: f64,
    },
    Pinch {
        start_distance: f64,
        start_angle: f64,
        start_scale: f64,
        start_rotation: f64,
    },
}

impl Gesture {
    fn drag(pointer: Point, sticker: &Sticker) -> Self {
        Self::Drag {
            start_pointer: pointer,
            start_position: sticker.position,
        }
    }

    fn pinch(a: Point, b: Point, sticker: &Sticker) -> Self {
        Self::Pinch {
            start_distance: distance(a, b),
            start_angle: angle_degrees(a, b),
            start_scale: sticker.scale,
            start_rotation: sticker.rotation,
        }
    }
}

#[derive(Debug)]
struct ActiveGesture {
    id: StickerId,
    before: Sticker,
    gesture: Gesture,
    _capture: CaptureGuard,
}

#[derive(Debug, Default)]
pub struct TransformEngine {
    machine: ModeMachine,
    active: Option<ActiveGesture>,
    limits: TransformLimits,
}

impl TransformEngine {
    pub fn new(limits: TransformLimits) -> Self {
        Self {
            machine: ModeMachine::new(),
            active: None,
            limits,
        }
    }

    pub fn limits(&self) -> TransformLimits {
        self.limits
    }

    pub fn mode(&self) -> GestureMode {
        self.machine.mode()
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_sticker(&self) -> Option<StickerId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Starts a single-pointer gesture. Returns `false` when the press is
    /// ignored: empty canvas, unknown sticker, or another mode already active.
    pub fn begin(
        &mut self,
        target: HitTarget,
        pointer: Point,
        objects: &StickerObjects,
        capture: &dyn PointerCapture,
    ) -> bool {
        let (id, event) = match target {
            HitTarget::Canvas => return false,
            HitTarget::Body(id) => (id, GestureEvent::BodyPressed),
            HitTarget::RotateHandle(id) => (id, GestureEvent::RotateHandlePressed),
            HitTarget::ResizeHandle(id, _) => (id, GestureEvent::ResizeHandlePressed),
            HitTarget::ScaleHandle(id) => (id, GestureEvent::ScaleHandlePressed),
        };
        let Some(sticker) = objects.get(id) else {
            tracing::debug!(id = %id, "gesture start on missing sticker ignored");
            return false;
        };
        if self.machine.transition(event).is_err() {
            return false;
        }

        let gesture = match target {
            HitTarget::RotateHandle(_) => {
                let center = sticker.center();
                Gesture::Rotate {
                    center,
                    initial_angle: angle_degrees(center, pointer),
                    start_rotation: sticker.rotation,
                }
            }
            HitTarget::ResizeHandle(_, handle) => Gesture::Resize {
                handle,
                start_pointer: pointer,
                start_size: sticker.size,
            },
            HitTarget::ScaleHandle(_) => Gesture::HandleScale {
                start_pointer_y: pointer.y,
                start_scale: sticker.scale,
            },
            HitTarget::Body(_) | HitTarget::Canvas => Gesture::drag(pointer, sticker),
        };
        tracing::debug!(id = %id, mode = ?self.machine.mode(), "gesture started");
        self.active = Some(ActiveGesture {
            id,
            before: sticker.clone(),
            gesture,
            _capture: capture.acquire(),
        });
        true
    }

    /// Starts (or upgrades a drag into) a two-contact pinch on `id`.
    pub fn begin_pinch(
        &mut self,
        id: StickerId,
        a: Point,
        b: Point,
        objects: &StickerObjects,
        capture: &dyn PointerCapture,
    ) -> bool {
        let Some(sticker) = objects.get(id) else {
            return false;
        };
        if self.active.as_ref().is_some_and(|active| active.id != id) {
            tracing::debug!(id = %id, "pinch on a second sticker ignored");
            return false;
        }
        if self.machine.transition(GestureEvent::TwoPointContact).is_err() {
            return false;
        }

        let gesture = Gesture::pinch(a, b, sticker);
        match self.active.as_mut() {
            Some(active) => active.gesture = gesture,
            None => {
                self.active = Some(ActiveGesture {
                    id,
                    before: sticker.clone(),
                    gesture,
                    _capture: capture.acquire(),
                });
            }
        }
        tracing::debug!(id = %id, "pinch started");
        true
    }

    /// Applies a single-pointer move to the active sticker.
    pub fn pointer_move(&mut self, pointer: Point, objects: &mut StickerObjects) {
        let limits = self.limits;
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let Some(sticker) = objects.get_mut(active.id) else {
            return;
        };
        match active.gesture {
            Gesture::Drag {
                start_pointer,
                start_position,
            } => {
                let (delta_x, delta_y) = pointer.delta_from(start_pointer);
                sticker.position = start_position.offset(delta_x, delta_y);
            }
            Gesture::Rotate {
                center,
                initial_angle,
                start_rotation,
            } => {
                sticker.rotation = start_rotation + (angle_degrees(center, pointer) - initial_angle);
            }
            Gesture::Resize {
                handle,
                start_pointer,
                start_size,
            } => {
                sticker.size = resized(start_size, handle, pointer.delta_from(start_pointer))
                    .clamp_min(limits.min_size);
            }
            Gesture::HandleScale {
                start_pointer_y,
                start_scale,
            } => {
                let delta = (start_pointer_y - pointer.y) / HANDLE_SCALE_PIXELS_PER_UNIT;
                sticker.scale = limits.clamp_scale(start_scale + delta);
            }
            Gesture::Pinch { .. } => {}
        }
    }

    /// Applies a two-contact move while pinching.
    pub fn pinch_move(&mut self, a: Point, b: Point, objects: &mut StickerObjects) {
        let limits = self.limits;
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let Gesture::Pinch {
            start_distance,
            start_angle,
            start_scale,
            start_rotation,
        } = active.gesture
        else {
            return;
        };
        let Some(sticker) = objects.get_mut(active.id) else {
            return;
        };
        if start_distance > 0.0 {
            sticker.scale = limits.clamp_scale(start_scale * (distance(a, b) / start_distance));
        } else {
            tracing::debug!(id = %active.id, "degenerate pinch distance; scale unchanged");
        }
        sticker.rotation = start_rotation + (angle_degrees(a, b) - start_angle);
    }

    /// Drops from pinch to drag, re-anchoring on the remaining contact so the
    /// sticker does not jump.
    pub fn fall_back_to_drag(&mut self, remaining: Point, objects: &StickerObjects) {
        if self.machine.mode() != GestureMode::Pinching {
            return;
        }
        let Some(active) = self.active.as_mut() else {
            return;
        };
        let Some(sticker) = objects.get(active.id) else {
            return;
        };
        if self
            .machine
            .transition(GestureEvent::OnePointRemaining)
            .is_ok()
        {
            active.gesture = Gesture::drag(remaining, sticker);
        }
    }

    /// Ends the active gesture and reports what changed. The pointer capture
    /// is released on every path, including a sticker that vanished mid-gesture.
    pub fn release(&mut self, objects: &StickerObjects) -> Option<GestureCommit> {
        let mode = self.machine.mode();
        let active = self.active.take()?;
        if self.machine.transition(GestureEvent::Released).is_err() {
            return None;
        }
        let kind = match mode {
            GestureMode::Dragging => HistoryKind::Move,
            GestureMode::Rotating => HistoryKind::Rotate,
            GestureMode::Resizing => HistoryKind::Resize,
            GestureMode::Scaling | GestureMode::Pinching => HistoryKind::Scale,
            GestureMode::Idle => return None,
        };
        let Some(after) = objects.get(active.id).cloned() else {
            tracing::debug!(id = %active.id, "sticker removed during gesture; nothing to commit");
            return None;
        };
        tracing::debug!(
            id = %active.id,
            ?kind,
            transitions = ?self.machine.gesture_transitions(),
            "gesture released"
        );
        Some(GestureCommit {
            kind,
            before: active.before,
            after,
        })
    }

    /// Applies one wheel tick to `id`, returning the pre-tick snapshot.
    pub fn wheel_scale(
        &self,
        id: StickerId,
        delta_y: f64,
        factors: (f64, f64),
        objects: &mut StickerObjects,
    ) -> Option<Sticker> {
        let factor = wheel_factor(delta_y, factors.0, factors.1)?;
        let sticker = objects.get_mut(id)?;
        let before = sticker.clone();
        sticker.scale = self.limits.clamp_scale(sticker.scale * factor);
        Some(before)
    }
}

fn resized(start: Size, handle: ResizeHandle, delta: (f64, f64)) -> Size {
    let (delta_x, delta_y) = delta;
    let mut size = start;
    if handle.moves_east() {
        size.width += delta_x;
    }
    if handle.moves_west() {
        size.width -= delta_x;
    }
    if handle.moves_south() {
        size.height += delta_y;
    }
    if handle.moves_north() {
        size.height -= delta_y;
    }
    size
}
