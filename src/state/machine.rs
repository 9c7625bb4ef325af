use super::error::{StateError, StateResult};
use super::{GestureEvent, GestureMode, ModeTransition};

/// Guards which gesture mode may follow which, so only one mode is ever active.
#[derive(Debug)]
pub struct ModeMachine {
    mode: GestureMode,
    gesture_transitions: Vec<ModeTransition>,
}

impl ModeMachine {
    pub fn new() -> Self {
        Self {
            mode: GestureMode::default(),
            gesture_transitions: Vec::new(),
        }
    }

    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    pub fn can_transition(&self, event: GestureEvent) -> bool {
        self.next_mode(event).is_some()
    }

    pub fn next_mode(&self, event: GestureEvent) -> Option<GestureMode> {
        use GestureEvent::*;
        match (self.mode, event) {
            (GestureMode::Idle, BodyPressed) => Some(GestureMode::Dragging),
            (GestureMode::Idle, RotateHandlePressed) => Some(GestureMode::Rotating),
            (GestureMode::Idle, ResizeHandlePressed) => Some(GestureMode::Resizing),
            (GestureMode::Idle, ScaleHandlePressed) => Some(GestureMode::Scaling),
            (GestureMode::Idle | GestureMode::Dragging, TwoPointContact) => {
                Some(GestureMode::Pinching)
            }
            (GestureMode::Pinching, OnePointRemaining) => Some(GestureMode::Dragging),
            (mode, Released) if mode.is_active() => Some(GestureMode::Idle),
            _ => None,
        }
    }

    pub fn transition(&mut self, event: GestureEvent) -> StateResult<GestureMode> {
        tracing::debug!(from = ?self.mode, event = ?event, "request gesture transition");
        let next = self.next_mode(event).ok_or_else(|| {
            let from = self.mode;
            tracing::debug!(from = ?from, event = ?event, "gesture transition rejected");
            StateError::InvalidTransition { from, event }
        })?;

        if self.mode == GestureMode::Idle {
            self.gesture_transitions.clear();
        }
        self.gesture_transitions
            .push(ModeTransition::new(self.mode, event, next));
        self.mode = next;

        Ok(self.mode)
    }

    /// Transitions taken since the current (or most recent) gesture began.
    pub fn gesture_transitions(&self) -> &[ModeTransition] {
        &self.gesture_transitions
    }
}

impl Default for ModeMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ModeMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "GestureMode::{:?}", self.mode)
    }
}
