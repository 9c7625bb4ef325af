use super::model::GestureMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    BodyPressed,
    RotateHandlePressed,
    ResizeHandlePressed,
    ScaleHandlePressed,
    TwoPointContact,
    OnePointRemaining,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    pub from: GestureMode,
    pub event: GestureEvent,
    pub to: GestureMode,
}

impl ModeTransition {
    pub const fn new(from: GestureMode, event: GestureEvent, to: GestureMode) -> Self {
        Self { from, event, to }
    }
}
