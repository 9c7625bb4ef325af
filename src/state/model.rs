use serde::Serialize;

/// Manipulation mode of the single active sticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureMode {
    #[default]
    Idle,
    Dragging,
    Rotating,
    Resizing,
    Scaling,
    Pinching,
}

impl GestureMode {
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
