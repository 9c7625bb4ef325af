mod capture;
mod pointer;
mod shortcut;

pub use capture::{CaptureGuard, NoCapture, PointerCapture};
pub use pointer::{HitTarget, ResizeHandle};
pub use shortcut::{
    resolve_shortcut, InputContext, ShortcutAction, ShortcutKey, ShortcutModifiers,
};
