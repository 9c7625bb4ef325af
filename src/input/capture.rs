use std::fmt;

/// Host hook that routes surface-wide move/release events to the editor for
/// the lifetime of one gesture.
pub trait PointerCapture {
    fn acquire(&self) -> CaptureGuard;
}

/// Releases the host subscription when dropped.
pub struct CaptureGuard {
    release: Option<Box<dyn FnOnce()>>,
}

impl CaptureGuard {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Guard with nothing to release.
    pub fn detached() -> Self {
        Self { release: None }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for CaptureGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureGuard")
            .field("armed", &self.release.is_some())
            .finish()
    }
}

/// Capture for hosts that already deliver every event to the editor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&self) -> CaptureGuard {
        CaptureGuard::detached()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn guard_runs_release_exactly_once_on_drop() {
        let released = Rc::new(Cell::new(0_u32));
        let counter = Rc::clone(&released);
        let guard = CaptureGuard::new(move || counter.set(counter.get() + 1));
        assert_eq!(released.get(), 0);
        drop(guard);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn detached_guard_is_inert() {
        let guard = NoCapture.acquire();
        assert!(format!("{guard:?}").contains("armed: false"));
    }
}
