use std::time::Duration;

use crate::sticker::{Sticker, StickerId};

/// Multiplier for one wheel tick: scrolling down shrinks, up grows, and a
/// zero delta does nothing.
pub fn wheel_factor(delta_y: f64, shrink: f64, grow: f64) -> Option<f64> {
    if delta_y > 0.0 {
        Some(shrink)
    } else if delta_y < 0.0 {
        Some(grow)
    } else {
        None
    }
}

/// A wheel burst waiting to be recorded as one `SCALE` entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingScaleCommit {
    pub id: StickerId,
    /// Sticker state before the first tick of the burst.
    pub before: Sticker,
    pub deadline: Duration,
}

/// Debounces wheel ticks so a burst produces a single history entry once the
/// wheel has been quiet for `delay`. Time is supplied by the caller.
#[derive(Debug, Clone)]
pub struct WheelCommitScheduler {
    delay: Duration,
    pending: Option<PendingScaleCommit>,
}

impl WheelCommitScheduler {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn pending(&self) -> Option<&PendingScaleCommit> {
        self.pending.as_ref()
    }

    pub fn is_pending_for(&self, id: StickerId) -> bool {
        self.pending.as_ref().is_some_and(|pending| pending.id == id)
    }

    /// Records a tick on `before.id`. The first tick of a burst keeps its
    /// snapshot; later ticks only push the deadline out. A tick on another
    /// sticker hands back the previous burst so it can be committed first.
    pub fn arm(&mut self, before: Sticker, now: Duration) -> Option<PendingScaleCommit> {
        let deadline = now + self.delay;
        if let Some(pending) = self.pending.as_mut() {
            if pending.id == before.id {
                pending.deadline = deadline;
                return None;
            }
        }
        let flushed = self.pending.take();
        self.pending = Some(PendingScaleCommit {
            id: before.id,
            before,
            deadline,
        });
        flushed
    }

    /// Takes the pending burst if its quiet period has elapsed.
    pub fn take_due(&mut self, now: Duration) -> Option<PendingScaleCommit> {
        if self.pending.as_ref()?.deadline <= now {
            return self.pending.take();
        }
        None
    }

    /// Takes the pending burst regardless of its deadline.
    pub fn flush(&mut self) -> Option<PendingScaleCommit> {
        self.pending.take()
    }
}

impl Default for WheelCommitScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::sticker::{StickerContent, StickerKind, StickerObjects, StickerStyle};

    fn sticker(objects: &mut StickerObjects) -> Sticker {
        Sticker::new(
            objects.allocate_id(),
            Point::new(100.0, 100.0),
            StickerContent::Emoji("🎉".to_string()),
            StickerStyle::default_for(StickerKind::Emoji),
        )
    }

    #[test]
    fn wheel_factor_follows_scroll_direction() {
        assert_eq!(wheel_factor(3.0, 0.9, 1.1), Some(0.9));
        assert_eq!(wheel_factor(-0.5, 0.9, 1.1), Some(1.1));
        assert_eq!(wheel_factor(0.0, 0.9, 1.1), None);
    }

    #[test]
    fn burst_keeps_first_snapshot_and_rearms_deadline() {
        let mut objects = StickerObjects::new();
        let first = sticker(&mut objects);
        let mut later = first.clone();
        later.scale = 1.21;

        let mut scheduler = WheelCommitScheduler::default();
        assert!(scheduler.arm(first.clone(), Duration::from_millis(0)).is_none());
        assert!(scheduler.arm(later, Duration::from_millis(300)).is_none());

        assert!(scheduler.take_due(Duration::from_millis(600)).is_none());
        let due = scheduler
            .take_due(Duration::from_millis(800))
            .expect("burst should be due after quiet period");
        assert_eq!(due.before, first);
        assert!(scheduler.pending().is_none());
    }

    #[test]
    fn tick_on_another_sticker_returns_previous_burst() {
        let mut objects = StickerObjects::new();
        let a = sticker(&mut objects);
        let b = sticker(&mut objects);

        let mut scheduler = WheelCommitScheduler::new(Duration::from_millis(100));
        scheduler.arm(a.clone(), Duration::ZERO);
        let flushed = scheduler
            .arm(b.clone(), Duration::from_millis(10))
            .expect("previous burst should be handed back");
        assert_eq!(flushed.id, a.id);
        assert!(scheduler.is_pending_for(b.id));
    }

    #[test]
    fn flush_takes_pending_commit_before_its_deadline() {
        let mut objects = StickerObjects::new();
        let mut scheduler = WheelCommitScheduler::default();
        let first = sticker(&mut objects);
        scheduler.arm(first.clone(), Duration::ZERO);

        let flushed = scheduler.flush().expect("pending burst should flush");
        assert_eq!(flushed.before, first);
        assert!(scheduler.take_due(Duration::from_secs(10)).is_none());
        assert!(scheduler.flush().is_none());
    }
}
