//! The editor facade: one owner for the sticker arena, selection, gestures,
//! wheel commits and history. Every call is applied in arrival order.

mod lifecycle;

use std::fmt;
use std::time::Duration;

use crate::config::EditorConfig;
use crate::geometry::Point;
use crate::gif::GifPicker;
use crate::history::{History, HistoryEntry, HistoryKind};
use crate::input::{
    resolve_shortcut, HitTarget, InputContext, NoCapture, PointerCapture, ShortcutAction,
    ShortcutKey, ShortcutModifiers,
};
use crate::render::Scene;
use crate::state::GestureMode;
use crate::sticker::{ImageSource, Sticker, StickerId, StickerObjects};
use crate::transform::{
    GestureCommit, PendingScaleCommit, TransformEngine, TransformLimits, WheelCommitScheduler,
};

pub struct StickerEditor {
    config: EditorConfig,
    objects: StickerObjects,
    history: History,
    engine: TransformEngine,
    wheel: WheelCommitScheduler,
    selected: Option<StickerId>,
    background: Option<ImageSource>,
    gif_picker: GifPicker,
    capture: Box<dyn PointerCapture>,
}

impl fmt::Debug for StickerEditor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickerEditor")
            .field("objects", &self.objects.len())
            .field("selected", &self.selected)
            .field("mode", &self.engine.mode())
            .field("can_undo", &self.history.can_undo())
            .field("can_redo", &self.history.can_redo())
            .finish_non_exhaustive()
    }
}

impl Default for StickerEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl StickerEditor {
    pub fn new(config: EditorConfig) -> Self {
        let config = config.sanitized();
        Self {
            objects: StickerObjects::new(),
            history: History::with_limit(config.history_limit),
            engine: TransformEngine::new(TransformLimits::from_config(&config)),
            wheel: WheelCommitScheduler::new(Duration::from_millis(config.wheel_commit_delay_ms)),
            selected: None,
            background: None,
            gif_picker: GifPicker::new(),
            capture: Box::new(NoCapture),
            config,
        }
    }

    /// Routes gesture pointer capture through the host.
    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn objects(&self) -> &StickerObjects {
        &self.objects
    }

    pub fn sticker(&self, id: StickerId) -> Option<&Sticker> {
        self.objects.get(id)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> GestureMode {
        self.engine.mode()
    }

    pub fn background(&self) -> Option<&ImageSource> {
        self.background.as_ref()
    }

    pub fn gif_picker(&self) -> &GifPicker {
        &self.gif_picker
    }

    pub fn gif_picker_mut(&mut self) -> &mut GifPicker {
        &mut self.gif_picker
    }

    pub fn selected(&self) -> Option<StickerId> {
        self.selected
    }

    pub fn select(&mut self, id: StickerId) -> bool {
        if !self.objects.contains(id) {
            tracing::debug!(id = %id, "select on missing sticker ignored");
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn scene(&self) -> Scene {
        Scene::project(&self.objects, self.selected, self.background.as_ref())
    }

    pub fn pointer_down(&mut self, target: HitTarget, pointer: Point) -> bool {
        self.flush_wheel_commit();
        let Some(id) = target.sticker() else {
            if !self.engine.is_active() {
                self.clear_selection();
            }
            return false;
        };
        if self.engine.is_active() || !self.objects.contains(id) {
            return false;
        }
        self.selected = Some(id);
        self.engine
            .begin(target, pointer, &self.objects, self.capture.as_ref())
    }

    pub fn pointer_move(&mut self, pointer: Point) {
        self.engine.pointer_move(pointer, &mut self.objects);
    }

    /// Ends the active gesture and records it.
    pub fn pointer_up(&mut self) -> Option<HistoryKind> {
        let commit = self.engine.release(&self.objects)?;
        Some(self.commit_gesture(commit))
    }

    /// Same as a release: the gesture is committed where it stands.
    pub fn focus_lost(&mut self) -> Option<HistoryKind> {
        self.pointer_up()
    }

    /// Touch start with every contact currently down. Exactly two contacts
    /// on a sticker start a pinch; one starts a drag.
    pub fn touch_start(&mut self, target: HitTarget, touches: &[Point]) -> bool {
        match touches {
            [single] if !self.engine.is_active() => self.pointer_down(target, *single),
            [a, b] => {
                self.flush_wheel_commit();
                let Some(id) = target.sticker().or(self.engine.active_sticker()) else {
                    return false;
                };
                if !self.objects.contains(id) {
                    return false;
                }
                let started =
                    self.engine
                        .begin_pinch(id, *a, *b, &self.objects, self.capture.as_ref());
                if started {
                    self.selected = Some(id);
                }
                started
            }
            _ => false,
        }
    }

    pub fn touch_move(&mut self, touches: &[Point]) {
        match (self.engine.mode(), touches) {
            (GestureMode::Pinching, [a, b]) => {
                self.engine.pinch_move(*a, *b, &mut self.objects);
            }
            (GestureMode::Pinching, [single]) => {
                self.engine.fall_back_to_drag(*single, &self.objects);
                self.engine.pointer_move(*single, &mut self.objects);
            }
            (_, [first, ..]) => self.engine.pointer_move(*first, &mut self.objects),
            _ => {}
        }
    }

    /// Touch end with the contacts still down after the lift.
    pub fn touch_end(&mut self, remaining: &[Point]) -> Option<HistoryKind> {
        match remaining {
            [] => self.pointer_up(),
            [single] => {
                self.engine.fall_back_to_drag(*single, &self.objects);
                None
            }
            _ => None,
        }
    }

    /// One wheel tick over `id`. Only the selected sticker scales, and not
    /// while another gesture is running.
    pub fn wheel(&mut self, id: StickerId, delta_y: f64, now: Duration) -> bool {
        if self.selected != Some(id) || self.engine.is_active() {
            return false;
        }
        if !self.wheel.is_pending_for(id) {
            self.flush_wheel_commit();
        }
        let factors = (self.config.wheel_shrink_factor, self.config.wheel_grow_factor);
        let Some(before) = self
            .engine
            .wheel_scale(id, delta_y, factors, &mut self.objects)
        else {
            return false;
        };
        if let Some(flushed) = self.wheel.arm(before, now) {
            self.commit_wheel(flushed);
        }
        true
    }

    /// Fires a wheel commit whose quiet period has elapsed.
    pub fn tick(&mut self, now: Duration) -> Option<HistoryKind> {
        let due = self.wheel.take_due(now)?;
        self.commit_wheel(due)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo() || self.wheel.pending().is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> Option<HistoryKind> {
        self.settle();
        let kind = self.history.undo(&mut self.objects);
        self.drop_stale_selection();
        kind
    }

    pub fn redo(&mut self) -> Option<HistoryKind> {
        self.settle();
        let kind = self.history.redo(&mut self.objects);
        self.drop_stale_selection();
        kind
    }

    /// Resolves a key press against the current editor state and applies it.
    pub fn handle_key(
        &mut self,
        key: ShortcutKey,
        modifiers: ShortcutModifiers,
        text_input_active: bool,
    ) -> Option<ShortcutAction> {
        let context = InputContext {
            dialog_open: false,
            text_input_active,
            has_selection: self.selected.is_some(),
        };
        let action = resolve_shortcut(key, modifiers, context)?;
        self.apply_shortcut(action);
        Some(action)
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        match action {
            ShortcutAction::Undo => self.undo().is_some(),
            ShortcutAction::Redo => self.redo().is_some(),
            ShortcutAction::DeleteSelection => match self.selected {
                Some(id) => self.delete_object(id),
                None => false,
            },
            ShortcutAction::ClearSelection => {
                let had_selection = self.selected.is_some();
                self.clear_selection();
                had_selection
            }
            ShortcutAction::DialogConfirm | ShortcutAction::DialogCancel => false,
        }
    }

    /// Finishes the running gesture and any pending wheel burst so the next
    /// mutation is ordered after them in history.
    fn settle(&mut self) {
        self.pointer_up();
        self.flush_wheel_commit();
    }

    fn flush_wheel_commit(&mut self) {
        if let Some(pending) = self.wheel.flush() {
            self.commit_wheel(pending);
        }
    }

    fn commit_wheel(&mut self, pending: PendingScaleCommit) -> Option<HistoryKind> {
        let Some(after) = self.objects.get(pending.id).cloned() else {
            tracing::debug!(id = %pending.id, "wheel target removed before commit");
            return None;
        };
        let index = self.index_of(pending.id);
        self.history.commit(HistoryEntry::changed(
            HistoryKind::Scale,
            pending.before,
            after,
            index,
        ));
        Some(HistoryKind::Scale)
    }

    fn commit_gesture(&mut self, commit: GestureCommit) -> HistoryKind {
        let GestureCommit {
            kind,
            before,
            after,
        } = commit;
        let index = self.index_of(after.id);
        self.history
            .commit(HistoryEntry::changed(kind, before, after, index));
        kind
    }

    fn index_of(&self, id: StickerId) -> usize {
        self.objects.index_of(id).unwrap_or(self.objects.len())
    }

    fn drop_stale_selection(&mut self) {
        if self.selected.is_some_and(|id| !self.objects.contains(id)) {
            self.selected = None;
        }
    }
}
