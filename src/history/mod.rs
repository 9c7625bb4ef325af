//! Linear undo/redo of committed sticker actions.
//!
//! Each entry stores the sticker as it was before the action and as it was
//! after it. Undo applies the `before` side, redo the `after` side, so undo
//! followed by redo restores the post-action geometry exactly. Style edits are
//! not entries and are left alone by geometry undo.

use std::collections::VecDeque;

use serde::Serialize;

use crate::sticker::{Sticker, StickerId, StickerObjects};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HistoryKind {
    Add,
    Move,
    Rotate,
    Scale,
    Resize,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    pub id: StickerId,
    pub before: Option<Sticker>,
    pub after: Option<Sticker>,
    /// Draw-order slot of the sticker, used to re-insert it.
    pub index: usize,
}

impl HistoryEntry {
    pub fn added(sticker: Sticker, index: usize) -> Self {
        Self {
            kind: HistoryKind::Add,
            id: sticker.id,
            before: None,
            after: Some(sticker),
            index,
        }
    }

    pub fn deleted(sticker: Sticker, index: usize) -> Self {
        Self {
            kind: HistoryKind::Delete,
            id: sticker.id,
            before: Some(sticker),
            after: None,
            index,
        }
    }

    pub fn changed(kind: HistoryKind, before: Sticker, after: Sticker, index: usize) -> Self {
        Self {
            kind,
            id: after.id,
            before: Some(before),
            after: Some(after),
            index,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

impl HistoryAction {
    pub const fn applied_message(self) -> &'static str {
        match self {
            Self::Undo => "undo applied",
            Self::Redo => "redo applied",
        }
    }

    pub const fn empty_message(self) -> &'static str {
        match self {
            Self::Undo => "undo stack empty",
            Self::Redo => "redo stack empty",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct History {
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
    limit: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit: limit.filter(|limit| *limit > 0),
            ..Self::default()
        }
    }

    pub fn commit(&mut self, entry: HistoryEntry) {
        tracing::debug!(kind = ?entry.kind, id = %entry.id, "history commit");
        self.undo_stack.push_back(entry);
        self.redo_stack.clear();
        if let Some(limit) = self.limit {
            while self.undo_stack.len() > limit {
                self.undo_stack.pop_front();
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + '_ {
        self.undo_stack.iter()
    }

    pub fn redo_entries(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + '_ {
        self.redo_stack.iter()
    }

    pub fn undo(&mut self, objects: &mut StickerObjects) -> Option<HistoryKind> {
        self.step(HistoryAction::Undo, objects)
    }

    pub fn redo(&mut self, objects: &mut StickerObjects) -> Option<HistoryKind> {
        self.step(HistoryAction::Redo, objects)
    }

    fn step(&mut self, action: HistoryAction, objects: &mut StickerObjects) -> Option<HistoryKind> {
        let entry = match action {
            HistoryAction::Undo => self.undo_stack.pop_back(),
            HistoryAction::Redo => self.redo_stack.pop(),
        };
        let Some(entry) = entry else {
            tracing::debug!("{}", action.empty_message());
            return None;
        };

        apply_entry(objects, &entry, action);
        tracing::debug!(kind = ?entry.kind, id = %entry.id, "{}", action.applied_message());

        let kind = entry.kind;
        match action {
            HistoryAction::Undo => self.redo_stack.push(entry),
            HistoryAction::Redo => self.undo_stack.push_back(entry),
        }
        Some(kind)
    }
}

/// Brings the live collection to one side of `entry`. `ADD` and `DELETE`
/// insert or remove the whole sticker; geometry kinds only touch position,
/// rotation, scale and size of a sticker that still exists, so later style
/// edits survive. A missing target is a no-op.
fn apply_entry(objects: &mut StickerObjects, entry: &HistoryEntry, action: HistoryAction) {
    let id = entry.id;
    let snapshot = match action {
        HistoryAction::Undo => entry.before.as_ref(),
        HistoryAction::Redo => entry.after.as_ref(),
    };
    match (entry.kind, snapshot) {
        (HistoryKind::Add | HistoryKind::Delete, None) => {
            if objects.remove(id).is_none() {
                tracing::debug!(id = %id, "history target already removed");
            }
        }
        (HistoryKind::Add | HistoryKind::Delete, Some(sticker)) => {
            if !objects.replace(sticker.clone()) {
                objects.insert_at(entry.index, sticker.clone());
            }
        }
        (_, Some(sticker)) => match objects.get_mut(id) {
            Some(live) => live.apply_geometry(sticker),
            None => tracing::debug!(id = %id, kind = ?entry.kind, "history target missing"),
        },
        (_, None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::sticker::{ShapeKind, StickerContent, StickerKind, StickerStyle};

    fn shape(objects: &mut StickerObjects) -> Sticker {
        let id = objects.allocate_id();
        Sticker::new(
            id,
            Point::new(100.0, 100.0),
            StickerContent::Shape(ShapeKind::Star),
            StickerStyle::default_for(StickerKind::Shape),
        )
    }

    fn add(objects: &mut StickerObjects, history: &mut History) -> Sticker {
        let sticker = shape(objects);
        objects.push(sticker.clone());
        history.commit(HistoryEntry::added(sticker.clone(), objects.len() - 1));
        sticker
    }

    fn snapshot(objects: &StickerObjects) -> Vec<Sticker> {
        objects.iter().cloned().collect()
    }

    #[test]
    fn commit_clears_redo_stack() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        add(&mut objects, &mut history);
        history.undo(&mut objects);
        assert!(history.can_redo());

        add(&mut objects, &mut history);
        assert!(!history.can_redo());
        assert_eq!(history.undo_entries().count(), 1);
    }

    #[test]
    fn undo_and_redo_move_entries_between_stack_tops() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        let first = add(&mut objects, &mut history);
        let second = add(&mut objects, &mut history);

        assert_eq!(history.undo(&mut objects), Some(HistoryKind::Add));
        assert_eq!(
            history.redo_entries().next_back().map(|entry| entry.id),
            Some(second.id)
        );
        assert_eq!(
            history.undo_entries().next_back().map(|entry| entry.id),
            Some(first.id)
        );

        assert_eq!(history.redo(&mut objects), Some(HistoryKind::Add));
        assert_eq!(
            history.undo_entries().next_back().map(|entry| entry.id),
            Some(second.id)
        );
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_on_empty_stack_is_a_no_op() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        assert!(!history.can_undo());
        assert_eq!(history.undo(&mut objects), None);
        assert_eq!(history.redo(&mut objects), None);
        assert!(objects.is_empty());
    }

    #[test]
    fn undo_restores_pre_action_state_and_redo_restores_post_action_state() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        let before = add(&mut objects, &mut history);

        let mut after = before.clone();
        after.position = Point::new(150.0, 70.0);
        objects.replace(after.clone());
        history.commit(HistoryEntry::changed(HistoryKind::Move, before.clone(), after.clone(), 0));
        let post_action = snapshot(&objects);

        history.undo(&mut objects);
        assert_eq!(objects.get(before.id), Some(&before));

        history.redo(&mut objects);
        assert_eq!(snapshot(&objects), post_action);
    }

    #[test]
    fn undo_of_delete_reinserts_at_original_draw_index() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        let a = add(&mut objects, &mut history);
        let b = add(&mut objects, &mut history);
        let c = add(&mut objects, &mut history);

        let (removed, index) = objects.remove(b.id).expect("b should exist");
        history.commit(HistoryEntry::deleted(removed, index));
        assert_eq!(objects.ids(), &[a.id, c.id]);

        assert_eq!(history.undo(&mut objects), Some(HistoryKind::Delete));
        assert_eq!(objects.ids(), &[a.id, b.id, c.id]);
        assert_eq!(objects.get(b.id), Some(&b));
        assert_eq!(
            history.redo_entries().next_back().map(|entry| entry.kind),
            Some(HistoryKind::Delete)
        );

        history.redo(&mut objects);
        assert_eq!(objects.ids(), &[a.id, c.id]);
    }

    #[test]
    fn applying_entry_for_vanished_sticker_does_not_fail() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        let sticker = add(&mut objects, &mut history);
        objects.remove(sticker.id);

        assert_eq!(history.undo(&mut objects), Some(HistoryKind::Add));
        assert!(objects.is_empty());
        assert!(history.can_redo());
    }

    #[test]
    fn geometry_entries_for_vanished_sticker_do_not_resurrect_it() {
        for kind in [
            HistoryKind::Move,
            HistoryKind::Rotate,
            HistoryKind::Scale,
            HistoryKind::Resize,
        ] {
            let mut objects = StickerObjects::new();
            let mut history = History::new();
            let before = add(&mut objects, &mut history);
            let mut after = before.clone();
            after.rotation = 45.0;
            objects.replace(after.clone());
            history.commit(HistoryEntry::changed(kind, before.clone(), after, 0));
            objects.remove(before.id);

            assert_eq!(history.undo(&mut objects), Some(kind));
            assert!(objects.is_empty(), "{kind:?} undo resurrected the sticker");
            assert_eq!(history.redo(&mut objects), Some(kind));
            assert!(objects.is_empty(), "{kind:?} redo resurrected the sticker");
        }
    }

    #[test]
    fn geometry_undo_keeps_later_style_edits() {
        let mut objects = StickerObjects::new();
        let mut history = History::new();
        let before = add(&mut objects, &mut history);
        let mut after = before.clone();
        after.position = Point::new(150.0, 70.0);
        objects.replace(after.clone());
        history.commit(HistoryEntry::changed(HistoryKind::Move, before.clone(), after, 0));

        let red = crate::geometry::Color::new(255, 0, 0);
        objects.get_mut(before.id).expect("sticker exists").style.fill = Some(red);

        history.undo(&mut objects);
        let live = objects.get(before.id).expect("sticker exists");
        assert_eq!(live.position, Point::new(100.0, 100.0));
        assert_eq!(live.style.fill, Some(red));

        history.redo(&mut objects);
        let live = objects.get(before.id).expect("sticker exists");
        assert_eq!(live.position, Point::new(150.0, 70.0));
        assert_eq!(live.style.fill, Some(red));
    }

    #[test]
    fn history_limit_drops_oldest_entries() {
        let mut objects = StickerObjects::new();
        let mut history = History::with_limit(Some(2));
        let first = add(&mut objects, &mut history);
        add(&mut objects, &mut history);
        add(&mut objects, &mut history);

        assert_eq!(history.undo_entries().count(), 2);
        assert!(history.undo_entries().all(|entry| entry.id != first.id));
    }

    #[test]
    fn history_action_messages_are_distinct() {
        assert_eq!(HistoryAction::Undo.applied_message(), "undo applied");
        assert_eq!(HistoryAction::Redo.empty_message(), "redo stack empty");
    }
}
