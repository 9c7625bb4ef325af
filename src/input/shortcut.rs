#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Character(char),
    Enter,
    Escape,
    Delete,
    Backspace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShortcutModifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl ShortcutModifiers {
    pub const fn new(ctrl: bool, shift: bool) -> Self {
        Self { ctrl, shift }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub dialog_open: bool,
    pub text_input_active: bool,
    pub has_selection: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    DialogConfirm,
    DialogCancel,
    Undo,
    Redo,
    DeleteSelection,
    ClearSelection,
}

fn resolve_dialog_shortcut(key: ShortcutKey) -> Option<ShortcutAction> {
    match key {
        ShortcutKey::Enter => Some(ShortcutAction::DialogConfirm),
        ShortcutKey::Escape => Some(ShortcutAction::DialogCancel),
        _ => None,
    }
}

fn resolve_canvas_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    match (key, modifiers.ctrl, modifiers.shift) {
        (ShortcutKey::Character('z'), true, false) => Some(ShortcutAction::Undo),
        (ShortcutKey::Character('z'), true, true) | (ShortcutKey::Character('y'), true, false) => {
            Some(ShortcutAction::Redo)
        }
        (ShortcutKey::Delete, false, false) | (ShortcutKey::Backspace, false, false)
            if context.has_selection =>
        {
            Some(ShortcutAction::DeleteSelection)
        }
        (ShortcutKey::Escape, false, false) if context.has_selection => {
            Some(ShortcutAction::ClearSelection)
        }
        _ => None,
    }
}

/// Maps a key press to an editor action. Text entry swallows every key so
/// typing never deletes or undoes stickers.
pub fn resolve_shortcut(
    key: ShortcutKey,
    modifiers: ShortcutModifiers,
    context: InputContext,
) -> Option<ShortcutAction> {
    if context.dialog_open {
        return resolve_dialog_shortcut(key);
    }

    if context.text_input_active {
        return None;
    }

    resolve_canvas_shortcut(key, modifiers, context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_shortcut_prioritizes_dialog_context() {
        let context = InputContext {
            dialog_open: true,
            text_input_active: true,
            has_selection: true,
        };
        assert_eq!(
            resolve_shortcut(ShortcutKey::Enter, ShortcutModifiers::default(), context),
            Some(ShortcutAction::DialogConfirm)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Escape, ShortcutModifiers::default(), context),
            Some(ShortcutAction::DialogCancel)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Delete, ShortcutModifiers::default(), context),
            None
        );
    }

    #[test]
    fn resolve_shortcut_ignores_keys_while_typing() {
        let context = InputContext {
            text_input_active: true,
            has_selection: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('z'),
                ShortcutModifiers::new(true, false),
                context
            ),
            None
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Backspace, ShortcutModifiers::default(), context),
            None
        );
    }

    #[test]
    fn resolve_shortcut_maps_history_shortcuts() {
        let context = InputContext::default();
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('z'),
                ShortcutModifiers::new(true, false),
                context
            ),
            Some(ShortcutAction::Undo)
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('z'),
                ShortcutModifiers::new(true, true),
                context
            ),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('y'),
                ShortcutModifiers::new(true, false),
                context
            ),
            Some(ShortcutAction::Redo)
        );
        assert_eq!(
            resolve_shortcut(
                ShortcutKey::Character('z'),
                ShortcutModifiers::default(),
                context
            ),
            None
        );
    }

    #[test]
    fn resolve_shortcut_requires_selection_for_delete_and_escape() {
        let without = InputContext::default();
        assert_eq!(
            resolve_shortcut(ShortcutKey::Delete, ShortcutModifiers::default(), without),
            None
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Escape, ShortcutModifiers::default(), without),
            None
        );

        let with = InputContext {
            has_selection: true,
            ..Default::default()
        };
        assert_eq!(
            resolve_shortcut(ShortcutKey::Delete, ShortcutModifiers::default(), with),
            Some(ShortcutAction::DeleteSelection)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Backspace, ShortcutModifiers::default(), with),
            Some(ShortcutAction::DeleteSelection)
        );
        assert_eq!(
            resolve_shortcut(ShortcutKey::Escape, ShortcutModifiers::default(), with),
            Some(ShortcutAction::ClearSelection)
        );
    }
}
