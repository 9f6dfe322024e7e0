//! Keyboard shortcut registry and documentation.

use crate::ui::UiAction;
use sketchboard_core::tools::ToolKind;

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    pub ctrl: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, ctrl: bool, shift: bool) -> bool {
        self.ctrl == ctrl && self.shift == shift && self.key.eq_ignore_ascii_case(key)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// Get all registered shortcuts.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("P", false, false, "Pen", UiAction::SetTool(ToolKind::Pen)),
            Shortcut::new("M", false, false, "Magic shapes", UiAction::SetTool(ToolKind::Magic)),
            Shortcut::new("T", false, false, "Text", UiAction::SetTool(ToolKind::Text)),
            Shortcut::new("E", false, false, "Eraser", UiAction::SetTool(ToolKind::Eraser)),
            Shortcut::new("Z", true, false, "Undo", UiAction::Undo),
            Shortcut::new("Z", true, true, "Redo", UiAction::Redo),
            Shortcut::new("Y", true, false, "Redo", UiAction::Redo),
            Shortcut::new("Delete", true, false, "Clear board", UiAction::Clear),
            Shortcut::new("D", true, false, "Toggle dark theme", UiAction::ToggleTheme),
            Shortcut::new("Escape", false, false, "Cancel current action", UiAction::Cancel),
            Shortcut::new("F1", false, false, "Show shortcuts", UiAction::ToggleShortcuts),
        ]
    }

    /// Find the action bound to a key press. `key` is a character or a
    /// named key such as "Delete".
    pub fn lookup(key: &str, ctrl: bool, shift: bool) -> Option<UiAction> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(key, ctrl, shift))
            .map(|shortcut| shortcut.action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_tools() {
        assert_eq!(ShortcutRegistry::lookup("p", false, false), Some(UiAction::SetTool(ToolKind::Pen)));
        assert_eq!(ShortcutRegistry::lookup("E", false, false), Some(UiAction::SetTool(ToolKind::Eraser)));
        assert_eq!(ShortcutRegistry::lookup("q", false, false), None);
    }

    #[test]
    fn test_lookup_history() {
        assert_eq!(ShortcutRegistry::lookup("z", true, false), Some(UiAction::Undo));
        assert_eq!(ShortcutRegistry::lookup("Z", true, true), Some(UiAction::Redo));
        assert_eq!(ShortcutRegistry::lookup("y", true, false), Some(UiAction::Redo));
        // Plain "z" is not undo.
        assert_eq!(ShortcutRegistry::lookup("z", false, false), None);
    }

    #[test]
    fn test_clear_requires_ctrl() {
        assert_eq!(ShortcutRegistry::lookup("Delete", true, false), Some(UiAction::Clear));
        assert_eq!(ShortcutRegistry::lookup("Delete", false, false), None);
    }

    #[test]
    fn test_format() {
        let redo = Shortcut::new("Z", true, true, "Redo", UiAction::Redo);
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
    }

    #[test]
    fn test_no_duplicate_bindings() {
        let all = ShortcutRegistry::all();
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert!(!a.matches(b.key, b.ctrl, b.shift), "{} bound twice", a.format());
            }
        }
    }
}
