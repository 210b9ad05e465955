//! # Commands and Shortcuts
//!
//! User commands understood by the viewer, and the keyboard shortcuts that
//! trigger them both from the egui chrome and from inside the webview.

use egui::{Key, KeyboardShortcut, Modifiers};
use std::path::PathBuf;

/// Input to the view state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Refresh,
    ToggleTheme,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleFullscreen,
    Print,
}

/// Something the user asked for through a button, shortcut or webview key.
///
/// Differs from [`Command`] only in that opening a file first needs a path
/// picked from a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenDialog,
    Refresh,
    Print,
    ZoomIn,
    ZoomOut,
    ZoomReset,
    ToggleTheme,
    ToggleFullscreen,
}

impl Action {
    pub const ALL: [Action; 8] = [
        Action::OpenDialog,
        Action::Refresh,
        Action::Print,
        Action::ZoomIn,
        Action::ZoomOut,
        Action::ZoomReset,
        Action::ToggleTheme,
        Action::ToggleFullscreen,
    ];

    /// The command this action maps to, or `None` for [`Action::OpenDialog`].
    pub fn command(self) -> Option<Command> {
        match self {
            Action::OpenDialog => None,
            Action::Refresh => Some(Command::Refresh),
            Action::Print => Some(Command::Print),
            Action::ZoomIn => Some(Command::ZoomIn),
            Action::ZoomOut => Some(Command::ZoomOut),
            Action::ZoomReset => Some(Command::ZoomReset),
            Action::ToggleTheme => Some(Command::ToggleTheme),
            Action::ToggleFullscreen => Some(Command::ToggleFullscreen),
        }
    }

    /// Message posted by the webview key handler for this action.
    pub fn ipc_name(self) -> &'static str {
        match self {
            Action::OpenDialog => "open",
            Action::Refresh => "refresh",
            Action::Print => "print",
            Action::ZoomIn => "zoom-in",
            Action::ZoomOut => "zoom-out",
            Action::ZoomReset => "zoom-reset",
            Action::ToggleTheme => "toggle-theme",
            Action::ToggleFullscreen => "toggle-fullscreen",
        }
    }

    pub fn from_ipc(message: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.ipc_name() == message.trim())
    }

    /// Tooltip for the header bar button.
    pub fn tooltip(self) -> &'static str {
        match self {
            Action::OpenDialog => "Open File (Ctrl+O)",
            Action::Refresh => "Refresh (Ctrl+R)",
            Action::Print => "Print (Ctrl+P)",
            Action::ZoomIn => "Zoom In (Ctrl++)",
            Action::ZoomOut => "Zoom Out (Ctrl+-)",
            Action::ZoomReset => "Reset Zoom (Ctrl+0)",
            Action::ToggleTheme => "Toggle Dark Mode",
            Action::ToggleFullscreen => "Toggle Fullscreen (F11)",
        }
    }

    /// Keyboard shortcuts bound to this action in the egui window.
    pub fn shortcuts(self) -> Vec<KeyboardShortcut> {
        let command = |key| KeyboardShortcut::new(Modifiers::COMMAND, key);
        match self {
            Action::OpenDialog => vec![command(Key::O)],
            Action::Refresh => vec![command(Key::R)],
            Action::Print => vec![command(Key::P)],
            Action::ZoomIn => vec![command(Key::Plus), command(Key::Equals)],
            Action::ZoomOut => vec![command(Key::Minus)],
            Action::ZoomReset => vec![command(Key::Num0)],
            Action::ToggleTheme => Vec::new(),
            Action::ToggleFullscreen => vec![KeyboardShortcut::new(Modifiers::NONE, Key::F11)],
        }
    }
}

/// Script injected into every page so the shortcuts keep working while the
/// webview has keyboard focus. Keys are forwarded as [`Action::ipc_name`].
pub const SHORTCUT_SCRIPT: &str = r#"
document.addEventListener('keydown', function (event) {
    var action = null;
    if (event.key === 'F11') {
        action = 'toggle-fullscreen';
    } else if (event.ctrlKey || event.metaKey) {
        switch (event.key.toLowerCase()) {
            case 'o': action = 'open'; break;
            case 'r': action = 'refresh'; break;
            case 'p': action = 'print'; break;
            case '+':
            case '=': action = 'zoom-in'; break;
            case '-': action = 'zoom-out'; break;
            case '0': action = 'zoom-reset'; break;
        }
    }
    if (action !== null) {
        event.preventDefault();
        window.ipc.postMessage(action);
    }
}, true);
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ipc_names_resolve() {
        for action in Action::ALL {
            assert_eq!(Action::from_ipc(action.ipc_name()), Some(action));
        }
        assert_eq!(Action::from_ipc(" zoom-in\n"), Some(Action::ZoomIn));
        assert_eq!(Action::from_ipc("format-disk"), None);
    }

    #[test]
    fn test_script_only_posts_known_actions() {
        for name in ["open", "refresh", "print", "zoom-in", "zoom-out", "zoom-reset", "toggle-fullscreen"] {
            assert!(SHORTCUT_SCRIPT.contains(&format!("'{name}'")), "{name}");
            assert!(Action::from_ipc(name).is_some());
        }
    }

    #[test]
    fn test_open_dialog_has_no_command() {
        assert_eq!(Action::OpenDialog.command(), None);
        assert_eq!(Action::Print.command(), Some(Command::Print));
    }

    #[test]
    fn test_shortcuts() {
        assert!(Action::ZoomIn
            .shortcuts()
            .contains(&KeyboardShortcut::new(Modifiers::COMMAND, Key::Equals)));
        assert_eq!(
            Action::ToggleFullscreen.shortcuts(),
            vec![KeyboardShortcut::new(Modifiers::NONE, Key::F11)]
        );
        assert!(Action::ToggleTheme.shortcuts().is_empty());
    }
}
