pub use crate::{
    command_id::CommandId,
    keybindings::{KeyBinding, Keymap},
};

/// Get the default keymap
pub fn default_keymap() -> Keymap {
    use CommandId::*;

    let bindings = vec![
        // Navigation
        KeyBinding::new("j", "j", NavigateNext),
        KeyBinding::new("down", "↓", NavigateNext),
        KeyBinding::new("k", "k", NavigatePrevious),
        KeyBinding::new("up", "↑", NavigatePrevious),
        // Repository
        KeyBinding::new("l", "l", RepositoryNext),
        KeyBinding::new("shift+right", "⇧→", RepositoryNext),
        KeyBinding::new("h", "h", RepositoryPrevious),
        KeyBinding::new("shift+left", "⇧←", RepositoryPrevious),
        // History
        KeyBinding::new("r", "r", HistoryRefresh),
        // Run operations
        KeyBinding::new("enter", "Enter", RunOpenInBrowser),
        KeyBinding::new("o", "o", RunOpenInBrowser),
        KeyBinding::new("f", "f", RunRerunFailed),
        KeyBinding::new("R", "R", RunRerun),
        KeyBinding::new("c", "c", RunCancel),
        KeyBinding::new("L", "L", RunDownloadLogs),
        // Workflow dispatch
        KeyBinding::new("w", "w", WorkflowSelectNext),
        KeyBinding::new("t", "t", WorkflowDispatch),
        // General
        KeyBinding::new("q", "q", GlobalQuit),
        KeyBinding::new("ctrl+c", "Ctrl+C", GlobalQuit),
    ];

    Keymap::new(bindings)
}

/// Commands listed in the key hints line, in display order
pub const HINTED_COMMANDS: [CommandId; 9] = [
    CommandId::RepositoryNext,
    CommandId::HistoryRefresh,
    CommandId::RunOpenInBrowser,
    CommandId::RunRerunFailed,
    CommandId::RunRerun,
    CommandId::RunCancel,
    CommandId::WorkflowSelectNext,
    CommandId::WorkflowDispatch,
    CommandId::GlobalQuit,
];

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_repository_switching_keys() {
        let keymap = default_keymap();
        for (code, modifiers, expected) in [
            (KeyCode::Right, KeyModifiers::SHIFT, CommandId::RepositoryNext),
            (KeyCode::Char('l'), KeyModifiers::NONE, CommandId::RepositoryNext),
            (KeyCode::Left, KeyModifiers::SHIFT, CommandId::RepositoryPrevious),
            (KeyCode::Char('h'), KeyModifiers::NONE, CommandId::RepositoryPrevious),
        ] {
            assert_eq!(
                keymap.match_key(&KeyEvent::new(code, modifiers)),
                Some(expected),
                "{:?} {:?}",
                code,
                modifiers
            );
        }
    }

    #[test]
    fn test_every_hinted_command_is_bound() {
        let keymap = default_keymap();
        for command in HINTED_COMMANDS {
            assert!(keymap.hint_for(command).is_some(), "{:?} has no key", command);
        }
    }
}
