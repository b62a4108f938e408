//! Status Bar View Model
//!
//! Pre-computes presentation data for the status bar.

use crate::state::{AppState, StatusKind};
use ratatui::style::{Color, Modifier, Style};

/// View model for rendering the status bar
#[derive(Debug, Clone)]
pub struct StatusBarViewModel {
    /// Emoji/icon for the status
    pub emoji: &'static str,
    /// The message text
    pub message: String,
    /// Timestamp formatted for display (e.g., "14:32:05")
    pub timestamp: String,
    /// What produced the message
    pub source: String,
    pub message_style: Style,
    pub metadata_style: Style,
}

impl StatusBarViewModel {
    pub fn from_state(state: &AppState) -> Self {
        let metadata_style = Style::default().fg(Color::DarkGray);

        let Some(msg) = state.status_bar.latest() else {
            return Self {
                emoji: "👋",
                message: "Welcome to GitHub Workflow Lander".to_string(),
                timestamp: String::new(),
                source: String::new(),
                message_style: Style::default().fg(Color::Cyan),
                metadata_style,
            };
        };

        let fg_color = match msg.kind {
            StatusKind::Running => Color::Yellow,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
            StatusKind::Info => Color::Cyan,
        };

        Self {
            emoji: msg.kind.emoji(),
            message: msg.message.clone(),
            timestamp: msg.timestamp.format("%H:%M:%S").to_string(),
            source: msg.source.clone(),
            message_style: Style::default().fg(fg_color).add_modifier(Modifier::BOLD),
            metadata_style,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusMessage;
    use gh_workflow_sync::TaskStatus;

    #[test]
    fn test_latest_message_is_shown() {
        let mut state = AppState::default();
        state.status_bar.push(StatusMessage::from_task(
            &TaskStatus::error("Failed to open in browser"),
            "run",
        ));

        let vm = StatusBarViewModel::from_state(&state);
        assert_eq!(vm.message, "Failed to open in browser");
        assert_eq!(vm.emoji, "🚨");
        assert_eq!(vm.source, "run");
        assert_eq!(vm.message_style.fg, Some(Color::Red));
    }

    #[test]
    fn test_welcome_without_messages() {
        let vm = StatusBarViewModel::from_state(&AppState::default());
        assert!(vm.timestamp.is_empty());
        assert!(vm.message.starts_with("Welcome"));
    }
}
