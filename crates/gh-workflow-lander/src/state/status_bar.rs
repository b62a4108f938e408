//! Status Bar State

use chrono::{DateTime, Local};
use gh_workflow_sync::{TaskStatus, TaskStatusType};
use std::collections::VecDeque;

/// Kind of status message (determines icon and color)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Action started/in progress
    Running,
    /// Action completed successfully
    Success,
    /// Action failed with error
    Error,
    /// Informational message
    Info,
}

impl StatusKind {
    /// Get the emoji for this status kind
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Running => "⏳",
            Self::Success => "✅",
            Self::Error => "🚨",
            Self::Info => "ℹ️",
        }
    }
}

impl From<TaskStatusType> for StatusKind {
    fn from(status_type: TaskStatusType) -> Self {
        match status_type {
            TaskStatusType::Running => Self::Running,
            TaskStatusType::Success => Self::Success,
            TaskStatusType::Error => Self::Error,
            TaskStatusType::Info => Self::Info,
        }
    }
}

/// A single status message with metadata
#[derive(Debug, Clone)]
pub struct StatusMessage {
    /// When the message was created
    pub timestamp: DateTime<Local>,
    /// Type of status
    pub kind: StatusKind,
    /// The message text
    pub message: String,
    /// What produced the message (for context)
    pub source: String,
}

impl StatusMessage {
    /// Create a status message from a task status, stamped now
    pub fn from_task(status: &TaskStatus, source: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            kind: status.status_type.into(),
            message: status.message.clone(),
            source: source.into(),
        }
    }
}

/// Status bar state - history of messages
#[derive(Debug, Clone)]
pub struct StatusBarState {
    /// Message history (newest at back)
    pub messages: VecDeque<StatusMessage>,
    /// Maximum messages to keep
    pub max_history: usize,
}

impl Default for StatusBarState {
    fn default() -> Self {
        Self {
            messages: VecDeque::new(),
            max_history: 100,
        }
    }
}

impl StatusBarState {
    /// Get the latest message (if any)
    pub fn latest(&self) -> Option<&StatusMessage> {
        self.messages.back()
    }

    /// Push a new message, trimming oldest if over limit
    pub fn push(&mut self, message: StatusMessage) {
        self.messages.push_back(message);
        if self.messages.len() > self.max_history {
            self.messages.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_trims_oldest() {
        let mut status_bar = StatusBarState {
            max_history: 2,
            ..Default::default()
        };
        for text in ["one", "two", "three"] {
            status_bar.push(StatusMessage::from_task(&TaskStatus::info(text), "test"));
        }

        assert_eq!(status_bar.messages.len(), 2);
        assert_eq!(status_bar.messages.front().map(|m| m.message.as_str()), Some("two"));
        assert_eq!(status_bar.latest().map(|m| m.message.as_str()), Some("three"));
    }

    #[test]
    fn test_kind_follows_task_status() {
        let message = StatusMessage::from_task(&TaskStatus::error("boom"), "run");
        assert_eq!(message.kind, StatusKind::Error);
        assert_eq!(message.kind.emoji(), "🚨");
    }
}
