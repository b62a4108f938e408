//! Task Status model
//!
//! Status messages published for the presentation layer.

/// Status of a background task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStatus {
    /// Status message
    pub message: String,
    /// Type of status
    pub status_type: TaskStatusType,
}

impl TaskStatus {
    /// Create a new running task status
    pub fn running(message: impl Into<String>) -> Self {
        Self::new(message, TaskStatusType::Running)
    }

    /// Create a new success task status
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, TaskStatusType::Success)
    }

    /// Create a new error task status
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, TaskStatusType::Error)
    }

    /// Create a new informational status
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, TaskStatusType::Info)
    }

    fn new(message: impl Into<String>, status_type: TaskStatusType) -> Self {
        Self {
            message: message.into(),
            status_type,
        }
    }
}

/// Type of task status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatusType {
    /// Task is running
    Running,
    /// Task completed successfully
    Success,
    /// Task failed with an error
    Error,
    /// Nothing went wrong, but there is nothing to show either
    Info,
}
