//! Command identifiers
//!
//! Commands are the semantic actions users can trigger. Each command
//! has a unique ID that can be referenced in keybindings and hints.
//!
//! The enum is serialized as snake_case (e.g., `RunRerunFailed` -> `"run_rerun_failed"`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandId {
    // === Navigation ===
    /// Select the next run
    NavigateNext,
    /// Select the previous run
    NavigatePrevious,

    // === Repository ===
    /// Switch to the next repository tab
    RepositoryNext,
    /// Switch to the previous repository tab
    RepositoryPrevious,

    // === History ===
    /// Refresh the run history now
    HistoryRefresh,

    // === Run operations ===
    /// Open the selected run in the browser
    RunOpenInBrowser,
    /// Rerun the failed jobs of the selected run
    RunRerunFailed,
    /// Rerun every job of the selected run
    RunRerun,
    /// Cancel the selected run
    RunCancel,
    /// Download the log archive of the selected run
    RunDownloadLogs,

    // === Workflow dispatch ===
    /// Select the next manually triggerable workflow
    WorkflowSelectNext,
    /// Dispatch the selected workflow on the active branch
    WorkflowDispatch,

    // === General ===
    GlobalQuit,
}

impl CommandId {
    /// Short description shown in the key hints line
    pub fn title(&self) -> &'static str {
        match self {
            Self::NavigateNext => "next run",
            Self::NavigatePrevious => "previous run",
            Self::RepositoryNext => "next repository",
            Self::RepositoryPrevious => "previous repository",
            Self::HistoryRefresh => "refresh",
            Self::RunOpenInBrowser => "open",
            Self::RunRerunFailed => "rerun failed",
            Self::RunRerun => "rerun",
            Self::RunCancel => "cancel",
            Self::RunDownloadLogs => "logs",
            Self::WorkflowSelectNext => "next workflow",
            Self::WorkflowDispatch => "dispatch",
            Self::GlobalQuit => "quit",
        }
    }
}
