//! Actions represent all possible state changes in the application.
//! Actions are grouped by scope to indicate which part of the app they affect.

use gh_client::Workflow;
use gh_workflow_sync::{RunHistory, SyncContext, TaskStatus};

use crate::command_id::CommandId;

#[derive(Debug, Clone)]
pub enum Action {
    Global(GlobalAction),
    Bootstrap(BootstrapAction),
    Repository(RepositoryAction),
    History(HistoryAction),
    Run(RunAction),
    Workflow(WorkflowAction),
    StatusBar(StatusBarAction),
}

#[derive(Debug, Clone)]
pub enum GlobalAction {
    Quit,
}

#[derive(Debug, Clone)]
pub enum BootstrapAction {
    /// Validate the token and load the repositories to show
    Start,
}

#[derive(Debug, Clone)]
pub enum RepositoryAction {
    /// Repositories resolved to their sync contexts, in tab order
    Loaded(Vec<SyncContext>),
    Next,
    Previous,
}

#[derive(Debug, Clone)]
pub enum HistoryAction {
    Refresh,
    NavigateNext,
    NavigatePrevious,
    /// A new snapshot was published by the sync controller
    Updated(RunHistory),
}

/// Operations on the selected run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunAction {
    OpenInBrowser,
    RerunFailed,
    Rerun,
    Cancel,
    DownloadLogs,
}

#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Manually triggerable workflows of a repository were classified
    Loaded {
        repository: String,
        workflows: Vec<Workflow>,
    },
    /// Classification of a repository failed; it may be retried
    Failed { repository: String },
    SelectNext,
    Dispatch,
}

#[derive(Debug, Clone)]
pub enum StatusBarAction {
    /// Report progress or the outcome of an operation
    Report { status: TaskStatus, source: String },
}

impl Action {
    /// Action triggered by a bound command
    pub fn from_command(command: CommandId) -> Self {
        match command {
            CommandId::NavigateNext => Action::History(HistoryAction::NavigateNext),
            CommandId::NavigatePrevious => Action::History(HistoryAction::NavigatePrevious),
            CommandId::RepositoryNext => Action::Repository(RepositoryAction::Next),
            CommandId::RepositoryPrevious => Action::Repository(RepositoryAction::Previous),
            CommandId::HistoryRefresh => Action::History(HistoryAction::Refresh),
            CommandId::RunOpenInBrowser => Action::Run(RunAction::OpenInBrowser),
            CommandId::RunRerunFailed => Action::Run(RunAction::RerunFailed),
            CommandId::RunRerun => Action::Run(RunAction::Rerun),
            CommandId::RunCancel => Action::Run(RunAction::Cancel),
            CommandId::RunDownloadLogs => Action::Run(RunAction::DownloadLogs),
            CommandId::WorkflowSelectNext => Action::Workflow(WorkflowAction::SelectNext),
            CommandId::WorkflowDispatch => Action::Workflow(WorkflowAction::Dispatch),
            CommandId::GlobalQuit => Action::Global(GlobalAction::Quit),
        }
    }

    /// Status report attributed to `source`
    pub fn report(status: TaskStatus, source: impl Into<String>) -> Self {
        Action::StatusBar(StatusBarAction::Report {
            status,
            source: source.into(),
        })
    }
}
