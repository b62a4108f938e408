//! Application state
//!
//! The single source of truth rendered by the views. Only the reducer
//! produces new states; middleware reads snapshots.

mod status_bar;

pub use status_bar::{StatusBarState, StatusKind, StatusMessage};

use gh_client::{Workflow, WorkflowRun};
use gh_workflow_sync::{RunHistory, SyncContext};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    /// Repository tabs, each bound to the branch it follows
    pub repositories: Vec<SyncContext>,
    pub selected_repository: usize,
    /// Latest snapshot published by the sync controller
    pub history: RunHistory,
    /// Manually triggerable workflows, keyed by repository
    pub workflows: HashMap<String, TriggerableWorkflows>,
    pub status_bar: StatusBarState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            running: true,
            repositories: Vec::new(),
            selected_repository: 0,
            history: RunHistory::default(),
            workflows: HashMap::new(),
            status_bar: StatusBarState::default(),
        }
    }
}

/// Triggerable workflows of one repository and the one picked for dispatch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerableWorkflows {
    pub workflows: Vec<Workflow>,
    pub selected: usize,
}

impl TriggerableWorkflows {
    pub fn new(workflows: Vec<Workflow>) -> Self {
        Self {
            workflows,
            selected: 0,
        }
    }

    pub fn selected(&self) -> Option<&Workflow> {
        self.workflows.get(self.selected)
    }

    /// Move the selection forward, wrapping around
    pub fn select_next(&mut self) {
        if !self.workflows.is_empty() {
            self.selected = (self.selected + 1) % self.workflows.len();
        }
    }
}

impl AppState {
    /// Context of the selected repository tab
    pub fn active_context(&self) -> Option<&SyncContext> {
        self.repositories.get(self.selected_repository)
    }

    /// Index of the tab `offset` steps away from the selected one, wrapping around
    pub fn repository_at_offset(&self, offset: isize) -> Option<usize> {
        let len = self.repositories.len() as isize;
        if len == 0 {
            return None;
        }
        Some((self.selected_repository as isize + offset).rem_euclid(len) as usize)
    }

    /// Selected run, provided the history on screen belongs to the active tab
    pub fn selected_run(&self) -> Option<(&SyncContext, &WorkflowRun)> {
        let context = self.active_context()?;
        if self.history.context.as_ref() != Some(context) {
            return None;
        }
        self.history.selected().map(|run| (context, run))
    }

    /// Triggerable workflows of the active repository, if classified yet
    pub fn active_workflows(&self) -> Option<&TriggerableWorkflows> {
        self.workflows.get(&self.active_context()?.repository)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(repositories: &[&str]) -> AppState {
        AppState {
            repositories: repositories
                .iter()
                .map(|repository| SyncContext::new(*repository, "main"))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_repository_offset_wraps() {
        let mut state = state_with(&["acme/a", "acme/b", "acme/c"]);
        assert_eq!(state.repository_at_offset(1), Some(1));
        assert_eq!(state.repository_at_offset(-1), Some(2));

        state.selected_repository = 2;
        assert_eq!(state.repository_at_offset(1), Some(0));
    }

    #[test]
    fn test_repository_offset_without_repositories() {
        assert_eq!(AppState::default().repository_at_offset(1), None);
    }

    #[test]
    fn test_selected_run_requires_matching_history() {
        let state = state_with(&["acme/a"]);
        assert!(state.selected_run().is_none());
    }
}
