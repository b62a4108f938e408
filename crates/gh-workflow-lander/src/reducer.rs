use crate::actions::{
    Action, GlobalAction, HistoryAction, RepositoryAction, StatusBarAction, WorkflowAction,
};
use crate::state::{AppState, StatusMessage, TriggerableWorkflows};
use gh_workflow_sync::RunHistory;

/// Reducer - pure function that produces new state from current state + action
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(GlobalAction::Quit) => {
            state.running = false;
        }
        Action::Repository(action) => reduce_repository(&mut state, action),
        Action::History(HistoryAction::Updated(history)) => reduce_history(&mut state, history),
        Action::Workflow(action) => reduce_workflow(&mut state, action),
        Action::StatusBar(StatusBarAction::Report { status, source }) => {
            state.status_bar.push(StatusMessage::from_task(status, source));
        }
        // Side effects only, handled by middleware
        Action::Bootstrap(_) | Action::History(_) | Action::Run(_) => {}
    }

    state
}

fn reduce_repository(state: &mut AppState, action: &RepositoryAction) {
    match action {
        RepositoryAction::Loaded(repositories) => {
            state.repositories = repositories.clone();
            state.selected_repository = 0;
        }
        RepositoryAction::Next => {
            if let Some(index) = state.repository_at_offset(1) {
                state.selected_repository = index;
            }
        }
        RepositoryAction::Previous => {
            if let Some(index) = state.repository_at_offset(-1) {
                state.selected_repository = index;
            }
        }
    }
}

fn reduce_history(state: &mut AppState, history: &RunHistory) {
    // Cursor moves republish the same status; only show changes
    if history.status != state.history.status {
        if let Some(status) = &history.status {
            state
                .status_bar
                .push(StatusMessage::from_task(status, "history"));
        }
    }
    state.history = history.clone();
}

fn reduce_workflow(state: &mut AppState, action: &WorkflowAction) {
    match action {
        WorkflowAction::Loaded {
            repository,
            workflows,
        } => {
            state.workflows.insert(
                repository.clone(),
                TriggerableWorkflows::new(workflows.clone()),
            );
        }
        WorkflowAction::SelectNext => {
            let repository = state.active_context().map(|c| c.repository.clone());
            if let Some(workflows) = repository.and_then(|r| state.workflows.get_mut(&r)) {
                workflows.select_next();
            }
        }
        WorkflowAction::Dispatch | WorkflowAction::Failed { .. } => {}
    }
}
