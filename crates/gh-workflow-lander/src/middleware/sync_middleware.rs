//! Sync Middleware
//!
//! Bridges the UI to the sync controller: publishes the active context on
//! the change channel and forwards refresh and cursor requests.

use gh_workflow_sync::{SyncContext, SyncController};
use tokio::sync::watch;

use crate::actions::{Action, HistoryAction, RepositoryAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

pub struct SyncMiddleware {
    controller: SyncController,
    contexts: watch::Sender<Option<SyncContext>>,
}

impl SyncMiddleware {
    pub fn new(controller: SyncController, contexts: watch::Sender<Option<SyncContext>>) -> Self {
        Self {
            controller,
            contexts,
        }
    }

    fn publish(&self, context: Option<&SyncContext>) {
        if let Some(context) = context {
            self.contexts.send_replace(Some(context.clone()));
        }
    }
}

impl Middleware for SyncMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, _dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Repository(RepositoryAction::Loaded(contexts)) => {
                self.publish(contexts.first());
            }
            Action::Repository(RepositoryAction::Next) => {
                self.publish(state.repository_at_offset(1).and_then(|i| state.repositories.get(i)));
            }
            Action::Repository(RepositoryAction::Previous) => {
                self.publish(state.repository_at_offset(-1).and_then(|i| state.repositories.get(i)));
            }
            Action::History(HistoryAction::Refresh) => {
                if !self.controller.refresh() {
                    log::debug!("Nothing to refresh yet");
                }
                return false;
            }
            Action::History(HistoryAction::NavigateNext) => {
                self.controller.select_next();
                return false;
            }
            Action::History(HistoryAction::NavigatePrevious) => {
                self.controller.select_previous();
                return false;
            }
            _ => {}
        }

        true
    }
}
