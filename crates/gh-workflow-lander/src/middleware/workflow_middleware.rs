//! Workflow Middleware
//!
//! Classifies the workflows of a repository the first time its tab becomes
//! active, and dispatches the selected triggerable workflow.

use gh_client::GitHubClient;
use gh_workflow_sync::{ForceRefresh, SyncContext, TaskStatus};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::actions::{Action, RepositoryAction, WorkflowAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::operations;
use crate::state::AppState;

const SOURCE: &str = "workflow";

pub struct WorkflowMiddleware {
    client: Arc<dyn GitHubClient>,
    runtime: Handle,
    force_refresh: ForceRefresh,
    /// JSON object sent as dispatch inputs
    inputs: String,
    /// Repositories classified or being classified; failures are removed
    requested: HashSet<String>,
}

impl WorkflowMiddleware {
    pub fn new(
        client: Arc<dyn GitHubClient>,
        runtime: Handle,
        force_refresh: ForceRefresh,
        inputs: String,
    ) -> Self {
        Self {
            client,
            runtime,
            force_refresh,
            inputs,
            requested: HashSet::new(),
        }
    }

    fn classify(&mut self, context: Option<&SyncContext>, dispatcher: &Dispatcher) {
        let Some(context) = context else {
            return;
        };
        if !self.requested.insert(context.repository.clone()) {
            return;
        }

        let client = self.client.clone();
        let repository = context.repository.clone();
        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            match gh_client::triggerable_workflows(client.as_ref(), &repository).await {
                Ok(workflows) => {
                    log::info!(
                        "{} has {} manually triggerable workflows",
                        repository,
                        workflows.len()
                    );
                    dispatcher.dispatch(Action::Workflow(WorkflowAction::Loaded {
                        repository,
                        workflows,
                    }));
                }
                Err(err) => {
                    log::error!("Classifying workflows of {} failed: {}", repository, err);
                    dispatcher.dispatch(Action::Workflow(WorkflowAction::Failed { repository }));
                    dispatcher.dispatch(Action::report(
                        TaskStatus::error(format!("Workflows cannot be listed: {}", err)),
                        SOURCE,
                    ));
                }
            }
        });
    }

    fn dispatch_selected(&self, state: &AppState, dispatcher: &Dispatcher) {
        let Some(context) = state.active_context().cloned() else {
            return;
        };
        let Some(workflow) = state
            .active_workflows()
            .and_then(|workflows| workflows.selected())
            .cloned()
        else {
            dispatcher.dispatch(Action::report(
                TaskStatus::info(format!(
                    "No manually triggerable workflow in {}",
                    context.repository
                )),
                SOURCE,
            ));
            return;
        };

        dispatcher.dispatch(Action::report(
            operations::dispatch_progress(&workflow, &context),
            SOURCE,
        ));

        let client = self.client.clone();
        let inputs = self.inputs.clone();
        let force_refresh = self.force_refresh.clone();
        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            let status =
                operations::dispatch_workflow(client.as_ref(), &context, &workflow, &inputs).await;
            let succeeded = status.status_type == gh_workflow_sync::TaskStatusType::Success;
            dispatcher.dispatch(Action::report(status, SOURCE));
            if succeeded {
                force_refresh.signal();
            }
        });
    }
}

impl Middleware for WorkflowMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        match action {
            Action::Repository(RepositoryAction::Loaded(contexts)) => {
                self.classify(contexts.first(), dispatcher);
            }
            Action::Repository(RepositoryAction::Next) => {
                let target = state.repository_at_offset(1);
                self.classify(target.and_then(|i| state.repositories.get(i)), dispatcher);
            }
            Action::Repository(RepositoryAction::Previous) => {
                let target = state.repository_at_offset(-1);
                self.classify(target.and_then(|i| state.repositories.get(i)), dispatcher);
            }
            Action::Workflow(WorkflowAction::Failed { repository }) => {
                self.requested.remove(repository);
            }
            Action::Workflow(WorkflowAction::Dispatch) => {
                self.dispatch_selected(state, dispatcher);
                return false;
            }
            _ => {}
        }

        true
    }
}
