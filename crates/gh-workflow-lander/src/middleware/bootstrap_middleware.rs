//! Bootstrap Middleware
//!
//! Validates the token and resolves the repository tabs once at startup.

use gh_client::GitHubClient;
use gh_workflow_sync::TaskStatus;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::actions::{Action, BootstrapAction, RepositoryAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::operations::{self, RepositorySource};
use crate::state::AppState;

const SOURCE: &str = "bootstrap";

pub struct BootstrapMiddleware {
    client: Arc<dyn GitHubClient>,
    runtime: Handle,
    source: RepositorySource,
}

impl BootstrapMiddleware {
    pub fn new(client: Arc<dyn GitHubClient>, runtime: Handle, source: RepositorySource) -> Self {
        Self {
            client,
            runtime,
            source,
        }
    }
}

impl Middleware for BootstrapMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, dispatcher: &Dispatcher) -> bool {
        if !matches!(action, Action::Bootstrap(BootstrapAction::Start)) {
            return true;
        }

        dispatcher.dispatch(Action::report(
            TaskStatus::running("Loading repositories..."),
            SOURCE,
        ));

        let client = self.client.clone();
        let source = self.source.clone();
        let dispatcher = dispatcher.clone();
        self.runtime.spawn(async move {
            match operations::load_contexts(client.as_ref(), &source).await {
                Ok(contexts) if contexts.is_empty() => {
                    dispatcher.dispatch(Action::report(
                        TaskStatus::info("No repositories found"),
                        SOURCE,
                    ));
                }
                Ok(contexts) => {
                    log::info!("Loaded {} repositories", contexts.len());
                    dispatcher.dispatch(Action::report(
                        TaskStatus::success(format!("Loaded {} repositories", contexts.len())),
                        SOURCE,
                    ));
                    dispatcher.dispatch(Action::Repository(RepositoryAction::Loaded(contexts)));
                }
                Err(err) => {
                    log::error!("Loading repositories failed: {}", err);
                    dispatcher.dispatch(Action::report(
                        TaskStatus::error(format!("Repositories cannot be listed: {}", err)),
                        SOURCE,
                    ));
                }
            }
        });

        false
    }
}
