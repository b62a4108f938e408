//! Run Middleware
//!
//! Executes operations on the selected run: open in browser, rerun, cancel
//! and log download. Each reports its own progress and outcome; mutations
//! raise the force-refresh signal once accepted.

use gh_client::GitHubClient;
use gh_workflow_sync::{ForceRefresh, TaskStatus, TaskStatusType};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;

use crate::actions::{Action, RunAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::operations::{self, RunOperation};
use crate::state::AppState;

const SOURCE: &str = "run";

pub struct RunMiddleware {
    client: Arc<dyn GitHubClient>,
    runtime: Handle,
    force_refresh: ForceRefresh,
    /// Directory log archives are saved to
    logs_dir: PathBuf,
}

impl RunMiddleware {
    pub fn new(
        client: Arc<dyn GitHubClient>,
        runtime: Handle,
        force_refresh: ForceRefresh,
        logs_dir: PathBuf,
    ) -> Self {
        Self {
            client,
            runtime,
            force_refresh,
            logs_dir,
        }
    }
}

impl Middleware for RunMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        let Action::Run(run_action) = action else {
            return true;
        };

        let Some((context, run)) = state.selected_run() else {
            dispatcher.dispatch(Action::report(TaskStatus::info("No run selected"), SOURCE));
            return false;
        };
        let repository = context.repository.clone();
        let run_id = run.id;
        let url = context.run_url(run_id);
        let dispatcher = dispatcher.clone();

        match *run_action {
            RunAction::OpenInBrowser => {
                dispatcher.dispatch(Action::report(operations::open_progress(), SOURCE));
                self.runtime.spawn(async move {
                    let status = operations::open_in_browser(&url).await;
                    dispatcher.dispatch(Action::report(status, SOURCE));
                });
            }
            RunAction::DownloadLogs => {
                dispatcher.dispatch(Action::report(operations::download_progress(), SOURCE));
                let client = self.client.clone();
                let dir = self.logs_dir.clone();
                self.runtime.spawn(async move {
                    let status =
                        operations::download_logs(client.as_ref(), &repository, run_id, &dir).await;
                    dispatcher.dispatch(Action::report(status, SOURCE));
                });
            }
            RunAction::RerunFailed | RunAction::Rerun | RunAction::Cancel => {
                let Some(operation) = RunOperation::from_action(*run_action) else {
                    return false;
                };
                dispatcher.dispatch(Action::report(operation.progress(), SOURCE));
                let client = self.client.clone();
                let force_refresh = self.force_refresh.clone();
                self.runtime.spawn(async move {
                    let status = operation.execute(client.as_ref(), &repository, run_id).await;
                    let accepted = status.status_type == TaskStatusType::Success;
                    dispatcher.dispatch(Action::report(status, SOURCE));
                    if accepted {
                        force_refresh.signal();
                    }
                });
            }
        }

        false
    }
}
