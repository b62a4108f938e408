//! Side effects behind the run and workflow actions
//!
//! Each operation returns the [`TaskStatus`] to show when it finishes; the
//! middleware reports the progress message before spawning it. Failures are
//! reported here and never touch the run history.

use gh_client::{GitHubClient, Workflow};
use gh_workflow_config::AppConfig;
use gh_workflow_sync::{SyncContext, TaskStatus};
use std::path::{Path, PathBuf};

use crate::actions::RunAction;
use crate::utils::browser;

/// Where the repository tabs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositorySource {
    /// Pinned repositories; the user's repositories are listed when empty
    pub repositories: Vec<String>,
    /// Branch followed instead of each repository's default branch
    pub branch: Option<String>,
    /// Page size for listing the user's repositories
    pub limit: u32,
}

impl RepositorySource {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            repositories: config.repositories.clone(),
            branch: config.branch.clone(),
            limit: config.repository_limit,
        }
    }
}

/// Validate the token, then resolve every repository tab to a sync context
pub async fn load_contexts(
    client: &dyn GitHubClient,
    source: &RepositorySource,
) -> gh_client::Result<Vec<SyncContext>> {
    client.test_connection().await?;

    if source.repositories.is_empty() {
        let repositories = client.list_repositories(Some(source.limit)).await?;
        return Ok(repositories
            .into_iter()
            .map(|repo| {
                let branch = source.branch.clone().unwrap_or(repo.default_branch);
                SyncContext::new(repo.full_name, branch)
            })
            .collect());
    }

    let mut contexts = Vec::with_capacity(source.repositories.len());
    for repository in &source.repositories {
        let branch = match &source.branch {
            Some(branch) => branch.clone(),
            None => client.get_repository(repository).await?.default_branch,
        };
        contexts.push(SyncContext::new(repository.as_str(), branch));
    }
    Ok(contexts)
}

/// Mutating operations on a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOperation {
    RerunFailed,
    Rerun,
    Cancel,
}

impl RunOperation {
    pub fn from_action(action: RunAction) -> Option<Self> {
        match action {
            RunAction::RerunFailed => Some(Self::RerunFailed),
            RunAction::Rerun => Some(Self::Rerun),
            RunAction::Cancel => Some(Self::Cancel),
            RunAction::OpenInBrowser | RunAction::DownloadLogs => None,
        }
    }

    pub fn progress(&self) -> TaskStatus {
        TaskStatus::running(match self {
            Self::RerunFailed => "Re-running failed jobs...",
            Self::Rerun => "Re-running workflow...",
            Self::Cancel => "Canceling workflow...",
        })
    }

    fn succeeded(&self) -> TaskStatus {
        TaskStatus::success(match self {
            Self::RerunFailed => "Re-ran failed jobs",
            Self::Rerun => "Re-ran workflow",
            Self::Cancel => "Canceled workflow",
        })
    }

    fn failed(&self, err: &gh_client::ClientError) -> TaskStatus {
        let message = match self {
            Self::RerunFailed => "Failed to re-run failed jobs",
            Self::Rerun => "Failed to re-run workflow",
            Self::Cancel => "Failed to cancel workflow",
        };
        TaskStatus::error(format!("{}: {}", message, err))
    }

    /// Issue the request; completion of the run itself is not awaited
    pub async fn execute(
        self,
        client: &dyn GitHubClient,
        repository: &str,
        run_id: u64,
    ) -> TaskStatus {
        let result = match self {
            Self::RerunFailed => client.rerun_failed_jobs(repository, run_id).await,
            Self::Rerun => client.rerun_workflow(repository, run_id).await,
            Self::Cancel => client.cancel_run(repository, run_id).await,
        };

        match result {
            Ok(()) => {
                log::info!("{:?} of run {} in {} requested", self, run_id, repository);
                self.succeeded()
            }
            Err(err) => {
                log::error!("{:?} of run {} in {} failed: {}", self, run_id, repository, err);
                self.failed(&err)
            }
        }
    }
}

pub fn open_progress() -> TaskStatus {
    TaskStatus::running("Opening in browser...")
}

/// Open a run's page with the system browser
pub async fn open_in_browser(url: &str) -> TaskStatus {
    match browser::open_url(url).await {
        Ok(()) => TaskStatus::success("Opened in browser"),
        Err(err) => {
            log::error!("Failed to open {} in browser: {}", url, err);
            TaskStatus::error("Failed to open in browser")
        }
    }
}

pub fn dispatch_progress(workflow: &Workflow, context: &SyncContext) -> TaskStatus {
    TaskStatus::running(format!(
        "Dispatching {} on {}...",
        workflow.name, context.branch
    ))
}

/// Request a new run of `workflow` on the context's branch
pub async fn dispatch_workflow(
    client: &dyn GitHubClient,
    context: &SyncContext,
    workflow: &Workflow,
    inputs: &str,
) -> TaskStatus {
    match client
        .trigger_workflow(&context.repository, &context.branch, &workflow.path, inputs)
        .await
    {
        Ok(()) => {
            log::info!("Dispatched {} on {}", workflow.path, context);
            TaskStatus::success(format!("Dispatched {} on {}", workflow.name, context.branch))
        }
        Err(err) => {
            log::error!("Dispatching {} on {} failed: {}", workflow.path, context, err);
            TaskStatus::error(format!("Failed to dispatch {}: {}", workflow.name, err))
        }
    }
}

/// File the log archive of a run is saved to
pub fn logs_path(dir: &Path, repository: &str, run_id: u64) -> PathBuf {
    dir.join(format!(
        "{}-run-{}-logs.zip",
        repository.replace('/', "-"),
        run_id
    ))
}

pub fn download_progress() -> TaskStatus {
    TaskStatus::running("Downloading logs...")
}

/// Download a run's log archive into `dir`
pub async fn download_logs(
    client: &dyn GitHubClient,
    repository: &str,
    run_id: u64,
    dir: &Path,
) -> TaskStatus {
    let logs = match client.fetch_run_logs(repository, run_id).await {
        Ok(logs) => logs,
        Err(err) => {
            log::error!("Fetching logs of run {} failed: {}", run_id, err);
            return TaskStatus::error(format!("Failed to download logs: {}", err));
        }
    };

    let path = logs_path(dir, repository, run_id);
    match tokio::fs::write(&path, &logs.archive).await {
        Ok(()) => {
            log::info!("Saved {} bytes of logs to {}", logs.len(), path.display());
            TaskStatus::success(format!("Saved logs to {}", path.display()))
        }
        Err(err) => {
            log::error!("Writing {} failed: {}", path.display(), err);
            TaskStatus::error(format!("Failed to save logs: {}", err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repository, workflow, FakeClient};
    use gh_client::ClientError;
    use gh_workflow_sync::TaskStatusType;
    use pretty_assertions::assert_eq;

    fn source(repositories: &[&str], branch: Option<&str>) -> RepositorySource {
        RepositorySource {
            repositories: repositories.iter().map(|r| r.to_string()).collect(),
            branch: branch.map(str::to_string),
            limit: 200,
        }
    }

    #[tokio::test]
    async fn test_listed_repositories_follow_default_branch() {
        let client = FakeClient {
            repositories: vec![
                repository("acme/widgets", "main"),
                repository("acme/gadgets", "trunk"),
            ],
            ..Default::default()
        };

        let contexts = load_contexts(&client, &source(&[], None)).await.unwrap();

        assert_eq!(
            contexts,
            vec![
                SyncContext::new("acme/widgets", "main"),
                SyncContext::new("acme/gadgets", "trunk"),
            ]
        );
        assert_eq!(
            client.calls(),
            vec!["test_connection", "list_repositories Some(200)"]
        );
    }

    #[tokio::test]
    async fn test_configured_branch_overrides_default() {
        let client = FakeClient {
            repositories: vec![repository("acme/widgets", "main")],
            ..Default::default()
        };

        let contexts = load_contexts(&client, &source(&[], Some("release")))
            .await
            .unwrap();
        assert_eq!(contexts, vec![SyncContext::new("acme/widgets", "release")]);
    }

    #[tokio::test]
    async fn test_pinned_repositories_are_looked_up() {
        let client = FakeClient {
            repositories: vec![repository("acme/widgets", "main")],
            ..Default::default()
        };

        let contexts = load_contexts(&client, &source(&["acme/widgets"], None))
            .await
            .unwrap();
        assert_eq!(contexts, vec![SyncContext::new("acme/widgets", "main")]);

        let missing = load_contexts(&client, &source(&["acme/ghost"], None)).await;
        assert_eq!(missing, Err(ClientError::remote(404, "Not Found")));
    }

    #[tokio::test]
    async fn test_run_operation_messages() {
        let client = FakeClient::default();

        let status = RunOperation::RerunFailed.execute(&client, "acme/widgets", 7).await;
        assert_eq!(status, TaskStatus::success("Re-ran failed jobs"));
        let status = RunOperation::Rerun.execute(&client, "acme/widgets", 7).await;
        assert_eq!(status, TaskStatus::success("Re-ran workflow"));
        let status = RunOperation::Cancel.execute(&client, "acme/widgets", 7).await;
        assert_eq!(status, TaskStatus::success("Canceled workflow"));

        assert_eq!(
            client.calls(),
            vec![
                "rerun_failed_jobs acme/widgets 7",
                "rerun_workflow acme/widgets 7",
                "cancel_run acme/widgets 7",
            ]
        );
        assert_eq!(
            RunOperation::Cancel.progress(),
            TaskStatus::running("Canceling workflow...")
        );
    }

    #[tokio::test]
    async fn test_run_operation_failure_is_reported() {
        let client = FakeClient {
            failure: Some(ClientError::remote(409, "Cannot cancel a workflow run that is completed.")),
            ..Default::default()
        };

        let status = RunOperation::Cancel.execute(&client, "acme/widgets", 7).await;
        assert_eq!(status.status_type, TaskStatusType::Error);
        assert_eq!(
            status.message,
            "Failed to cancel workflow: Cannot cancel a workflow run that is completed."
        );
    }

    #[test]
    fn test_only_mutations_map_to_run_operations() {
        assert_eq!(RunOperation::from_action(RunAction::Rerun), Some(RunOperation::Rerun));
        assert_eq!(RunOperation::from_action(RunAction::OpenInBrowser), None);
        assert_eq!(RunOperation::from_action(RunAction::DownloadLogs), None);
    }

    #[tokio::test]
    async fn test_dispatch_sends_definition_path_and_inputs() {
        let client = FakeClient::default();
        let context = SyncContext::new("acme/widgets", "main");
        let deploy = workflow(1, "Deploy", ".github/workflows/deploy.yml");

        let status = dispatch_workflow(&client, &context, &deploy, r#"{"env":"prod"}"#).await;

        assert_eq!(status, TaskStatus::success("Dispatched Deploy on main"));
        assert_eq!(
            client.calls(),
            vec![r#"trigger_workflow acme/widgets main .github/workflows/deploy.yml {"env":"prod"}"#]
        );
    }

    #[tokio::test]
    async fn test_dispatch_rejection_is_reported() {
        let client = FakeClient {
            failure: Some(ClientError::remote(404, "Not Found")),
            ..Default::default()
        };
        let context = SyncContext::new("acme/widgets", "main");
        let ghost = workflow(9, "Ghost", ".github/workflows/ghost.yml");

        let status = dispatch_workflow(&client, &context, &ghost, "{}").await;
        assert_eq!(status, TaskStatus::error("Failed to dispatch Ghost: Not Found"));
    }

    #[test]
    fn test_logs_path() {
        assert_eq!(
            logs_path(Path::new("/tmp"), "acme/widgets", 42),
            PathBuf::from("/tmp/acme-widgets-run-42-logs.zip")
        );
    }

    #[tokio::test]
    async fn test_download_logs_writes_archive() {
        let client = FakeClient {
            logs: b"PK\x03\x04".to_vec(),
            ..Default::default()
        };
        let dir = std::env::temp_dir();

        let status = download_logs(&client, "acme/download-test", 4242, &dir).await;

        let path = logs_path(&dir, "acme/download-test", 4242);
        assert_eq!(status.status_type, TaskStatusType::Success);
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04".to_vec());
        std::fs::remove_file(path).unwrap();
    }
}
