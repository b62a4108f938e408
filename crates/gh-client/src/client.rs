//! GitHub client trait
//!
//! This module defines the core `GitHubClient` trait: the typed operations
//! the application performs against GitHub Actions. Implementations translate
//! each operation into a request; they hold no state between calls.

use crate::error::Result;
use crate::types::{Branch, Repository, RunLogs, Workflow, WorkflowRun};
use async_trait::async_trait;

/// Page size used by [`GitHubClient::list_repositories`] when none is given
pub const DEFAULT_REPOSITORY_LIMIT: u32 = 200;

/// GitHub Actions API client trait
///
/// Repository arguments are `owner/name` strings. They are not validated;
/// a malformed identifier surfaces as the service's rejection.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
///
/// # Example
///
/// ```rust,ignore
/// use gh_client::GitHubClient;
///
/// async fn latest_run(client: &dyn GitHubClient) -> gh_client::Result<Option<u64>> {
///     let runs = client.list_workflow_runs("acme/widgets", "main").await?;
///     Ok(runs.first().map(|run| run.id))
/// }
/// ```
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Check that the configured token can list the user's repositories
    async fn test_connection(&self) -> Result<()>;

    /// List private repositories of the authenticated user
    ///
    /// # Arguments
    ///
    /// * `limit` - Page size; [`DEFAULT_REPOSITORY_LIMIT`] when `None` or zero
    async fn list_repositories(&self, limit: Option<u32>) -> Result<Vec<Repository>>;

    /// List branches of a repository
    ///
    /// The branch list is fetched, but the result is currently always
    /// empty; callers fall back to the repository's default branch.
    async fn list_branches(&self, repository: &str) -> Result<Vec<Branch>>;

    /// Fetch a single repository
    async fn get_repository(&self, repository: &str) -> Result<Repository>;

    /// List workflow runs of a branch, newest first as served by the API
    async fn list_workflow_runs(&self, repository: &str, branch: &str)
        -> Result<Vec<WorkflowRun>>;

    /// Dispatch a workflow run
    ///
    /// # Arguments
    ///
    /// * `repository` - Repository (`owner/name`)
    /// * `branch` - Git ref the run is created for
    /// * `workflow_file` - Definition path or file name; only the file name is used
    /// * `inputs` - Pre-serialized JSON object embedded verbatim in the payload
    async fn trigger_workflow(
        &self,
        repository: &str,
        branch: &str,
        workflow_file: &str,
        inputs: &str,
    ) -> Result<()>;

    /// List every workflow definition declared in a repository
    async fn list_workflows(&self, repository: &str) -> Result<Vec<Workflow>>;

    /// Fetch the decoded text of a file, optionally pinned to a branch or ref
    async fn fetch_workflow_file(
        &self,
        repository: &str,
        path: &str,
        branch: Option<&str>,
    ) -> Result<String>;

    /// Download the log archive of a run
    async fn fetch_run_logs(&self, repository: &str, run_id: u64) -> Result<RunLogs>;

    /// Rerun only the failed jobs of a run
    async fn rerun_failed_jobs(&self, repository: &str, run_id: u64) -> Result<()>;

    /// Rerun every job of a run
    async fn rerun_workflow(&self, repository: &str, run_id: u64) -> Result<()>;

    /// Cancel a run
    async fn cancel_run(&self, repository: &str, run_id: u64) -> Result<()>;
}
