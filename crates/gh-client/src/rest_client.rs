//! REST implementation of the `GitHubClient` trait
//!
//! Each operation only decides path, query, content negotiation and body;
//! everything else is the transport's job.

use crate::client::{GitHubClient, DEFAULT_REPOSITORY_LIMIT};
use crate::error::Result;
use crate::transport::{ApiRequest, Transport, GITHUB_JSON, JSON, RAW_CONTENT};
use crate::types::{
    base_name, Branch, FileContent, Repository, RunLogs, Workflow, WorkflowList, WorkflowRun,
    WorkflowRunList,
};
use async_trait::async_trait;
use base64::Engine;
use log::debug;

/// Direct GitHub API client
///
/// Stateless: every call is a single request through the [`Transport`].
#[derive(Debug, Clone)]
pub struct RestClient {
    transport: Transport,
}

impl RestClient {
    /// Create a new client on top of the given transport
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    fn run_action(repository: &str, run_id: u64, action: &str) -> ApiRequest {
        ApiRequest::post(format!(
            "/repos/{}/actions/runs/{}/{}",
            repository, run_id, action
        ))
        .content_type(JSON)
    }
}

/// Build the payload of a workflow dispatch
///
/// `inputs` is spliced in as-is; it must already be a JSON object.
pub fn dispatch_payload(branch: &str, inputs: &str) -> String {
    format!(r#"{{"ref": "{}", "inputs": {}}}"#, branch, inputs)
}

/// Decode Base64 file content as served by the contents endpoint
///
/// The API wraps the encoded text with newlines, which are ignored.
pub fn decode_file_content(content: &str) -> Result<String> {
    let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[async_trait]
impl GitHubClient for RestClient {
    async fn test_connection(&self) -> Result<()> {
        let _: Vec<Repository> = self
            .transport
            .execute_json(
                ApiRequest::get("/user/repos")
                    .content_type(JSON)
                    .query("visibility", "all"),
            )
            .await?;
        Ok(())
    }

    async fn list_repositories(&self, limit: Option<u32>) -> Result<Vec<Repository>> {
        let limit = match limit {
            Some(0) | None => DEFAULT_REPOSITORY_LIMIT,
            Some(limit) => limit,
        };
        debug!("Listing up to {} private repositories", limit);

        self.transport
            .execute_json(
                ApiRequest::get("/user/repos")
                    .content_type(JSON)
                    .query("visibility", "private")
                    .query("per_page", limit.to_string()),
            )
            .await
    }

    async fn list_branches(&self, repository: &str) -> Result<Vec<Branch>> {
        let _: serde_json::Value = self
            .transport
            .execute_json(
                ApiRequest::get(format!("/repos/{}/branches", repository)).content_type(JSON),
            )
            .await?;

        // Fetched for its error behavior only; callers use the default branch
        // TODO: map the payload once branch selection lands in the UI
        Ok(Vec::new())
    }

    async fn get_repository(&self, repository: &str) -> Result<Repository> {
        self.transport
            .execute_json(ApiRequest::get(format!("/repos/{}", repository)).content_type(JSON))
            .await
    }

    async fn list_workflow_runs(
        &self,
        repository: &str,
        branch: &str,
    ) -> Result<Vec<WorkflowRun>> {
        let list: WorkflowRunList = self
            .transport
            .execute_json(
                ApiRequest::get(format!("/repos/{}/actions/runs", repository))
                    .content_type(JSON)
                    .query("branch", branch),
            )
            .await?;

        debug!(
            "Fetched {} of {} runs for {}@{}",
            list.workflow_runs.len(),
            list.total_count,
            repository,
            branch
        );
        Ok(list.workflow_runs)
    }

    async fn trigger_workflow(
        &self,
        repository: &str,
        branch: &str,
        workflow_file: &str,
        inputs: &str,
    ) -> Result<()> {
        let path = format!(
            "/repos/{}/actions/workflows/{}/dispatches",
            repository,
            base_name(workflow_file)
        );
        debug!("Dispatching {} on {}@{}", workflow_file, repository, branch);

        self.transport
            .execute_unit(
                ApiRequest::post(path)
                    .accept(GITHUB_JSON)
                    .text_body(dispatch_payload(branch, inputs)),
            )
            .await
    }

    async fn list_workflows(&self, repository: &str) -> Result<Vec<Workflow>> {
        let list: WorkflowList = self
            .transport
            .execute_json(
                ApiRequest::get(format!("/repos/{}/actions/workflows", repository))
                    .content_type(JSON),
            )
            .await?;
        Ok(list.workflows)
    }

    async fn fetch_workflow_file(
        &self,
        repository: &str,
        path: &str,
        branch: Option<&str>,
    ) -> Result<String> {
        let mut request = ApiRequest::get(format!("/repos/{}/contents/{}", repository, path))
            .content_type(RAW_CONTENT);
        if let Some(branch) = branch {
            request = request.query("ref", branch);
        }

        let file: FileContent = self.transport.execute_json(request).await?;
        decode_file_content(&file.content)
    }

    async fn fetch_run_logs(&self, repository: &str, run_id: u64) -> Result<RunLogs> {
        let archive = self
            .transport
            .execute(
                ApiRequest::get(format!(
                    "/repos/{}/actions/runs/{}/logs",
                    repository, run_id
                ))
                .content_type(JSON),
            )
            .await?;
        Ok(RunLogs { archive })
    }

    async fn rerun_failed_jobs(&self, repository: &str, run_id: u64) -> Result<()> {
        self.transport
            .execute_unit(Self::run_action(repository, run_id, "rerun-failed-jobs"))
            .await
    }

    async fn rerun_workflow(&self, repository: &str, run_id: u64) -> Result<()> {
        self.transport
            .execute_unit(Self::run_action(repository, run_id, "rerun"))
            .await
    }

    async fn cancel_run(&self, repository: &str, run_id: u64) -> Result<()> {
        self.transport
            .execute_unit(Self::run_action(repository, run_id, "cancel"))
            .await
    }
}
