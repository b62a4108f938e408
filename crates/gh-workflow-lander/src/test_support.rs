//! In-memory GitHub client for tests

use async_trait::async_trait;
use gh_client::{
    Branch, ClientError, GitHubClient, Repository, Result, RunLogs, Workflow, WorkflowRun,
};
use std::collections::HashMap;
use std::sync::Mutex;

/// Records every call and answers from canned data
#[derive(Default)]
pub struct FakeClient {
    pub repositories: Vec<Repository>,
    pub workflows: Vec<Workflow>,
    /// Definition file contents by path
    pub files: HashMap<String, String>,
    pub logs: Vec<u8>,
    /// When set, every mutating call fails with this error
    pub failure: Option<ClientError>,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn mutation(&self, call: String) -> Result<()> {
        self.record(call);
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

pub fn repository(full_name: &str, default_branch: &str) -> Repository {
    Repository {
        id: 1,
        name: full_name.rsplit('/').next().unwrap_or(full_name).to_string(),
        full_name: full_name.to_string(),
        private: true,
        visibility: Some("private".to_string()),
        default_branch: default_branch.to_string(),
        html_url: format!("https://github.com/{}", full_name),
    }
}

pub fn workflow(id: u64, name: &str, path: &str) -> Workflow {
    Workflow {
        id,
        name: name.to_string(),
        path: path.to_string(),
        state: "active".to_string(),
        url: String::new(),
        html_url: String::new(),
    }
}

#[async_trait]
impl GitHubClient for FakeClient {
    async fn test_connection(&self) -> Result<()> {
        self.record("test_connection".to_string());
        Ok(())
    }

    async fn list_repositories(&self, limit: Option<u32>) -> Result<Vec<Repository>> {
        self.record(format!("list_repositories {:?}", limit));
        Ok(self.repositories.clone())
    }

    async fn list_branches(&self, repository: &str) -> Result<Vec<Branch>> {
        self.record(format!("list_branches {}", repository));
        Ok(Vec::new())
    }

    async fn get_repository(&self, repository: &str) -> Result<Repository> {
        self.record(format!("get_repository {}", repository));
        self.repositories
            .iter()
            .find(|repo| repo.full_name == repository)
            .cloned()
            .ok_or_else(|| ClientError::remote(404, "Not Found"))
    }

    async fn list_workflow_runs(&self, repository: &str, branch: &str) -> Result<Vec<WorkflowRun>> {
        self.record(format!("list_workflow_runs {}@{}", repository, branch));
        Ok(Vec::new())
    }

    async fn trigger_workflow(
        &self,
        repository: &str,
        branch: &str,
        workflow_file: &str,
        inputs: &str,
    ) -> Result<()> {
        self.mutation(format!(
            "trigger_workflow {} {} {} {}",
            repository, branch, workflow_file, inputs
        ))
    }

    async fn list_workflows(&self, repository: &str) -> Result<Vec<Workflow>> {
        self.record(format!("list_workflows {}", repository));
        Ok(self.workflows.clone())
    }

    async fn fetch_workflow_file(
        &self,
        _repository: &str,
        path: &str,
        _branch: Option<&str>,
    ) -> Result<String> {
        self.record(format!("fetch_workflow_file {}", path));
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| ClientError::remote(404, "Not Found"))
    }

    async fn fetch_run_logs(&self, repository: &str, run_id: u64) -> Result<RunLogs> {
        self.record(format!("fetch_run_logs {} {}", repository, run_id));
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(RunLogs::new(self.logs.clone())),
        }
    }

    async fn rerun_failed_jobs(&self, repository: &str, run_id: u64) -> Result<()> {
        self.mutation(format!("rerun_failed_jobs {} {}", repository, run_id))
    }

    async fn rerun_workflow(&self, repository: &str, run_id: u64) -> Result<()> {
        self.mutation(format!("rerun_workflow {} {}", repository, run_id))
    }

    async fn cancel_run(&self, repository: &str, run_id: u64) -> Result<()> {
        self.mutation(format!("cancel_run {} {}", repository, run_id))
    }
}

pub fn run(id: u64) -> WorkflowRun {
    let created = chrono::DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
        .map(|at| at.with_timezone(&chrono::Utc))
        .unwrap_or_default();
    WorkflowRun {
        id,
        name: Some("CI".to_string()),
        display_title: Some("Bump version".to_string()),
        event: "push".to_string(),
        status: None,
        conclusion: None,
        head_branch: Some("main".to_string()),
        actor: None,
        triggering_actor: None,
        run_started_at: None,
        created_at: created,
        updated_at: created,
        html_url: String::new(),
    }
}
