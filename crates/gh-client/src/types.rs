//! GitHub API data transfer objects
//!
//! These types mirror the subset of the REST API payloads the client needs.
//! Unknown fields are ignored so that API additions never break decoding.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository from the GitHub API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID
    pub id: u64,

    /// Short name (e.g., "widgets")
    pub name: String,

    /// Owner-qualified name (e.g., "acme/widgets")
    pub full_name: String,

    /// Whether the repository is private
    #[serde(default)]
    pub private: bool,

    /// Visibility ("public", "private" or "internal")
    #[serde(default)]
    pub visibility: Option<String>,

    /// Name of the default branch
    #[serde(default)]
    pub default_branch: String,

    /// Repository URL for opening in browser
    #[serde(default)]
    pub html_url: String,
}

/// A branch of a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name
    pub name: String,
}

/// A workflow definition declared in a repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow ID
    pub id: u64,

    /// Display name of the workflow
    pub name: String,

    /// Path of the definition file (e.g., ".github/workflows/ci.yml")
    pub path: String,

    /// Workflow state (e.g., "active", "disabled_manually")
    #[serde(default)]
    pub state: String,

    /// API URL of the workflow
    #[serde(default)]
    pub url: String,

    /// URL of the definition file on github.com
    #[serde(default)]
    pub html_url: String,
}

/// Envelope of `GET /repos/{repo}/actions/workflows`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowList {
    /// Total number of workflows
    #[serde(default)]
    pub total_count: u64,
    /// The workflows
    #[serde(default)]
    pub workflows: Vec<Workflow>,
}

/// A GitHub user as embedded in other payloads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Login name
    pub login: String,
}

/// A GitHub Actions workflow run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Workflow run ID
    pub id: u64,

    /// Name of the workflow
    #[serde(default)]
    pub name: Option<String>,

    /// Title shown for the run (commit message, PR title, ...)
    #[serde(default)]
    pub display_title: Option<String>,

    /// Event that triggered the run (e.g., "push", "workflow_dispatch")
    #[serde(default)]
    pub event: String,

    /// Status of the run
    #[serde(default)]
    pub status: Option<WorkflowRunStatus>,

    /// Conclusion (only set when completed)
    #[serde(default)]
    pub conclusion: Option<WorkflowRunConclusion>,

    /// Branch the run belongs to
    #[serde(default)]
    pub head_branch: Option<String>,

    /// User who caused the run
    #[serde(default)]
    pub actor: Option<Actor>,

    /// User who triggered this attempt (differs from `actor` on reruns)
    #[serde(default)]
    pub triggering_actor: Option<Actor>,

    /// When the current attempt started
    #[serde(default)]
    pub run_started_at: Option<DateTime<Utc>>,

    /// When the run was created
    pub created_at: DateTime<Utc>,

    /// When the run was last updated
    pub updated_at: DateTime<Utc>,

    /// URL to view the workflow run
    #[serde(default)]
    pub html_url: String,
}

impl WorkflowRun {
    /// Workflow name, empty when the API omitted it
    pub fn workflow_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// What the run did: its display title, falling back to the event name
    pub fn action_name(&self) -> &str {
        self.display_title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.event)
    }

    /// Login of the user who triggered the run
    pub fn triggered_by(&self) -> &str {
        self.triggering_actor
            .as_ref()
            .or(self.actor.as_ref())
            .map(|actor| actor.login.as_str())
            .unwrap_or("unknown")
    }

    /// Start of the current attempt, falling back to creation time
    pub fn started_at(&self) -> DateTime<Utc> {
        self.run_started_at.unwrap_or(self.created_at)
    }

    /// Time between start and last update, never negative
    pub fn duration(&self) -> chrono::Duration {
        let elapsed = self.updated_at - self.started_at();
        elapsed.max(chrono::Duration::zero())
    }
}

/// Envelope of `GET /repos/{repo}/actions/runs`
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRunList {
    /// Total number of runs matching the query
    #[serde(default)]
    pub total_count: u64,
    /// The runs, newest first
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

/// Status of a workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRunStatus {
    /// Workflow is queued
    Queued,
    /// Workflow is waiting
    Waiting,
    /// Workflow is requested
    Requested,
    /// Workflow is in progress
    InProgress,
    /// Workflow has completed
    Completed,
    /// Workflow is pending
    Pending,
    /// Status not known to this client
    #[serde(other)]
    Unknown,
}

impl WorkflowRunStatus {
    /// API spelling of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowRunStatus::Queued => "queued",
            WorkflowRunStatus::Waiting => "waiting",
            WorkflowRunStatus::Requested => "requested",
            WorkflowRunStatus::InProgress => "in_progress",
            WorkflowRunStatus::Completed => "completed",
            WorkflowRunStatus::Pending => "pending",
            WorkflowRunStatus::Unknown => "unknown",
        }
    }
}

/// Conclusion of a completed workflow run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowRunConclusion {
    /// Workflow succeeded
    Success,
    /// Workflow failed
    Failure,
    /// Workflow was neutral
    Neutral,
    /// Workflow was cancelled
    Cancelled,
    /// Workflow was skipped
    Skipped,
    /// Workflow timed out
    TimedOut,
    /// Action required
    ActionRequired,
    /// Workflow is stale
    Stale,
    /// Workflow could not start
    StartupFailure,
    /// Conclusion not known to this client
    #[serde(other)]
    Unknown,
}

impl WorkflowRunConclusion {
    /// API spelling of the conclusion
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowRunConclusion::Success => "success",
            WorkflowRunConclusion::Failure => "failure",
            WorkflowRunConclusion::Neutral => "neutral",
            WorkflowRunConclusion::Cancelled => "cancelled",
            WorkflowRunConclusion::Skipped => "skipped",
            WorkflowRunConclusion::TimedOut => "timed_out",
            WorkflowRunConclusion::ActionRequired => "action_required",
            WorkflowRunConclusion::Stale => "stale",
            WorkflowRunConclusion::StartupFailure => "startup_failure",
            WorkflowRunConclusion::Unknown => "unknown",
        }
    }
}

/// File payload of `GET /repos/{repo}/contents/{path}`
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    /// Base64 content, wrapped with newlines by the API
    #[serde(default)]
    pub content: String,
}

/// Run log archive as served by the logs endpoint (a zip file)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLogs {
    /// Raw archive bytes
    pub archive: Bytes,
}

impl RunLogs {
    pub fn new(archive: impl Into<Bytes>) -> Self {
        Self {
            archive: archive.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.archive.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archive.is_empty()
    }
}

/// Last path segment of a slash-separated path
pub(crate) fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const RUN_JSON: &str = r#"{
        "id": 30433642,
        "name": "Build",
        "display_title": "Update README.md",
        "event": "push",
        "status": "completed",
        "conclusion": "success",
        "head_branch": "main",
        "actor": {"login": "octocat"},
        "triggering_actor": {"login": "hubot"},
        "run_started_at": "2024-01-10T10:00:00Z",
        "created_at": "2024-01-10T09:59:00Z",
        "updated_at": "2024-01-10T10:01:05Z",
        "html_url": "https://github.com/acme/widgets/actions/runs/30433642",
        "run_attempt": 2
    }"#;

    #[test]
    fn test_workflow_run_deserialization() {
        let run: WorkflowRun = serde_json::from_str(RUN_JSON).unwrap();

        assert_eq!(run.id, 30433642);
        assert_eq!(run.workflow_name(), "Build");
        assert_eq!(run.action_name(), "Update README.md");
        assert_eq!(run.triggered_by(), "hubot");
        assert_eq!(run.status, Some(WorkflowRunStatus::Completed));
        assert_eq!(run.conclusion, Some(WorkflowRunConclusion::Success));
        assert_eq!(run.duration(), chrono::Duration::seconds(65));
    }

    #[test]
    fn test_unknown_conclusion_does_not_fail_decoding() {
        let json = RUN_JSON.replace("\"success\"", "\"brand_new_conclusion\"");
        let run: WorkflowRun = serde_json::from_str(&json).unwrap();
        assert_eq!(run.conclusion, Some(WorkflowRunConclusion::Unknown));
    }

    #[test]
    fn test_run_without_title_or_start_uses_fallbacks() {
        let json = r#"{
            "id": 1,
            "event": "workflow_dispatch",
            "created_at": "2024-01-10T10:00:00Z",
            "updated_at": "2024-01-10T09:00:00Z"
        }"#;
        let run: WorkflowRun = serde_json::from_str(json).unwrap();

        assert_eq!(run.workflow_name(), "");
        assert_eq!(run.action_name(), "workflow_dispatch");
        assert_eq!(run.triggered_by(), "unknown");
        assert_eq!(run.started_at(), run.created_at);
        assert_eq!(run.duration(), chrono::Duration::zero());
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name(".github/workflows/ci.yml"), "ci.yml");
        assert_eq!(base_name("deploy.yml"), "deploy.yml");
    }

    #[test]
    fn test_conclusion_serde_spelling() {
        let conclusions = vec![
            (WorkflowRunConclusion::TimedOut, "\"timed_out\""),
            (WorkflowRunConclusion::ActionRequired, "\"action_required\""),
            (WorkflowRunConclusion::StartupFailure, "\"startup_failure\""),
        ];

        for (conclusion, expected_json) in conclusions {
            let json = serde_json::to_string(&conclusion).unwrap();
            assert_eq!(json, expected_json);
            assert_eq!(format!("\"{}\"", conclusion.as_str()), expected_json);
        }
    }
}
