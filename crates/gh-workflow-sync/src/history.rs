//! Run history state
//!
//! The working set of workflow runs for the active context, the refresh
//! lifecycle attached to it, and the display rows derived from it.

use crate::context::SyncContext;
use crate::status::TaskStatus;
use gh_client::{ClientError, WorkflowRun};

/// Lifecycle of the run history fetch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RefreshState {
    /// Nothing requested yet, or the last request was abandoned
    #[default]
    Idle,
    /// A refresh is in flight
    InProgress,
    /// The last refresh returned runs
    Ready,
    /// The last refresh returned no runs
    Empty,
    /// The last refresh failed
    Failed,
}

/// One display row of the history table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRow {
    pub run_id: u64,
    pub workflow_name: String,
    pub action_name: String,
    pub triggered_by: String,
    pub started_at: String,
    pub conclusion: String,
    pub duration: String,
}

impl RunRow {
    /// Column titles, in cell order
    pub const HEADERS: [&'static str; 6] = [
        "Workflow",
        "Action",
        "Triggered By",
        "Started At",
        "Conclusion",
        "Duration",
    ];

    /// Derive the row of a run
    pub fn from_run(run: &WorkflowRun) -> Self {
        // Runs still going have no conclusion yet; show their status instead
        let conclusion = match (run.conclusion, run.status) {
            (Some(conclusion), _) => conclusion.as_str(),
            (None, Some(status)) => status.as_str(),
            (None, None) => "-",
        };

        Self {
            run_id: run.id,
            workflow_name: run.workflow_name().to_string(),
            action_name: run.action_name().to_string(),
            triggered_by: run.triggered_by().to_string(),
            started_at: run.started_at().format("%Y-%m-%d %H:%M:%S").to_string(),
            conclusion: conclusion.to_string(),
            duration: format_duration(run.duration()),
        }
    }

    /// Cells in column order
    pub fn cells(&self) -> [&str; 6] {
        [
            &self.workflow_name,
            &self.action_name,
            &self.triggered_by,
            &self.started_at,
            &self.conclusion,
            &self.duration,
        ]
    }
}

/// Format a duration as e.g. `1h 2m 3s`, `4m 5s` or `6s`
pub fn format_duration(duration: chrono::Duration) -> String {
    let total = duration.num_seconds().max(0);
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Snapshot of the run history owned by the sync controller
///
/// The presentation layer only ever sees clones of this value.
#[derive(Debug, Clone, Default)]
pub struct RunHistory {
    /// Context the history belongs to
    pub context: Option<SyncContext>,
    /// Refresh lifecycle
    pub state: RefreshState,
    /// Runs, newest first as served by the API
    pub runs: Vec<WorkflowRun>,
    /// Selected row
    pub cursor: usize,
    /// Latest progress/success/error message
    pub status: Option<TaskStatus>,
    /// Error of the last failed refresh
    pub last_error: Option<ClientError>,
    /// Number of refreshes that have settled so far
    pub revision: u64,
}

impl RunHistory {
    /// Display rows for the current runs
    pub fn rows(&self) -> Vec<RunRow> {
        self.runs.iter().map(RunRow::from_run).collect()
    }

    /// Run under the cursor
    pub fn selected(&self) -> Option<&WorkflowRun> {
        self.runs.get(self.cursor)
    }

    pub(crate) fn begin(&mut self, context: SyncContext) {
        // Runs of another context must not linger under the new label
        if self.context.as_ref() != Some(&context) {
            self.runs.clear();
            self.cursor = 0;
        }

        self.status = Some(TaskStatus::running(format!(
            "[{}] Fetching workflow history...",
            context
        )));
        self.state = RefreshState::InProgress;
        self.context = Some(context);
    }

    pub(crate) fn settle(&mut self, outcome: Result<Vec<WorkflowRun>, ClientError>) {
        let label = self
            .context
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();

        self.cursor = 0;
        self.revision += 1;
        match outcome {
            Ok(runs) if runs.is_empty() => {
                self.runs = runs;
                self.last_error = None;
                self.state = RefreshState::Empty;
                self.status = Some(TaskStatus::info(format!("[{}] No workflows found.", label)));
            }
            Ok(runs) => {
                self.runs = runs;
                self.last_error = None;
                self.state = RefreshState::Ready;
                self.status = Some(TaskStatus::success(format!(
                    "[{}] Workflow history fetched.",
                    label
                )));
            }
            Err(err) => {
                self.runs.clear();
                self.state = RefreshState::Failed;
                self.status = Some(TaskStatus::error(format!(
                    "Workflow history cannot be listed: {}",
                    err
                )));
                self.last_error = Some(err);
            }
        }
    }

    pub(crate) fn abandon(&mut self) {
        if self.state == RefreshState::InProgress {
            self.state = RefreshState::Idle;
            self.status = None;
        }
    }

    pub(crate) fn select_next(&mut self) {
        if self.cursor + 1 < self.runs.len() {
            self.cursor += 1;
        }
    }

    pub(crate) fn select_previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::TaskStatusType;
    use chrono::{TimeZone, Utc};
    use gh_client::{Actor, WorkflowRunConclusion, WorkflowRunStatus};
    use pretty_assertions::assert_eq;

    fn run(id: u64) -> WorkflowRun {
        let started = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        WorkflowRun {
            id,
            name: Some("CI".to_string()),
            display_title: Some(format!("Commit {}", id)),
            event: "push".to_string(),
            status: Some(WorkflowRunStatus::Completed),
            conclusion: Some(WorkflowRunConclusion::Success),
            head_branch: Some("main".to_string()),
            actor: Some(Actor {
                login: "octocat".to_string(),
            }),
            triggering_actor: None,
            run_started_at: Some(started),
            created_at: started,
            updated_at: started + chrono::Duration::seconds(125),
            html_url: String::new(),
        }
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(chrono::Duration::seconds(0)), "0s");
        assert_eq!(format_duration(chrono::Duration::seconds(59)), "59s");
        assert_eq!(format_duration(chrono::Duration::seconds(125)), "2m 5s");
        assert_eq!(format_duration(chrono::Duration::seconds(3723)), "1h 2m 3s");
        assert_eq!(format_duration(chrono::Duration::seconds(-5)), "0s");
    }

    #[test]
    fn test_row_from_completed_run() {
        let row = RunRow::from_run(&run(1));
        assert_eq!(
            row.cells(),
            ["CI", "Commit 1", "octocat", "2024-03-01 12:00:00", "success", "2m 5s"]
        );
    }

    #[test]
    fn test_row_of_running_run_shows_status() {
        let mut running = run(2);
        running.conclusion = None;
        running.status = Some(WorkflowRunStatus::InProgress);
        assert_eq!(RunRow::from_run(&running).conclusion, "in_progress");
    }

    #[test]
    fn test_settle_with_runs_is_ready_and_resets_cursor() {
        let mut history = RunHistory::default();
        history.begin(SyncContext::new("acme/widgets", "main"));
        history.cursor = 2;

        history.settle(Ok(vec![run(3), run(2), run(1)]));

        assert_eq!(history.state, RefreshState::Ready);
        assert_eq!(history.cursor, 0);
        assert_eq!(history.revision, 1);
        let ids: Vec<u64> = history.rows().iter().map(|row| row.run_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(
            history.status,
            Some(TaskStatus::success("[acme/widgets@main] Workflow history fetched."))
        );
    }

    #[test]
    fn test_settle_without_runs_is_empty() {
        let mut history = RunHistory::default();
        history.begin(SyncContext::new("acme/widgets", "main"));
        history.settle(Ok(Vec::new()));

        assert_eq!(history.state, RefreshState::Empty);
        assert_eq!(
            history.status.map(|s| s.status_type),
            Some(TaskStatusType::Info)
        );
    }

    #[test]
    fn test_failure_clears_previous_runs() {
        let context = SyncContext::new("acme/widgets", "main");
        let mut history = RunHistory::default();
        history.begin(context.clone());
        history.settle(Ok(vec![run(1)]));

        history.begin(context);
        assert_eq!(history.runs.len(), 1, "same-context refresh keeps rows until settled");
        history.settle(Err(ClientError::remote(500, "Server Error")));

        assert_eq!(history.state, RefreshState::Failed);
        assert!(history.runs.is_empty());
        assert_eq!(history.last_error, Some(ClientError::remote(500, "Server Error")));
    }

    #[test]
    fn test_context_switch_clears_rows_immediately() {
        let mut history = RunHistory::default();
        history.begin(SyncContext::new("acme/widgets", "main"));
        history.settle(Ok(vec![run(1), run(2)]));

        history.begin(SyncContext::new("acme/gadgets", "main"));

        assert!(history.runs.is_empty());
        assert_eq!(history.state, RefreshState::InProgress);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut history = RunHistory::default();
        history.begin(SyncContext::new("acme/widgets", "main"));
        history.settle(Ok(vec![run(1), run(2)]));

        history.select_previous();
        assert_eq!(history.cursor, 0);
        history.select_next();
        history.select_next();
        assert_eq!(history.cursor, 1);
        assert_eq!(history.selected().map(|r| r.id), Some(2));
    }
}
