//! History View Model

use gh_workflow_sync::{RefreshState, RunRow};
use ratatui::style::Color;

use crate::state::AppState;

/// View model for the run history table
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryViewModel {
    pub title: String,
    pub rows: Vec<HistoryRow>,
    /// Index of the highlighted row
    pub selected: Option<usize>,
    /// Shown instead of the table when there are no rows
    pub placeholder: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRow {
    pub cells: [String; 6],
    pub conclusion_color: Color,
}

impl HistoryViewModel {
    pub const HEADERS: [&'static str; 6] = RunRow::HEADERS;

    pub fn from_state(state: &AppState) -> Self {
        let Some(context) = state.active_context() else {
            return Self {
                title: " Workflow runs ".to_string(),
                rows: Vec::new(),
                selected: None,
                placeholder: Some("No repository selected"),
            };
        };

        let mut title = format!(" Workflow runs: {} ", context);
        if let Some(workflow) = state.active_workflows().and_then(|w| w.selected()) {
            title.push_str(&format!("| dispatch: {} ", workflow.name));
        }

        let history = &state.history;
        let current = history.context.as_ref() == Some(context);
        let rows: Vec<HistoryRow> = if current {
            history.rows().into_iter().map(HistoryRow::from).collect()
        } else {
            Vec::new()
        };

        let placeholder = if !rows.is_empty() {
            None
        } else if !current {
            Some("Waiting for workflow history...")
        } else {
            Some(match history.state {
                RefreshState::Idle | RefreshState::InProgress => "Fetching workflow history...",
                RefreshState::Ready | RefreshState::Empty => "No workflows found.",
                RefreshState::Failed => "Workflow history cannot be listed",
            })
        };

        Self {
            title,
            selected: (!rows.is_empty()).then_some(history.cursor),
            rows,
            placeholder,
        }
    }
}

impl From<RunRow> for HistoryRow {
    fn from(row: RunRow) -> Self {
        let conclusion_color = conclusion_color(&row.conclusion);
        Self {
            cells: [
                row.workflow_name,
                row.action_name,
                row.triggered_by,
                row.started_at,
                row.conclusion,
                row.duration,
            ],
            conclusion_color,
        }
    }
}

fn conclusion_color(conclusion: &str) -> Color {
    match conclusion {
        "success" => Color::Green,
        "failure" | "timed_out" | "startup_failure" => Color::Red,
        "cancelled" | "skipped" | "neutral" | "stale" => Color::DarkGray,
        "action_required" => Color::Magenta,
        _ => Color::Yellow,
    }
}
