use crate::actions::{Action, HistoryAction};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

/// LoggingMiddleware - logs all actions passing through
pub struct LoggingMiddleware;

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for LoggingMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
        match action {
            // Snapshots carry every run; the summary is enough
            Action::History(HistoryAction::Updated(history)) => log::debug!(
                "Action: History(Updated {{ state: {:?}, runs: {}, revision: {} }})",
                history.state,
                history.runs.len(),
                history.revision
            ),
            _ => log::debug!("Action: {:?}", action),
        }

        true
    }
}
