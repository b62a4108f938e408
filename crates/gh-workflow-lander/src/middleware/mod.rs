use crate::actions::Action;
use crate::dispatcher::Dispatcher;
use crate::state::AppState;

pub mod bootstrap_middleware;
pub mod logging;
pub mod run_middleware;
pub mod sync_middleware;
pub mod workflow_middleware;

/// Middleware trait - intercepts actions before they reach the reducer
///
/// Middleware must not block the UI loop: network calls are spawned on the
/// tokio runtime and report back through the [`Dispatcher`].
pub trait Middleware {
    /// Handle an action
    ///
    /// - `action`: The action to process
    /// - `state`: Current application state (read-only snapshot)
    /// - `dispatcher`: Use to dispatch follow-up actions
    ///
    /// Returns `true` to continue chain, `false` to consume action
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool;
}
