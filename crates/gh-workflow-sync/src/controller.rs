//! Synchronization controller
//!
//! Owns the active [`SyncContext`] and the run history attached to it.
//! Every refresh runs as a background task holding a cancellation token
//! scoped to the refresh; starting a new refresh cancels the previous one,
//! and a cancelled refresh never writes to the history.

use crate::context::SyncContext;
use crate::history::RunHistory;
use crate::signal::ForceRefresh;
use gh_client::{ClientError, GitHubClient, WorkflowRun};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Keeps the run history of the active context fresh
///
/// Cheap to clone; clones drive the same controller.
#[derive(Clone)]
pub struct SyncController {
    inner: Arc<Inner>,
}

struct Inner {
    client: Arc<dyn GitHubClient>,
    runtime: Handle,
    shared: Mutex<Shared>,
    published: watch::Sender<RunHistory>,
    force_refresh: ForceRefresh,
    shutdown: CancellationToken,
}

#[derive(Default)]
struct Shared {
    /// Last context seen by `observe`
    observed: Option<SyncContext>,
    /// Token of the refresh that is allowed to commit
    in_flight: Option<CancellationToken>,
    history: RunHistory,
}

impl SyncController {
    /// Create a controller that spawns its refreshes on `runtime`
    pub fn new(client: Arc<dyn GitHubClient>, runtime: Handle) -> Self {
        let (published, _) = watch::channel(RunHistory::default());
        Self {
            inner: Arc::new(Inner {
                client,
                runtime,
                shared: Mutex::new(Shared::default()),
                published,
                force_refresh: ForceRefresh::new(),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    /// Compare `context` with the last observed one and refresh on a change
    ///
    /// Returns whether a refresh was started.
    pub fn observe(&self, context: &SyncContext) -> bool {
        let mut shared = self.inner.shared.lock();
        if shared.observed.as_ref() == Some(context) {
            return false;
        }

        info!("Context changed to {}", context);
        shared.observed = Some(context.clone());
        self.start_locked(&mut shared, context.clone());
        true
    }

    /// Refresh the observed context, superseding any refresh in flight
    ///
    /// Returns `false` when no context has been observed yet.
    pub fn refresh(&self) -> bool {
        let mut shared = self.inner.shared.lock();
        let Some(context) = shared.observed.clone() else {
            debug!("Refresh requested before any context was selected");
            return false;
        };

        self.start_locked(&mut shared, context);
        true
    }

    /// Signal that mutating operations raise to request a refresh
    pub fn force_refresh(&self) -> ForceRefresh {
        self.inner.force_refresh.clone()
    }

    /// Receive every published history snapshot
    pub fn subscribe(&self) -> watch::Receiver<RunHistory> {
        self.inner.published.subscribe()
    }

    /// Current history snapshot
    pub fn snapshot(&self) -> RunHistory {
        self.inner.shared.lock().history.clone()
    }

    pub fn select_next(&self) {
        self.update(RunHistory::select_next);
    }

    pub fn select_previous(&self) {
        self.update(RunHistory::select_previous);
    }

    /// Run under the cursor together with the context it belongs to
    pub fn selected_run(&self) -> Option<(SyncContext, WorkflowRun)> {
        let shared = self.inner.shared.lock();
        let history = &shared.history;
        history.context.clone().zip(history.selected().cloned())
    }

    /// Drive the controller from a context channel and the force-refresh signal
    ///
    /// The listener observes the channel's current value right away and stops
    /// when the sender is dropped or [`SyncController::shutdown`] is called.
    pub fn spawn_listener(
        &self,
        mut contexts: watch::Receiver<Option<SyncContext>>,
    ) -> JoinHandle<()> {
        let controller = self.clone();
        self.inner.runtime.spawn(async move {
            let initial = contexts.borrow_and_update().clone();
            if let Some(context) = initial {
                controller.observe(&context);
            }

            let inner = controller.inner.clone();
            loop {
                tokio::select! {
                    _ = inner.shutdown.cancelled() => break,
                    changed = contexts.changed() => {
                        if changed.is_err() {
                            debug!("Context channel closed");
                            break;
                        }
                        let context = contexts.borrow_and_update().clone();
                        if let Some(context) = context {
                            controller.observe(&context);
                        }
                    }
                    _ = inner.force_refresh.wait() => {
                        debug!("Force refresh requested");
                        controller.refresh();
                    }
                }
            }
            debug!("Sync listener stopped");
        })
    }

    /// Cancel the refresh in flight and stop the listener
    pub fn shutdown(&self) {
        self.inner.shutdown.cancel();
    }

    fn update(&self, change: impl FnOnce(&mut RunHistory)) {
        let mut shared = self.inner.shared.lock();
        change(&mut shared.history);
        self.inner.published.send_replace(shared.history.clone());
    }

    fn start_locked(&self, shared: &mut Shared, context: SyncContext) {
        if let Some(previous) = shared.in_flight.take() {
            debug!("Cancelling superseded refresh");
            previous.cancel();
        }

        let token = self.inner.shutdown.child_token();
        shared.in_flight = Some(token.clone());
        shared.history.begin(context.clone());
        self.inner.published.send_replace(shared.history.clone());

        self.inner
            .runtime
            .spawn(run_refresh(self.inner.clone(), context, token));
    }
}

async fn run_refresh(inner: Arc<Inner>, context: SyncContext, token: CancellationToken) {
    debug!("Fetching workflow runs for {}", context);
    let outcome = tokio::select! {
        biased;
        _ = token.cancelled() => Err(ClientError::Cancelled),
        result = inner.client.list_workflow_runs(&context.repository, &context.branch) => result,
    };

    let mut shared = inner.shared.lock();
    // Cancellation happens under the same lock, so a superseded refresh
    // always sees its token cancelled here.
    if token.is_cancelled() {
        debug!("Dropping result of superseded refresh for {}", context);
        return;
    }
    shared.in_flight = None;

    match outcome {
        Err(err) if err.is_cancelled() => shared.history.abandon(),
        Ok(runs) => {
            info!("Fetched {} workflow runs for {}", runs.len(), context);
            shared.history.settle(Ok(runs));
        }
        Err(err) => {
            warn!("Failed to fetch workflow runs for {}: {}", context, err);
            shared.history.settle(Err(err));
        }
    }
    inner.published.send_replace(shared.history.clone());
}
