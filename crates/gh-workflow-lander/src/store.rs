use std::sync::mpsc::Receiver;

use crate::actions::Action;
use crate::dispatcher::{self, Dispatcher};
use crate::middleware::Middleware;
use crate::reducer::reduce;
use crate::state::AppState;

/// Store - holds application state and manages the Redux loop
pub struct Store {
    state: AppState,
    middleware: Vec<Box<dyn Middleware>>,
    dispatcher: Dispatcher,
    action_rx: Receiver<Action>,
}

impl Store {
    pub fn new(initial_state: AppState) -> Self {
        let (dispatcher, action_rx) = Dispatcher::channel();
        Self {
            state: initial_state,
            middleware: Vec::new(),
            dispatcher,
            action_rx,
        }
    }

    /// Add middleware to the store
    pub fn add_middleware(&mut self, middleware: Box<dyn Middleware>) {
        self.middleware.push(middleware);
    }

    /// Get the current state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get the dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Process an action through middleware chain and reducer
    pub fn dispatch(&mut self, action: Action) {
        let mut should_reduce = true;

        for middleware in &mut self.middleware {
            if !middleware.handle(&action, &self.state, &self.dispatcher) {
                should_reduce = false;
                break;
            }
        }

        if should_reduce {
            self.state = reduce(std::mem::take(&mut self.state), &action);
        }
    }

    /// Process every action dispatched by middleware or background tasks
    pub fn process_pending(&mut self) {
        for action in dispatcher::drain(&self.action_rx) {
            self.dispatch(action);
        }
    }
}
