//! Dispatcher for middleware action dispatch
//!
//! Middleware and the background tasks it spawns use the Dispatcher to send
//! actions back into the store. Dispatched actions re-enter the middleware
//! chain from the beginning on the next pass of the main loop.

use crate::actions::Action;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};

/// Sending half of the action channel
///
/// Cheap to clone and `Send`, so async tasks can report back to the UI loop.
#[derive(Clone)]
pub struct Dispatcher {
    action_tx: Sender<Action>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver the store drains
    pub fn channel() -> (Self, Receiver<Action>) {
        let (action_tx, action_rx) = std::sync::mpsc::channel();
        (Self { action_tx }, action_rx)
    }

    /// Dispatch an action to be processed through the middleware chain
    pub fn dispatch(&self, action: Action) {
        if let Err(e) = self.action_tx.send(action) {
            log::error!("Dispatcher: failed to send action: {}", e);
        }
    }
}

/// Take every action queued so far without blocking
pub fn drain(action_rx: &Receiver<Action>) -> Vec<Action> {
    let mut actions = Vec::new();
    loop {
        match action_rx.try_recv() {
            Ok(action) => actions.push(action),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                log::warn!("Action channel disconnected");
                break;
            }
        }
    }
    actions
}
