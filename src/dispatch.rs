//! The dispatch channel between producers and the reducer.
//!
//! Producers hold a cloneable [`Dispatcher`]; the reducer owns the single
//! [`ActionQueue`] and pulls actions off in batches. Actions arrive in the
//! order they were enqueued.

use std::sync::mpsc;

use crate::action::Action;
use crate::summary::ChangeSummary;

/// Errors that can occur when dispatching.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("action queue is closed")]
    Closed,
}

/// Creates a connected dispatcher and queue.
pub fn channel() -> (Dispatcher, ActionQueue) {
    let (tx, rx) = mpsc::channel();
    (Dispatcher { tx }, ActionQueue { rx })
}

/// The producer side. Clone one per producer.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    tx: mpsc::Sender<Box<dyn Action>>,
}

impl Dispatcher {
    /// Enqueues an action for the reducer.
    pub fn dispatch(&self, action: impl Action) -> Result<(), DispatchError> {
        self.dispatch_boxed(Box::new(action))
    }

    pub fn dispatch_boxed(&self, action: Box<dyn Action>) -> Result<(), DispatchError> {
        self.tx.send(action).map_err(|_| DispatchError::Closed)
    }
}

/// The reducer side.
#[derive(Debug)]
pub struct ActionQueue {
    rx: mpsc::Receiver<Box<dyn Action>>,
}

/// Actions reduced together in one dispatch cycle.
#[derive(Debug)]
pub struct Batch {
    pub actions: Vec<Box<dyn Action>>,
    pub summary: ChangeSummary,
}

impl ActionQueue {
    /// Waits for at least one action, then takes everything already queued.
    ///
    /// Returns `None` once every dispatcher is dropped and the queue is empty.
    pub fn next_batch(&self) -> Option<Batch> {
        let first = self.rx.recv().ok()?;
        Some(self.drain_after(first))
    }

    /// Takes everything already queued without waiting.
    ///
    /// Returns `None` when nothing is queued.
    pub fn try_batch(&self) -> Option<Batch> {
        let first = self.rx.try_recv().ok()?;
        Some(self.drain_after(first))
    }

    fn drain_after(&self, first: Box<dyn Action>) -> Batch {
        let mut actions = vec![first];
        actions.extend(self.rx.try_iter());
        let summary = ChangeSummary::of(&actions);
        Batch { actions, summary }
    }
}
