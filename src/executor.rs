//! Deferred work queue for results that must not be delivered inline.
//!
//! A send rejected during `begin_transmit` still reports its failure through
//! the same asynchronous path as a failure reported by the link layer. The
//! layer posts a [`DeferredTask`] here and runs it on a later turn.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work deferred to a later executor turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Report a failed send to the upper layer.
    SendFailure,
}

/// Single-threaded FIFO of deferred tasks.
#[derive(Debug)]
pub struct TaskQueue {
    tx: UnboundedSender<DeferredTask>,
    rx: UnboundedReceiver<DeferredTask>,
}

impl TaskQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    /// Enqueue a task for a later turn.
    pub fn post(&self, task: DeferredTask) {
        self.tx.send(task).ok();
    }

    /// Pop the next task if one is ready.
    pub fn try_next(&mut self) -> Option<DeferredTask> { self.rx.try_recv().ok() }

    /// Wait for the next task.
    pub async fn next(&mut self) -> Option<DeferredTask> { self.rx.recv().await }
}

impl Default for TaskQueue {
    fn default() -> Self { Self::new() }
}
