//! FIFO task posting onto the thread that owns a DOM tree.

use std::thread::{self, JoinHandle};

use anyhow::Result;
use log::{debug, trace};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// A unit of work executed on the owning thread.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Create a connected runner/queue pair.
pub fn task_channel() -> (TaskRunner, TaskQueue) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (TaskRunner { sender }, TaskQueue { receiver })
}

/// Sending half: any thread may post tasks.
#[derive(Clone, Debug)]
pub struct TaskRunner {
    sender: UnboundedSender<Task>,
}

impl TaskRunner {
    /// Queue `task` behind every task posted before it. Returns false once the
    /// queue has been dropped.
    pub fn post(&self, task: impl FnOnce() + Send + 'static) -> bool {
        self.sender.send(Box::new(task)).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

/// Receiving half, drained by the owning thread.
#[derive(Debug)]
pub struct TaskQueue {
    receiver: UnboundedReceiver<Task>,
}

impl TaskQueue {
    /// Run every task queued so far, in submission order, without blocking.
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.receiver.try_recv() {
            task();
            ran += 1;
        }
        if ran > 0 {
            trace!("Ran {ran} posted task(s)");
        }
        ran
    }

    /// Run tasks as they arrive until every runner has been dropped.
    pub fn run_blocking(mut self) {
        while let Some(task) = self.receiver.blocking_recv() {
            task();
        }
        debug!("Task queue closed");
    }

    /// Move the queue onto a dedicated named thread.
    pub fn spawn(self, name: &str) -> Result<JoinHandle<()>> {
        let handle = thread::Builder::new()
            .name(name.to_owned())
            .spawn(move || self.run_blocking())?;
        Ok(handle)
    }
}
