//! Task group for unbounded, dynamically growing fan-out
//!
//! Every task spawned through a [`TaskGroup`] holds a [`TaskGuard`] for its
//! whole lifetime. The guard is taken by the *spawner* before the task is
//! handed to the runtime, and released when the task's future is dropped
//! (normal completion or unwinding). A task that spawns children therefore
//! always registers them before its own unit is released, so the outstanding
//! count never reads zero while work remains.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

/// Scope that tracks every task spawned into it, transitively
#[derive(Debug, Clone)]
pub struct TaskGroup {
    outstanding: Arc<watch::Sender<usize>>,
}

/// One counted unit of outstanding work
#[derive(Debug)]
pub struct TaskGuard {
    outstanding: Arc<watch::Sender<usize>>,
}

impl TaskGroup {
    /// Creates an empty group
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0usize);
        Self {
            outstanding: Arc::new(tx),
        }
    }

    /// Spawns `future` onto the current tokio runtime as a member of this group
    ///
    /// The unit is counted before this method returns.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn spawn<F>(&self, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.guard();
        tokio::spawn(async move {
            let _guard = guard;
            future.await;
        });
    }

    /// Number of tasks that have been spawned and not yet finished
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Waits until no task in the group is outstanding
    ///
    /// Returns immediately for a group that never had work.
    pub async fn join(&self) {
        let mut rx = self.outstanding.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|count| *count == 0).await;
    }

    fn guard(&self) -> TaskGuard {
        self.outstanding.send_modify(|count| *count += 1);
        TaskGuard {
            outstanding: Arc::clone(&self.outstanding),
        }
    }
}

impl Default for TaskGroup {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.outstanding.send_modify(|count| *count -= 1);
    }
}
