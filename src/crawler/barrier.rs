//! Join barrier for outstanding crawl work
//!
//! Each spawned fetch-and-expand unit holds a [`WorkUnit`]; the barrier count
//! drops when the unit is dropped, whichever way its task ends. Waiters are
//! released when the count returns to zero.

use std::sync::Arc;
use tokio::sync::watch;

/// Counts outstanding units of crawl work
#[derive(Debug, Clone)]
pub struct JoinBarrier {
    outstanding: Arc<watch::Sender<usize>>,
}

impl Default for JoinBarrier {
    fn default() -> Self {
        Self::new()
    }
}

impl JoinBarrier {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        Self {
            outstanding: Arc::new(tx),
        }
    }

    /// Registers one unit of outstanding work
    pub fn register(&self) -> WorkUnit {
        self.outstanding.send_modify(|n| *n += 1);
        WorkUnit {
            barrier: self.clone(),
        }
    }

    /// Number of units registered and not yet completed
    pub fn outstanding(&self) -> usize {
        *self.outstanding.borrow()
    }

    /// Suspends until no units are outstanding
    ///
    /// Returns immediately if nothing was ever registered.
    pub async fn wait(&self) {
        let mut rx = self.outstanding.subscribe();
        // The sender lives as long as `self`, so this cannot observe a closed channel
        let _ = rx.wait_for(|n| *n == 0).await;
    }

    fn complete(&self) {
        self.outstanding.send_modify(|n| {
            debug_assert!(*n > 0, "join barrier underflow");
            *n = n.saturating_sub(1);
        });
    }
}

/// One registered unit of work; completes on drop
#[derive(Debug)]
#[must_use = "dropping a work unit completes it immediately"]
pub struct WorkUnit {
    barrier: JoinBarrier,
}

impl Drop for WorkUnit {
    fn drop(&mut self) {
        self.barrier.complete();
    }
}
