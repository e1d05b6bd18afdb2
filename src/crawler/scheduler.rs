//! Scheduler for managing the crawl frontier and fetch concurrency
//!
//! This module handles:
//! - The frontier: a FIFO queue of claimed addresses waiting to be fetched
//! - Global concurrency limiting via a semaphore
//!
//! Dedup and depth checks happen before a task is ever pushed here; the
//! scheduler only decides when a queued task may run.

use crate::crawler::barrier::WorkUnit;
use std::sync::Arc;
use tokio::sync::{mpsc, OwnedSemaphorePermit, Semaphore};

/// A claimed address waiting for, or undergoing, its fetch-and-expand unit
///
/// The task owns its [`WorkUnit`]: the join barrier is released when the
/// task is dropped, on every path.
#[derive(Debug)]
pub struct CrawlTask {
    address: String,
    remaining_depth: u32,
    _unit: WorkUnit,
}

impl CrawlTask {
    pub(crate) fn new(address: String, remaining_depth: u32, unit: WorkUnit) -> Self {
        Self {
            address,
            remaining_depth,
            _unit: unit,
        }
    }

    /// The address to fetch
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Depth budget left for this task (always at least 1)
    pub fn remaining_depth(&self) -> u32 {
        self.remaining_depth
    }
}

/// A task cleared to run, holding one concurrency permit
pub struct ScheduledTask {
    /// The task to run
    pub task: CrawlTask,

    /// Released when the unit finishes
    pub _permit: OwnedSemaphorePermit,
}

/// Producer side of the frontier queue
#[derive(Debug, Clone)]
pub struct Frontier {
    tx: mpsc::UnboundedSender<CrawlTask>,
}

impl Frontier {
    /// Appends a task to the frontier
    ///
    /// Gives the task back if the scheduler has shut down.
    pub fn push(&self, task: CrawlTask) -> Result<(), CrawlTask> {
        self.tx.send(task).map_err(|e| e.0)
    }
}

/// Scheduler hands out queued tasks as concurrency permits become free
pub struct Scheduler {
    /// Global semaphore for limiting concurrent fetches
    permits: Arc<Semaphore>,

    /// Consumer side of the frontier queue
    queue: mpsc::UnboundedReceiver<CrawlTask>,
}

impl Scheduler {
    /// Creates a scheduler and the frontier handle that feeds it
    ///
    /// # Arguments
    ///
    /// * `max_concurrent` - Maximum number of tasks running at once (at least 1)
    pub fn new(max_concurrent: usize) -> (Frontier, Self) {
        let (tx, queue) = mpsc::unbounded_channel();
        let scheduler = Self {
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
            queue,
        };
        (Frontier { tx }, scheduler)
    }

    /// Gets the next task to run
    ///
    /// This method:
    /// 1. Waits for a free concurrency permit
    /// 2. Waits for a task on the frontier
    /// 3. Returns the task with its permit
    ///
    /// The permit is taken first so a task is never held back from the queue
    /// while no slot is free.
    ///
    /// # Returns
    ///
    /// * `Some(ScheduledTask)` - A task that may run now
    /// * `None` - Every frontier handle has been dropped
    pub async fn next_task(&mut self) -> Option<ScheduledTask> {
        let permit = Arc::clone(&self.permits).acquire_owned().await.ok()?;
        let task = self.queue.recv().await?;

        tracing::trace!(
            "Scheduling {} ({} permits left)",
            task.address,
            self.permits.available_permits()
        );

        Some(ScheduledTask {
            task,
            _permit: permit,
        })
    }

    /// Number of concurrency slots currently free
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }
}
