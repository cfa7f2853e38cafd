//! Deferred task queue for idle processing.
//!
//! Tasks are posted to run on a later turn of the host event loop, after the
//! code that posted them has returned. This is the only way background work
//! and re-entrancy workarounds reach the window manager.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::error::{CoreError, Result};
use crate::logging::targets;

/// A unique identifier for a deferred task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

impl TaskId {
    /// Get the raw u64 value of this task ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique task IDs.
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(1);

fn next_task_id() -> TaskId {
    TaskId(NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed))
}

/// A boxed task closure.
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// The host loop's "run this later" primitive.
///
/// Implementations must never run the task synchronously inside
/// `schedule_deferred`.
pub trait Scheduler: Send + Sync {
    /// Post a task to run on a later turn of the event loop.
    fn schedule_deferred(&self, task: DeferredTask) -> TaskId;
}

/// Internal task data.
struct TaskData {
    id: TaskId,
    task: DeferredTask,
}

/// A FIFO queue of deferred tasks.
///
/// `TaskQueue` is plain storage; [`IdleQueue`] wraps it for shared use and
/// runs tasks without holding its lock.
pub struct TaskQueue {
    /// Pending tasks to execute.
    tasks: VecDeque<TaskData>,
}

impl TaskQueue {
    /// Create a new task queue.
    pub fn new() -> Self {
        Self {
            tasks: VecDeque::new(),
        }
    }

    /// Post a task to be executed later.
    ///
    /// Returns the task ID that can be used to cancel the task.
    pub fn post(&mut self, task: DeferredTask) -> TaskId {
        let id = next_task_id();
        self.tasks.push_back(TaskData { id, task });
        id
    }

    /// Cancel a pending task.
    ///
    /// Returns `true` if the task was found and cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        if let Some(pos) = self.tasks.iter().position(|t| t.id == id) {
            self.tasks.remove(pos);
            true
        } else {
            false
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Remove every pending task, in posting order.
    fn take_all(&mut self) -> Vec<TaskData> {
        self.tasks.drain(..).collect()
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A shareable idle queue, the default [`Scheduler`].
///
/// The host calls [`run_pending`](Self::run_pending) once per loop turn.
/// Tasks posted while a turn is running are deferred to the next turn.
pub struct IdleQueue {
    inner: Mutex<TaskQueue>,
}

impl IdleQueue {
    /// Create an empty idle queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(TaskQueue::new()),
        }
    }

    /// Post a task, returning its ID.
    pub fn post<F>(&self, task: F) -> TaskId
    where
        F: FnOnce() + Send + 'static,
    {
        self.inner.lock().post(Box::new(task))
    }

    /// Cancel a pending task.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownTask`] if the task already ran or was
    /// cancelled.
    pub fn cancel(&self, id: TaskId) -> Result<()> {
        if self.inner.lock().cancel(id) {
            Ok(())
        } else {
            Err(CoreError::UnknownTask(id.as_u64()))
        }
    }

    /// Check if there are any pending tasks.
    pub fn has_pending(&self) -> bool {
        self.inner.lock().has_pending()
    }

    /// Get the number of pending tasks.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending_count()
    }

    /// Run one loop turn: every task pending when the call starts.
    ///
    /// Returns the number of tasks processed.
    pub fn run_pending(&self) -> usize {
        let batch = self.inner.lock().take_all();
        let count = batch.len();
        if count > 0 {
            let _span = tracing::debug_span!(target: targets::TASK, "idle_turn", count).entered();
            for task_data in batch {
                (task_data.task)();
            }
        }
        count
    }

    /// Run turns until the queue stays empty.
    ///
    /// Returns the total number of tasks processed.
    pub fn run_until_idle(&self) -> usize {
        let mut total = 0;
        loop {
            let ran = self.run_pending();
            if ran == 0 {
                return total;
            }
            total += ran;
        }
    }
}

impl Default for IdleQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for IdleQueue {
    fn schedule_deferred(&self, task: DeferredTask) -> TaskId {
        let id = self.inner.lock().post(task);
        tracing::trace!(target: targets::TASK, task = id.as_u64(), "deferred task posted");
        id
    }
}

static_assertions::assert_impl_all!(IdleQueue: Send, Sync);
