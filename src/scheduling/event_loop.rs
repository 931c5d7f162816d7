//! Single-threaded cooperative task queue on virtual time
//!
//! Tasks never run concurrently: each one receives exclusive access to the
//! shared context and to the loop itself, so it can schedule follow-up work.
//! Time only advances when the next due task is taken off the queue, which
//! keeps runs deterministic and instantaneous to execute.

use crate::io::configuration::FRAME_INTERVAL;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

type Task<C> = Box<dyn FnOnce(&mut C, &mut EventLoop<C>)>;

/// Identifies a scheduled task; ordered by due time, then scheduling order
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskHandle {
    due: Duration,
    id: u64,
}

impl TaskHandle {
    /// Virtual time at which the task becomes runnable
    pub const fn due(&self) -> Duration {
        self.due
    }
}

/// Cooperative scheduler offering frame requests and timeouts
pub struct EventLoop<C> {
    now: Duration,
    frame_interval: Duration,
    next_id: u64,
    queue: BTreeMap<TaskHandle, Task<C>>,
    executed: usize,
}

impl<C> Default for EventLoop<C> {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}

impl<C> fmt::Debug for EventLoop<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLoop")
            .field("now", &self.now)
            .field("frame_interval", &self.frame_interval)
            .field("pending", &self.queue.len())
            .field("executed", &self.executed)
            .finish()
    }
}

impl<C> EventLoop<C> {
    /// Create an idle loop at time zero
    pub const fn new(frame_interval: Duration) -> Self {
        Self {
            now: Duration::ZERO,
            frame_interval,
            next_id: 0,
            queue: BTreeMap::new(),
            executed: 0,
        }
    }

    /// Current virtual time
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Number of scheduled tasks
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True when nothing is scheduled
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of tasks run so far
    pub const fn executed(&self) -> usize {
        self.executed
    }

    /// Whether `handle` is still waiting to run
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.contains_key(&handle)
    }

    /// Run `task` once `delay` has elapsed
    pub fn set_timeout<F>(&mut self, delay: Duration, task: F) -> TaskHandle
    where
        F: FnOnce(&mut C, &mut Self) + 'static,
    {
        let due = self.now.saturating_add(delay);
        self.schedule(due, Box::new(task))
    }

    /// Run `task` at the next frame boundary strictly after now
    pub fn request_frame<F>(&mut self, task: F) -> TaskHandle
    where
        F: FnOnce(&mut C, &mut Self) + 'static,
    {
        let due = self.next_frame();
        self.schedule(due, Box::new(task))
    }

    /// Drop a scheduled task; returns whether it was still pending
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.queue.remove(&handle).is_some()
    }

    /// Advance to the earliest task and run it; false when idle
    pub fn run_next(&mut self, context: &mut C) -> bool {
        let Some((handle, task)) = self.queue.pop_first() else {
            return false;
        };
        self.now = self.now.max(handle.due);
        self.executed += 1;
        task(context, self);
        true
    }

    /// Run tasks until the queue is empty; returns how many ran
    pub fn run_until_idle(&mut self, context: &mut C) -> usize {
        let start = self.executed;
        while self.run_next(context) {}
        self.executed - start
    }

    /// Run every task due at or before `deadline`, then move time to it
    pub fn run_until(&mut self, context: &mut C, deadline: Duration) -> usize {
        let start = self.executed;
        while self
            .queue
            .first_key_value()
            .is_some_and(|(handle, _)| handle.due <= deadline)
        {
            self.run_next(context);
        }
        self.now = self.now.max(deadline);
        self.executed - start
    }

    fn schedule(&mut self, due: Duration, task: Task<C>) -> TaskHandle {
        let handle = TaskHandle {
            due,
            id: self.next_id,
        };
        self.next_id += 1;
        self.queue.insert(handle, task);
        handle
    }

    fn next_frame(&self) -> Duration {
        let interval = self.frame_interval.as_nanos();
        if interval == 0 {
            return self.now;
        }
        let frames = self.now.as_nanos() / interval + 1;
        let nanos = frames.saturating_mul(interval);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}
