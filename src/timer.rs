//! Deferred callbacks for the single-threaded event loop.
//!
//! Time is a monotonic offset (`Duration`) from application start, supplied by
//! the caller. The event loop passes `Instant::elapsed`, tests pass literals.
//! Every scheduled task gets a [`TimerHandle`]; owners keep the handle next to
//! the state the task will touch and cancel it when superseded.

use std::time::Duration;

use crate::dom::ElementId;

/// Handle of a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Work to perform when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerTask {
    /// Hide the transient overlay
    HideOverlay,
    /// Remove a navigation announcement node
    RemoveAnnouncement(ElementId),
    /// Resolve the pending contact form submission
    SettleSubmission,
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    deadline: Duration,
    task: TimerTask,
}

/// Timer queue.
#[derive(Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_handle: u64,
}

impl Scheduler {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `task` to run `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, task: TimerTask) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.entries.push(Entry {
            handle,
            deadline: now + delay,
            task,
        });
        tracing::debug!(?handle, ?task, deadline_ms = (now + delay).as_millis(), "timer scheduled");
        handle
    }

    /// Cancels a pending task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        let cancelled = self.entries.len() != before;
        if cancelled {
            tracing::debug!(?handle, "timer cancelled");
        }
        cancelled
    }

    /// Whether a handle is still pending.
    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Number of pending tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns every task due at `now`, in deadline order.
    ///
    /// Tasks with equal deadlines come out in the order they were scheduled.
    pub fn drain_due(&mut self, now: Duration) -> Vec<(TimerHandle, TimerTask)> {
        let mut due: Vec<Entry> = Vec::new();
        let mut pending = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if entry.deadline <= now {
                due.push(entry);
            } else {
                pending.push(entry);
            }
        }
        self.entries = pending;

        due.sort_by_key(|e| (e.deadline, e.handle));
        due.into_iter().map(|e| (e.handle, e.task)).collect()
    }
}
