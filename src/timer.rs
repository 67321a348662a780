//! Virtual clock for deferred DOM work (`setTimeout`, animation frames).
//!
//! Time only moves when the page is told to advance. Tasks are plain data so
//! a pending schedule can be inspected and asserted on.

use std::collections::BTreeMap;

use crate::dom::{Dom, NodeId};

/// Handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// Deferred DOM mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    AddClasses { node: NodeId, classes: Vec<String> },
    SetStyles { node: NodeId, styles: Vec<(String, String)> },
    Remove { node: NodeId },
}

impl Task {
    /// Apply the task. A node that no longer exists makes this a no-op.
    pub fn apply(&self, dom: &mut Dom) {
        match self {
            Task::AddClasses { node, classes } => {
                if let Some(data) = dom.get_mut(*node) {
                    for class in classes {
                        data.add_class(class);
                    }
                }
            }
            Task::SetStyles { node, styles } => {
                if let Some(data) = dom.get_mut(*node) {
                    for (property, value) in styles {
                        data.set_style(property, value);
                    }
                }
            }
            Task::Remove { node } => {
                dom.remove(*node);
            }
        }
    }
}

/// Pending tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    now: u64,
    next_seq: u64,
    pending: BTreeMap<(u64, u64), Task>,
}

impl TimerQueue {
    /// Create an empty queue at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Run `task` `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: Task) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((self.now.saturating_add(delay_ms), seq), task);
        TimerId(seq)
    }

    /// Remove the earliest task due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: u64) -> Option<Task> {
        let (&(due, seq), _) = self.pending.iter().next()?;
        if due > until {
            return None;
        }
        self.now = self.now.max(due);
        self.pending.remove(&(due, seq))
    }

    /// Move the clock forward to `time` without running anything.
    pub fn set_now(&mut self, time: u64) {
        self.now = self.now.max(time);
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending tasks in run order, with their due times.
    pub fn pending(&self) -> impl Iterator<Item = (u64, &Task)> {
        self.pending.iter().map(|(&(due, _), task)| (due, task))
    }
}
