//! Read-only statistics and views over a task collection
//!
//! Everything here borrows the task slice and computes on the fly; the
//! collections are small enough that linear passes are the whole story.

use std::collections::HashSet;

use crate::models::{Task, TaskStatus};

/// Aggregate statistics over a task collection.
pub struct Summary<'a> {
    tasks: &'a [Task],
}

impl<'a> Summary<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self { tasks }
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count()
    }

    /// Share of completed tasks as a percentage. Exactly zero for an
    /// empty collection, never a division by zero.
    pub fn completion_rate(&self) -> f64 {
        if self.tasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.total_count() as f64 * 100.0
        }
    }

    /// Sum of planned time over all tasks, in fractional hours.
    pub fn planned_total_hours(&self) -> f64 {
        self.tasks.iter().map(Task::planned_total).sum()
    }

    /// Sum of actual time over all tasks, in fractional hours.
    pub fn actual_total_hours(&self) -> f64 {
        self.tasks.iter().map(Task::actual_total).sum()
    }
}

/// Tasks whose status is in `statuses`, preserving collection order.
pub fn filter_by_status<'a>(
    tasks: &'a [Task],
    statuses: &HashSet<TaskStatus>,
) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| statuses.contains(&t.status))
        .collect()
}

/// Sort key for snapshot views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Status,
    Created,
}

/// Sorted snapshot view of the collection. The sort is stable: ties keep
/// their original relative order.
pub fn sort_by(tasks: &[Task], key: SortKey) -> Vec<&Task> {
    let mut view: Vec<&Task> = tasks.iter().collect();
    match key {
        SortKey::Name => view.sort_by(|a, b| a.task_name.cmp(&b.task_name)),
        SortKey::Status => view.sort_by_key(|t| t.status),
        SortKey::Created => view.sort_by_key(|t| t.created_ts),
    }
    view
}
