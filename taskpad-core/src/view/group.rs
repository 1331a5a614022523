use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::task::Task;

/// Display bucket for a task's due date.
///
/// Variant order is display order: `Today`, `Tomorrow`, other days in
/// ascending date order (overdue days included), then `NoDueDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DateBucket {
    Today,
    Tomorrow,
    Day(NaiveDate),
    NoDueDate,
}

impl DateBucket {
    /// Malformed due dates fall into `NoDueDate`.
    pub fn for_task(task: &Task, reference: NaiveDate) -> Self {
        let Some(day) = task.due_day() else {
            return DateBucket::NoDueDate;
        };

        if day == reference {
            DateBucket::Today
        } else if Some(day) == reference.checked_add_days(Days::new(1)) {
            DateBucket::Tomorrow
        } else {
            DateBucket::Day(day)
        }
    }

    /// e.g. "Today" or "Saturday, October 24, 2026"
    pub fn label(&self) -> String {
        match self {
            DateBucket::Today => "Today".to_string(),
            DateBucket::Tomorrow => "Tomorrow".to_string(),
            DateBucket::Day(day) => day.format("%A, %B %-d, %Y").to_string(),
            DateBucket::NoDueDate => "No Due Date".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    pub bucket: DateBucket,
    pub tasks: Vec<&'a Task>,
}

impl TaskGroup<'_> {
    pub fn label(&self) -> String {
        self.bucket.label()
    }
}

/// Group tasks by due day. Within a group tasks keep their input order.
pub fn group_by_date<'a, I>(tasks: I, reference: NaiveDate) -> Vec<TaskGroup<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut buckets: BTreeMap<DateBucket, Vec<&'a Task>> = BTreeMap::new();

    for task in tasks {
        buckets
            .entry(DateBucket::for_task(task, reference))
            .or_default()
            .push(task);
    }

    buckets
        .into_iter()
        .map(|(bucket, tasks)| TaskGroup { bucket, tasks })
        .collect()
}
