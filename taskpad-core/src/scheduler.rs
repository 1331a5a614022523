//! Due-date reminders.
//!
//! Each task with a due date and a lead time moves through
//! `Pending -> Armed -> Fired`. A periodic tick delivers reminders for
//! armed tasks and persists `notified` once delivery succeeds. Reminders
//! fire at most once per due date / lead time; editing a task re-arms it.
//! If the whole armed window passes between two ticks the reminder is
//! skipped.

use std::future::Future;
use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;

use crate::error::TaskpadResult;
use crate::repository::TaskRepository;
use crate::store::Store;
use crate::task::Task;

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    /// Not yet inside the reminder window, or no reminder applies.
    Pending,
    /// Inside the window and not yet delivered.
    Armed,
    Fired,
}

/// Where `task` stands at local time `now`.
pub fn reminder_state(task: &Task, now: NaiveDateTime) -> ReminderState {
    if task.notified {
        return ReminderState::Fired;
    }

    let Some(due) = task.due_datetime() else {
        return ReminderState::Pending;
    };
    if task.notify_before == 0 {
        return ReminderState::Pending;
    }

    let window_start = due - TimeDelta::minutes(i64::from(task.notify_before));
    if now >= window_start && now < due {
        ReminderState::Armed
    } else {
        ReminderState::Pending
    }
}

/// What gets shown to the user when a reminder fires.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub task_id: String,
    pub title: String,
    pub minutes_before: u32,
    pub due: NaiveDateTime,
}

impl Reminder {
    fn for_task(task: &Task, due: NaiveDateTime) -> Self {
        Reminder {
            task_id: task.id.clone(),
            title: task.title.clone(),
            minutes_before: task.notify_before,
            due,
        }
    }

    pub fn summary(&self) -> &'static str {
        "Task Reminder"
    }

    pub fn body(&self) -> String {
        format!("\"{}\" is due in {} minutes!", self.title, self.minutes_before)
    }
}

#[derive(Error, Debug)]
#[error("Notification delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Channel that shows reminders to the user.
pub trait Notifier {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError>;
}

impl<F> Notifier for F
where
    F: Fn(&Reminder) -> Result<(), DeliveryError>,
{
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError> {
        self(reminder)
    }
}

pub struct Scheduler<N: Notifier> {
    notifier: N,
    interval: Duration,
}

impl<N: Notifier> Scheduler<N> {
    pub fn new(notifier: N) -> Self {
        Scheduler {
            notifier,
            interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// A zero interval keeps the default; ticking cannot be continuous.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        if interval.is_zero() {
            tracing::warn!("zero reminder interval, using {:?}", DEFAULT_TICK_INTERVAL);
        } else {
            self.interval = interval;
        }
        self
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Deliver every armed reminder. Returns the ids of tasks that fired.
    ///
    /// Tasks whose delivery fails stay armed and are retried next tick.
    pub fn tick<S: Store>(
        &self,
        repo: &mut TaskRepository<S>,
        now: NaiveDateTime,
    ) -> TaskpadResult<Vec<String>> {
        let armed: Vec<Reminder> = repo
            .tasks()
            .iter()
            .filter(|task| reminder_state(task, now) == ReminderState::Armed)
            .filter_map(|task| task.due_datetime().map(|due| Reminder::for_task(task, due)))
            .collect();

        let mut fired = Vec::new();
        for reminder in armed {
            match self.notifier.deliver(&reminder) {
                Ok(()) => {
                    repo.mark_notified(&reminder.task_id)?;
                    tracing::info!(task_id = %reminder.task_id, "reminder delivered");
                    fired.push(reminder.task_id);
                }
                Err(e) => {
                    tracing::warn!(task_id = %reminder.task_id, error = %e, "reminder not delivered");
                }
            }
        }

        Ok(fired)
    }

    /// Tick immediately and then once per interval until `shutdown`
    /// resolves. `clock` supplies the local time for each tick.
    ///
    /// The repository is reloaded before every tick so edits made by
    /// other processes are seen.
    pub async fn run<S, C, F>(&self, repo: &mut TaskRepository<S>, clock: C, shutdown: F)
    where
        S: Store,
        C: Fn() -> NaiveDateTime,
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    repo.reload();
                    if let Err(e) = self.tick(repo, clock()) {
                        tracing::error!(error = %e, "reminder tick failed");
                    }
                }
            }
        }

        tracing::debug!("scheduler stopped");
    }
}
