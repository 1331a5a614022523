use anyhow::Result;
use owo_colors::OwoColorize;
use taskpad_core::TaskRepository;
use taskpad_core::scheduler::{DeliveryError, Reminder, Scheduler};
use taskpad_core::store::Store;

use super::now;

/// Run a single reminder check and print what fires.
///
/// For desktop notifications on a schedule use `taskpad-notify`.
pub fn run<S: Store>(repo: &mut TaskRepository<S>) -> Result<()> {
    let scheduler = Scheduler::new(print_reminder);
    let fired = scheduler.tick(repo, now())?;

    if fired.is_empty() {
        println!("{}", "No reminders due".dimmed());
    }

    Ok(())
}

fn print_reminder(reminder: &Reminder) -> Result<(), DeliveryError> {
    println!("{} {}", reminder.summary().yellow().bold(), reminder.body());
    Ok(())
}
