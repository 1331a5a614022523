use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use notify_rust::Notification;
use taskpad_core::TaskRepository;
use taskpad_core::config::{TaskpadConfig, parse_interval};
use taskpad_core::scheduler::{DeliveryError, Notifier, Reminder, Scheduler};
use tracing_subscriber::EnvFilter;

/// Show desktop notifications for tasks whose reminder window has opened.
#[derive(Parser)]
#[command(name = "taskpad-notify")]
struct Cli {
    /// Check once and exit
    #[arg(long)]
    once: bool,

    /// Time between checks, e.g. "30s" or "2m" (overrides reminder_interval)
    #[arg(long, value_parser = parse_interval)]
    interval: Option<Duration>,
}

struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn deliver(&self, reminder: &Reminder) -> Result<(), DeliveryError> {
        Notification::new()
            .appname("taskpad")
            .summary(reminder.summary())
            .body(&reminder.body())
            .show()
            .map(|_| ())
            .map_err(|e| DeliveryError(e.to_string()))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskpad_notify=info,taskpad_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = TaskpadConfig::load()?;
    let interval = match cli.interval {
        Some(interval) => interval,
        None => config.reminder_interval()?,
    };

    let mut repo = TaskRepository::load(config.store());
    let scheduler = Scheduler::new(DesktopNotifier).with_interval(interval);

    if cli.once {
        let fired = scheduler.tick(&mut repo, Local::now().naive_local())?;
        tracing::info!(count = fired.len(), "reminders delivered");
        return Ok(());
    }

    tracing::info!(
        interval = %humantime::format_duration(scheduler.interval()),
        data_dir = %config.data_path().display(),
        "watching for reminders"
    );

    let shutdown = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down..."),
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for Ctrl+C");
                std::future::pending::<()>().await
            }
        }
    };
    scheduler
        .run(&mut repo, || Local::now().naive_local(), shutdown)
        .await;

    Ok(())
}
