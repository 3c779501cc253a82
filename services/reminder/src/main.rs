//! Registers the once-per-minute popup reminder in the user's crontab.

mod crontab;

use std::env;

use crontab::ReminderJob;

const DEFAULT_COMMAND: &str = "python popup_reminder.py";

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let dry_run = env::args().skip(1).any(|arg| arg == "--dry-run");
    let command = env::var("REMINDER_COMMAND").unwrap_or(DEFAULT_COMMAND.to_string());
    let job = ReminderJob::new(command);

    let existing = crontab::read()?;
    let Some(merged) = crontab::merge(&existing, &job) else {
        tracing::info!("Reminder already scheduled: {}", job.line());
        return Ok(());
    };

    if dry_run {
        print!("{merged}");
        return Ok(());
    }

    crontab::install(&merged)?;
    tracing::info!("Scheduled reminder: {}", job.line());
    Ok(())
}
