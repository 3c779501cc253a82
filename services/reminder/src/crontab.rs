use std::{
    io::Write,
    process::{Command, Stdio},
};

use anyhow::{bail, Context};
use derive_new::new;

pub const EVERY_MINUTE: &str = "* * * * *";

/// A job that runs `command` once per minute.
#[derive(Clone, Debug, Eq, PartialEq, new)]
pub struct ReminderJob {
    command: String,
}

impl ReminderJob {
    pub fn line(&self) -> String {
        format!("{} {}", EVERY_MINUTE, self.command.trim())
    }
}

/// Appends the job to an existing crontab. `None` means it is already there.
pub fn merge(existing: &str, job: &ReminderJob) -> Option<String> {
    let line = job.line();
    if existing.lines().any(|l| l.trim() == line) {
        return None;
    }

    let mut merged = existing.to_string();
    if !merged.is_empty() && !merged.ends_with('\n') {
        merged.push('\n');
    }
    merged.push_str(&line);
    merged.push('\n');
    Some(merged)
}

/// Current user crontab; a user without one has an empty crontab.
pub fn read() -> anyhow::Result<String> {
    let output = Command::new("crontab")
        .arg("-l")
        .output()
        .context("failed to run crontab -l")?;

    if output.status.success() {
        return Ok(String::from_utf8(output.stdout)?);
    }

    missing_crontab(&String::from_utf8_lossy(&output.stderr))
}

// `crontab -l` exits non-zero both for a real failure and for a user with no crontab
fn missing_crontab(stderr: &str) -> anyhow::Result<String> {
    if stderr.contains("no crontab") {
        return Ok(String::new());
    }
    bail!("crontab -l failed: {}", stderr.trim())
}

pub fn install(contents: &str) -> anyhow::Result<()> {
    let mut child = Command::new("crontab")
        .arg("-")
        .stdin(Stdio::piped())
        .spawn()
        .context("failed to run crontab -")?;

    // stdin is dropped before waiting so crontab sees EOF
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin
            .write_all(contents.as_bytes())
            .context("failed to write crontab"),
        None => Err(anyhow::anyhow!("crontab stdin unavailable")),
    };

    let status = child.wait()?;
    written?;
    if !status.success() {
        bail!("crontab - exited with {}", status);
    }
    Ok(())
}
