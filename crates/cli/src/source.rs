use anyhow::{bail, Context, Result};
use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Where the crontab text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrontabSource {
    File(PathBuf),
    Stdin,
    /// `crontab -l`, for the named user or the invoking one.
    User(Option<String>),
}

impl CrontabSource {
    /// Pick the source from the `--file` / `--user` arguments.
    /// A file path of `-` means standard input.
    pub fn from_args(file: Option<&str>, user: Option<&str>) -> Self {
        match (file, user) {
            (Some("-"), _) => Self::Stdin,
            (Some(path), _) => Self::File(PathBuf::from(path)),
            (None, user) => Self::User(user.map(str::to_string)),
        }
    }

    pub fn read(&self) -> Result<String> {
        debug!(source = %self, "Reading crontab");
        match self {
            Self::File(path) => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read crontab file: {}", path.display())),
            Self::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read crontab from stdin")?;
                Ok(text)
            }
            Self::User(user) => read_user_crontab(user.as_deref()),
        }
    }
}

fn read_user_crontab(user: Option<&str>) -> Result<String> {
    let mut command = Command::new("crontab");
    if let Some(user) = user {
        command.args(["-u", user]);
    }
    command.arg("-l");

    let output = command
        .output()
        .context("failed to run `crontab -l`; is cron installed?")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!(
            "`crontab -l` failed for {} ({}): {}",
            user.unwrap_or("current user"),
            output.status,
            stderr.trim()
        );
    }

    String::from_utf8(output.stdout).context("crontab output is not valid UTF-8")
}

impl fmt::Display for CrontabSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::Stdin => write!(f, "stdin"),
            Self::User(Some(user)) => write!(f, "crontab of {}", user),
            Self::User(None) => write!(f, "crontab of current user"),
        }
    }
}
