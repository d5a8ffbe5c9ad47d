use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;

use crate::output::{DetailLevel, OutputFormat};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Report which crontab jobs fire within a datetime window, and how often.
///
/// Reads the current user's crontab unless a file or user is given.
#[derive(Parser, Debug)]
#[command(name = "crony", version, about)]
pub struct CliArgs {
    /// Read the crontab from this file (`-` for stdin)
    #[arg(short, long, env = "CRONY_FILE", conflicts_with = "user")]
    pub file: Option<String>,

    /// Read the crontab of this user via `crontab -l -u`
    #[arg(short, long, env = "CRONY_USER")]
    pub user: Option<String>,

    /// Window start, e.g. "2020-01-01 00:00:00" (default: now)
    #[arg(short, long, env = "CRONY_BEGIN", value_parser = parse_datetime)]
    pub begin: Option<NaiveDateTime>,

    /// Window end, inclusive (default: begin + 1 day)
    #[arg(short, long, env = "CRONY_END", value_parser = parse_datetime)]
    pub end: Option<NaiveDateTime>,

    /// Also analyse jobs disabled with a leading `#`
    #[arg(short, long)]
    pub include_disabled: bool,

    /// How much to print per job
    #[arg(short, long, env = "CRONY_DETAIL_LEVEL", value_enum)]
    pub detail_level: Option<DetailLevel>,

    /// Omit the per-job header line
    #[arg(short = 'x', long)]
    pub exclude_header: bool,

    /// Show only the command in headers, not the whole crontab line
    #[arg(short = 'c', long)]
    pub only_command: bool,

    /// Output format
    #[arg(long, env = "CRONY_FORMAT", value_enum)]
    pub format: Option<OutputFormat>,

    /// Log unparsable crontab lines as warnings
    #[arg(long)]
    pub report_invalid: bool,

    /// Tracing filter, e.g. "debug" or "crony_core=trace" (overrides RUST_LOG)
    #[arg(short, long, env = "CRONY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Path to config file (default: ~/.config/crony/config.toml)
    #[arg(long, env = "CRONY_CONFIG")]
    pub config: Option<String>,
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]`, the `T`-separated forms, or a bare date
/// (midnight).
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid datetime '{s}', expected e.g. '2020-01-01 00:00:00'"))
}
