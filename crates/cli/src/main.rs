mod cli;
mod config;
mod output;
mod source;

use anyhow::{Context, Result};
use chrono::{Duration, Local};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crony_core::{analyze, parse_crontab, CronJob, Window};

use crate::cli::CliArgs;
use crate::config::CronyConfig;
use crate::source::CrontabSource;

fn main() -> Result<()> {
    // .env values feed the CRONY_* argument fallbacks
    dotenvy::dotenv().ok();

    let args = CliArgs::parse();

    let config = CronyConfig::load(args.config.as_deref())
        .context("failed to load configuration")?
        .apply_args(&args);

    let env_directive = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(
        args.log_level.as_deref(),
        env_directive.as_deref(),
        &config.log_level,
    )?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match &config.loaded_from {
        Some(path) => debug!(config = %path.display(), "Loaded configuration"),
        None => debug!("No configuration file, using defaults"),
    }

    let begin = args.begin.unwrap_or_else(|| Local::now().naive_local());
    let end = args
        .end
        .or_else(|| begin.checked_add_signed(Duration::days(1)))
        .unwrap_or(begin);
    let window = Window::new(begin, end);
    if window.is_empty() {
        warn!(%begin, %end, "Window begins after it ends; nothing can occur");
    }

    let source = CrontabSource::from_args(args.file.as_deref(), args.user.as_deref());
    let text = source.read()?;

    let jobs = parse_crontab(&text);
    report_invalid(&jobs, config.report_invalid);

    info!(
        source = %source,
        jobs = jobs.len(),
        begin = %window.begin(),
        end = %window.end(),
        "Analysing crontab"
    );
    let result = analyze(jobs, &window, config.include_disabled);

    let mut stdout = std::io::stdout().lock();
    output::render(&mut stdout, &result, &config.render_options())
        .context("failed to write report")?;

    Ok(())
}

/// `--log-level` wins, then `RUST_LOG`, then the configured level.
fn build_filter(directive: Option<&str>, env: Option<&str>, fallback: &str) -> Result<EnvFilter> {
    if let Some(directive) = directive {
        return EnvFilter::try_new(directive)
            .with_context(|| format!("invalid log level '{}'", directive));
    }
    if let Some(env) = env.filter(|env| !env.trim().is_empty()) {
        return EnvFilter::try_new(env)
            .with_context(|| format!("invalid {} '{}'", EnvFilter::DEFAULT_ENV, env));
    }
    EnvFilter::try_new(fallback)
        .with_context(|| format!("invalid log_level '{}' in configuration", fallback))
}

fn report_invalid(jobs: &[CronJob], as_warning: bool) {
    for job in jobs {
        let Some(error) = job.error() else {
            continue;
        };
        if as_warning {
            warn!(line = job.line_number, text = %job.line, error = %error, "Skipping invalid crontab line");
        } else {
            debug!(line = job.line_number, text = %job.line, error = %error, "Skipping invalid crontab line");
        }
    }
}
