use std::io::{self, Write};

use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crony_core::{AnalysisResult, JobOccurrences};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// How much of each job's analysis to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailLevel {
    /// Job headers only
    None,
    /// Headers with occurrence counts
    #[default]
    Count,
    /// Counts plus every occurrence timestamp
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Rendering switches resolved from arguments and config.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub detail_level: DetailLevel,
    pub format: OutputFormat,
    pub exclude_header: bool,
    pub only_command: bool,
}

/// JSON view of one analysed job.
#[derive(Debug, Serialize)]
struct JobReport<'a> {
    line_number: usize,
    line: &'a str,
    command: &'a str,
    enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occurrences: Option<Vec<String>>,
}

pub fn render<W: Write>(out: &mut W, result: &AnalysisResult, opts: &RenderOptions) -> io::Result<()> {
    match opts.format {
        OutputFormat::Text => render_text(out, result, opts),
        OutputFormat::Json => render_json(out, result, opts),
    }
}

fn render_text<W: Write>(out: &mut W, result: &AnalysisResult, opts: &RenderOptions) -> io::Result<()> {
    for entry in result {
        if !opts.exclude_header {
            writeln!(out, "{}", header(entry, opts))?;
        }
        if opts.detail_level == DetailLevel::Full {
            for at in &entry.occurrences {
                writeln!(out, "  {}", timestamp(at))?;
            }
        }
    }
    out.flush()
}

fn header(entry: &JobOccurrences, opts: &RenderOptions) -> String {
    let mut header = String::new();
    if !entry.job.enabled {
        header.push_str("[disabled] ");
    }
    if opts.only_command {
        header.push_str(&entry.job.command);
    } else {
        header.push_str(&entry.job.line);
    }
    if opts.detail_level != DetailLevel::None {
        let count = entry.count();
        let noun = if count == 1 { "occurrence" } else { "occurrences" };
        header.push_str(&format!(" ({count} {noun})"));
    }
    header
}

fn render_json<W: Write>(out: &mut W, result: &AnalysisResult, opts: &RenderOptions) -> io::Result<()> {
    let reports: Vec<JobReport<'_>> = result
        .iter()
        .map(|entry| JobReport {
            line_number: entry.job.line_number,
            line: &entry.job.line,
            command: &entry.job.command,
            enabled: entry.job.enabled,
            count: (opts.detail_level != DetailLevel::None).then(|| entry.count()),
            occurrences: (opts.detail_level == DetailLevel::Full)
                .then(|| entry.occurrences.iter().map(timestamp).collect()),
        })
        .collect();

    serde_json::to_writer_pretty(&mut *out, &reports)?;
    writeln!(out)?;
    out.flush()
}

fn timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}
