//! A single crontab job line.

use chrono::NaiveDateTime;

use crate::error::LineError;
use crate::occurrence::occurrences;
use crate::schedule::Schedule;
use crate::window::Window;

/// One parsed crontab line.
///
/// Created once by the parser and read-only afterwards. `line` is always the
/// verbatim source text, whatever the parse outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CronJob {
    /// Original line, untouched.
    pub line: String,
    /// 1-based position in the crontab.
    pub line_number: usize,
    /// Command text with any inline `#` comment removed.
    pub command: String,
    /// Inline comment following the command, if present.
    pub comment: Option<String>,
    /// False for `#`-prefixed jobs.
    pub enabled: bool,
    schedule: Result<Schedule, LineError>,
}

impl CronJob {
    /// Parse a standalone, enabled job line.
    pub fn parse(line: &str) -> Self {
        Self::from_text(line, 1, line, true)
    }

    /// Parse `text` (the line with any disabling `#` already stripped) while
    /// keeping `line` as the verbatim original.
    pub(crate) fn from_text(line: &str, line_number: usize, text: &str, enabled: bool) -> Self {
        let (fields, rest) = split_schedule(text);
        let (command, comment) = split_comment(rest);

        Self {
            line: line.to_string(),
            line_number,
            command,
            comment,
            enabled,
            schedule: Schedule::from_fields(&fields),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.schedule.is_ok()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref().ok()
    }

    /// Why the line could not be parsed, for invalid jobs.
    pub fn error(&self) -> Option<&LineError> {
        self.schedule.as_ref().err()
    }

    /// Occurrences inside `window`; always empty for invalid jobs.
    pub fn occurrences(&self, window: &Window) -> Vec<NaiveDateTime> {
        self.schedule()
            .map(|schedule| occurrences(schedule, window))
            .unwrap_or_default()
    }
}

/// Split off up to five leading whitespace-separated tokens; the rest of the
/// line (leading whitespace removed) is returned as-is.
fn split_schedule(text: &str) -> (Vec<&str>, &str) {
    let mut fields = Vec::with_capacity(5);
    let mut rest = text.trim_start();

    while fields.len() < 5 && !rest.is_empty() {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }

    (fields, rest)
}

fn split_comment(rest: &str) -> (String, Option<String>) {
    match rest.split_once('#') {
        Some((command, comment)) => (
            command.trim().to_string(),
            Some(comment.trim().to_string()),
        ),
        None => (rest.trim().to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_the_remainder() {
        let job = CronJob::parse("*/5 * * * *   /usr/bin/backup --full  ");
        assert!(job.is_valid());
        assert!(job.enabled);
        assert_eq!(job.command, "/usr/bin/backup --full");
        assert_eq!(job.comment, None);
        assert_eq!(job.schedule().unwrap().expression(), "*/5 * * * *");
    }

    #[test]
    fn inline_comment_is_stripped_from_command_only() {
        let line = "* * * * * enabled # enabled comment";
        let job = CronJob::parse(line);
        assert_eq!(job.command, "enabled");
        assert_eq!(job.comment.as_deref(), Some("enabled comment"));
        assert_eq!(job.line, line);
    }

    #[test]
    fn schedule_without_command_is_valid() {
        let job = CronJob::parse("0 0 * * *");
        assert!(job.is_valid());
        assert_eq!(job.command, "");
    }

    #[test]
    fn short_line_is_invalid() {
        let job = CronJob::parse("invalid_line");
        assert!(!job.is_valid());
        assert_eq!(job.error(), Some(&LineError::MissingFields(1)));
        assert_eq!(job.line, "invalid_line");
        assert!(job.schedule().is_none());
    }

    #[test]
    fn bad_field_is_invalid() {
        let job = CronJob::parse("59 11 0 0 0 /bin/true");
        assert!(!job.is_valid());
        assert!(matches!(job.error(), Some(LineError::Field { .. })));
        assert_eq!(job.command, "/bin/true");
    }

    #[test]
    fn invalid_job_never_occurs() {
        let job = CronJob::parse("61 * * * * nope");
        let begin = chrono::NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let window = Window::new(begin, begin + chrono::Duration::days(1));
        assert!(job.occurrences(&window).is_empty());
    }
}
