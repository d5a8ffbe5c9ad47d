//! Crontab text → ordered job records.

use tracing::trace;

use crate::job::CronJob;

/// Parse a whole crontab.
///
/// - Blank lines and `NAME=value` settings are skipped.
/// - A `#` line that parses as a job becomes a disabled job; any other `#`
///   line is an ordinary comment and is dropped.
/// - Every other line becomes a job, invalid ones included, so callers can
///   report them.
pub fn parse_crontab(text: &str) -> Vec<CronJob> {
    let mut jobs = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        let trimmed = line.trim_start();

        if trimmed.trim_end().is_empty() {
            continue;
        }

        if let Some(commented) = trimmed.strip_prefix('#') {
            let job = CronJob::from_text(line, line_number, commented, false);
            if job.is_valid() {
                jobs.push(job);
            } else {
                trace!(line_number, "skipping comment");
            }
            continue;
        }

        if is_env_assignment(trimmed) {
            trace!(line_number, "skipping environment setting");
            continue;
        }

        jobs.push(CronJob::from_text(line, line_number, trimmed, true));
    }

    jobs
}

/// `NAME=value` or `NAME = value`.
fn is_env_assignment(line: &str) -> bool {
    match line.split_once('=') {
        Some((name, _)) => {
            let name = name.trim_end();
            !name.is_empty()
                && name
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_source_order_and_line_numbers() {
        let jobs = parse_crontab("0 1 * * * first\n\n  \n0 2 * * * second\n");
        let seen: Vec<_> = jobs
            .iter()
            .map(|j| (j.line_number, j.command.as_str()))
            .collect();
        assert_eq!(seen, vec![(1, "first"), (4, "second")]);
    }

    #[test]
    fn commented_job_is_disabled() {
        let jobs = parse_crontab("#* * * * * it");
        assert_eq!(jobs.len(), 1);
        assert!(!jobs[0].enabled);
        assert!(jobs[0].is_valid());
        assert_eq!(jobs[0].command, "it");
        assert_eq!(jobs[0].line, "#* * * * * it");
    }

    #[test]
    fn commented_job_with_space_after_marker() {
        let jobs = parse_crontab("# 30 2 * * 0 weekly.sh");
        assert_eq!(jobs.len(), 1);
        assert!(!jobs[0].enabled);
        assert_eq!(jobs[0].command, "weekly.sh");
    }

    #[test]
    fn plain_comments_are_dropped() {
        let text = "# m h  dom mon dow   command\n# 5 things to remember\n##\n#\n";
        assert!(parse_crontab(text).is_empty());
    }

    #[test]
    fn invalid_lines_are_kept_as_invalid_jobs() {
        let jobs = parse_crontab("invalid_line\n0 0 * * * ok");
        assert_eq!(jobs.len(), 2);
        assert!(!jobs[0].is_valid());
        assert!(jobs[1].is_valid());
    }

    #[test]
    fn environment_settings_are_skipped() {
        let jobs = parse_crontab("SHELL=/bin/bash\nMAILTO = ops@example.com\n0 0 * * * run");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].command, "run");
    }

    #[test]
    fn command_may_contain_equals() {
        let jobs = parse_crontab("0 0 * * * env FOO=bar run");
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].command, "env FOO=bar run");
    }

    #[test]
    fn crlf_line_endings() {
        let jobs = parse_crontab("0 0 * * * run\r\n#0 1 * * * off\r\n");
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].command, "run");
        assert_eq!(jobs[1].command, "off");
    }
}
