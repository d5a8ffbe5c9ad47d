//! Job selection and per-job occurrence aggregation.

use chrono::NaiveDateTime;
use rayon::prelude::*;
use tracing::debug;

use crate::crontab::parse_crontab;
use crate::job::CronJob;
use crate::window::Window;

/// A selected job together with its occurrences in the analysed window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOccurrences {
    pub job: CronJob,
    pub occurrences: Vec<NaiveDateTime>,
}

impl JobOccurrences {
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }
}

/// Selected jobs in crontab order, zero-occurrence jobs included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub window: Window,
    pub jobs: Vec<JobOccurrences>,
}

impl AnalysisResult {
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JobOccurrences> {
        self.jobs.iter()
    }

    /// Sum of occurrence counts over all selected jobs.
    pub fn total_occurrences(&self) -> usize {
        self.jobs.iter().map(JobOccurrences::count).sum()
    }
}

impl<'a> IntoIterator for &'a AnalysisResult {
    type Item = &'a JobOccurrences;
    type IntoIter = std::slice::Iter<'a, JobOccurrences>;

    fn into_iter(self) -> Self::IntoIter {
        self.jobs.iter()
    }
}

/// Whether a job takes part in the analysis.
pub fn is_selected(job: &CronJob, include_disabled: bool) -> bool {
    job.is_valid() && (job.enabled || include_disabled)
}

/// Evaluate every selected job over `window`.
///
/// Jobs are independent, so they are evaluated in parallel; the result keeps
/// the original crontab order.
pub fn analyze(jobs: Vec<CronJob>, window: &Window, include_disabled: bool) -> AnalysisResult {
    let total = jobs.len();

    let selected: Vec<JobOccurrences> = jobs
        .into_par_iter()
        .filter(|job| is_selected(job, include_disabled))
        .map(|job| {
            let occurrences = job.occurrences(window);
            JobOccurrences { job, occurrences }
        })
        .collect();

    debug!(
        total,
        selected = selected.len(),
        window_minutes = window.len_minutes(),
        "analysed crontab"
    );

    AnalysisResult {
        window: *window,
        jobs: selected,
    }
}

/// Parse `text` and analyse it in one go.
pub fn analyze_crontab(text: &str, window: &Window, include_disabled: bool) -> AnalysisResult {
    analyze(parse_crontab(text), window, include_disabled)
}
