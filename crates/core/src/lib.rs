//! Crontab occurrence analysis.
//!
//! This crate provides:
//! - Cron field compilation into tagged [`FieldSpec`]s with constant-time matching
//! - Crontab parsing with enabled/disabled/invalid job detection
//! - Per-minute occurrence enumeration over a closed [`Window`]
//! - Order-preserving aggregation of the selected jobs

pub mod analyzer;
pub mod crontab;
pub mod error;
pub mod field;
pub mod job;
pub mod occurrence;
pub mod schedule;
pub mod window;

pub use analyzer::{analyze, analyze_crontab, AnalysisResult, JobOccurrences};
pub use crontab::parse_crontab;
pub use error::{FieldError, LineError};
pub use field::{Field, FieldKind, FieldSpec, StepBase};
pub use job::CronJob;
pub use occurrence::{count_occurrences, occurrences};
pub use schedule::Schedule;
pub use window::Window;
