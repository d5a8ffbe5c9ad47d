use thiserror::Error;

use crate::field::FieldKind;

/// Failure to compile a single cron field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("empty field or list term")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("value {value} outside {min}-{max}")]
    OutOfRange { value: u32, min: u32, max: u32 },

    #[error("range {lo}-{hi} is inverted")]
    InvertedRange { lo: u32, hi: u32 },

    #[error("invalid step '{0}', expected a positive integer")]
    InvalidStep(String),
}

/// Failure to parse one crontab line into a job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LineError {
    #[error("expected 5 schedule fields, found {0}")]
    MissingFields(usize),

    #[error("invalid {kind} field '{spec}': {source}")]
    Field {
        kind: FieldKind,
        spec: String,
        #[source]
        source: FieldError,
    },
}
