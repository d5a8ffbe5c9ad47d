//! Five-field schedule: minute hour day-of-month month day-of-week.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::error::LineError;
use crate::field::{Field, FieldKind};

/// The compiled schedule of one crontab job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    minute: Field,
    hour: Field,
    day_of_month: Field,
    month: Field,
    day_of_week: Field,
    expression: String,
}

impl Schedule {
    /// Compile exactly five field specs, in crontab order.
    pub fn from_fields(fields: &[&str]) -> Result<Self, LineError> {
        if fields.len() != FieldKind::ALL.len() {
            return Err(LineError::MissingFields(fields.len()));
        }

        let compiled = FieldKind::ALL
            .into_iter()
            .zip(fields)
            .map(|(kind, spec)| compile(kind, spec))
            .collect::<Result<Vec<_>, _>>()?;
        let Ok([minute, hour, day_of_month, month, day_of_week]) = <[Field; 5]>::try_from(compiled)
        else {
            return Err(LineError::MissingFields(fields.len()));
        };

        Ok(Self {
            minute,
            hour,
            day_of_month,
            month,
            day_of_week,
            expression: fields.join(" "),
        })
    }

    /// The five fields, single-space separated.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Fields in crontab order.
    pub fn fields(&self) -> [&Field; 5] {
        [
            &self.minute,
            &self.hour,
            &self.day_of_month,
            &self.month,
            &self.day_of_week,
        ]
    }

    /// Whether the schedule fires at the minute containing `at`.
    pub fn matches(&self, at: &NaiveDateTime) -> bool {
        self.minute.matches(at.minute())
            && self.hour.matches(at.hour())
            && self.month.matches(at.month())
            && self.day_matches(at.date())
    }

    /// Classic cron day rule: when both day fields are restricted either one
    /// may match, otherwise both must.
    fn day_matches(&self, date: NaiveDate) -> bool {
        let dom = self.day_of_month.matches(date.day());
        let dow = self
            .day_of_week
            .matches(date.weekday().num_days_from_sunday());

        if self.day_of_month.is_restricted() && self.day_of_week.is_restricted() {
            dom || dow
        } else {
            dom && dow
        }
    }
}

fn compile(kind: FieldKind, spec: &str) -> Result<Field, LineError> {
    Field::compile(kind, spec).map_err(|source| LineError::Field {
        kind,
        spec: spec.to_string(),
        source,
    })
}

impl FromStr for Schedule {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split_whitespace().collect();
        Self::from_fields(&fields)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}
