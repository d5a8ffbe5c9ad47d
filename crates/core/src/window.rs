//! Closed analysis window at minute granularity.

use chrono::{Duration, NaiveDateTime, Timelike};

/// Inclusive `[begin, end]` range of whole minutes.
///
/// Both bounds are truncated to the start of their minute. A window whose
/// begin lies after its end is empty rather than invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Window {
    begin: NaiveDateTime,
    end: NaiveDateTime,
}

impl Window {
    pub fn new(begin: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            begin: truncate_to_minute(begin),
            end: truncate_to_minute(end),
        }
    }

    pub fn begin(&self) -> NaiveDateTime {
        self.begin
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn is_empty(&self) -> bool {
        self.begin > self.end
    }

    pub fn contains(&self, at: NaiveDateTime) -> bool {
        let at = truncate_to_minute(at);
        self.begin <= at && at <= self.end
    }

    /// Number of whole minutes covered, both ends included.
    pub fn len_minutes(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.end - self.begin).num_minutes() + 1
        }
    }

    /// Every minute of the window in ascending order.
    pub fn minutes(&self) -> Minutes {
        Minutes {
            next: (!self.is_empty()).then_some(self.begin),
            end: self.end,
        }
    }
}

/// Iterator over the minutes of a [`Window`].
#[derive(Debug, Clone)]
pub struct Minutes {
    next: Option<NaiveDateTime>,
    end: NaiveDateTime,
}

impl Iterator for Minutes {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current
            .checked_add_signed(Duration::minutes(1))
            .filter(|next| *next <= self.end);
        Some(current)
    }
}

fn truncate_to_minute(at: NaiveDateTime) -> NaiveDateTime {
    at.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(at)
}
