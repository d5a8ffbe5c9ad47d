//! Cron field compilation: `*`, `N`, `N-M`, `atom/step` and comma lists.
//!
//! Domains are tiny (at most 60 values), so a compiled [`Field`] keeps the
//! matched set as a 64-bit mask next to the tagged [`FieldSpec`] it was
//! built from. Membership is a single shift-and-test.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::FieldError;

/// Position of a field within a five-field cron expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Minute,
    Hour,
    DayOfMonth,
    Month,
    DayOfWeek,
}

impl FieldKind {
    /// Field order as it appears on a crontab line.
    pub const ALL: [FieldKind; 5] = [
        FieldKind::Minute,
        FieldKind::Hour,
        FieldKind::DayOfMonth,
        FieldKind::Month,
        FieldKind::DayOfWeek,
    ];

    pub fn min(self) -> u32 {
        match self {
            FieldKind::Minute | FieldKind::Hour | FieldKind::DayOfWeek => 0,
            FieldKind::DayOfMonth | FieldKind::Month => 1,
        }
    }

    pub fn max(self) -> u32 {
        match self {
            FieldKind::Minute => 59,
            FieldKind::Hour => 23,
            FieldKind::DayOfMonth => 31,
            FieldKind::Month => 12,
            FieldKind::DayOfWeek => 6,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Minute => write!(f, "minute"),
            FieldKind::Hour => write!(f, "hour"),
            FieldKind::DayOfMonth => write!(f, "day-of-month"),
            FieldKind::Month => write!(f, "month"),
            FieldKind::DayOfWeek => write!(f, "day-of-week"),
        }
    }
}

/// What a stepped term walks over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepBase {
    Wildcard,
    Range(u32, u32),
}

/// Shape of a compiled field.
///
/// Single-term fields keep their shape; a bare value or any comma list is
/// flattened into an explicit set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    Wildcard,
    ExplicitSet(BTreeSet<u32>),
    Range(u32, u32),
    Stepped { base: StepBase, step: u32 },
}

/// A compiled cron field: a predicate over the field's integer domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    kind: FieldKind,
    spec: FieldSpec,
    mask: u64,
}

impl Field {
    /// Compile the textual spec of one field.
    pub fn compile(kind: FieldKind, text: &str) -> Result<Self, FieldError> {
        let terms = text
            .split(',')
            .map(|term| parse_term(kind, term))
            .collect::<Result<Vec<_>, _>>()?;

        let mask = terms
            .iter()
            .fold(0u64, |acc, &(base, step)| acc | term_mask(kind, base, step));

        let spec = match terms.as_slice() {
            [(StepBase::Wildcard, None)] => FieldSpec::Wildcard,
            [(StepBase::Range(lo, hi), None)] if lo < hi => FieldSpec::Range(*lo, *hi),
            [(base, Some(step))] => FieldSpec::Stepped {
                base: *base,
                step: *step,
            },
            _ => FieldSpec::ExplicitSet(mask_values(mask).collect()),
        };

        Ok(Self { kind, spec, mask })
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Whether `value` is in the matched set.
    pub fn matches(&self, value: u32) -> bool {
        value < 64 && self.mask & (1u64 << value) != 0
    }

    /// False only for a bare `*`; stepped wildcards such as `*/2` restrict.
    pub fn is_restricted(&self) -> bool {
        !matches!(self.spec, FieldSpec::Wildcard)
    }

    /// Matched values in ascending order.
    pub fn values(&self) -> Vec<u32> {
        mask_values(self.mask).collect()
    }
}

fn parse_term(kind: FieldKind, term: &str) -> Result<(StepBase, Option<u32>), FieldError> {
    let (atom, step) = match term.split_once('/') {
        Some((atom, step)) => (atom, Some(parse_step(step)?)),
        None => (term, None),
    };

    let base = if atom == "*" {
        StepBase::Wildcard
    } else if let Some((lo, hi)) = atom.split_once('-') {
        let lo = parse_value(kind, lo)?;
        let hi = parse_value(kind, hi)?;
        if lo > hi {
            return Err(FieldError::InvertedRange { lo, hi });
        }
        StepBase::Range(lo, hi)
    } else {
        let value = parse_value(kind, atom)?;
        StepBase::Range(value, value)
    };

    Ok((base, step))
}

fn parse_value(kind: FieldKind, token: &str) -> Result<u32, FieldError> {
    if token.is_empty() {
        return Err(FieldError::Empty);
    }
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FieldError::NotANumber(token.to_string()));
    }
    let value: u32 = token
        .parse()
        .map_err(|_| FieldError::NotANumber(token.to_string()))?;

    let (min, max) = (kind.min(), kind.max());
    if value < min || value > max {
        return Err(FieldError::OutOfRange { value, min, max });
    }
    Ok(value)
}

fn parse_step(token: &str) -> Result<u32, FieldError> {
    match token.parse::<u32>() {
        Ok(step) if step > 0 && token.bytes().all(|b| b.is_ascii_digit()) => Ok(step),
        _ => Err(FieldError::InvalidStep(token.to_string())),
    }
}

fn term_mask(kind: FieldKind, base: StepBase, step: Option<u32>) -> u64 {
    let (lo, hi) = match base {
        StepBase::Wildcard => (kind.min(), kind.max()),
        StepBase::Range(lo, hi) => (lo, hi),
    };
    (lo..=hi)
        .step_by(step.unwrap_or(1) as usize)
        .fold(0u64, |acc, v| acc | (1u64 << v))
}

fn mask_values(mask: u64) -> impl Iterator<Item = u32> {
    (0..64u32).filter(move |v| mask & (1u64 << v) != 0)
}
