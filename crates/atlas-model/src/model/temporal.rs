//! Values with a validity window.
//!
//! A [`TemporalField`] pairs a value with an optional start and end date. The
//! window is half-open, `[start, end)`, and a missing bound is unbounded on
//! that side. Several fields for the same logical attribute (a channel's
//! titles over the years) are resolved against an explicit reference date;
//! nothing in this module reads the clock.
//!
//! When more than one window contains the date, the field with the latest
//! start wins, and among equal starts the one listed first. A missing start
//! sorts before every date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TemporalField<T> {
    value: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end: Option<NaiveDate>,
}

impl<T> TemporalField<T> {
    pub fn new(value: T, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { value, start, end }
    }

    /// A value valid on every date.
    pub fn always(value: T) -> Self {
        Self::new(value, None, None)
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    /// `start <= date < end`, missing bounds being unbounded.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.map_or(true, |start| start <= date) && self.end.map_or(true, |end| date < end)
    }
}

/// Distinct values whose window contains `date`, in input order.
pub fn values_for_date<'a, T, I>(fields: I, date: NaiveDate) -> Vec<&'a T>
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a TemporalField<T>>,
{
    let mut values: Vec<&T> = Vec::new();
    for field in fields.into_iter().filter(|f| f.contains(date)) {
        if !values.contains(&&field.value) {
            values.push(&field.value);
        }
    }
    values
}

/// Values current on `today`.
pub fn current_values<'a, T, I>(fields: I, today: NaiveDate) -> Vec<&'a T>
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a TemporalField<T>>,
{
    values_for_date(fields, today)
}

/// The single value in effect on `date`.
pub fn value_for_date<'a, T, I>(fields: I, date: NaiveDate) -> Option<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a TemporalField<T>>,
{
    let mut best: Option<&TemporalField<T>> = None;
    for field in fields.into_iter().filter(|f| f.contains(date)) {
        // Option<NaiveDate> orders None first, matching an unbounded start.
        if best.map_or(true, |b| field.start > b.start) {
            best = Some(field);
        }
    }
    best.map(|f| &f.value)
}

/// The value in effect on `now`, or else the one starting soonest after it.
pub fn current_or_future_value<'a, T, I>(fields: I, now: NaiveDate) -> Option<&'a T>
where
    T: 'a,
    I: IntoIterator<Item = &'a TemporalField<T>>,
    I::IntoIter: Clone,
{
    let fields = fields.into_iter();
    if let Some(current) = value_for_date(fields.clone(), now) {
        return Some(current);
    }

    let mut next: Option<(NaiveDate, &T)> = None;
    for field in fields {
        if let Some(start) = field.start.filter(|start| *start > now) {
            if next.map_or(true, |(earliest, _)| start < earliest) {
                next = Some((start, &field.value));
            }
        }
    }
    next.map(|(_, value)| value)
}
