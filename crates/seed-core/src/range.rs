//! Inclusive calendar window covered by a generation run.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Returned when a range ends before it starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid date range: end date {end} is before start date {start}")]
pub struct InvalidRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive `[start, end]` date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidRange> {
        if end < start {
            return Err(InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of days in the range, both ends included.
    pub fn days(&self) -> u32 {
        // end >= start is guaranteed by the constructor
        (self.end - self.start).num_days() as u32 + 1
    }

    /// Whether the date lies within the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterate over `(offset, date)` pairs from start to end inclusive.
    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter {
            start: self.start,
            offset: 0,
            days: self.days(),
        }
    }
}

impl IntoIterator for DateRange {
    type Item = (u32, NaiveDate);
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the days of a [`DateRange`].
pub struct DateRangeIter {
    start: NaiveDate,
    offset: u32,
    days: u32,
}

impl Iterator for DateRangeIter {
    type Item = (u32, NaiveDate);

    fn next(&mut self) -> Option<Self::Item> {
        if self.offset >= self.days {
            return None;
        }
        let date = self
            .start
            .checked_add_days(Days::new(u64::from(self.offset)))?;
        let offset = self.offset;
        self.offset += 1;
        Some((offset, date))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.days - self.offset) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DateRangeIter {}
