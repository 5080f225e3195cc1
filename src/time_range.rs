//! Time ranges for archive queries.
//!
//! Callers may supply times with or without zone information. Naive times are taken to already
//! be in UTC (never the local zone of the machine), zone aware times are converted to the same
//! instant in UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Anything that can be pinned to a UTC instant.
pub trait IntoUtc {
    /// Convert to a UTC instant.
    fn into_utc(self) -> DateTime<Utc>;
}

impl IntoUtc for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

impl<Tz: TimeZone> IntoUtc for DateTime<Tz> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

/// A closed interval of UTC instants.
///
/// There is no check that `start <= end`, an inverted interval simply contains nothing and spans
/// no days.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UtcInterval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Normalize a start and end time into a `UtcInterval`.
pub fn normalize<S, E>(start: S, end: E) -> UtcInterval
where
    S: IntoUtc,
    E: IntoUtc,
{
    UtcInterval {
        start: start.into_utc(),
        end: end.into_utc(),
    }
}

impl UtcInterval {
    /// The start of the interval.
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    /// The end of the interval.
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Test if an instant falls in the interval, both ends inclusive.
    pub fn contains(&self, value: &DateTime<Utc>) -> bool {
        *value >= self.start && *value <= self.end
    }

    /// Every UTC calendar day touched by this interval, in ascending order.
    pub fn days(&self) -> DayIter {
        enumerate_days(&self.start, &self.end)
    }
}

/// Create an iterator over the calendar days from `start` to `end`, inclusive of both.
///
/// The time of day is ignored, so a range from 23:00 on one day to 01:00 two days later yields
/// three days.
pub fn enumerate_days(start: &DateTime<Utc>, end: &DateTime<Utc>) -> DayIter {
    DayIter {
        next: Some(start.date_naive()),
        last: end.date_naive(),
    }
}

/// Iterator over calendar days, see `enumerate_days`.
#[derive(Clone, Debug)]
pub struct DayIter {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Iterator for DayIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let day = self.next.filter(|day| *day <= self.last)?;
        self.next = day.succ_opt();
        Some(day)
    }
}
