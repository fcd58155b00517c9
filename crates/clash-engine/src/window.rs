//! Inclusive calendar-day spans and the trailing look-back window.
//!
//! Every interval in this crate is a closed range of whole days: a span from
//! `2026-03-01` to `2026-03-03` covers three days. A span can never be empty;
//! operations that could produce an empty span return `None` instead.

use chrono::{Days, NaiveDate};

/// A non-empty, inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateSpan {
    /// Build a span covering `start..=end`, or `None` when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A span of a single day.
    pub const fn single(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Two inclusive spans overlap when they share at least one day.
    ///
    /// Unlike half-open time ranges, spans that touch on a day (one ends on
    /// the day the other starts) DO overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// The days shared by both spans, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Number of days covered, always at least 1.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterate every day in the span, in ascending order.
    ///
    /// A span ending on [`NaiveDate::MAX`] yields that day too.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let start = self.start;
        (0..self.len_days()).filter_map(move |offset| {
            u64::try_from(offset)
                .ok()
                .and_then(|offset| start.checked_add_days(Days::new(offset)))
        })
    }
}

/// The trailing window `[today - days_back, today]`.
///
/// A window of `days_back = n` covers `n + 1` days, since today itself is
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    span: DateSpan,
}

impl Window {
    /// Build the window ending on `today` and reaching back `days_back` days.
    ///
    /// A look-back reaching past the earliest representable date is clamped
    /// to it.
    pub fn trailing(today: NaiveDate, days_back: u64) -> Self {
        let start = today
            .checked_sub_days(Days::new(days_back))
            .unwrap_or(NaiveDate::MIN);
        Self {
            span: DateSpan { start, end: today },
        }
    }

    pub const fn start(&self) -> NaiveDate {
        self.span.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.span.end
    }

    pub const fn span(&self) -> DateSpan {
        self.span
    }

    /// Clip `span` to the window, discarding it when it lies entirely outside.
    pub fn clip(&self, span: &DateSpan) -> Option<DateSpan> {
        self.span.intersect(span)
    }
}
