//! Month navigation for the calendar view.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{MelaError, MelaResult};

/// The (year, month) the calendar is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarCursor {
    year: i32,
    month: u32,
}

impl CalendarCursor {
    /// A month is valid only if chrono can step one month either side of it.
    pub fn new(year: i32, month: u32) -> MelaResult<Self> {
        let navigable = NaiveDate::from_ymd_opt(year, month, 1).is_some_and(|first| {
            first.checked_sub_signed(Duration::days(1)).is_some()
                && first.checked_add_signed(Duration::days(32)).is_some()
        });
        if !navigable {
            return Err(MelaError::InvalidMonth { year, month });
        }
        Ok(CalendarCursor { year, month })
    }

    /// The month containing `day`.
    pub fn containing(day: NaiveDate) -> Self {
        CalendarCursor {
            year: day.year(),
            month: day.month(),
        }
    }

    /// Parse `YYYY-MM`.
    pub fn parse(s: &str) -> MelaResult<Self> {
        let invalid = || MelaError::Config(format!("Invalid month '{}'. Expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // `new` and `containing` only ever build cursors for valid months.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Step back one month: the day before the 1st is always in the previous month.
    /// Stays put at the start of the representable range.
    pub fn prev(&self) -> Self {
        self.first_day()
            .checked_sub_signed(Duration::days(1))
            .map_or(*self, Self::containing)
    }

    /// Step forward one month: the 1st plus 32 days always overshoots into the
    /// following month, since no month is longer than 31 days.
    /// Stays put at the end of the representable range.
    pub fn next(&self) -> Self {
        self.first_day()
            .checked_add_signed(Duration::days(32))
            .map_or(*self, Self::containing)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn last_day(&self) -> NaiveDate {
        let following = if self.month == 12 {
            NaiveDate::from_ymd_opt(self.year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(self.year, self.month + 1, 1)
        };
        following
            .and_then(|d| d.pred_opt())
            .or_else(|| NaiveDate::from_ymd_opt(self.year, 12, 31))
            .unwrap_or(NaiveDate::MAX)
    }
}

impl fmt::Display for CalendarCursor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}
