//! Month grid layout with multi-day event spans.
//!
//! The builder only produces data. Turning a [`MonthGrid`] into terminal
//! output or markup is the job of a renderer.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::cursor::CalendarCursor;
use crate::error::MelaResult;
use crate::event::Event;

pub const DAYS_PER_WEEK: usize = 7;

/// Which segment of a multi-day span a day cell shows.
///
/// Single-day events have no role (`None` on [`EventBar::role`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanRole {
    Start,
    Middle,
    End,
}

impl SpanRole {
    /// Role of `event` on `day`, or `None` for a single-day event.
    /// `day` must lie within the event's date range.
    pub fn for_day(event: &Event, day: NaiveDate) -> Option<Self> {
        let is_start = day == event.start_date;
        let is_end = day == event.end_date;
        match (is_start, is_end) {
            (true, true) => None,
            (true, false) => Some(SpanRole::Start),
            (false, true) => Some(SpanRole::End),
            (false, false) => Some(SpanRole::Middle),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            SpanRole::Start => "event-bar-start",
            SpanRole::Middle => "event-bar-middle",
            SpanRole::End => "event-bar-end",
        }
    }
}

/// One event's segment inside a day cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventBar {
    pub id: String,
    /// Set only on the event's first day; continuation segments are blank.
    pub title: Option<String>,
    pub role: Option<SpanRole>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    pub is_past: bool,
    /// Ordered by `(start_date, title)` so an event keeps its row across its span.
    pub bars: Vec<EventBar>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    /// Leading/trailing padding outside the month.
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(cell) => Some(cell),
        }
    }
}

/// A Monday-first month layout, one row per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub cursor: CalendarCursor,
    pub weeks: Vec<Vec<GridCell>>,
}

impl MonthGrid {
    pub fn build(cursor: CalendarCursor, events: &[&Event], reference: NaiveDate) -> Self {
        let first = cursor.first_day();
        let last = cursor.last_day();

        // Sort once so every day sees the same relative order.
        let mut in_month: Vec<&Event> = events
            .iter()
            .copied()
            .filter(|e| e.start_date <= last && e.end_date >= first)
            .collect();
        in_month.sort_by(|a, b| (a.start_date, &a.title).cmp(&(b.start_date, &b.title)));

        let leading = first.weekday().num_days_from_monday() as usize;
        let mut cells: Vec<GridCell> = vec![GridCell::Blank; leading];

        for offset in 0..cursor.days_in_month() {
            let day = first + Duration::days(offset as i64);
            cells.push(GridCell::Day(day_cell(day, &in_month, reference)));
        }

        while cells.len() % DAYS_PER_WEEK != 0 {
            cells.push(GridCell::Blank);
        }

        let weeks = cells
            .chunks(DAYS_PER_WEEK)
            .map(|week| week.to_vec())
            .collect();

        MonthGrid { cursor, weeks }
    }

    /// Iterate over the real (non-blank) day cells in date order.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().filter_map(GridCell::day)
    }

    pub fn cell(&self, day: NaiveDate) -> Option<&DayCell> {
        self.days().find(|c| c.date == day)
    }
}

/// Build the grid for `year`/`month`.
pub fn build_month(
    year: i32,
    month: u32,
    events: &[&Event],
    reference: NaiveDate,
) -> MelaResult<MonthGrid> {
    let cursor = CalendarCursor::new(year, month)?;
    Ok(MonthGrid::build(cursor, events, reference))
}

fn day_cell(day: NaiveDate, sorted_events: &[&Event], reference: NaiveDate) -> DayCell {
    let bars = sorted_events
        .iter()
        .filter(|e| e.covers(day))
        .map(|e| EventBar {
            id: e.id.clone(),
            title: (day == e.start_date).then(|| e.title.clone()),
            role: SpanRole::for_day(e, day),
        })
        .collect();

    DayCell {
        date: day,
        is_today: day == reference,
        is_past: day < reference,
        bars,
    }
}
