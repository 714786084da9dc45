//! Which events are still worth showing, and the views derived from them.
//!
//! Every function here takes the reference date explicitly. Nothing reads
//! the clock, so the same inputs always produce the same views.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::event::Event;

/// Drop events that ended more than `retention_days` before `reference`.
///
/// Future events are always kept, however far ahead they are.
pub fn visible<'a, I>(events: I, reference: NaiveDate, retention_days: i64) -> Vec<&'a Event>
where
    I: IntoIterator<Item = &'a Event>,
{
    let cutoff = retention_cutoff(reference, retention_days);
    events
        .into_iter()
        .filter(|event| event.end_date >= cutoff)
        .collect()
}

/// Oldest end date that is still visible.
pub fn retention_cutoff(reference: NaiveDate, retention_days: i64) -> NaiveDate {
    reference - Duration::days(retention_days)
}

/// Events that are ongoing or start within `window_days` of `reference`,
/// sorted by `(start_date, title)`.
pub fn upcoming<'a>(
    visible: &[&'a Event],
    reference: NaiveDate,
    window_days: i64,
) -> Vec<&'a Event> {
    let horizon = reference + Duration::days(window_days);
    let mut candidates: Vec<&Event> = visible
        .iter()
        .copied()
        .filter(|e| e.start_date <= horizon && e.end_date >= reference)
        .collect();
    candidates.sort_by(|a, b| (a.start_date, &a.title).cmp(&(b.start_date, &b.title)));
    candidates
}

/// An event that ended within the retention horizon.
#[derive(Debug, Clone, Serialize)]
pub struct RecentlyEnded<'a> {
    pub event: &'a Event,
    pub days_ago: i64,
}

/// Events that ended before `reference` but within `retention_days`,
/// most recently ended first.
pub fn recently_ended<'a>(
    visible: &[&'a Event],
    reference: NaiveDate,
    retention_days: i64,
) -> Vec<RecentlyEnded<'a>> {
    let cutoff = retention_cutoff(reference, retention_days);
    let mut ended: Vec<RecentlyEnded> = visible
        .iter()
        .copied()
        .filter(|e| e.end_date < reference && e.end_date >= cutoff)
        .map(|event| RecentlyEnded {
            event,
            days_ago: event.days_since_end(reference),
        })
        .collect();
    ended.sort_by(|a, b| b.event.end_date.cmp(&a.event.end_date));
    ended
}

/// Ordering for the full events list: ongoing events first (by start date),
/// then future events (soonest first), then past events (most recently ended first).
///
/// The groups are partitioned before sorting so a single key never mixes them.
pub fn ordered_listing<'a>(visible: &[&'a Event], reference: NaiveDate) -> Vec<&'a Event> {
    let mut ongoing = Vec::new();
    let mut future = Vec::new();
    let mut past = Vec::new();

    for &event in visible {
        if event.covers(reference) {
            ongoing.push(event);
        } else if event.start_date > reference {
            future.push(event);
        } else {
            past.push(event);
        }
    }

    ongoing.sort_by_key(|e| e.start_date);
    future.sort_by_key(|e| e.start_date);
    past.sort_by(|a, b| b.end_date.cmp(&a.end_date));

    ongoing.into_iter().chain(future).chain(past).collect()
}
