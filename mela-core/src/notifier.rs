//! Due-reminder scanning.
//!
//! Notices are recomputed from scratch on every scan. A reminder keeps
//! producing a notice for as long as its event is inside the window.

use chrono::NaiveDate;
use serde::Serialize;

use crate::event::Event;
use crate::message::Message;

/// A subscribed event that starts within the reminder window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueNotice {
    pub event_id: String,
    pub title: String,
    pub days_until_start: i64,
    pub start_date: NaiveDate,
    pub venue: String,
    pub city: String,
}

impl DueNotice {
    pub fn message(&self) -> Message {
        Message::new("active_reminder_warning")
            .with("title", &self.title)
            .with("days", self.days_until_start)
            .with("date", self.start_date.format("%Y-%m-%d").to_string())
            .with("venue", &self.venue)
            .with("city", &self.city)
    }
}

/// Notices for every subscribed event starting between `reference` and
/// `reference + window_days` (inclusive), soonest first.
///
/// `all_events` should be the whole catalog, not the craft-filtered view:
/// changing the craft filter does not silence reminders already set.
pub fn due_notices<S: AsRef<str>>(
    reminders: &[S],
    all_events: &[Event],
    reference: NaiveDate,
    window_days: i64,
) -> Vec<DueNotice> {
    let mut notices: Vec<DueNotice> = all_events
        .iter()
        .filter(|e| reminders.iter().any(|id| id.as_ref() == e.id))
        .filter_map(|e| {
            let days = e.days_until_start(reference);
            (0..=window_days).contains(&days).then(|| DueNotice {
                event_id: e.id.clone(),
                title: e.title.clone(),
                days_until_start: days,
                start_date: e.start_date,
                venue: e.venue.clone(),
                city: e.city.clone(),
            })
        })
        .collect();

    notices.sort_by(|a, b| {
        (a.days_until_start, &a.title).cmp(&(b.days_until_start, &b.title))
    });
    notices
}

/// Shown when a scan finds nothing.
pub fn no_notices_message() -> Message {
    Message::new("no_active_reminders")
}
