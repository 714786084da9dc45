//! Artisan event records.
//!
//! Events are created once when the catalog is loaded and are immutable
//! afterwards. Everything time-relative (status, reminder eligibility) is
//! computed against an explicit reference date rather than the wall clock.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::ALL_CRAFTS_TAG;
use crate::error::{MelaError, MelaResult};
use crate::message::Message;

/// An artisan-facing happening (fair, expo, workshop...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub craft_tags: Vec<String>,
    /// First day of the event (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the event (inclusive)
    pub end_date: NaiveDate,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Event {
    /// Check the record invariants: non-empty id and title, `start_date <= end_date`.
    pub fn validate(&self) -> MelaResult<()> {
        if self.id.trim().is_empty() {
            return Err(MelaError::Catalog(format!(
                "Event '{}' has an empty id",
                self.title
            )));
        }
        if self.title.trim().is_empty() {
            return Err(MelaError::Catalog(format!(
                "Event '{}' has an empty title",
                self.id
            )));
        }
        if self.end_date < self.start_date {
            return Err(MelaError::InvalidEvent {
                id: self.id.clone(),
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Whether `day` falls within the event's inclusive date range.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn is_single_day(&self) -> bool {
        self.start_date == self.end_date
    }

    /// Case-insensitive tag membership.
    pub fn has_tag(&self, tag: &str) -> bool {
        let wanted = tag.to_lowercase();
        self.craft_tags.iter().any(|t| t.to_lowercase() == wanted)
    }

    /// Whether the event carries the catch-all tag that matches every craft filter.
    pub fn matches_all_crafts(&self) -> bool {
        self.has_tag(ALL_CRAFTS_TAG)
    }

    /// Signed number of days from `reference` until the event starts.
    /// Negative once the event has started.
    pub fn days_until_start(&self, reference: NaiveDate) -> i64 {
        (self.start_date - reference).num_days()
    }

    /// Signed number of days since the event ended. Negative while it has not ended.
    pub fn days_since_end(&self, reference: NaiveDate) -> i64 {
        (reference - self.end_date).num_days()
    }

    /// A reminder can only be set for an event that has not started yet.
    pub fn is_reminder_eligible(&self, reference: NaiveDate) -> bool {
        self.start_date > reference
    }

    pub fn phase(&self, reference: NaiveDate) -> EventPhase {
        EventPhase::of(self, reference)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Where an event stands relative to the reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum EventPhase {
    Upcoming { days_until: i64 },
    StartsToday,
    Ongoing { started_days_ago: i64 },
    Ended { days_ago: i64 },
}

impl EventPhase {
    pub fn of(event: &Event, reference: NaiveDate) -> Self {
        let days_until = event.days_until_start(reference);
        let days_since_end = event.days_since_end(reference);

        if days_until > 0 {
            EventPhase::Upcoming { days_until }
        } else if days_since_end > 0 {
            EventPhase::Ended {
                days_ago: days_since_end,
            }
        } else if days_until == 0 {
            EventPhase::StartsToday
        } else {
            EventPhase::Ongoing {
                started_days_ago: -days_until,
            }
        }
    }

    /// Started and not yet ended (including the first day).
    pub fn is_in_progress(&self) -> bool {
        matches!(self, EventPhase::StartsToday | EventPhase::Ongoing { .. })
    }

    pub fn caption(&self) -> Message {
        match self {
            EventPhase::Upcoming { days_until } => {
                Message::new("starts_in_caption").with("days", *days_until)
            }
            EventPhase::StartsToday => Message::new("starting_today"),
            EventPhase::Ongoing { .. } => Message::new("event_ongoing"),
            EventPhase::Ended { days_ago } => {
                Message::new("ended_ago_caption").with("days", *days_ago)
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::message::MessageArg;

    pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub(crate) fn make_test_event(id: &str, start: NaiveDate, end: NaiveDate) -> Event {
        Event {
            id: id.to_string(),
            title: format!("Event {}", id),
            craft_tags: vec!["Pottery".to_string()],
            start_date: start,
            end_date: end,
            venue: "Amber Grounds".to_string(),
            city: "Jaipur, Rajasthan".to_string(),
            address: None,
            description: None,
        }
    }

    #[test]
    fn validate_rejects_reversed_dates() {
        let event = make_test_event("ev-1", date(2025, 9, 18), date(2025, 9, 16));
        assert!(matches!(
            event.validate(),
            Err(MelaError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn validate_rejects_blank_id() {
        let event = make_test_event("  ", date(2025, 9, 16), date(2025, 9, 16));
        assert!(matches!(event.validate(), Err(MelaError::Catalog(_))));
    }

    #[test]
    fn has_tag_ignores_case() {
        let mut event = make_test_event("ev-1", date(2025, 9, 16), date(2025, 9, 18));
        event.craft_tags = vec!["Terracotta clay".to_string(), "all".to_string()];
        assert!(event.has_tag("terracotta CLAY"));
        assert!(event.matches_all_crafts());
        assert!(!event.has_tag("Silk"));
    }

    #[test]
    fn phase_upcoming() {
        let event = make_test_event("ev-1", date(2025, 9, 16), date(2025, 9, 18));
        assert_eq!(
            event.phase(date(2025, 9, 13)),
            EventPhase::Upcoming { days_until: 3 }
        );
    }

    #[test]
    fn phase_starts_today_and_ongoing() {
        let event = make_test_event("ev-1", date(2025, 9, 16), date(2025, 9, 18));
        assert_eq!(event.phase(date(2025, 9, 16)), EventPhase::StartsToday);
        assert_eq!(
            event.phase(date(2025, 9, 18)),
            EventPhase::Ongoing { started_days_ago: 2 }
        );
    }

    #[test]
    fn single_day_event_today_is_starting_not_ended() {
        let event = make_test_event("ev-1", date(2025, 9, 13), date(2025, 9, 13));
        assert_eq!(event.phase(date(2025, 9, 13)), EventPhase::StartsToday);
        assert!(event.phase(date(2025, 9, 13)).is_in_progress());
    }

    #[test]
    fn phase_ended() {
        let event = make_test_event("ev-1", date(2025, 8, 30), date(2025, 9, 1));
        assert_eq!(
            event.phase(date(2025, 9, 13)),
            EventPhase::Ended { days_ago: 12 }
        );
    }

    #[test]
    fn reminder_eligibility_is_strictly_future() {
        let event = make_test_event("ev-1", date(2025, 9, 16), date(2025, 9, 18));
        assert!(event.is_reminder_eligible(date(2025, 9, 15)));
        assert!(!event.is_reminder_eligible(date(2025, 9, 16)));
        assert!(!event.is_reminder_eligible(date(2025, 9, 20)));
    }

    #[test]
    fn caption_carries_days_param() {
        let caption = EventPhase::Ended { days_ago: 12 }.caption();
        assert_eq!(caption.key, "ended_ago_caption");
        assert_eq!(caption.arg("days"), Some(&MessageArg::Number(12)));
    }
}
