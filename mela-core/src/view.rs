//! Everything the events page shows, computed in one pass for one request.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::MonthGrid;
use crate::catalog::EventCatalog;
use crate::constants::RETENTION_DAYS;
use crate::event::{Event, EventPhase};
use crate::message::Message;
use crate::notifier::DueNotice;
use crate::reminders::ReminderAction;
use crate::session::SessionContext;
use crate::visibility::{self, RecentlyEnded};

/// An event with its status and reminder button state.
#[derive(Debug, Clone, Serialize)]
pub struct EventEntry<'a> {
    pub event: &'a Event,
    pub phase: EventPhase,
    pub action: ReminderAction,
}

impl<'a> EventEntry<'a> {
    pub fn new(event: &'a Event, session: &SessionContext, reference: NaiveDate) -> Self {
        EventEntry {
            event,
            phase: event.phase(reference),
            action: ReminderAction::for_event(event, reference, session.has_reminder(&event.id)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventsView<'a> {
    pub reference: NaiveDate,
    pub reminder_window_days: i64,
    /// Full list: ongoing, then future, then recently ended.
    pub listing: Vec<EventEntry<'a>>,
    /// Ongoing events and those starting within the reminder window.
    pub upcoming: Vec<EventEntry<'a>>,
    pub recently_ended: Vec<RecentlyEnded<'a>>,
    pub notices: Vec<DueNotice>,
    pub grid: MonthGrid,
}

impl<'a> EventsView<'a> {
    pub fn build(
        catalog: &'a EventCatalog,
        session: &SessionContext,
        reference: NaiveDate,
    ) -> Self {
        let window_days = session.reminder_window().days();
        let visible = session.visible_events(catalog, reference);

        let entry = |e: &'a Event| EventEntry::new(e, session, reference);

        let listing = visibility::ordered_listing(&visible, reference)
            .into_iter()
            .map(entry)
            .collect();
        let upcoming = visibility::upcoming(&visible, reference, window_days)
            .into_iter()
            .map(entry)
            .collect();
        let recently_ended = visibility::recently_ended(&visible, reference, RETENTION_DAYS);
        let grid = MonthGrid::build(session.calendar_cursor(), &visible, reference);
        let notices = session.due_notices(catalog, reference);

        EventsView {
            reference,
            reminder_window_days: window_days,
            listing,
            upcoming,
            recently_ended,
            notices,
            grid,
        }
    }

    /// Header for the upcoming summary.
    pub fn upcoming_header(&self) -> Message {
        if self.upcoming.is_empty() {
            Message::new("no_upcoming_events").with("days", self.reminder_window_days)
        } else {
            Message::new("upcoming_events_info")
                .with("count", self.upcoming.len())
                .with("days", self.reminder_window_days)
        }
    }

    pub fn recently_ended_header(&self) -> Message {
        Message::new("recently_ended_header").with("days", RETENTION_DAYS)
    }

    /// Shown instead of the listing when nothing is visible.
    pub fn empty_listing_message() -> Message {
        Message::new("no_visible_events")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::SpanRole;
    use crate::event::tests::date;
    use crate::message::MessageArg;
    use crate::preferences::{MemoryPreferenceStore, PreferenceRecord};
    use crate::reminders::ReminderWindow;

    fn today() -> NaiveDate {
        date(2025, 9, 13)
    }

    #[test]
    fn seed_catalog_view_for_pottery_user() {
        let catalog = EventCatalog::seed();
        let mut store = MemoryPreferenceStore::new();
        let mut session = SessionContext::new(
            "guest",
            PreferenceRecord {
                preferred_crafts: vec!["Pottery".to_string()],
                reminders: vec![],
            },
            today(),
        );
        session.set_reminder(&mut store, &catalog, "ev-001", today()).unwrap();

        let view = EventsView::build(&catalog, &session, today());

        // All-tagged dialogue ended 9/11 (2 days ago), bazaar is 3 days out.
        let upcoming: Vec<&str> = view.upcoming.iter().map(|e| e.event.id.as_str()).collect();
        assert_eq!(upcoming, vec!["ev-001"]);
        assert_eq!(view.upcoming[0].action, ReminderAction::Cancel);
        assert_eq!(view.upcoming[0].phase, EventPhase::Upcoming { days_until: 3 });

        let ended: Vec<&str> = view.recently_ended.iter().map(|r| r.event.id.as_str()).collect();
        assert_eq!(ended, vec!["ev-005"]);
        assert_eq!(view.recently_ended[0].days_ago, 2);

        assert!(
            view.listing
                .iter()
                .all(|e| e.event.has_tag("Pottery") || e.event.matches_all_crafts())
        );
        assert_eq!(view.listing.last().unwrap().event.id, "ev-005");
        assert_eq!(view.listing.last().unwrap().action, ReminderAction::Done);

        assert_eq!(view.notices.len(), 1);
        assert_eq!(view.notices[0].days_until_start, 3);

        let bazaar_start = view.grid.cell(date(2025, 9, 16)).unwrap();
        assert_eq!(bazaar_start.bars[0].role, Some(SpanRole::Start));
        assert!(view.grid.cell(date(2025, 9, 13)).unwrap().is_today);
    }

    #[test]
    fn upcoming_header_reports_window() {
        let catalog = EventCatalog::seed();
        let session = SessionContext::new("guest", PreferenceRecord::default(), date(2027, 1, 1))
            .with_reminder_window(ReminderWindow::new(7).unwrap());

        let view = EventsView::build(&catalog, &session, date(2027, 1, 1));
        assert!(view.listing.is_empty());
        let header = view.upcoming_header();
        assert_eq!(header.key, "no_upcoming_events");
        assert_eq!(header.arg("days"), Some(&MessageArg::Number(7)));
    }
}
