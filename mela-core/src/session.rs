//! Per-user session state.
//!
//! A [`SessionContext`] is built at the start of a session from the user's
//! persisted preference record and passed explicitly to everything that needs
//! user state. Nothing is read from globals.

use chrono::NaiveDate;

use crate::calendar::CalendarCursor;
use crate::catalog::EventCatalog;
use crate::constants::RETENTION_DAYS;
use crate::craft_filter::filter_by_crafts;
use crate::error::{MelaError, MelaResult};
use crate::event::Event;
use crate::notifier::{DueNotice, due_notices};
use crate::preferences::{PreferenceRecord, PreferenceStore};
use crate::reminders::{self, ReminderOutcome, ReminderWindow};
use crate::visibility::visible;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    user_id: String,
    preferences: PreferenceRecord,
    calendar_cursor: CalendarCursor,
    reminder_window: ReminderWindow,
}

impl SessionContext {
    /// Start a session for `user_id`, loading their record from `store`.
    /// Users without a stored record start with empty preferences.
    pub fn open<S>(store: &S, user_id: &str, reference: NaiveDate) -> MelaResult<Self>
    where
        S: PreferenceStore + ?Sized,
    {
        let preferences = store.load(user_id)?.unwrap_or_default();
        tracing::debug!(
            user = user_id,
            crafts = preferences.preferred_crafts.len(),
            reminders = preferences.reminders.len(),
            "opened session"
        );
        Ok(Self::new(user_id, preferences, reference))
    }

    pub fn new(user_id: &str, preferences: PreferenceRecord, reference: NaiveDate) -> Self {
        SessionContext {
            user_id: user_id.to_string(),
            preferences,
            calendar_cursor: CalendarCursor::containing(reference),
            reminder_window: ReminderWindow::default(),
        }
    }

    pub fn with_reminder_window(mut self, window: ReminderWindow) -> Self {
        self.reminder_window = window;
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn preferences(&self) -> &PreferenceRecord {
        &self.preferences
    }

    pub fn preferred_crafts(&self) -> &[String] {
        &self.preferences.preferred_crafts
    }

    pub fn reminder_window(&self) -> ReminderWindow {
        self.reminder_window
    }

    pub fn set_reminder_window(&mut self, window: ReminderWindow) {
        self.reminder_window = window;
    }

    pub fn calendar_cursor(&self) -> CalendarCursor {
        self.calendar_cursor
    }

    pub fn show_month(&mut self, cursor: CalendarCursor) {
        self.calendar_cursor = cursor;
    }

    pub fn show_previous_month(&mut self) {
        self.calendar_cursor = self.calendar_cursor.prev();
    }

    pub fn show_next_month(&mut self) {
        self.calendar_cursor = self.calendar_cursor.next();
    }

    pub fn has_reminder(&self, event_id: &str) -> bool {
        self.preferences.has_reminder(event_id)
    }

    /// Catalog events matching the user's crafts that are still within retention.
    pub fn visible_events<'a>(
        &self,
        catalog: &'a EventCatalog,
        reference: NaiveDate,
    ) -> Vec<&'a Event> {
        let matching = filter_by_crafts(catalog.events(), &self.preferences.preferred_crafts);
        visible(matching, reference, RETENTION_DAYS)
    }

    /// Replace the craft selection. Tags are trimmed, blanks and duplicates dropped.
    pub fn set_preferred_crafts<S>(&mut self, store: &mut S, crafts: Vec<String>) -> MelaResult<()>
    where
        S: PreferenceStore + ?Sized,
    {
        let mut cleaned: Vec<String> = Vec::new();
        for craft in crafts {
            let craft = craft.trim();
            if !craft.is_empty() && !cleaned.iter().any(|c| c.eq_ignore_ascii_case(craft)) {
                cleaned.push(craft.to_string());
            }
        }

        if cleaned == self.preferences.preferred_crafts {
            return Ok(());
        }

        let next = self.preferences.with_crafts(cleaned);
        reminders::commit(store, &self.user_id, &mut self.preferences, next)?;
        tracing::info!(
            user = %self.user_id,
            crafts = ?self.preferences.preferred_crafts,
            "craft preferences updated"
        );
        Ok(())
    }

    /// Subscribe to `event_id`. Only events currently visible to this user and
    /// not yet started are eligible.
    pub fn set_reminder<S>(
        &mut self,
        store: &mut S,
        catalog: &EventCatalog,
        event_id: &str,
        reference: NaiveDate,
    ) -> MelaResult<ReminderOutcome>
    where
        S: PreferenceStore + ?Sized,
    {
        let event = catalog
            .get(event_id)
            .ok_or_else(|| MelaError::UnknownEvent(event_id.to_string()))?;

        let is_visible = self
            .visible_events(catalog, reference)
            .iter()
            .any(|e| e.id == event_id);
        if !is_visible {
            tracing::debug!(
                user = %self.user_id,
                event = event_id,
                "ignoring reminder for hidden event"
            );
            return Ok(ReminderOutcome::Ineligible);
        }

        reminders::set_reminder(store, &self.user_id, &mut self.preferences, event, reference)
    }

    /// Unsubscribe from `event_id`. Works for any id, including events that are
    /// no longer visible or no longer in the catalog.
    pub fn cancel_reminder<S>(
        &mut self,
        store: &mut S,
        event_id: &str,
    ) -> MelaResult<ReminderOutcome>
    where
        S: PreferenceStore + ?Sized,
    {
        reminders::cancel_reminder(store, &self.user_id, &mut self.preferences, event_id)
    }

    /// Flip the subscription for `event_id`.
    pub fn toggle_reminder<S>(
        &mut self,
        store: &mut S,
        catalog: &EventCatalog,
        event_id: &str,
        reference: NaiveDate,
    ) -> MelaResult<ReminderOutcome>
    where
        S: PreferenceStore + ?Sized,
    {
        if self.has_reminder(event_id) {
            self.cancel_reminder(store, event_id)
        } else {
            self.set_reminder(store, catalog, event_id, reference)
        }
    }

    /// Due notices for this user against the full catalog.
    pub fn due_notices(&self, catalog: &EventCatalog, reference: NaiveDate) -> Vec<DueNotice> {
        due_notices(
            &self.preferences.reminders,
            catalog.events(),
            reference,
            self.reminder_window.days(),
        )
    }
}
