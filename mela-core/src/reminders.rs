//! Reminder subscriptions: toggling and the user's reminder window.
//!
//! Reminders only record intent. Nothing is ever delivered; the notifier
//! recomputes what is due on every scan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_REMINDER_WINDOW_DAYS, MAX_REMINDER_WINDOW_DAYS, MIN_REMINDER_WINDOW_DAYS,
};
use crate::error::{MelaError, MelaResult};
use crate::event::Event;
use crate::message::Message;
use crate::preferences::{PreferenceRecord, PreferenceStore};

/// How many days ahead the user wants to hear about events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct ReminderWindow(i64);

impl ReminderWindow {
    pub fn new(days: i64) -> MelaResult<Self> {
        if !(MIN_REMINDER_WINDOW_DAYS..=MAX_REMINDER_WINDOW_DAYS).contains(&days) {
            return Err(MelaError::InvalidReminderWindow {
                got: days,
                min: MIN_REMINDER_WINDOW_DAYS,
                max: MAX_REMINDER_WINDOW_DAYS,
            });
        }
        Ok(ReminderWindow(days))
    }

    pub fn days(&self) -> i64 {
        self.0
    }
}

impl Default for ReminderWindow {
    fn default() -> Self {
        ReminderWindow(DEFAULT_REMINDER_WINDOW_DAYS)
    }
}

impl TryFrom<i64> for ReminderWindow {
    type Error = MelaError;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        ReminderWindow::new(days)
    }
}

impl From<ReminderWindow> for i64 {
    fn from(window: ReminderWindow) -> i64 {
        window.0
    }
}

/// Result of a reminder toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderOutcome {
    Set,
    AlreadySet,
    Cancelled,
    NotSet,
    /// The event has already started (or is not visible); nothing changed.
    Ineligible,
}

impl ReminderOutcome {
    /// Whether the subscription set was modified.
    pub fn changed(&self) -> bool {
        matches!(self, ReminderOutcome::Set | ReminderOutcome::Cancelled)
    }

    pub fn message(&self) -> Message {
        match self {
            ReminderOutcome::Set | ReminderOutcome::AlreadySet => {
                Message::new("reminder_set_success")
            }
            ReminderOutcome::Cancelled | ReminderOutcome::NotSet => {
                Message::new("reminder_cancelled_success")
            }
            ReminderOutcome::Ineligible => Message::new("reminder_ineligible"),
        }
    }
}

/// Subscribe `user_id` to `event`.
///
/// The whole updated record is written to `store` first; `record` is only
/// updated once that write has succeeded.
pub fn set_reminder<S>(
    store: &mut S,
    user_id: &str,
    record: &mut PreferenceRecord,
    event: &Event,
    reference: NaiveDate,
) -> MelaResult<ReminderOutcome>
where
    S: PreferenceStore + ?Sized,
{
    if !event.is_reminder_eligible(reference) {
        tracing::debug!(
            user = user_id,
            event = %event.id,
            "ignoring reminder for event that already started"
        );
        return Ok(ReminderOutcome::Ineligible);
    }
    if record.has_reminder(&event.id) {
        return Ok(ReminderOutcome::AlreadySet);
    }

    let next = record.with_reminder(&event.id);
    commit(store, user_id, record, next)?;
    tracing::info!(user = user_id, event = %event.id, "reminder set");
    Ok(ReminderOutcome::Set)
}

/// Unsubscribe `user_id` from `event_id`. Cancelling an absent reminder is a no-op.
pub fn cancel_reminder<S>(
    store: &mut S,
    user_id: &str,
    record: &mut PreferenceRecord,
    event_id: &str,
) -> MelaResult<ReminderOutcome>
where
    S: PreferenceStore + ?Sized,
{
    if !record.has_reminder(event_id) {
        return Ok(ReminderOutcome::NotSet);
    }

    let next = record.without_reminder(event_id);
    commit(store, user_id, record, next)?;
    tracing::info!(user = user_id, event = event_id, "reminder cancelled");
    Ok(ReminderOutcome::Cancelled)
}

/// Persist `next`, then make it the in-memory record.
pub(crate) fn commit<S>(
    store: &mut S,
    user_id: &str,
    record: &mut PreferenceRecord,
    next: PreferenceRecord,
) -> MelaResult<()>
where
    S: PreferenceStore + ?Sized,
{
    if let Err(e) = store.save(user_id, &next) {
        tracing::warn!(user = user_id, error = %e, "failed to persist preference record");
        return Err(e);
    }
    *record = next;
    Ok(())
}

/// What the per-event reminder button should offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderAction {
    Set,
    Cancel,
    /// Started, not finished: shown as a disabled "ongoing" badge.
    Ongoing,
    /// Finished: shown as a disabled "done" badge.
    Done,
}

impl ReminderAction {
    pub fn for_event(event: &Event, reference: NaiveDate, subscribed: bool) -> Self {
        if event.end_date < reference {
            ReminderAction::Done
        } else if event.start_date <= reference {
            ReminderAction::Ongoing
        } else if subscribed {
            ReminderAction::Cancel
        } else {
            ReminderAction::Set
        }
    }

    pub fn label(&self) -> Message {
        Message::new(match self {
            ReminderAction::Set => "set_reminder_button",
            ReminderAction::Cancel => "cancel_reminder_button",
            ReminderAction::Ongoing => "event_ongoing",
            ReminderAction::Done => "event_done",
        })
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, ReminderAction::Set | ReminderAction::Cancel)
    }
}
