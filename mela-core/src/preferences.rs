//! Per-user preference records and the stores that persist them.
//!
//! A user's craft selection and reminder subscriptions live in one record,
//! and that record is always written as a whole.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{MelaError, MelaResult};

/// Everything persisted for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// Craft tags of interest; empty means no filter.
    #[serde(default)]
    pub preferred_crafts: Vec<String>,
    /// Ids of events the user wants a reminder for.
    #[serde(default)]
    pub reminders: Vec<String>,
}

impl PreferenceRecord {
    pub fn has_reminder(&self, event_id: &str) -> bool {
        self.reminders.iter().any(|id| id == event_id)
    }

    /// Copy of this record with `event_id` subscribed. Ids are kept sorted and unique.
    pub fn with_reminder(&self, event_id: &str) -> Self {
        let mut next = self.clone();
        if !next.has_reminder(event_id) {
            next.reminders.push(event_id.to_string());
            next.reminders.sort();
        }
        next
    }

    /// Copy of this record with `event_id` unsubscribed.
    pub fn without_reminder(&self, event_id: &str) -> Self {
        let mut next = self.clone();
        next.reminders.retain(|id| id != event_id);
        next
    }

    pub fn with_crafts(&self, crafts: Vec<String>) -> Self {
        PreferenceRecord {
            preferred_crafts: crafts,
            reminders: self.reminders.clone(),
        }
    }
}

/// Get/set-by-user-id persistence for preference records.
///
/// Writes are blocking and not retried; a failed write must be reported
/// to the caller.
pub trait PreferenceStore {
    fn load(&self, user_id: &str) -> MelaResult<Option<PreferenceRecord>>;
    fn save(&mut self, user_id: &str, record: &PreferenceRecord) -> MelaResult<()>;
}

/// In-process store, mostly useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    records: HashMap<String, PreferenceRecord>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, user_id: &str) -> MelaResult<Option<PreferenceRecord>> {
        Ok(self.records.get(user_id).cloned())
    }

    fn save(&mut self, user_id: &str, record: &PreferenceRecord) -> MelaResult<()> {
        self.records.insert(user_id.to_string(), record.clone());
        Ok(())
    }
}

/// One JSON document per user under `<dir>/users/<user_id>.json`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FilePreferenceStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, user_id: &str) -> MelaResult<PathBuf> {
        let valid = !user_id.is_empty()
            && user_id
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '@'))
            && !user_id.starts_with('.');
        if !valid {
            return Err(MelaError::PreferenceStore(format!(
                "Invalid user id '{}'",
                user_id
            )));
        }
        Ok(self.dir.join("users").join(format!("{}.json", user_id)))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self, user_id: &str) -> MelaResult<Option<PreferenceRecord>> {
        let path = self.path_for(user_id)?;
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)?;
        let record = serde_json::from_str(&content).map_err(|e| {
            MelaError::Serialization(format!("{}: {}", path.display(), e))
        })?;
        Ok(Some(record))
    }

    fn save(&mut self, user_id: &str, record: &PreferenceRecord) -> MelaResult<()> {
        let path = self.path_for(user_id)?;
        let users_dir = self.dir.join("users");
        std::fs::create_dir_all(&users_dir)?;

        let content = serde_json::to_string_pretty(record)
            .map_err(|e| MelaError::Serialization(e.to_string()))?;

        // Write to a temp file first so a crash never leaves a half-written record.
        let temp = users_dir.join(format!("{}.json.tmp", user_id));
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, &path)?;

        tracing::debug!(user = user_id, path = %path.display(), "saved preference record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> PreferenceRecord {
        PreferenceRecord {
            preferred_crafts: vec!["Pottery".to_string()],
            reminders: vec!["ev-002".to_string()],
        }
    }

    #[test]
    fn with_reminder_is_idempotent_and_sorted() {
        let once = record().with_reminder("ev-001");
        let twice = once.with_reminder("ev-001");
        assert_eq!(once, twice);
        assert_eq!(once.reminders, vec!["ev-001", "ev-002"]);
    }

    #[test]
    fn without_reminder_of_absent_id_is_noop() {
        assert_eq!(record().without_reminder("ev-404"), record());
        assert!(record().without_reminder("ev-002").reminders.is_empty());
    }

    #[test]
    fn with_crafts_keeps_reminders() {
        let updated = record().with_crafts(vec!["Silk".to_string()]);
        assert_eq!(updated.preferred_crafts, vec!["Silk"]);
        assert_eq!(updated.reminders, vec!["ev-002"]);
    }

    #[test]
    fn record_tolerates_missing_fields() {
        let parsed: PreferenceRecord = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, PreferenceRecord::default());
    }

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryPreferenceStore::new();
        assert_eq!(store.load("guest").unwrap(), None);
        store.save("guest", &record()).unwrap();
        assert_eq!(store.load("guest").unwrap(), Some(record()));
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePreferenceStore::new(dir.path());
        store.save("user-1", &record()).unwrap();

        let reopened = FilePreferenceStore::new(dir.path());
        assert_eq!(reopened.load("user-1").unwrap(), Some(record()));
        assert_eq!(reopened.load("user-2").unwrap(), None);
        assert!(!dir.path().join("users/user-1.json.tmp").exists());
    }

    #[test]
    fn file_store_rejects_path_like_user_ids() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FilePreferenceStore::new(dir.path());
        assert!(matches!(
            store.save("../evil", &record()),
            Err(MelaError::PreferenceStore(_))
        ));
        assert!(store.load("").is_err());
    }

    #[test]
    fn file_store_reports_corrupt_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("users")).unwrap();
        std::fs::write(dir.path().join("users/guest.json"), "not json").unwrap();

        let store = FilePreferenceStore::new(dir.path());
        assert!(matches!(store.load("guest"), Err(MelaError::Serialization(_))));
    }
}
