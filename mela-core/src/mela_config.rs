//! Global mela configuration.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::catalog::EventCatalog;
use crate::error::{MelaError, MelaResult};
use crate::preferences::FilePreferenceStore;
use crate::reminders::ReminderWindow;

static DEFAULT_DATA_DIR: &str = "~/.mela";
static DEFAULT_USER: &str = "guest";
static DEFAULT_LANGUAGE: &str = "English";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn is_default_data_dir(p: &PathBuf) -> bool {
    *p == default_data_dir()
}

fn default_user() -> String {
    DEFAULT_USER.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

/// Global configuration at ~/.config/mela/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MelaConfig {
    /// Where per-user preference records are stored
    #[serde(default = "default_data_dir", skip_serializing_if = "is_default_data_dir")]
    pub data_dir: PathBuf,

    /// TOML event catalog; the built-in seed catalog is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// User id to act as when none is given on the command line
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_language")]
    pub language: String,

    #[serde(default)]
    pub reminder_window_days: ReminderWindow,

    /// Fixed "today" for simulations; the local date is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_date: Option<NaiveDate>,
}

impl Default for MelaConfig {
    fn default() -> Self {
        MelaConfig {
            data_dir: default_data_dir(),
            catalog: None,
            user: default_user(),
            language: default_language(),
            reminder_window_days: ReminderWindow::default(),
            reference_date: None,
        }
    }
}

impl MelaConfig {
    pub fn config_path() -> MelaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| MelaError::Config("Could not determine config directory".into()))?
            .join("mela");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/mela/config.toml, creating a commented default if missing.
    pub fn load() -> MelaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> MelaResult<Self> {
        let config: MelaConfig = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .build()
            .map_err(|e| MelaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| MelaError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save the current config to ~/.config/mela/config.toml
    pub fn save(&self) -> MelaResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> MelaResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| MelaError::Config(e.to_string()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MelaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, content)
            .map_err(|e| MelaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> MelaResult<()> {
        let contents = format!(
            "\
# mela configuration

# Where user preferences (craft selection, reminders) are stored:
# data_dir = \"{}\"

# Event catalog to load instead of the built-in one:
# catalog = \"~/events.toml\"

# User to act as by default:
# user = \"{}\"

# Display language (English, Hindi):
# language = \"{}\"

# Notify about events up to this many days ahead (1-90):
# reminder_window_days = 14

# Pin \"today\" to a fixed date:
# reference_date = \"2025-09-13\"
",
            DEFAULT_DATA_DIR, DEFAULT_USER, DEFAULT_LANGUAGE
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                MelaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| MelaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.catalog.as_deref().map(expand)
    }

    pub fn preference_store(&self) -> FilePreferenceStore {
        FilePreferenceStore::new(self.data_path())
    }

    /// The configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> MelaResult<EventCatalog> {
        match self.catalog_path() {
            Some(path) => EventCatalog::load(&path),
            None => Ok(EventCatalog::seed()),
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
