pub mod calendar;
pub mod config;
pub mod crafts;
pub mod events;
pub mod notices;
pub mod remind;
pub mod upcoming;
pub mod window;

use anyhow::Result;
use chrono::NaiveDate;
use mela_core::catalog::EventCatalog;
use mela_core::mela_config::MelaConfig;
use mela_core::preferences::FilePreferenceStore;
use mela_core::session::SessionContext;

use crate::i18n::Translator;

/// Everything a command needs for one invocation.
pub struct Context {
    pub config: MelaConfig,
    pub catalog: EventCatalog,
    pub store: FilePreferenceStore,
    pub session: SessionContext,
    pub today: NaiveDate,
    pub tr: Translator,
}

impl Context {
    /// Command line values override the config file. "Today" falls back to
    /// the local date when neither pins it.
    pub fn load(
        user: Option<String>,
        today: Option<NaiveDate>,
        lang: Option<String>,
    ) -> Result<Self> {
        let config = MelaConfig::load()?;
        Self::from_config(config, user, today, lang)
    }

    pub fn from_config(
        config: MelaConfig,
        user: Option<String>,
        today: Option<NaiveDate>,
        lang: Option<String>,
    ) -> Result<Self> {
        let today = today
            .or(config.reference_date)
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let user = user.unwrap_or_else(|| config.user.clone());
        let lang = lang.unwrap_or_else(|| config.language.clone());

        let catalog = config.load_catalog()?;
        let store = config.preference_store();
        let session = SessionContext::open(&store, &user, today)?
            .with_reminder_window(config.reminder_window_days);

        tracing::debug!(%user, %today, events = catalog.len(), "context loaded");

        Ok(Context {
            config,
            catalog,
            store,
            session,
            today,
            tr: Translator::new(&lang),
        })
    }
}
