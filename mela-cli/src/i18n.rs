//! Localization of mela-core [`Message`]s with fluent.
//!
//! English (US) is complete and always loaded as the fallback. Other
//! languages may leave messages out; lookups then fall back to English, and
//! finally to the message key itself.

use fluent::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use fluent_langneg::{NegotiationStrategy, negotiate_languages};
use mela_core::{Message, MessageArg};
use unic_langid::{LanguageIdentifier, langid};

const EN_US: LanguageIdentifier = langid!("en-US");
const HI: LanguageIdentifier = langid!("hi");

struct StaticBundle {
    identifier: LanguageIdentifier,
    /// Name accepted in config and on the command line.
    name: &'static str,
    ftl: &'static str,
}

static FTLS: [StaticBundle; 2] = [
    StaticBundle {
        identifier: EN_US,
        name: "English",
        ftl: include_str!("../assets/translations/en-US/main.ftl"),
    },
    StaticBundle {
        identifier: HI,
        name: "Hindi",
        ftl: include_str!("../assets/translations/hi/main.ftl"),
    },
];

type Bundle = FluentBundle<FluentResource>;

/// Resolve a language name ("Hindi") or tag ("hi-IN") to a bundled locale.
pub fn negotiate_locale(lang: &str) -> Option<LanguageIdentifier> {
    let requested: Vec<LanguageIdentifier> = FTLS
        .iter()
        .find(|f| f.name.eq_ignore_ascii_case(lang.trim()))
        .map(|f| f.identifier.clone())
        .or_else(|| lang.trim().parse().ok())
        .into_iter()
        .collect();
    let available: Vec<LanguageIdentifier> = FTLS.iter().map(|f| f.identifier.clone()).collect();

    negotiate_languages(&requested, &available, None, NegotiationStrategy::Filtering)
        .first()
        .map(|l| (*l).clone())
}

fn load_bundle(lang: &LanguageIdentifier) -> Option<Bundle> {
    let ftl = FTLS.iter().find(|f| &f.identifier == lang)?;

    let mut bundle = FluentBundle::new(vec![lang.to_owned()]);
    // Terminal output: no bidi isolation marks around arguments.
    bundle.set_use_isolating(false);

    let resource = match FluentResource::try_new(ftl.ftl.to_string()) {
        Ok(resource) => resource,
        Err((resource, errors)) => {
            for error in errors {
                tracing::error!("load_bundle ({lang}): {error}");
            }
            resource
        }
    };
    if let Err(errors) = bundle.add_resource(resource) {
        for error in errors {
            tracing::error!("adding resource ({lang}): {error}");
        }
    }

    Some(bundle)
}

/// Translations bound to the user's language.
pub struct Translator {
    locale: LanguageIdentifier,
    /// Lookup order: the user's locale, then the fallback.
    bundles: Vec<Bundle>,
}

impl Translator {
    pub fn new(lang: &str) -> Self {
        let locale = negotiate_locale(lang).unwrap_or_else(|| {
            tracing::warn!(lang, "unknown language, falling back to {EN_US}");
            EN_US
        });

        let mut order = vec![locale.clone()];
        if locale != EN_US {
            order.push(EN_US);
        }

        Translator {
            bundles: order.iter().filter_map(load_bundle).collect(),
            locale,
        }
    }

    pub fn locale(&self) -> &LanguageIdentifier {
        &self.locale
    }

    fn lookup(&self, key: &str, args: Option<&FluentArgs>) -> Option<String> {
        self.bundles.iter().find_map(|bundle| {
            let pattern = bundle.get_message(key)?.value()?;
            let mut errors = Vec::new();
            let text = bundle.format_pattern(pattern, args, &mut errors);
            if !errors.is_empty() {
                tracing::warn!("localization errors for {key}: {errors:?}");
            }
            Some(text.into_owned())
        })
    }

    /// Text for a message without arguments.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key, None).unwrap_or_else(|| key.to_string())
    }

    pub fn render(&self, message: &Message) -> String {
        let mut args = FluentArgs::new();
        for (name, value) in &message.args {
            let value = match value {
                MessageArg::Number(n) => FluentValue::from(*n),
                MessageArg::Text(s) => FluentValue::from(s.clone()),
            };
            args.set(*name, value);
        }

        self.lookup(message.key, Some(&args)).unwrap_or_else(|| message.key.to_string())
    }

    /// Display name of a craft tag. Tags without a translation are shown as-is.
    pub fn craft_tag(&self, tag: &str) -> String {
        self.lookup(&craft_key(tag), None).unwrap_or_else(|| tag.to_string())
    }

    /// Map user input back to a catalog tag, accepting either the tag itself
    /// or its translated name.
    pub fn canonical_tag(&self, input: &str, vocabulary: &[String]) -> String {
        let input = input.trim();
        vocabulary
            .iter()
            .find(|tag| tag.eq_ignore_ascii_case(input) || self.craft_tag(tag) == input)
            .cloned()
            .unwrap_or_else(|| input.to_string())
    }
}

/// `"Terracotta clay"` -> `craft-terracotta-clay`
fn craft_key(tag: &str) -> String {
    let slug: String = tag
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();
    format!("craft-{slug}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_resources_parse_cleanly() {
        for ftl in &FTLS {
            assert!(
                FluentResource::try_new(ftl.ftl.to_string()).is_ok(),
                "{} has syntax errors",
                ftl.identifier
            );
        }
    }

    #[test]
    fn negotiates_names_and_tags() {
        assert_eq!(negotiate_locale("Hindi"), Some(HI));
        assert_eq!(negotiate_locale("english"), Some(EN_US));
        assert_eq!(negotiate_locale("hi-IN"), Some(HI));
        assert_eq!(negotiate_locale("Klingon"), None);
    }

    #[test]
    fn english_days_are_pluralized() {
        let tr = Translator::new("English");
        let caption = |days: i64| tr.render(&Message::new("starts_in_caption").with("days", days));
        assert_eq!(caption(1), "Starts in 1 day");
        assert_eq!(caption(3), "Starts in 3 days");

        let ended = Message::new("ended_ago_caption").with("days", 1i64);
        assert_eq!(tr.render(&ended), "Ended 1 day ago");
    }

    #[test]
    fn hindi_renders_arguments() {
        let tr = Translator::new("Hindi");
        let msg = Message::new("starts_in_caption").with("days", 3i64);
        assert_eq!(tr.render(&msg), "3 दिन में शुरू");
    }

    #[test]
    fn falls_back_to_english_on_missing_message() {
        let tr = Translator::new("Hindi");
        assert_eq!(tr.t("event_tags_label"), "Tags:");
        assert_eq!(tr.t("starting_today"), "Starting Today!");
    }

    #[test]
    fn unknown_language_uses_english() {
        let tr = Translator::new("Klingon");
        assert_eq!(tr.locale(), &EN_US);
        assert_eq!(tr.t("event_done"), "Done");
    }

    #[test]
    fn unknown_key_returns_key() {
        let tr = Translator::new("English");
        assert_eq!(tr.t("no_such_key"), "no_such_key");
        assert_eq!(tr.render(&Message::new("no_such_key")), "no_such_key");
    }

    #[test]
    fn craft_tags_translate_and_map_back() {
        let hindi = Translator::new("Hindi");
        assert_eq!(hindi.craft_tag("Pottery"), "मिट्टी कला");
        assert_eq!(hindi.craft_tag("Terracotta clay"), "टेराकोटा मिट्टी");
        assert_eq!(hindi.craft_tag("Jewellery"), "Jewellery");

        let english = Translator::new("English");
        assert_eq!(english.craft_tag("Pottery"), "Pottery");

        let vocabulary = vec!["Pottery".to_string(), "Terracotta clay".to_string()];
        assert_eq!(hindi.canonical_tag("मिट्टी कला", &vocabulary), "Pottery");
        assert_eq!(
            hindi.canonical_tag("terracotta CLAY", &vocabulary),
            "Terracotta clay"
        );
        assert_eq!(hindi.canonical_tag("Jewellery", &vocabulary), "Jewellery");
    }
}
