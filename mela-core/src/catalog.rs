//! The immutable event catalog.
//!
//! Catalogs are validated once at load time; the rest of the engine assumes
//! well-formed events and never re-checks the date invariant.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{MelaError, MelaResult};
use crate::event::Event;

#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: Vec<Event>,
}

/// On-disk catalog shape: a list of `[[events]]` tables.
#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    events: Vec<Event>,
}

impl EventCatalog {
    /// Build a catalog, rejecting malformed records and duplicate ids.
    pub fn from_events(events: Vec<Event>) -> MelaResult<Self> {
        let mut seen = HashSet::new();
        for event in &events {
            event.validate()?;
            if !seen.insert(event.id.as_str()) {
                return Err(MelaError::DuplicateEvent(event.id.clone()));
            }
        }
        Ok(EventCatalog { events })
    }

    pub fn from_toml_str(content: &str) -> MelaResult<Self> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| MelaError::Catalog(e.to_string()))?;
        Self::from_events(file.events)
    }

    /// Load a catalog from a TOML file.
    pub fn load(path: &Path) -> MelaResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content).map_err(|e| match e {
            MelaError::Catalog(msg) => {
                MelaError::Catalog(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })?;
        tracing::debug!(path = %path.display(), events = catalog.len(), "loaded event catalog");
        Ok(catalog)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Built-in seed list of artisan events.
    pub fn seed() -> Self {
        EventCatalog {
            events: seed_events(),
        }
    }
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

struct Seed {
    id: &'static str,
    title: &'static str,
    tags: &'static [&'static str],
    start: (i32, u32, u32),
    end: (i32, u32, u32),
    venue: &'static str,
    address: Option<&'static str>,
    city: &'static str,
    description: &'static str,
}

const SEEDS: &[Seed] = &[
    // 2025, already over
    Seed {
        id: "ev-past-apr",
        title: "Channapatna Toys Festival",
        tags: &["Wood", "Toys"],
        start: (2025, 4, 10),
        end: (2025, 4, 14),
        venue: "Crafts Village",
        address: None,
        city: "Channapatna, Karnataka",
        description: "A vibrant festival for traditional toy makers.",
    },
    Seed {
        id: "ev-past-jun",
        title: "Leather Craft Expo",
        tags: &["Leather"],
        start: (2025, 6, 5),
        end: (2025, 6, 7),
        venue: "Kanpur Trade Hall",
        address: None,
        city: "Kanpur, Uttar Pradesh",
        description: "Connecting leather artisans with international buyers.",
    },
    Seed {
        id: "ev-past-01",
        title: "Summer Pottery Fair",
        tags: &["Terracotta clay", "Ceramics", "Pottery"],
        start: (2025, 7, 15),
        end: (2025, 7, 17),
        venue: "Bhopal Grounds",
        address: None,
        city: "Bhopal, Madhya Pradesh",
        description: "A showcase of central India's finest pottery.",
    },
    Seed {
        id: "ev-past-02",
        title: "Monsoon Weaves",
        tags: &["Fabric", "Silk", "Weaving"],
        start: (2025, 8, 22),
        end: (2025, 8, 24),
        venue: "Kolkata Expo Centre",
        address: None,
        city: "Kolkata, West Bengal",
        description: "Featuring Baluchari and Jamdani sarees.",
    },
    // 2025, upcoming
    Seed {
        id: "ev-005",
        title: "All-India Craft Dialogue",
        tags: &["All", "Policy", "Market"],
        start: (2025, 9, 11),
        end: (2025, 9, 11),
        venue: "Pragati Maidan - Hall 6",
        address: Some("Pragati Maidan Complex"),
        city: "New Delhi",
        description: "A forum for artisans to discuss market linkages and policy.",
    },
    Seed {
        id: "ev-001",
        title: "Handmade Bazaar",
        tags: &["Terracotta clay", "Ceramics", "Pottery"],
        start: (2025, 9, 16),
        end: (2025, 9, 18),
        venue: "Amber Grounds",
        address: Some("Amber Rd, Near Amer Fort"),
        city: "Jaipur, Rajasthan",
        description: "A curated fair for pottery and terracotta artisans from Rajasthan.",
    },
    Seed {
        id: "ev-sep-17",
        title: "Artisan Weavers Meet",
        tags: &["Weaving", "Fabric"],
        start: (2025, 9, 17),
        end: (2025, 9, 17),
        venue: "Community Hall",
        address: None,
        city: "Jaipur, Rajasthan",
        description: "A meeting for local weavers.",
    },
    Seed {
        id: "ev-sep-24",
        title: "Bazaar Planning Session",
        tags: &["Market", "Policy"],
        start: (2025, 9, 24),
        end: (2025, 9, 24),
        venue: "Online",
        address: None,
        city: "Virtual",
        description: "Planning for the next big bazaar.",
    },
    Seed {
        id: "ev-002",
        title: "Banarasi Silks Expo",
        tags: &["Fabric", "Silk", "Weaving"],
        start: (2025, 9, 27),
        end: (2025, 9, 28),
        venue: "Vishwanath Conference Hall",
        address: Some("Manduadih Rd, Near Kashi Vishwanath Temple"),
        city: "Varanasi, Uttar Pradesh",
        description: "Silk weavers showcase and buyer connect event.",
    },
    Seed {
        id: "ev-003",
        title: "Kutch Embroidery Symposium",
        tags: &["Embroidery", "Bandhani", "Fabric"],
        start: (2025, 10, 12),
        end: (2025, 10, 13),
        venue: "Bhuj Crafts Centre",
        address: Some("Plot 12, Crafts Complex, Bhuj"),
        city: "Bhuj, Kutch, Gujarat",
        description: "Workshops and exhibitions focusing on Kutch embroidery.",
    },
    Seed {
        id: "ev-diwali",
        title: "Diwali Crafts Mela",
        tags: &["All", "Festive", "Pottery", "Fabric"],
        start: (2025, 10, 25),
        end: (2025, 10, 30),
        venue: "Dilli Haat INA",
        address: None,
        city: "New Delhi",
        description: "The biggest festive market for artisans.",
    },
    Seed {
        id: "ev-winter",
        title: "Winter Pashmina Showcase",
        tags: &["Fabric", "Wool"],
        start: (2025, 12, 18),
        end: (2025, 12, 22),
        venue: "Srinagar Arts Emporium",
        address: None,
        city: "Srinagar, Jammu & Kashmir",
        description: "Exclusive showcase of fine Pashmina shawls.",
    },
    // 2026
    Seed {
        id: "ev-2026-01",
        title: "New Year Woodcraft Show",
        tags: &["Wood", "Carving"],
        start: (2026, 1, 10),
        end: (2026, 1, 12),
        venue: "Mysore Palace Grounds",
        address: None,
        city: "Mysuru, Karnataka",
        description: "Exhibition of fine sandalwood and rosewood carving.",
    },
    Seed {
        id: "ev-2026-02",
        title: "Republic Day Parade Crafts",
        tags: &["All", "National"],
        start: (2026, 1, 26),
        end: (2026, 1, 26),
        venue: "Kartavya Path",
        address: None,
        city: "New Delhi",
        description: "Selected artisans showcase their state's craft in the parade.",
    },
    Seed {
        id: "ev-2026-03",
        title: "Spring Metalwork Conclave",
        tags: &["Metals", "Brass"],
        start: (2026, 3, 5),
        end: (2026, 3, 7),
        venue: "Moradabad Trade Center",
        address: None,
        city: "Moradabad, Uttar Pradesh",
        description: "A B2B event for brass and metal artisans.",
    },
    Seed {
        id: "ev-2026-04",
        title: "Pattachitra Art Camp",
        tags: &["Painting", "Art"],
        start: (2026, 5, 20),
        end: (2026, 5, 25),
        venue: "Raghurajpur Heritage Village",
        address: None,
        city: "Puri, Odisha",
        description: "A live-in art camp for Pattachitra painters.",
    },
    Seed {
        id: "ev-2026-05",
        title: "Southern Silk Summit",
        tags: &["Silk", "Fabric"],
        start: (2026, 8, 15),
        end: (2026, 8, 17),
        venue: "Chennai Trade Centre",
        address: None,
        city: "Chennai, Tamil Nadu",
        description: "Showcasing Kanjeevaram and other southern silks.",
    },
];

fn seed_events() -> Vec<Event> {
    SEEDS
        .iter()
        .map(|s| Event {
            id: s.id.to_string(),
            title: s.title.to_string(),
            craft_tags: s.tags.iter().map(|t| t.to_string()).collect(),
            start_date: ymd(s.start.0, s.start.1, s.start.2),
            end_date: ymd(s.end.0, s.end.1, s.end.2),
            venue: s.venue.to_string(),
            city: s.city.to_string(),
            address: s.address.map(String::from),
            description: Some(s.description.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::{date, make_test_event};

    #[test]
    fn seed_catalog_is_valid() {
        let seed = EventCatalog::seed();
        let revalidated = EventCatalog::from_events(seed.events().to_vec()).unwrap();
        assert_eq!(revalidated.len(), seed.len());
        assert!(seed.get("ev-diwali").is_some());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let events = vec![
            make_test_event("ev-1", date(2025, 9, 16), date(2025, 9, 18)),
            make_test_event("ev-1", date(2025, 9, 20), date(2025, 9, 20)),
        ];
        assert!(matches!(
            EventCatalog::from_events(events),
            Err(MelaError::DuplicateEvent(id)) if id == "ev-1"
        ));
    }

    #[test]
    fn reversed_dates_are_rejected() {
        let events = vec![make_test_event("ev-1", date(2025, 9, 18), date(2025, 9, 16))];
        assert!(matches!(
            EventCatalog::from_events(events),
            Err(MelaError::InvalidEvent { .. })
        ));
    }

    #[test]
    fn parses_toml_catalog() {
        let content = r#"
[[events]]
id = "ev-001"
title = "Handmade Bazaar"
craft_tags = ["Pottery", "Ceramics"]
start_date = "2025-09-16"
end_date = "2025-09-18"
venue = "Amber Grounds"
city = "Jaipur, Rajasthan"

[[events]]
id = "ev-002"
title = "Banarasi Silks Expo"
start_date = "2025-09-27"
end_date = "2025-09-28"
"#;
        let catalog = EventCatalog::from_toml_str(content).unwrap();
        assert_eq!(catalog.len(), 2);

        let bazaar = catalog.get("ev-001").unwrap();
        assert_eq!(bazaar.start_date, date(2025, 9, 16));
        assert_eq!(bazaar.craft_tags, vec!["Pottery", "Ceramics"]);

        let expo = catalog.get("ev-002").unwrap();
        assert!(expo.craft_tags.is_empty());
        assert_eq!(expo.description, None);
    }

    #[test]
    fn malformed_toml_is_a_catalog_error() {
        let content = r#"
[[events]]
id = "ev-001"
title = "Missing dates"
"#;
        assert!(matches!(
            EventCatalog::from_toml_str(content),
            Err(MelaError::Catalog(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.toml");
        std::fs::write(
            &path,
            concat!(
                "[[events]]\nid = \"a\"\ntitle = \"A\"\n",
                "start_date = \"2025-01-01\"\nend_date = \"2025-01-02\"\n",
            ),
        )
        .unwrap();

        let catalog = EventCatalog::load(&path).unwrap();
        assert_eq!(catalog.events()[0].id, "a");
    }
}
