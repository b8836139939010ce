//! Festival definitions, rule data loading and the matching engine
//!
//! Festival records are plain data: an id, localized names, a
//! [`FestivalRule`] and the traditions that observe it. A
//! [`FestivalCatalog`] loads them from JSON, dropping entries it cannot
//! understand, and a [`FestivalRulesEngine`] matches them against computed
//! Hindu dates.

pub mod engine;
pub mod recurring;
pub mod rules;

pub use engine::{FestivalRulesEngine, DEFAULT_EVENING_FESTIVALS};
pub use recurring::recurring_observances;
pub use rules::FestivalRule;

use chrono::NaiveDate;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::tradition::Tradition;
use crate::{PanchangError, Result};

/// Rule data shipped with the crate
const BUNDLED_FESTIVALS: &str = include_str!("../../data/festivals.json");

/// Language used when a requested translation is missing
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FestivalCategory {
    /// Observed everywhere regardless of the tradition list
    Major,
    Regional,
    Vrat,
    #[default]
    Observance,
}

fn default_duration() -> u32 {
    1
}

/// A festival and the rule that places it in the calendar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Festival {
    pub id: String,
    /// Display names keyed by language code
    #[serde(default)]
    pub names: BTreeMap<String, String>,
    pub rule: FestivalRule,
    /// Traditions observing the festival; empty means all
    #[serde(default)]
    pub traditions: Vec<Tradition>,
    #[serde(default)]
    pub category: FestivalCategory,
    #[serde(default = "default_duration")]
    pub duration_days: u32,
    /// Repeats every month and may coincide with other festivals
    #[serde(default)]
    pub recurring: bool,
}

impl Festival {
    pub fn new(id: &str, english_name: &str, rule: FestivalRule) -> Self {
        let mut names = BTreeMap::new();
        names.insert(DEFAULT_LANGUAGE.to_string(), english_name.to_string());
        Self {
            id: id.to_string(),
            names,
            rule,
            traditions: Vec::new(),
            category: FestivalCategory::default(),
            duration_days: 1,
            recurring: false,
        }
    }

    pub fn with_category(mut self, category: FestivalCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_traditions(mut self, traditions: &[Tradition]) -> Self {
        self.traditions = traditions.to_vec();
        self
    }

    pub fn with_duration(mut self, days: u32) -> Self {
        self.duration_days = days;
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    /// Name in `language`, falling back to English and then the id
    pub fn name(&self, language: &str) -> &str {
        self.names
            .get(language)
            .or_else(|| self.names.get(DEFAULT_LANGUAGE))
            .map(String::as_str)
            .unwrap_or(&self.id)
    }

    /// Whether `tradition` observes this festival
    pub fn applies_to(&self, tradition: Tradition) -> bool {
        self.category == FestivalCategory::Major
            || self.traditions.is_empty()
            || self.traditions.contains(&tradition)
    }

    /// Named Ekadashi festivals replace the generic monthly entry
    pub fn is_named_ekadashi(&self) -> bool {
        !self.recurring && (self.rule.is_ekadashi() || self.id.contains("ekadashi"))
    }
}

/// A festival placed on a civil date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FestivalOccurrence {
    pub festival: Festival,
    pub date: NaiveDate,
    /// Last day of a multi-day festival
    pub end_date: Option<NaiveDate>,
}

impl FestivalOccurrence {
    pub fn new(festival: Festival, date: NaiveDate) -> Self {
        let end_date = match festival.duration_days {
            0 | 1 => None,
            days => date.checked_add_days(chrono::Days::new(u64::from(days - 1))),
        };
        Self {
            festival,
            date,
            end_date,
        }
    }

    pub fn id(&self) -> &str {
        &self.festival.id
    }
}

/// A validated set of festival records
#[derive(Debug, Clone, Default)]
pub struct FestivalCatalog {
    festivals: Vec<Festival>,
}

impl FestivalCatalog {
    pub fn new(festivals: Vec<Festival>) -> Self {
        Self { festivals }
    }

    /// Parse a JSON array of festival records
    ///
    /// Entries with an unknown rule type or a malformed payload are skipped
    /// with a warning. Only a document that is not an array is an error.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let entries: Vec<serde_json::Value> = serde_json::from_str(json)?;
        let total = entries.len();

        let mut festivals = Vec::with_capacity(total);
        for (i, entry) in entries.into_iter().enumerate() {
            let id = entry
                .get("id")
                .and_then(|v| v.as_str())
                .unwrap_or("<missing id>")
                .to_string();
            match serde_json::from_value::<Festival>(entry) {
                Ok(festival) => festivals.push(festival),
                Err(e) => warn!("Skipping festival entry {} ({}): {}", i, id, e),
            }
        }

        debug!("Loaded {} of {} festival entries", festivals.len(), total);
        Ok(Self { festivals })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            PanchangError::FestivalData(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// Load rule data, falling back to an empty catalog on any failure
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(catalog) => catalog,
            Err(e) => {
                warn!(
                    "Festival data unavailable at {}, continuing without festivals: {}",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Rule data shipped in `data/festivals.json`
    pub fn bundled() -> Self {
        Self::from_json_str(BUNDLED_FESTIVALS).unwrap_or_else(|e| {
            warn!("Bundled festival data is unreadable: {}", e);
            Self::default()
        })
    }

    pub fn get(&self, id: &str) -> Option<&Festival> {
        self.festivals.iter().find(|f| f.id == id)
    }

    pub fn festivals(&self) -> &[Festival] {
        &self.festivals
    }

    pub fn into_festivals(self) -> Vec<Festival> {
        self.festivals
    }

    pub fn len(&self) -> usize {
        self.festivals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.festivals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panchang::{HinduMonth, Paksha};
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"[
        {
            "id": "diwali",
            "names": {"en": "Diwali", "hi": "दीपावली"},
            "rule": {"type": "tithi", "month": "Kartik", "paksha": "krishna", "tithi": 15},
            "category": "major",
            "duration_days": 5
        },
        {
            "id": "moon_landing_day",
            "rule": {"type": "lunar_eclipse"}
        },
        {
            "id": "broken_offset",
            "rule": {"type": "tithi_offset", "month": "Ashwin"}
        },
        {
            "id": "pongal",
            "names": {"en": "Pongal"},
            "rule": {"type": "solar", "rashi": "Makara"},
            "traditions": ["tamil"],
            "category": "regional"
        }
    ]"#;

    #[test]
    fn test_unknown_and_malformed_entries_are_skipped() {
        let catalog = FestivalCatalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.get("moon_landing_day").is_none());
        assert!(catalog.get("broken_offset").is_none());

        let diwali = catalog.get("diwali").unwrap();
        assert_eq!(
            diwali.rule,
            FestivalRule::Tithi {
                month: HinduMonth::Kartik,
                paksha: Paksha::Krishna,
                tithi: 15
            }
        );
        assert_eq!(diwali.duration_days, 5);
        assert_eq!(diwali.name("hi"), "दीपावली");
        assert_eq!(diwali.name("ta"), "Diwali");
    }

    #[test]
    fn test_non_array_is_an_error() {
        assert!(FestivalCatalog::from_json_str(r#"{"id": "diwali"}"#).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let catalog = FestivalCatalog::from_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_load_or_empty_fails_open() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("festivals.json");
        assert!(FestivalCatalog::load_or_empty(&missing).is_empty());

        let mut garbage = NamedTempFile::new().unwrap();
        garbage.write_all(b"not json").unwrap();
        assert!(FestivalCatalog::load_or_empty(garbage.path()).is_empty());
    }

    #[test]
    fn test_bundled_data_loads_cleanly() {
        let catalog = FestivalCatalog::bundled();
        let raw: Vec<serde_json::Value> = serde_json::from_str(BUNDLED_FESTIVALS).unwrap();
        assert_eq!(catalog.len(), raw.len());
        assert!(catalog.get("diwali").is_some());
        assert!(catalog.get("maha_shivaratri").is_some());
    }

    #[test]
    fn test_applicability() {
        let regional = Festival::new("pongal", "Pongal", FestivalRule::Solar { rashi: None })
            .with_category(FestivalCategory::Regional)
            .with_traditions(&[Tradition::Tamil]);
        assert!(regional.applies_to(Tradition::Tamil));
        assert!(!regional.applies_to(Tradition::Bengali));

        let major = regional.clone().with_category(FestivalCategory::Major);
        assert!(major.applies_to(Tradition::Bengali));

        let everywhere = Festival::new("x", "X", FestivalRule::MonthlyTithi { tithi: 4 });
        assert!(everywhere.applies_to(Tradition::Odia));
    }

    #[test]
    fn test_occurrence_end_date() {
        let date = NaiveDate::from_ymd_opt(2026, 11, 6).unwrap();
        let long = Festival::new("diwali", "Diwali", FestivalRule::MonthlyTithi { tithi: 30 })
            .with_duration(5);
        let occurrence = FestivalOccurrence::new(long, date);
        assert_eq!(occurrence.end_date, NaiveDate::from_ymd_opt(2026, 11, 10));

        let short = Festival::new("x", "X", FestivalRule::MonthlyTithi { tithi: 4 });
        assert_eq!(FestivalOccurrence::new(short, date).end_date, None);
    }
}
