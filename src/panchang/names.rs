//! Name tables for panchang elements
//!
//! Transliterations follow common North Indian usage. Alternate spellings
//! accepted when parsing month and rashi names from rule data are collected
//! in the lookup maps.

use lazy_static::lazy_static;
use std::collections::HashMap;

use super::{HinduMonth, Rashi};

/// Tithi names within a paksha; index 14 is Purnima and is replaced by
/// Amavasya in the Krishna paksha
pub const TITHI_NAMES: [&str; 15] = [
    "Pratipada",
    "Dwitiya",
    "Tritiya",
    "Chaturthi",
    "Panchami",
    "Shashthi",
    "Saptami",
    "Ashtami",
    "Navami",
    "Dashami",
    "Ekadashi",
    "Dwadashi",
    "Trayodashi",
    "Chaturdashi",
    "Purnima",
];

pub const AMAVASYA: &str = "Amavasya";

pub const NAKSHATRA_NAMES: [&str; 27] = [
    "Ashwini",
    "Bharani",
    "Krittika",
    "Rohini",
    "Mrigashira",
    "Ardra",
    "Punarvasu",
    "Pushya",
    "Ashlesha",
    "Magha",
    "Purva Phalguni",
    "Uttara Phalguni",
    "Hasta",
    "Chitra",
    "Swati",
    "Vishakha",
    "Anuradha",
    "Jyeshtha",
    "Mula",
    "Purva Ashadha",
    "Uttara Ashadha",
    "Shravana",
    "Dhanishta",
    "Shatabhisha",
    "Purva Bhadrapada",
    "Uttara Bhadrapada",
    "Revati",
];

pub const YOGA_NAMES: [&str; 27] = [
    "Vishkambha",
    "Priti",
    "Ayushman",
    "Saubhagya",
    "Shobhana",
    "Atiganda",
    "Sukarma",
    "Dhriti",
    "Shula",
    "Ganda",
    "Vriddhi",
    "Dhruva",
    "Vyaghata",
    "Harshana",
    "Vajra",
    "Siddhi",
    "Vyatipata",
    "Variyana",
    "Parigha",
    "Shiva",
    "Siddha",
    "Sadhya",
    "Shubha",
    "Shukla",
    "Brahma",
    "Indra",
    "Vaidhriti",
];

/// The seven karanas that repeat eight times through the lunar month
pub const MOVABLE_KARANAS: [&str; 7] = [
    "Bava", "Balava", "Kaulava", "Taitila", "Garaja", "Vanija", "Vishti",
];

/// First half of Shukla Pratipada
pub const KIMSTUGHNA: &str = "Kimstughna";

/// Last three half-tithis of the Krishna paksha
pub const CLOSING_KARANAS: [&str; 3] = ["Shakuni", "Chatushpada", "Naga"];

pub const MONTH_NAMES: [&str; 12] = [
    "Chaitra",
    "Vaishakha",
    "Jyeshtha",
    "Ashadha",
    "Shravana",
    "Bhadrapada",
    "Ashwin",
    "Kartik",
    "Margashirsha",
    "Pausha",
    "Magha",
    "Phalguna",
];

pub const RASHI_NAMES: [&str; 12] = [
    "Mesha",
    "Vrishabha",
    "Mithuna",
    "Karka",
    "Simha",
    "Kanya",
    "Tula",
    "Vrishchika",
    "Dhanu",
    "Makara",
    "Kumbha",
    "Meena",
];

/// Weekday names, Sunday first
pub const VAAR_NAMES: [&str; 7] = [
    "Ravivara",
    "Somavara",
    "Mangalavara",
    "Budhavara",
    "Guruvara",
    "Shukravara",
    "Shanivara",
];

lazy_static! {
    /// Lower-case month spellings found in festival rule data
    pub static ref MONTH_LOOKUP: HashMap<&'static str, HinduMonth> = {
        let mut m = HashMap::new();
        for month in HinduMonth::ALL {
            m.insert(MONTH_NAMES[month.number() as usize - 1], month);
        }
        let aliases = [
            ("chaitra", HinduMonth::Chaitra),
            ("vaishakha", HinduMonth::Vaishakha),
            ("vaisakha", HinduMonth::Vaishakha),
            ("baisakh", HinduMonth::Vaishakha),
            ("jyeshtha", HinduMonth::Jyeshtha),
            ("jyaistha", HinduMonth::Jyeshtha),
            ("ashadha", HinduMonth::Ashadha),
            ("aashaadha", HinduMonth::Ashadha),
            ("shravana", HinduMonth::Shravana),
            ("sravana", HinduMonth::Shravana),
            ("sawan", HinduMonth::Shravana),
            ("bhadrapada", HinduMonth::Bhadrapada),
            ("bhadra", HinduMonth::Bhadrapada),
            ("ashwin", HinduMonth::Ashwin),
            ("ashvin", HinduMonth::Ashwin),
            ("ashvina", HinduMonth::Ashwin),
            ("ashwina", HinduMonth::Ashwin),
            ("kartik", HinduMonth::Kartik),
            ("kartika", HinduMonth::Kartik),
            ("margashirsha", HinduMonth::Margashirsha),
            ("margashira", HinduMonth::Margashirsha),
            ("agrahayana", HinduMonth::Margashirsha),
            ("pausha", HinduMonth::Pausha),
            ("pausa", HinduMonth::Pausha),
            ("paush", HinduMonth::Pausha),
            ("magha", HinduMonth::Magha),
            ("magh", HinduMonth::Magha),
            ("phalguna", HinduMonth::Phalguna),
            ("phalgun", HinduMonth::Phalguna),
        ];
        m.extend(aliases);
        m
    };

    pub static ref RASHI_LOOKUP: HashMap<&'static str, Rashi> = {
        let mut m = HashMap::new();
        for rashi in Rashi::ALL {
            m.insert(RASHI_NAMES[rashi.index() as usize], rashi);
        }
        let aliases = [
            ("mesha", Rashi::Mesha),
            ("aries", Rashi::Mesha),
            ("vrishabha", Rashi::Vrishabha),
            ("taurus", Rashi::Vrishabha),
            ("mithuna", Rashi::Mithuna),
            ("gemini", Rashi::Mithuna),
            ("karka", Rashi::Karka),
            ("karkata", Rashi::Karka),
            ("cancer", Rashi::Karka),
            ("simha", Rashi::Simha),
            ("leo", Rashi::Simha),
            ("kanya", Rashi::Kanya),
            ("virgo", Rashi::Kanya),
            ("tula", Rashi::Tula),
            ("libra", Rashi::Tula),
            ("vrishchika", Rashi::Vrishchika),
            ("scorpio", Rashi::Vrishchika),
            ("dhanu", Rashi::Dhanu),
            ("dhanus", Rashi::Dhanu),
            ("sagittarius", Rashi::Dhanu),
            ("makara", Rashi::Makara),
            ("capricorn", Rashi::Makara),
            ("kumbha", Rashi::Kumbha),
            ("aquarius", Rashi::Kumbha),
            ("meena", Rashi::Meena),
            ("pisces", Rashi::Meena),
        ];
        m.extend(aliases);
        m
    };
}

/// Look up a month by any known spelling, ignoring case
pub fn month_from_name(name: &str) -> Option<HinduMonth> {
    let key = name.trim();
    MONTH_LOOKUP
        .get(key)
        .or_else(|| MONTH_LOOKUP.get(key.to_ascii_lowercase().as_str()))
        .copied()
}

/// Look up a rashi by Sanskrit or Western name, ignoring case
pub fn rashi_from_name(name: &str) -> Option<Rashi> {
    let key = name.trim();
    RASHI_LOOKUP
        .get(key)
        .or_else(|| RASHI_LOOKUP.get(key.to_ascii_lowercase().as_str()))
        .copied()
}
