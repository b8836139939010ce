//! Regional calendar traditions and their month-naming conventions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How lunar months are delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthSystem {
    /// Month ends at full moon; the Krishna paksha opens the month
    Purnimant,
    /// Month ends at new moon; the Shukla paksha opens the month
    Amant,
}

/// A regional panchang tradition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tradition {
    NorthIndian,
    Nepali,
    Odia,
    Gujarati,
    Marathi,
    Telugu,
    Kannada,
    Tamil,
    Malayalam,
    Bengali,
}

impl Tradition {
    pub const ALL: [Tradition; 10] = [
        Tradition::NorthIndian,
        Tradition::Nepali,
        Tradition::Odia,
        Tradition::Gujarati,
        Tradition::Marathi,
        Tradition::Telugu,
        Tradition::Kannada,
        Tradition::Tamil,
        Tradition::Malayalam,
        Tradition::Bengali,
    ];

    pub fn month_system(&self) -> MonthSystem {
        match self {
            Tradition::NorthIndian | Tradition::Nepali | Tradition::Odia => MonthSystem::Purnimant,
            _ => MonthSystem::Amant,
        }
    }

    /// Stable key used in rule data and cache keys
    pub fn key(&self) -> &'static str {
        match self {
            Tradition::NorthIndian => "north_indian",
            Tradition::Nepali => "nepali",
            Tradition::Odia => "odia",
            Tradition::Gujarati => "gujarati",
            Tradition::Marathi => "marathi",
            Tradition::Telugu => "telugu",
            Tradition::Kannada => "kannada",
            Tradition::Tamil => "tamil",
            Tradition::Malayalam => "malayalam",
            Tradition::Bengali => "bengali",
        }
    }

    pub fn is_purnimant(&self) -> bool {
        self.month_system() == MonthSystem::Purnimant
    }
}

impl Default for Tradition {
    fn default() -> Self {
        Tradition::NorthIndian
    }
}

impl fmt::Display for Tradition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Tradition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Tradition::ALL
            .iter()
            .copied()
            .find(|t| t.key() == normalized)
            .ok_or_else(|| format!("unknown tradition '{}'", s))
    }
}
