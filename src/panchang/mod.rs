//! The five limbs of the Hindu day and the lunisolar calendar built on them
//!
//! [`PanchangCalculator`] derives tithi, nakshatra, yoga and karana from the
//! positions supplied by an [`Astronomy`] implementation, finds the instants
//! at which each element ends, and resolves the Hindu month and era years.
//! Inauspicious day segments (Rahu Kaal and friends) live in [`periods`].

pub mod calendar;
pub mod elements;
pub mod names;
pub mod periods;

use chrono::{DateTime, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::astronomy::{Astronomy, TruncatedSeries};
use crate::constants::RASHI_SEGMENT_DEG;
use crate::coordinates::normalize_degrees;

pub use calendar::{kali_year, shaka_year, vikram_samvat_year, EraYears};
pub use elements::{MAX_TRANSITION_ITERATIONS, TRANSITION_TOLERANCE_DEG};
pub use periods::{abhijit_muhurta, gulika_kaal, rahu_kaal, vaar_name, yamaghanda, PeriodOffsets};

/// Lunar fortnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paksha {
    /// Waxing half, tithis 1-15
    #[serde(alias = "Shukla")]
    Shukla,
    /// Waning half, tithis 16-30
    #[serde(alias = "Krishna")]
    Krishna,
}

impl Paksha {
    pub fn from_tithi_number(number: u8) -> Self {
        if number <= 15 {
            Paksha::Shukla
        } else {
            Paksha::Krishna
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Paksha::Shukla => "Shukla",
            Paksha::Krishna => "Krishna",
        }
    }
}

impl fmt::Display for Paksha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lunar day: one 12° step of Moon-Sun elongation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tithi {
    /// 1-30 across the lunar month
    pub number: u8,
    pub paksha: Paksha,
    pub name: &'static str,
}

impl Tithi {
    /// Build from a month-wide tithi number; `None` outside 1-30
    pub fn from_number(number: u8) -> Option<Self> {
        if !(1..=30).contains(&number) {
            return None;
        }
        let name = if number == 30 {
            names::AMAVASYA
        } else {
            names::TITHI_NAMES[((number - 1) % 15) as usize]
        };
        Some(Tithi {
            number,
            paksha: Paksha::from_tithi_number(number),
            name,
        })
    }

    /// Position within the paksha, 1-15
    pub fn number_in_paksha(&self) -> u8 {
        (self.number - 1) % 15 + 1
    }

    pub fn is_purnima(&self) -> bool {
        self.number == 15
    }

    pub fn is_amavasya(&self) -> bool {
        self.number == 30
    }
}

impl fmt::Display for Tithi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.paksha, self.name)
    }
}

/// Lunar mansion: 13°20′ sector of the sidereal Moon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Nakshatra {
    /// 1-27
    pub index: u8,
    pub name: &'static str,
}

impl Nakshatra {
    pub fn from_index(index: u8) -> Option<Self> {
        if !(1..=27).contains(&index) {
            return None;
        }
        Some(Nakshatra {
            index,
            name: names::NAKSHATRA_NAMES[(index - 1) as usize],
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Yoga {
    /// 1-27
    pub index: u8,
    pub name: &'static str,
}

impl Yoga {
    pub fn from_index(index: u8) -> Option<Self> {
        if !(1..=27).contains(&index) {
            return None;
        }
        Some(Yoga {
            index,
            name: names::YOGA_NAMES[(index - 1) as usize],
        })
    }
}

/// Half-tithi
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Karana {
    /// 1-60 through the lunar month
    pub index: u8,
    pub name: &'static str,
}

impl Karana {
    pub fn from_index(index: u8) -> Option<Self> {
        if !(1..=60).contains(&index) {
            return None;
        }
        let k = index - 1;
        let name = match k {
            0 => names::KIMSTUGHNA,
            1..=56 => names::MOVABLE_KARANAS[((k - 1) % 7) as usize],
            _ => names::CLOSING_KARANAS[(k - 57) as usize],
        };
        Some(Karana { index, name })
    }

    /// Karana for a tithi number and the half (0 or 1) of it in progress
    pub fn from_tithi_half(tithi_number: u8, second_half: bool) -> Option<Self> {
        if !(1..=30).contains(&tithi_number) {
            return None;
        }
        Self::from_index((tithi_number - 1) * 2 + u8::from(second_half) + 1)
    }
}

/// Lunar month, numbered from Chaitra
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum HinduMonth {
    Chaitra = 1,
    Vaishakha,
    Jyeshtha,
    Ashadha,
    Shravana,
    Bhadrapada,
    Ashwin,
    Kartik,
    Margashirsha,
    Pausha,
    Magha,
    Phalguna,
}

impl HinduMonth {
    pub const ALL: [HinduMonth; 12] = [
        HinduMonth::Chaitra,
        HinduMonth::Vaishakha,
        HinduMonth::Jyeshtha,
        HinduMonth::Ashadha,
        HinduMonth::Shravana,
        HinduMonth::Bhadrapada,
        HinduMonth::Ashwin,
        HinduMonth::Kartik,
        HinduMonth::Margashirsha,
        HinduMonth::Pausha,
        HinduMonth::Magha,
        HinduMonth::Phalguna,
    ];

    /// 1 for Chaitra through 12 for Phalguna
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        if (1..=12).contains(&number) {
            Some(Self::ALL[(number - 1) as usize])
        } else {
            None
        }
    }

    pub fn next(&self) -> Self {
        Self::ALL[(self.number() % 12) as usize]
    }

    pub fn previous(&self) -> Self {
        Self::ALL[((self.number() + 10) % 12) as usize]
    }

    pub fn name(&self) -> &'static str {
        names::MONTH_NAMES[(self.number() - 1) as usize]
    }

    /// Amant month beginning at a new moon with the Sun in `rashi`
    ///
    /// The month takes its name from the sign the Sun enters during it, so a
    /// lunation opening with the Sun in Meena is Chaitra.
    pub fn from_new_moon_rashi(rashi: Rashi) -> Self {
        Self::ALL[((rashi.index() + 1) % 12) as usize]
    }
}

impl fmt::Display for HinduMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HinduMonth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        names::month_from_name(s).ok_or_else(|| format!("unknown Hindu month '{}'", s))
    }
}

impl TryFrom<String> for HinduMonth {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HinduMonth> for &'static str {
    fn from(month: HinduMonth) -> Self {
        month.name()
    }
}

/// Sidereal zodiac sign
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Rashi {
    Mesha = 0,
    Vrishabha,
    Mithuna,
    Karka,
    Simha,
    Kanya,
    Tula,
    Vrishchika,
    Dhanu,
    Makara,
    Kumbha,
    Meena,
}

impl Rashi {
    pub const ALL: [Rashi; 12] = [
        Rashi::Mesha,
        Rashi::Vrishabha,
        Rashi::Mithuna,
        Rashi::Karka,
        Rashi::Simha,
        Rashi::Kanya,
        Rashi::Tula,
        Rashi::Vrishchika,
        Rashi::Dhanu,
        Rashi::Makara,
        Rashi::Kumbha,
        Rashi::Meena,
    ];

    /// 0 for Mesha through 11 for Meena
    pub fn index(&self) -> u8 {
        *self as u8
    }

    /// Sign containing a sidereal longitude
    pub fn from_longitude(sidereal_longitude: f64) -> Self {
        let idx = (normalize_degrees(sidereal_longitude) / RASHI_SEGMENT_DEG).floor() as usize;
        Self::ALL[idx.min(11)]
    }

    /// Sidereal longitude at which the Sun enters this sign
    pub fn start_longitude(&self) -> f64 {
        f64::from(self.index()) * RASHI_SEGMENT_DEG
    }

    pub fn name(&self) -> &'static str {
        names::RASHI_NAMES[self.index() as usize]
    }
}

impl fmt::Display for Rashi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rashi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        names::rashi_from_name(s).ok_or_else(|| format!("unknown rashi '{}'", s))
    }
}

impl TryFrom<String> for Rashi {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rashi> for &'static str {
    fn from(rashi: Rashi) -> Self {
        rashi.name()
    }
}

/// Instant at which an angular quantity reaches its target
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Transition {
    pub jd_tt: f64,
    /// False when the iteration budget ran out first
    pub converged: bool,
}

/// Lunar month resolved for a tradition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LunarMonth {
    pub month: HinduMonth,
    pub adhik: bool,
}

/// A date in the Hindu lunisolar calendar
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HinduDate {
    pub month: HinduMonth,
    pub adhik_maas: bool,
    pub paksha: Paksha,
    pub tithi: Tithi,
    pub era: EraYears,
    /// Sidereal solar longitude the month and solar rules were evaluated at
    pub solar_longitude: f64,
    pub solar_rashi: Rashi,
}

impl fmt::Display for HinduDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.adhik_maas {
            write!(f, "Adhik ")?;
        }
        write!(
            f,
            "{} {} {}, VS {}",
            self.month, self.paksha, self.tithi.name, self.era.vikram_samvat
        )
    }
}

/// A named span of the civil day in the location's zone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimePeriod {
    pub name: String,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

/// Derives panchang elements from an [`Astronomy`] source
#[derive(Clone)]
pub struct PanchangCalculator {
    astronomy: Arc<dyn Astronomy>,
}

impl PanchangCalculator {
    pub fn new(astronomy: Arc<dyn Astronomy>) -> Self {
        Self { astronomy }
    }

    pub fn astronomy(&self) -> &Arc<dyn Astronomy> {
        &self.astronomy
    }
}

impl Default for PanchangCalculator {
    fn default() -> Self {
        Self::new(Arc::new(TruncatedSeries))
    }
}

impl fmt::Debug for PanchangCalculator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanchangCalculator").finish_non_exhaustive()
    }
}

/// Weekday number with Sunday as 1, as used in panchang tables
pub fn weekday_number(weekday: Weekday) -> u8 {
    weekday.num_days_from_sunday() as u8 + 1
}
