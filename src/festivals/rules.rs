//! Festival rule kinds and how each one matches a Hindu date
//!
//! Rules are authored in Purnimant month naming. Amant traditions translate
//! Krishna-paksha dates to the following month before comparing.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::coordinates::normalize_degrees;
use crate::panchang::{HinduDate, HinduMonth, Paksha, Rashi};
use crate::tradition::{MonthSystem, Tradition};

/// Solar rules fire while the Sun is within this many degrees past ingress
pub const SOLAR_INGRESS_WINDOW_DEG: f64 = 1.0;

/// When a festival falls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FestivalRule {
    /// A lunar day of a named month. `tithi` may be given within the paksha
    /// (1-15) or across the month (1-30).
    Tithi {
        month: HinduMonth,
        paksha: Paksha,
        tithi: u8,
    },
    /// Sankranti: the Sun entering `rashi`, or any sign when omitted
    Solar {
        #[serde(default)]
        rashi: Option<Rashi>,
    },
    /// The Krishna-paksha tithi `days_after_purnima` days after the Purnima
    /// that closes `month`
    TithiOffset { month: HinduMonth, days_after_purnima: u8 },
    /// A Gregorian month and day
    FixedSolar { month: u32, day: u32 },
    /// A tithi number (1-30) in every month
    MonthlyTithi { tithi: u8 },
}

impl FestivalRule {
    /// Whether the rule holds for `hindu`, the Hindu date in force on `date`
    ///
    /// Lunar rules never match inside an adhik month.
    pub fn matches(&self, date: NaiveDate, hindu: &HinduDate, tradition: Tradition) -> bool {
        match self {
            FestivalRule::Tithi {
                month,
                paksha,
                tithi,
            } => {
                if hindu.adhik_maas || !(1..=30).contains(tithi) {
                    return false;
                }
                hindu.paksha == *paksha
                    && hindu.tithi.number_in_paksha() == (tithi - 1) % 15 + 1
                    && rule_month(hindu, tradition) == *month
            }
            FestivalRule::Solar { rashi } => {
                let start = rashi.map_or_else(
                    || Rashi::from_longitude(hindu.solar_longitude).start_longitude(),
                    |r| r.start_longitude(),
                );
                normalize_degrees(hindu.solar_longitude - start) < SOLAR_INGRESS_WINDOW_DEG
            }
            FestivalRule::TithiOffset {
                month,
                days_after_purnima,
            } => {
                if hindu.adhik_maas || !(1..=15).contains(days_after_purnima) {
                    return false;
                }
                if hindu.paksha != Paksha::Krishna
                    || hindu.tithi.number != 15 + days_after_purnima
                {
                    return false;
                }
                // Purnimant months end at the Purnima, so the offset days
                // already belong to the next month
                let expected = match tradition.month_system() {
                    MonthSystem::Purnimant => hindu.month.previous(),
                    MonthSystem::Amant => hindu.month,
                };
                expected == *month
            }
            FestivalRule::FixedSolar { month, day } => {
                date.month() == *month && date.day() == *day
            }
            FestivalRule::MonthlyTithi { tithi } => hindu.tithi.number == *tithi,
        }
    }

    /// Whether the rule is keyed to the lunar calendar
    pub fn is_lunar(&self) -> bool {
        matches!(
            self,
            FestivalRule::Tithi { .. }
                | FestivalRule::TithiOffset { .. }
                | FestivalRule::MonthlyTithi { .. }
        )
    }

    /// Whether this rule picks out an Ekadashi
    pub fn is_ekadashi(&self) -> bool {
        match self {
            FestivalRule::Tithi { tithi, .. } => (1..=30).contains(tithi) && (tithi - 1) % 15 + 1 == 11,
            FestivalRule::MonthlyTithi { tithi } => *tithi == 11 || *tithi == 26,
            _ => false,
        }
    }
}

/// Month name a date carries in the Purnimant naming rules are written in
fn rule_month(hindu: &HinduDate, tradition: Tradition) -> HinduMonth {
    match (tradition.month_system(), hindu.paksha) {
        (MonthSystem::Amant, Paksha::Krishna) => hindu.month.next(),
        _ => hindu.month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panchang::{EraYears, Tithi};

    fn hindu(month: HinduMonth, tithi: u8, adhik: bool, solar_longitude: f64) -> HinduDate {
        let tithi = Tithi::from_number(tithi).unwrap();
        HinduDate {
            month,
            adhik_maas: adhik,
            paksha: tithi.paksha,
            tithi,
            era: EraYears {
                vikram_samvat: 2083,
                shaka: 1948,
                kali: 5127,
            },
            solar_longitude,
            solar_rashi: Rashi::from_longitude(solar_longitude),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 8).unwrap()
    }

    #[test]
    fn test_tithi_rule_purnimant_and_amant() {
        let diwali = FestivalRule::Tithi {
            month: HinduMonth::Kartik,
            paksha: Paksha::Krishna,
            tithi: 15,
        };
        // Purnimant names the dark half after the coming month
        assert!(diwali.matches(date(), &hindu(HinduMonth::Kartik, 30, false, 200.0), Tradition::NorthIndian));
        // Amant calls the same day Ashwin Amavasya
        assert!(diwali.matches(date(), &hindu(HinduMonth::Ashwin, 30, false, 200.0), Tradition::Gujarati));
        // and does not fire again a month later
        assert!(!diwali.matches(date(), &hindu(HinduMonth::Kartik, 30, false, 230.0), Tradition::Gujarati));
        // nor in an adhik month
        assert!(!diwali.matches(date(), &hindu(HinduMonth::Kartik, 30, true, 200.0), Tradition::NorthIndian));
    }

    #[test]
    fn test_tithi_rule_accepts_month_wide_numbering() {
        let rule = FestivalRule::Tithi {
            month: HinduMonth::Phalguna,
            paksha: Paksha::Krishna,
            tithi: 29,
        };
        assert!(rule.matches(date(), &hindu(HinduMonth::Phalguna, 29, false, 300.0), Tradition::NorthIndian));
        assert!(!rule.matches(date(), &hindu(HinduMonth::Phalguna, 14, false, 300.0), Tradition::NorthIndian));
    }

    #[test]
    fn test_tithi_offset_rule() {
        // Karva Chauth: fourth day after Ashwin Purnima
        let rule = FestivalRule::TithiOffset {
            month: HinduMonth::Ashwin,
            days_after_purnima: 4,
        };
        assert!(rule.matches(date(), &hindu(HinduMonth::Kartik, 19, false, 180.0), Tradition::NorthIndian));
        assert!(rule.matches(date(), &hindu(HinduMonth::Ashwin, 19, false, 180.0), Tradition::Marathi));
        assert!(!rule.matches(date(), &hindu(HinduMonth::Kartik, 19, false, 180.0), Tradition::Marathi));
        assert!(!rule.matches(date(), &hindu(HinduMonth::Kartik, 18, false, 180.0), Tradition::NorthIndian));
    }

    #[test]
    fn test_solar_rule_window() {
        let makar = FestivalRule::Solar {
            rashi: Some(Rashi::Makara),
        };
        assert!(makar.matches(date(), &hindu(HinduMonth::Pausha, 26, false, 270.4), Tradition::Tamil));
        assert!(!makar.matches(date(), &hindu(HinduMonth::Pausha, 26, false, 271.2), Tradition::Tamil));
        assert!(!makar.matches(date(), &hindu(HinduMonth::Pausha, 26, false, 269.9), Tradition::Tamil));

        let any = FestivalRule::Solar { rashi: None };
        assert!(any.matches(date(), &hindu(HinduMonth::Pausha, 26, false, 0.5), Tradition::Tamil));
        assert!(!any.matches(date(), &hindu(HinduMonth::Pausha, 26, false, 15.0), Tradition::Tamil));
    }

    #[test]
    fn test_fixed_solar_rule() {
        let rule = FestivalRule::FixedSolar { month: 11, day: 8 };
        assert!(rule.matches(date(), &hindu(HinduMonth::Kartik, 30, false, 200.0), Tradition::Bengali));
        let other = NaiveDate::from_ymd_opt(2026, 11, 9).unwrap();
        assert!(!rule.matches(other, &hindu(HinduMonth::Kartik, 30, false, 200.0), Tradition::Bengali));
    }

    #[test]
    fn test_rule_json_tags() {
        let rule: FestivalRule = serde_json::from_str(
            r#"{"type": "tithi_offset", "month": "Ashwin", "days_after_purnima": 4}"#,
        )
        .unwrap();
        assert_eq!(
            rule,
            FestivalRule::TithiOffset {
                month: HinduMonth::Ashwin,
                days_after_purnima: 4
            }
        );

        let solar: FestivalRule = serde_json::from_str(r#"{"type": "solar"}"#).unwrap();
        assert_eq!(solar, FestivalRule::Solar { rashi: None });

        assert!(serde_json::from_str::<FestivalRule>(r#"{"type": "lunar_eclipse"}"#).is_err());
    }
}
