//! Monthly observances generated independently of rule data

use chrono::NaiveDate;
use lazy_static::lazy_static;

use super::{Festival, FestivalCategory, FestivalOccurrence, FestivalRule};
use crate::panchang::HinduDate;

/// (id, English name, tithi number, matched on the evening date)
const OBSERVANCES: [(&str, &str, u8, bool); 6] = [
    ("shukla_ekadashi", "Shukla Ekadashi", 11, false),
    ("krishna_ekadashi", "Krishna Ekadashi", 26, false),
    ("purnima", "Purnima", 15, false),
    ("amavasya", "Amavasya", 30, false),
    ("shukla_pradosh", "Shukla Pradosh", 13, true),
    ("krishna_pradosh", "Krishna Pradosh", 28, true),
];

lazy_static! {
    static ref RECURRING: Vec<(Festival, bool)> = OBSERVANCES
        .iter()
        .map(|&(id, name, tithi, evening)| {
            let festival = Festival::new(id, name, FestivalRule::MonthlyTithi { tithi })
                .with_category(FestivalCategory::Vrat)
                .recurring();
            (festival, evening)
        })
        .collect();
}

/// Ids of the generic Ekadashi entries that named Ekadashis replace
pub const GENERIC_EKADASHI_IDS: [&str; 2] = ["shukla_ekadashi", "krishna_ekadashi"];

/// Ekadashi, Purnima, Amavasya and Pradosh falling on `date`
///
/// Pradosh is observed at dusk and so is read from `evening`. The others
/// are read at sunrise, or from `kshaya` when their tithi is skipped.
pub fn recurring_observances(
    date: NaiveDate,
    sunrise: &HinduDate,
    evening: &HinduDate,
    kshaya: Option<&HinduDate>,
) -> Vec<FestivalOccurrence> {
    RECURRING
        .iter()
        .filter(|(festival, at_evening)| {
            let FestivalRule::MonthlyTithi { tithi } = festival.rule else {
                return false;
            };
            if *at_evening {
                return evening.tithi.number == tithi;
            }
            sunrise.tithi.number == tithi || kshaya.is_some_and(|k| k.tithi.number == tithi)
        })
        .map(|(festival, _)| FestivalOccurrence::new(festival.clone(), date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panchang::{EraYears, HinduMonth, Rashi, Tithi};

    fn hindu(tithi: u8) -> HinduDate {
        let tithi = Tithi::from_number(tithi).unwrap();
        HinduDate {
            month: HinduMonth::Magha,
            adhik_maas: false,
            paksha: tithi.paksha,
            tithi,
            era: EraYears {
                vikram_samvat: 2082,
                shaka: 1947,
                kali: 5126,
            },
            solar_longitude: 290.0,
            solar_rashi: Rashi::Makara,
        }
    }

    fn ids(occurrences: &[FestivalOccurrence]) -> Vec<&str> {
        occurrences.iter().map(|o| o.id()).collect()
    }

    #[test]
    fn test_ekadashi_and_full_moon() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();
        assert_eq!(ids(&recurring_observances(date, &hindu(11), &hindu(11), None)), ["shukla_ekadashi"]);
        assert_eq!(ids(&recurring_observances(date, &hindu(15), &hindu(16), None)), ["purnima"]);
        assert_eq!(ids(&recurring_observances(date, &hindu(30), &hindu(1), None)), ["amavasya"]);
        assert!(recurring_observances(date, &hindu(5), &hindu(5), None).is_empty());
    }

    #[test]
    fn test_pradosh_uses_evening() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 30).unwrap();
        // Dwadashi at sunrise, Trayodashi by dusk
        assert_eq!(ids(&recurring_observances(date, &hindu(12), &hindu(13), None)), ["shukla_pradosh"]);
        // Trayodashi only at sunrise does not count
        assert!(recurring_observances(date, &hindu(28), &hindu(29), None).is_empty());
    }

    #[test]
    fn test_skipped_tithi_still_observed() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();
        // Ekadashi begins after sunrise on Dashami and is over by the next sunrise
        let found = recurring_observances(date, &hindu(10), &hindu(11), Some(&hindu(11)));
        assert_eq!(ids(&found), ["shukla_ekadashi"]);
    }

    #[test]
    fn test_occurrences_are_flagged_recurring() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 29).unwrap();
        for occurrence in recurring_observances(date, &hindu(26), &hindu(26), None) {
            assert!(occurrence.festival.recurring);
            assert_eq!(occurrence.festival.category, FestivalCategory::Vrat);
        }
    }
}
