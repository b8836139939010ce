//! Lunar month and era-year resolution
//!
//! Months are named from the sidereal sign of the Sun at the new moon that
//! opens the lunation (Amant reckoning). A lunation without a Sankranti, with
//! the Sun in the same sign at both bounding new moons, is adhik (intercalary).
//! Purnimant traditions start each month a fortnight earlier, so their Krishna
//! paksha carries the name of the following Amant month.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::elements::solve_crossing;
use super::{HinduDate, HinduMonth, LunarMonth, Paksha, PanchangCalculator, Rashi, Transition};
use crate::constants::ELONGATION_RATE_DEG_PER_DAY;
use crate::tradition::{MonthSystem, Tradition};

/// Vikram Samvat minus the Gregorian year after the lunar new year
const VIKRAM_OFFSET: i32 = 57;

/// Shaka minus the Gregorian year after the lunar new year
const SHAKA_OFFSET: i32 = -78;

/// Kali Yuga year minus the Gregorian year after the lunar new year
const KALI_OFFSET: i32 = 3101;

/// Era years of a Hindu date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EraYears {
    pub vikram_samvat: i32,
    pub shaka: i32,
    pub kali: i32,
}

impl EraYears {
    pub fn new(date: NaiveDate, month: HinduMonth, paksha: Paksha, system: MonthSystem) -> Self {
        EraYears {
            vikram_samvat: vikram_samvat_year(date, month, paksha, system),
            shaka: shaka_year(date, month, paksha, system),
            kali: kali_year(date, month, paksha, system),
        }
    }
}

/// Whether a date in the early Gregorian year still precedes Chaitra Shukla
/// Pratipada, the start of the lunar year
fn before_lunar_new_year(
    date: NaiveDate,
    month: HinduMonth,
    paksha: Paksha,
    system: MonthSystem,
) -> bool {
    if date.month() > 6 {
        return false;
    }
    match month {
        HinduMonth::Margashirsha | HinduMonth::Pausha | HinduMonth::Magha | HinduMonth::Phalguna => {
            true
        }
        HinduMonth::Chaitra => system == MonthSystem::Purnimant && paksha == Paksha::Krishna,
        _ => false,
    }
}

fn era_year(offset: i32, date: NaiveDate, month: HinduMonth, paksha: Paksha, system: MonthSystem) -> i32 {
    if before_lunar_new_year(date, month, paksha, system) {
        date.year() + offset - 1
    } else {
        date.year() + offset
    }
}

pub fn vikram_samvat_year(
    date: NaiveDate,
    month: HinduMonth,
    paksha: Paksha,
    system: MonthSystem,
) -> i32 {
    era_year(VIKRAM_OFFSET, date, month, paksha, system)
}

pub fn shaka_year(date: NaiveDate, month: HinduMonth, paksha: Paksha, system: MonthSystem) -> i32 {
    era_year(SHAKA_OFFSET, date, month, paksha, system)
}

pub fn kali_year(date: NaiveDate, month: HinduMonth, paksha: Paksha, system: MonthSystem) -> i32 {
    era_year(KALI_OFFSET, date, month, paksha, system)
}

impl PanchangCalculator {
    /// Most recent new moon at or before `jd_tt`
    pub fn find_new_moon_before(&self, jd_tt: f64) -> Transition {
        let elongation = self.astronomy.elongation(jd_tt);
        let guess = jd_tt - elongation / ELONGATION_RATE_DEG_PER_DAY;
        solve_crossing(
            |jd| self.astronomy.elongation(jd),
            guess,
            0.0,
            ELONGATION_RATE_DEG_PER_DAY,
        )
    }

    /// First new moon after `jd_tt`
    pub fn find_new_moon_after(&self, jd_tt: f64) -> Transition {
        let elongation = self.astronomy.elongation(jd_tt);
        let guess = jd_tt + (360.0 - elongation) / ELONGATION_RATE_DEG_PER_DAY;
        solve_crossing(
            |jd| self.astronomy.elongation(jd),
            guess,
            0.0,
            ELONGATION_RATE_DEG_PER_DAY,
        )
    }

    /// Lunar month in force at `jd_tt` under `tradition`'s month system
    pub fn calculate_hindu_month(&self, jd_tt: f64, tradition: Tradition) -> LunarMonth {
        let opening = self.find_new_moon_before(jd_tt).jd_tt;
        let closing = self.find_new_moon_after(jd_tt).jd_tt;

        let opening_rashi = Rashi::from_longitude(self.astronomy.sidereal_sun_longitude(opening));
        let closing_rashi = Rashi::from_longitude(self.astronomy.sidereal_sun_longitude(closing));

        let amant = HinduMonth::from_new_moon_rashi(opening_rashi);
        let adhik = opening_rashi == closing_rashi;

        let month = match tradition.month_system() {
            MonthSystem::Amant => amant,
            // The adhik lunation keeps its own name for both halves
            MonthSystem::Purnimant if adhik => amant,
            MonthSystem::Purnimant => match self.calculate_tithi(jd_tt).paksha {
                Paksha::Krishna => amant.next(),
                Paksha::Shukla => amant,
            },
        };

        LunarMonth { month, adhik }
    }

    /// Full Hindu date at `jd_tt` for the civil `date` it belongs to
    /// The Hindu date of a tithi that begins after one sunrise and ends
    /// before the next, if there is one
    ///
    /// Such a kshaya tithi is never in force at sunrise. The date is taken
    /// midway through the skipped tithi.
    pub fn kshaya_tithi(
        &self,
        sunrise_tt: f64,
        next_sunrise_tt: f64,
        date: NaiveDate,
        tradition: Tradition,
    ) -> Option<HinduDate> {
        let current = self.calculate_tithi(sunrise_tt).number;
        let next = self.calculate_tithi(next_sunrise_tt).number;
        if (next + 30 - current) % 30 != 2 {
            return None;
        }

        let skipped = current % 30 + 1;
        let begins = self.find_tithi_transition(sunrise_tt, current);
        let ends = self.find_tithi_transition(begins.jd_tt, skipped);
        if !(begins.converged && ends.converged) {
            return None;
        }

        let hindu = self.hindu_date((begins.jd_tt + ends.jd_tt) / 2.0, date, tradition);
        (hindu.tithi.number == skipped).then_some(hindu)
    }

    pub fn hindu_date(&self, jd_tt: f64, date: NaiveDate, tradition: Tradition) -> HinduDate {
        let tithi = self.calculate_tithi(jd_tt);
        let lunar_month = self.calculate_hindu_month(jd_tt, tradition);
        let solar_longitude = self.astronomy.sidereal_sun_longitude(jd_tt);

        HinduDate {
            month: lunar_month.month,
            adhik_maas: lunar_month.adhik,
            paksha: tithi.paksha,
            tithi,
            era: EraYears::new(
                date,
                lunar_month.month,
                tithi.paksha,
                tradition.month_system(),
            ),
            solar_longitude,
            solar_rashi: Rashi::from_longitude(solar_longitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{date_to_jd, ut_to_tt};
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_new_moons_bracket_instant() {
        let calc = PanchangCalculator::default();
        let jd = ut_to_tt(date_to_jd(2026, 2, 16, 1.5));
        let before = calc.find_new_moon_before(jd);
        let after = calc.find_new_moon_after(jd);

        assert!(before.converged && after.converged);
        assert!(before.jd_tt <= jd && jd < after.jd_tt);
        let lunation = after.jd_tt - before.jd_tt;
        assert!((29.2..29.9).contains(&lunation), "lunation of {} days", lunation);

        // New moon of 2026-02-17 ~12:01 UT
        let expected = date_to_jd(2026, 2, 17, 12.0);
        assert!((after.jd_tt - expected).abs() < 0.1);
    }

    #[rstest]
    #[case(2026, 2, 16, Tradition::NorthIndian, HinduMonth::Phalguna)]
    #[case(2026, 2, 16, Tradition::Gujarati, HinduMonth::Magha)]
    #[case(2026, 11, 9, Tradition::NorthIndian, HinduMonth::Kartik)]
    #[case(2026, 11, 9, Tradition::Marathi, HinduMonth::Ashwin)]
    #[case(2026, 8, 28, Tradition::NorthIndian, HinduMonth::Shravana)]
    #[case(2026, 8, 28, Tradition::Tamil, HinduMonth::Shravana)]
    fn test_month_by_tradition(
        #[case] y: i32,
        #[case] m: u32,
        #[case] d: u32,
        #[case] tradition: Tradition,
        #[case] expected: HinduMonth,
    ) {
        let calc = PanchangCalculator::default();
        // Around sunrise in Delhi
        let jd = ut_to_tt(date_to_jd(y, m, d, 1.5));
        assert_eq!(calc.calculate_hindu_month(jd, tradition).month, expected);
    }

    #[test]
    fn test_adhik_lunations_are_rare_and_isolated() {
        let calc = PanchangCalculator::default();
        let mut new_moon = calc.find_new_moon_after(ut_to_tt(date_to_jd(2020, 1, 1, 0.0))).jd_tt;
        let mut adhik = Vec::new();
        let mut previous_adhik = false;

        // About 124 lunations to the end of 2029
        while new_moon < date_to_jd(2030, 1, 1, 0.0) {
            let month = calc.calculate_hindu_month(new_moon + 15.0, Tradition::Marathi);
            assert!(!(previous_adhik && month.adhik), "consecutive adhik months");
            if month.adhik {
                adhik.push(month.month);
            }
            previous_adhik = month.adhik;
            new_moon = calc.find_new_moon_after(new_moon + 1.0).jd_tt;
        }

        // One intercalary month every 32-33 months
        assert!((3..=5).contains(&adhik.len()), "adhik months: {:?}", adhik);
    }

    #[rstest]
    #[case(ymd(2026, 2, 16), HinduMonth::Phalguna, Paksha::Krishna, MonthSystem::Purnimant, 2082)]
    #[case(ymd(2026, 1, 5), HinduMonth::Margashirsha, Paksha::Shukla, MonthSystem::Amant, 2082)]
    #[case(ymd(2026, 3, 25), HinduMonth::Chaitra, Paksha::Shukla, MonthSystem::Purnimant, 2083)]
    #[case(ymd(2026, 3, 10), HinduMonth::Chaitra, Paksha::Krishna, MonthSystem::Purnimant, 2082)]
    #[case(ymd(2026, 3, 10), HinduMonth::Phalguna, Paksha::Krishna, MonthSystem::Amant, 2082)]
    #[case(ymd(2026, 11, 9), HinduMonth::Kartik, Paksha::Krishna, MonthSystem::Purnimant, 2083)]
    #[case(ymd(2026, 12, 28), HinduMonth::Pausha, Paksha::Shukla, MonthSystem::Amant, 2083)]
    fn test_vikram_samvat(
        #[case] date: NaiveDate,
        #[case] month: HinduMonth,
        #[case] paksha: Paksha,
        #[case] system: MonthSystem,
        #[case] expected: i32,
    ) {
        assert_eq!(vikram_samvat_year(date, month, paksha, system), expected);
    }

    #[test]
    fn test_era_offsets_agree() {
        let date = ymd(2026, 2, 16);
        let era = EraYears::new(date, HinduMonth::Phalguna, Paksha::Krishna, MonthSystem::Purnimant);
        assert_eq!(era.vikram_samvat, 2082);
        assert_eq!(era.shaka, 1947);
        assert_eq!(era.kali, 5126);
        assert_eq!(era.vikram_samvat - era.shaka, 135);
    }

    #[test]
    fn test_hindu_date_golden() {
        let calc = PanchangCalculator::default();
        let jd = ut_to_tt(date_to_jd(2026, 2, 16, 1.5));
        let date = calc.hindu_date(jd, ymd(2026, 2, 16), Tradition::NorthIndian);
        assert_eq!(date.month, HinduMonth::Phalguna);
        assert_eq!(date.paksha, Paksha::Krishna);
        assert_eq!(date.tithi.name, "Chaturdashi");
        assert!(!date.adhik_maas);
        assert_eq!(date.solar_rashi, Rashi::Kumbha);
        assert_eq!(date.era.vikram_samvat, 2082);
    }

    fn delhi_sunrise_tt(date: NaiveDate) -> f64 {
        let jd0 = date_to_jd(date.year(), date.month(), date.day(), 0.0);
        ut_to_tt(crate::astronomy::sunrise(jd0, 28.6139, 77.2090).jd().unwrap())
    }

    #[test]
    fn test_kshaya_pratipada_2026() {
        // Amavasya at sunrise on Mar 19, Dwitiya by sunrise on Mar 20
        let calc = PanchangCalculator::default();
        let date = ymd(2026, 3, 19);
        let today = delhi_sunrise_tt(date);
        let tomorrow = delhi_sunrise_tt(ymd(2026, 3, 20));
        assert_eq!(calc.calculate_tithi(today).number, 30);
        assert_eq!(calc.calculate_tithi(tomorrow).number, 2);

        let skipped = calc.kshaya_tithi(today, tomorrow, date, Tradition::Marathi).unwrap();
        assert_eq!(skipped.tithi.number, 1);
        assert_eq!(skipped.paksha, Paksha::Shukla);
        assert_eq!(skipped.month, HinduMonth::Chaitra);
    }

    #[test]
    fn test_no_kshaya_on_ordinary_day() {
        let calc = PanchangCalculator::default();
        let today = delhi_sunrise_tt(ymd(2026, 2, 16));
        let tomorrow = delhi_sunrise_tt(ymd(2026, 2, 17));
        assert!(calc.kshaya_tithi(today, tomorrow, ymd(2026, 2, 16), Tradition::NorthIndian).is_none());
    }
}
