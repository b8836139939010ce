//! Tithi, nakshatra, yoga and karana at an instant, and when each one ends

use log::debug;

use super::{Karana, Nakshatra, PanchangCalculator, Tithi, Transition, Yoga};
use crate::constants::{
    ELONGATION_RATE_DEG_PER_DAY, KARANA_SEGMENT_DEG, MOON_RATE_DEG_PER_DAY,
    NAKSHATRA_SEGMENT_DEG, SUN_RATE_DEG_PER_DAY, TITHI_SEGMENT_DEG, YOGA_SEGMENT_DEG,
};
use crate::coordinates::{normalize_degrees, normalize_pm180};

/// Iteration budget for every transition search
pub const MAX_TRANSITION_ITERATIONS: usize = 50;

/// Angular distance to the target below which a transition counts as found
pub const TRANSITION_TOLERANCE_DEG: f64 = 0.001;

/// Mean rate of the summed sidereal longitudes of Sun and Moon
const YOGA_RATE_DEG_PER_DAY: f64 = MOON_RATE_DEG_PER_DAY + SUN_RATE_DEG_PER_DAY;

/// 0-based segment of `[0, 360)` that `angle` falls in, clamped to `count - 1`
fn segment_index(angle: f64, width: f64, count: u8) -> u8 {
    let idx = (normalize_degrees(angle) / width).floor() as u8;
    idx.min(count - 1)
}

/// Secant-style fixed-point search for the instant `value(jd)` reaches `target`
///
/// Each step divides the signed angular error by the mean rate. The nearest
/// crossing to `jd_start` is found, so callers start on the correct side.
pub(crate) fn solve_crossing<F>(value: F, jd_start: f64, target: f64, rate: f64) -> Transition
where
    F: Fn(f64) -> f64,
{
    let mut jd = jd_start;
    for _ in 0..MAX_TRANSITION_ITERATIONS {
        let diff = normalize_pm180(target - value(jd));
        if diff.abs() < TRANSITION_TOLERANCE_DEG {
            return Transition {
                jd_tt: jd,
                converged: true,
            };
        }
        jd += diff / rate;
    }

    debug!(
        "crossing of {:.3}° not found within {} iterations (jd {:.5})",
        target, MAX_TRANSITION_ITERATIONS, jd
    );
    Transition {
        jd_tt: jd,
        converged: false,
    }
}

impl PanchangCalculator {
    pub fn calculate_tithi(&self, jd_tt: f64) -> Tithi {
        let elongation = self.astronomy.elongation(jd_tt);
        let number = segment_index(elongation, TITHI_SEGMENT_DEG, 30) + 1;
        Tithi::from_number(number).unwrap_or(Tithi {
            number: 1,
            paksha: super::Paksha::Shukla,
            name: super::names::TITHI_NAMES[0],
        })
    }

    /// End of tithi `tithi_number`, searching forward from `jd_start`
    pub fn find_tithi_transition(&self, jd_start: f64, tithi_number: u8) -> Transition {
        let target = normalize_degrees(f64::from(tithi_number) * TITHI_SEGMENT_DEG);
        solve_crossing(
            |jd| self.astronomy.elongation(jd),
            jd_start,
            target,
            ELONGATION_RATE_DEG_PER_DAY,
        )
    }

    pub fn calculate_nakshatra(&self, jd_tt: f64) -> Nakshatra {
        let moon = self.astronomy.sidereal_moon_longitude(jd_tt);
        let index = segment_index(moon, NAKSHATRA_SEGMENT_DEG, 27) + 1;
        Nakshatra {
            index,
            name: super::names::NAKSHATRA_NAMES[(index - 1) as usize],
        }
    }

    /// End of nakshatra `index` (1-27), searching forward from `jd_start`
    pub fn find_nakshatra_transition(&self, jd_start: f64, index: u8) -> Transition {
        let target = normalize_degrees(f64::from(index) * NAKSHATRA_SEGMENT_DEG);
        solve_crossing(
            |jd| self.astronomy.sidereal_moon_longitude(jd),
            jd_start,
            target,
            MOON_RATE_DEG_PER_DAY,
        )
    }

    fn yoga_longitude(&self, jd_tt: f64) -> f64 {
        normalize_degrees(
            self.astronomy.sidereal_sun_longitude(jd_tt)
                + self.astronomy.sidereal_moon_longitude(jd_tt),
        )
    }

    pub fn calculate_yoga(&self, jd_tt: f64) -> Yoga {
        let index = segment_index(self.yoga_longitude(jd_tt), YOGA_SEGMENT_DEG, 27) + 1;
        Yoga {
            index,
            name: super::names::YOGA_NAMES[(index - 1) as usize],
        }
    }

    pub fn find_yoga_transition(&self, jd_start: f64, index: u8) -> Transition {
        let target = normalize_degrees(f64::from(index) * YOGA_SEGMENT_DEG);
        solve_crossing(
            |jd| self.yoga_longitude(jd),
            jd_start,
            target,
            YOGA_RATE_DEG_PER_DAY,
        )
    }

    pub fn calculate_karana(&self, jd_tt: f64) -> Karana {
        let elongation = self.astronomy.elongation(jd_tt);
        let tithi = segment_index(elongation, TITHI_SEGMENT_DEG, 30) + 1;
        let second_half = normalize_degrees(elongation) % TITHI_SEGMENT_DEG >= KARANA_SEGMENT_DEG;
        Karana::from_tithi_half(tithi, second_half).unwrap_or(Karana {
            index: 1,
            name: super::names::KIMSTUGHNA,
        })
    }

    /// End of karana `index` (1-60), searching forward from `jd_start`
    pub fn find_karana_transition(&self, jd_start: f64, index: u8) -> Transition {
        let target = normalize_degrees(f64::from(index) * KARANA_SEGMENT_DEG);
        solve_crossing(
            |jd| self.astronomy.elongation(jd),
            jd_start,
            target,
            ELONGATION_RATE_DEG_PER_DAY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panchang::Paksha;
    use crate::time::date_to_jd;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tithi_advances_slowly() {
        let calc = PanchangCalculator::default();
        let mut jd = date_to_jd(2026, 1, 1, 1.5);
        let mut previous = calc.calculate_tithi(jd).number;
        for _ in 0..400 {
            jd += 1.0;
            let current = calc.calculate_tithi(jd).number;
            let step = (i32::from(current) - i32::from(previous)).rem_euclid(30);
            assert!(step <= 2, "tithi jumped from {} to {}", previous, current);
            previous = current;
        }
    }

    #[test]
    fn test_tithi_paksha_consistent() {
        let calc = PanchangCalculator::default();
        let mut jd = date_to_jd(2026, 3, 1, 0.0);
        for _ in 0..60 {
            let tithi = calc.calculate_tithi(jd);
            assert!((1..=30).contains(&tithi.number));
            let expected = if tithi.number <= 15 {
                Paksha::Shukla
            } else {
                Paksha::Krishna
            };
            assert_eq!(tithi.paksha, expected);
            jd += 0.5;
        }
    }

    #[test]
    fn test_tithi_transition_lands_on_boundary() {
        let calc = PanchangCalculator::default();
        let start = date_to_jd(2026, 2, 16, 1.5);
        let tithi = calc.calculate_tithi(start);
        let end = calc.find_tithi_transition(start, tithi.number);

        assert!(end.converged);
        assert!(end.jd_tt > start);
        assert!(end.jd_tt - start < 1.3);

        let target = normalize_degrees(f64::from(tithi.number) * TITHI_SEGMENT_DEG);
        let e = calc.astronomy().elongation(end.jd_tt);
        assert_abs_diff_eq!(normalize_pm180(e - target), 0.0, epsilon = TRANSITION_TOLERANCE_DEG);

        // Just past the boundary the next tithi is in force
        let next = calc.calculate_tithi(end.jd_tt + 0.01);
        assert_eq!(next.number, tithi.number % 30 + 1);
    }

    #[test]
    fn test_nakshatra_transition() {
        let calc = PanchangCalculator::default();
        let start = date_to_jd(2026, 5, 10, 0.0);
        let nakshatra = calc.calculate_nakshatra(start);
        let end = calc.find_nakshatra_transition(start, nakshatra.index);

        assert!(end.converged);
        assert!(end.jd_tt > start && end.jd_tt - start < 1.3);
        assert_eq!(
            calc.calculate_nakshatra(end.jd_tt + 0.01).index,
            nakshatra.index % 27 + 1
        );
    }

    #[test]
    fn test_yoga_and_karana_ranges() {
        let calc = PanchangCalculator::default();
        let mut jd = date_to_jd(2026, 7, 1, 0.0);
        for _ in 0..45 {
            let yoga = calc.calculate_yoga(jd);
            assert!((1..=27).contains(&yoga.index));
            let karana = calc.calculate_karana(jd);
            assert!((1..=60).contains(&karana.index));

            // Karana index tracks the tithi: two per tithi
            let tithi = calc.calculate_tithi(jd);
            assert_eq!((karana.index + 1) / 2, tithi.number);
            jd += 0.7;
        }
    }

    #[test]
    fn test_yoga_and_karana_transitions() {
        let calc = PanchangCalculator::default();
        let start = date_to_jd(2026, 9, 3, 6.0);

        let yoga = calc.calculate_yoga(start);
        let yoga_end = calc.find_yoga_transition(start, yoga.index);
        assert!(yoga_end.converged);
        assert!(yoga_end.jd_tt > start && yoga_end.jd_tt - start < 1.2);

        let karana = calc.calculate_karana(start);
        let karana_end = calc.find_karana_transition(start, karana.index);
        assert!(karana_end.converged);
        assert!(karana_end.jd_tt > start && karana_end.jd_tt - start < 0.7);
    }

    #[test]
    fn test_solver_reports_non_convergence() {
        // A quantity that never moves cannot reach its target
        let t = solve_crossing(|_| 10.0, 2_461_000.0, 20.0, 12.0);
        assert!(!t.converged);
    }
}
