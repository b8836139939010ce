//! Truncated lunar theory
//!
//! The 24 largest longitude terms and 14 largest latitude terms of the ELP-2000
//! based series in Meeus, *Astronomical Algorithms*, ch. 47. Terms involving
//! the solar anomaly M are scaled by the eccentricity factor E (E² when |M| = 2).
//! Longitude accuracy is a few arcminutes, which is what tithi and nakshatra
//! boundaries need.

use crate::astronomy::sun::{mean_obliquity, nutation_in_longitude, solar_mean_anomaly};
use crate::coordinates::angle::sin_deg;
use crate::coordinates::{ecliptic_to_equatorial, normalize_degrees, Equatorial};
use crate::time::julian_centuries;

/// One periodic term: multipliers of D, M, M′, F and the coefficient in 1e-6 degrees
struct Term {
    d: i8,
    m: i8,
    mp: i8,
    f: i8,
    coeff: f64,
}

const fn term(d: i8, m: i8, mp: i8, f: i8, coeff: f64) -> Term {
    Term { d, m, mp, f, coeff }
}

#[rustfmt::skip]
const LONGITUDE_TERMS: [Term; 24] = [
    term(0, 0, 1, 0, 6_288_774.0),
    term(2, 0, -1, 0, 1_274_027.0),
    term(2, 0, 0, 0, 658_314.0),
    term(0, 0, 2, 0, 213_618.0),
    term(0, 1, 0, 0, -185_116.0),
    term(0, 0, 0, 2, -114_332.0),
    term(2, 0, -2, 0, 58_793.0),
    term(2, -1, -1, 0, 57_066.0),
    term(2, 0, 1, 0, 53_322.0),
    term(2, -1, 0, 0, 45_758.0),
    term(0, 1, -1, 0, -40_923.0),
    term(1, 0, 0, 0, -34_720.0),
    term(0, 1, 1, 0, -30_383.0),
    term(2, 0, 0, -2, 15_327.0),
    term(0, 0, 1, 2, -12_528.0),
    term(0, 0, 1, -2, 10_980.0),
    term(4, 0, -1, 0, 10_675.0),
    term(0, 0, 3, 0, 10_034.0),
    term(4, 0, -2, 0, 8_548.0),
    term(2, 1, -1, 0, -7_888.0),
    term(2, 1, 0, 0, -6_766.0),
    term(1, 0, -1, 0, -5_163.0),
    term(1, 1, 0, 0, 4_987.0),
    term(2, -1, 1, 0, 4_036.0),
];

#[rustfmt::skip]
const LATITUDE_TERMS: [Term; 14] = [
    term(0, 0, 0, 1, 5_128_122.0),
    term(0, 0, 1, 1, 280_602.0),
    term(0, 0, 1, -1, 277_693.0),
    term(2, 0, 0, -1, 173_237.0),
    term(2, 0, -1, 1, 55_413.0),
    term(2, 0, -1, -1, 46_271.0),
    term(2, 0, 0, 1, 32_573.0),
    term(0, 0, 2, 1, 17_198.0),
    term(2, 0, 1, -1, 9_266.0),
    term(0, 0, 2, -1, 8_822.0),
    term(2, -1, 0, -1, 8_216.0),
    term(2, 0, -2, -1, 4_324.0),
    term(2, 0, 1, 1, 4_200.0),
    term(2, 1, 0, -1, -3_359.0),
];

/// Fundamental arguments of the lunar theory, degrees
#[derive(Debug, Clone, Copy)]
struct LunarArguments {
    /// Mean longitude L′
    mean_longitude: f64,
    /// Mean elongation D
    elongation: f64,
    /// Solar mean anomaly M
    solar_anomaly: f64,
    /// Lunar mean anomaly M′
    lunar_anomaly: f64,
    /// Argument of latitude F
    latitude_argument: f64,
    /// Eccentricity factor E
    eccentricity: f64,
}

impl LunarArguments {
    fn at(jd_tt: f64) -> Self {
        let t = julian_centuries(jd_tt);
        let t2 = t * t;

        Self {
            mean_longitude: 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2,
            elongation: 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2,
            solar_anomaly: solar_mean_anomaly(t),
            lunar_anomaly: 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2,
            latitude_argument: 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2,
            eccentricity: 1.0 - 0.002_516 * t - 0.000_007_4 * t2,
        }
    }

    /// Sum a series, scaling each term by E^|m|
    fn sum(&self, terms: &[Term]) -> f64 {
        terms
            .iter()
            .map(|t| {
                let arg = t.d as f64 * self.elongation
                    + t.m as f64 * self.solar_anomaly
                    + t.mp as f64 * self.lunar_anomaly
                    + t.f as f64 * self.latitude_argument;
                let e_factor = match t.m.abs() {
                    0 => 1.0,
                    1 => self.eccentricity,
                    _ => self.eccentricity * self.eccentricity,
                };
                t.coeff * e_factor * sin_deg(arg)
            })
            .sum::<f64>()
            * 1e-6
    }
}

/// Apparent tropical longitude of the Moon in degrees, `[0, 360)`
pub fn moon_tropical_longitude(jd_tt: f64) -> f64 {
    let args = LunarArguments::at(jd_tt);
    normalize_degrees(
        args.mean_longitude + args.sum(&LONGITUDE_TERMS) + nutation_in_longitude(jd_tt),
    )
}

/// Geocentric ecliptic latitude of the Moon in degrees
pub fn moon_latitude(jd_tt: f64) -> f64 {
    LunarArguments::at(jd_tt).sum(&LATITUDE_TERMS)
}

/// Geocentric right ascension and declination of the Moon
pub fn moon_equatorial(jd_tt: f64) -> Equatorial {
    ecliptic_to_equatorial(
        moon_tropical_longitude(jd_tt),
        moon_latitude(jd_tt),
        mean_obliquity(jd_tt),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_meeus_example_47a() {
        // 1992 April 12, 0h TD
        let jd = 2_448_724.5;
        assert_relative_eq!(moon_tropical_longitude(jd), 133.167, epsilon = 0.1);
        assert_relative_eq!(moon_latitude(jd), -3.229, epsilon = 0.05);
    }

    #[test]
    fn test_daily_motion() {
        let jd = 2_461_000.5;
        let mut total = 0.0;
        for i in 0..30 {
            let a = moon_tropical_longitude(jd + i as f64);
            let b = moon_tropical_longitude(jd + i as f64 + 1.0);
            let step = normalize_degrees(b - a);
            assert!(step > 11.0 && step < 16.0, "daily motion {}", step);
            total += step;
        }
        assert_relative_eq!(total / 30.0, 13.18, epsilon = 0.3);
    }

    #[test]
    fn test_latitude_bounded_by_inclination() {
        let mut jd = 2_461_000.5;
        for _ in 0..60 {
            assert!(moon_latitude(jd).abs() < 5.4);
            jd += 0.5;
        }
    }
}
