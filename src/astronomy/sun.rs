//! Low-precision solar position
//!
//! Meeus, *Astronomical Algorithms*, ch. 25: geometric mean longitude plus a
//! three-harmonic equation of centre, corrected for nutation and aberration.
//! Accurate to roughly 0.01° over several centuries around J2000.

use crate::coordinates::angle::sin_deg;
use crate::coordinates::{ecliptic_to_equatorial, normalize_degrees, Equatorial};
use crate::time::julian_centuries;

/// Longitude of the Moon's ascending node, degrees
pub(crate) fn lunar_node_longitude(t: f64) -> f64 {
    125.04 - 1934.136 * t
}

/// Nutation in longitude (Δψ) in degrees, leading term only
pub fn nutation_in_longitude(jd_tt: f64) -> f64 {
    -0.00478 * sin_deg(lunar_node_longitude(julian_centuries(jd_tt)))
}

/// Mean obliquity of the ecliptic in degrees, linear in centuries since J2000
pub fn mean_obliquity(jd_tt: f64) -> f64 {
    23.439_291 - 0.013_004_2 * julian_centuries(jd_tt)
}

/// Mean anomaly of the Sun in degrees
pub(crate) fn solar_mean_anomaly(t: f64) -> f64 {
    357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t
}

/// Apparent tropical longitude of the Sun in degrees, `[0, 360)`
pub fn sun_tropical_longitude(jd_tt: f64) -> f64 {
    let t = julian_centuries(jd_tt);

    let mean_longitude = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = solar_mean_anomaly(t);

    let equation_of_centre = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(m)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);

    let true_longitude = mean_longitude + equation_of_centre;
    let omega = lunar_node_longitude(t);

    normalize_degrees(true_longitude - 0.005_69 - 0.004_78 * sin_deg(omega))
}

/// Apparent geocentric right ascension and declination of the Sun
pub fn sun_equatorial(jd_tt: f64) -> Equatorial {
    ecliptic_to_equatorial(sun_tropical_longitude(jd_tt), 0.0, mean_obliquity(jd_tt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::{date_to_jd, ut_to_tt};
    use approx::assert_relative_eq;

    #[test]
    fn test_meeus_example_25a() {
        // 1992 October 13.0 TD
        let lambda = sun_tropical_longitude(2_448_908.5);
        assert_relative_eq!(lambda, 199.908_95, epsilon = 0.01);
    }

    #[test]
    fn test_equinox_and_solstice() {
        // March equinox 2024-03-20 03:06 UT
        let equinox = sun_tropical_longitude(ut_to_tt(date_to_jd(2024, 3, 20, 3.1)));
        let offset = if equinox > 180.0 { equinox - 360.0 } else { equinox };
        assert!(offset.abs() < 0.03, "equinox longitude {}", equinox);

        // June solstice 2026-06-21 08:24 UT
        let solstice = sun_tropical_longitude(ut_to_tt(date_to_jd(2026, 6, 21, 8.4)));
        assert_relative_eq!(solstice, 90.0, epsilon = 0.03);
    }

    #[test]
    fn test_declination_bounds() {
        let mut jd = date_to_jd(2026, 1, 1, 0.0);
        for _ in 0..365 {
            let eq = sun_equatorial(jd);
            assert!(eq.dec.abs() < 23.5, "declination {} out of range", eq.dec);
            jd += 1.0;
        }
    }
}
