//! # Angle helpers
//!
//! Range reduction for angles expressed in degrees. Every longitude in the
//! crate passes through [`normalize_degrees`] before it is bucketed into a
//! tithi, nakshatra, yoga or rashi, so the result must be strictly inside
//! `[0, 360)` even for inputs that sit exactly on a multiple of 360.
//!
//! ## Examples
//!
//! ```rust
//! use panchang::coordinates::angle::{normalize_degrees, normalize_pm180};
//!
//! assert_eq!(normalize_degrees(360.0), 0.0);
//! assert_eq!(normalize_degrees(-90.0), 270.0);
//! assert_eq!(normalize_pm180(270.0), -90.0);
//! ```

/// Reduce an angle in degrees to `[0, 360)`
pub fn normalize_degrees(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Reduce an angle in degrees to `[-180, 180)`
pub fn normalize_pm180(deg: f64) -> f64 {
    let r = normalize_degrees(deg);
    if r >= 180.0 {
        r - 360.0
    } else {
        r
    }
}

/// Sine of an angle given in degrees
#[inline]
pub fn sin_deg(deg: f64) -> f64 {
    deg.to_radians().sin()
}

/// Cosine of an angle given in degrees
#[inline]
pub fn cos_deg(deg: f64) -> f64 {
    deg.to_radians().cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(-90.0, 270.0)]
    #[case(725.5, 5.5)]
    #[case(-720.0, 0.0)]
    #[case(359.999, 359.999)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        assert!((normalize_degrees(input) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_range_sweep() {
        let mut x = -10_000.0;
        while x < 10_000.0 {
            let n = normalize_degrees(x);
            assert!((0.0..360.0).contains(&n), "{} -> {}", x, n);
            x += 7.3;
        }
        assert!(normalize_degrees(-1e-18) < 360.0);
    }

    #[test]
    fn test_normalize_pm180() {
        assert_eq!(normalize_pm180(180.0), -180.0);
        assert_eq!(normalize_pm180(179.0), 179.0);
        assert_eq!(normalize_pm180(-181.0), 179.0);
    }
}
