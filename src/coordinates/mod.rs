pub mod angle;

pub use angle::{normalize_degrees, normalize_pm180};

use crate::coordinates::angle::{cos_deg, sin_deg};

/// Geocentric equatorial position in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equatorial {
    /// Right ascension in degrees, `[0, 360)`
    pub ra: f64,
    /// Declination in degrees
    pub dec: f64,
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self {
            ra: normalize_degrees(ra),
            dec,
        }
    }
}

/// Rotate ecliptic longitude/latitude into right ascension/declination
///
/// `obliquity` is the obliquity of the ecliptic in degrees.
pub fn ecliptic_to_equatorial(longitude: f64, latitude: f64, obliquity: f64) -> Equatorial {
    let (sin_l, cos_l) = (sin_deg(longitude), cos_deg(longitude));
    let (sin_b, cos_b) = (sin_deg(latitude), cos_deg(latitude));
    let (sin_e, cos_e) = (sin_deg(obliquity), cos_deg(obliquity));

    let ra = (sin_l * cos_e - (sin_b / cos_b) * sin_e).atan2(cos_l);
    let dec = (sin_b * cos_e + cos_b * sin_e * sin_l).asin();

    Equatorial::new(ra.to_degrees(), dec.to_degrees())
}
