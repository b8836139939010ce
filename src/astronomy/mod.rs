//! Calendar-grade positions of the Sun and Moon
//!
//! Everything here is a pure function of a Julian day. The [`Astronomy`]
//! trait bundles the functions the panchang layer needs so that callers can
//! substitute an instrumented or alternative implementation.

pub mod ayanamsa;
pub mod moon;
pub mod riseset;
pub mod sun;

pub use ayanamsa::{lahiri_ayanamsa, tropical_to_sidereal};
pub use moon::{moon_equatorial, moon_latitude, moon_tropical_longitude};
pub use riseset::{
    compute_rise_set, compute_rise_set_within, greenwich_mean_sidereal_time, moonrise, moonset,
    sunrise, sunset, Body, RiseSetEvent, RiseSetResult,
};
pub use sun::{mean_obliquity, sun_equatorial, sun_tropical_longitude};

use crate::coordinates::normalize_degrees;

/// Source of solar and lunar positions for the panchang calculator
pub trait Astronomy: Send + Sync {
    /// Apparent tropical longitude of the Sun, degrees
    fn sun_longitude(&self, jd_tt: f64) -> f64;

    /// Apparent tropical longitude of the Moon, degrees
    fn moon_longitude(&self, jd_tt: f64) -> f64;

    /// Ayanamsa used to convert tropical longitudes to sidereal, degrees
    fn ayanamsa(&self, jd_tt: f64) -> f64;

    /// Rise or set of `body` on the civil day beginning at `jd_ut0` (0h UT)
    fn rise_set(
        &self,
        body: Body,
        event: RiseSetEvent,
        jd_ut0: f64,
        latitude: f64,
        longitude: f64,
    ) -> RiseSetResult;

    /// First rise or set of `body` inside the UT interval `[start_jd, end_jd)`
    fn rise_set_within(
        &self,
        body: Body,
        event: RiseSetEvent,
        start_jd: f64,
        end_jd: f64,
        latitude: f64,
        longitude: f64,
    ) -> RiseSetResult;

    fn sidereal_sun_longitude(&self, jd_tt: f64) -> f64 {
        normalize_degrees(self.sun_longitude(jd_tt) - self.ayanamsa(jd_tt))
    }

    fn sidereal_moon_longitude(&self, jd_tt: f64) -> f64 {
        normalize_degrees(self.moon_longitude(jd_tt) - self.ayanamsa(jd_tt))
    }

    /// Moon minus Sun elongation, degrees in `[0, 360)`
    fn elongation(&self, jd_tt: f64) -> f64 {
        normalize_degrees(self.moon_longitude(jd_tt) - self.sun_longitude(jd_tt))
    }
}

/// The truncated-series implementation used in production
#[derive(Debug, Clone, Copy, Default)]
pub struct TruncatedSeries;

impl Astronomy for TruncatedSeries {
    fn sun_longitude(&self, jd_tt: f64) -> f64 {
        sun_tropical_longitude(jd_tt)
    }

    fn moon_longitude(&self, jd_tt: f64) -> f64 {
        moon_tropical_longitude(jd_tt)
    }

    fn ayanamsa(&self, jd_tt: f64) -> f64 {
        lahiri_ayanamsa(jd_tt)
    }

    fn rise_set(
        &self,
        body: Body,
        event: RiseSetEvent,
        jd_ut0: f64,
        latitude: f64,
        longitude: f64,
    ) -> RiseSetResult {
        compute_rise_set(body, event, jd_ut0, latitude, longitude)
    }

    fn rise_set_within(
        &self,
        body: Body,
        event: RiseSetEvent,
        start_jd: f64,
        end_jd: f64,
        latitude: f64,
        longitude: f64,
    ) -> RiseSetResult {
        compute_rise_set_within(body, event, start_jd, end_jd, latitude, longitude)
    }
}
