//! Rise and set times for the Sun and Moon
//!
//! Iterative hour-angle solver. Starting from local noon shifted a quarter day
//! towards the event, each pass recomputes the body's right ascension and
//! declination, the hour angle at which its centre reaches the horizon
//! altitude, and the current Greenwich sidereal time, then steps the estimate
//! by the hour-angle error divided by the body's diurnal rate.
//!
//! Geometrically impossible events (polar day or night, a Moon that does not
//! cross the horizon near the requested day) are reported as values of
//! [`RiseSetResult`], not as errors.

use log::debug;

use crate::astronomy::moon::moon_equatorial;
use crate::astronomy::sun::sun_equatorial;
use crate::constants::{
    MOON_ALTITUDE_DEG, MOON_RATE_DEG_PER_DAY, SIDEREAL_RATE_DEG_PER_DAY, SUN_ALTITUDE_DEG,
    SUN_RATE_DEG_PER_DAY,
};
use crate::coordinates::angle::{cos_deg, sin_deg};
use crate::coordinates::{normalize_degrees, normalize_pm180, Equatorial};
use crate::time::{julian_centuries, ut_to_tt};

/// Refinement passes for the Sun
pub const SOLAR_ITERATIONS: usize = 5;

/// Refinement passes for the Moon, whose right ascension moves ~13°/day
pub const LUNAR_ITERATIONS: usize = 10;

/// A step smaller than this (in days, ~8.6 s) counts as converged
pub const CONVERGENCE_DAYS: f64 = 1.0e-4;

/// Lunar events further than this from local noon belong to another civil day
pub const LUNAR_WINDOW_DAYS: f64 = 0.55;

/// Spacing of the starting estimates for interval searches, days
pub const WINDOW_SEED_DAYS: f64 = 0.25;

/// Bodies with rise/set support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl Body {
    /// Altitude of the body's centre at the instant of rise or set
    fn horizon_altitude(&self) -> f64 {
        match self {
            Body::Sun => SUN_ALTITUDE_DEG,
            Body::Moon => MOON_ALTITUDE_DEG,
        }
    }

    /// Rate at which the local hour angle grows, degrees per day
    fn hour_angle_rate(&self) -> f64 {
        match self {
            Body::Sun => SIDEREAL_RATE_DEG_PER_DAY - SUN_RATE_DEG_PER_DAY,
            Body::Moon => SIDEREAL_RATE_DEG_PER_DAY - MOON_RATE_DEG_PER_DAY,
        }
    }

    fn iterations(&self) -> usize {
        match self {
            Body::Sun => SOLAR_ITERATIONS,
            Body::Moon => LUNAR_ITERATIONS,
        }
    }

    fn equatorial(&self, jd_tt: f64) -> Equatorial {
        match self {
            Body::Sun => sun_equatorial(jd_tt),
            Body::Moon => moon_equatorial(jd_tt),
        }
    }
}

/// Which horizon crossing to solve for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiseSetEvent {
    Rise,
    Set,
}

impl RiseSetEvent {
    /// Sign of the hour angle at the event: negative east of the meridian
    fn sign(&self) -> f64 {
        match self {
            RiseSetEvent::Rise => -1.0,
            RiseSetEvent::Set => 1.0,
        }
    }
}

/// Outcome of a rise/set computation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiseSetResult {
    /// The event occurs at `jd_ut`; `converged` is false when the iteration
    /// budget ran out before the step fell below [`CONVERGENCE_DAYS`]
    Event { jd_ut: f64, converged: bool },
    /// The body stays below the horizon altitude all day
    NeverRises,
    /// The body stays above the horizon altitude all day
    NeverSets,
    /// No lunar event inside the requested day or interval
    OutOfWindow,
    /// Input was not finite (for example a NaN latitude)
    Indeterminate,
}

impl RiseSetResult {
    /// The event time, if there is one
    pub fn jd(&self) -> Option<f64> {
        match self {
            RiseSetResult::Event { jd_ut, .. } => Some(*jd_ut),
            _ => None,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, RiseSetResult::Event { .. })
    }
}

/// Greenwich mean sidereal time in degrees (Meeus 12.4)
pub fn greenwich_mean_sidereal_time(jd_ut: f64) -> f64 {
    let t = julian_centuries(jd_ut);
    normalize_degrees(
        280.460_618_37 + 360.985_647_366_29 * (jd_ut - crate::constants::J2000)
            + 0.000_387_933 * t * t
            - t * t * t / 38_710_000.0,
    )
}

/// Approximate local solar noon from 0h UT of the civil date and east longitude
pub fn approximate_local_noon_jd(jd_ut0: f64, longitude: f64) -> f64 {
    jd_ut0 + 0.5 - longitude / 360.0
}

/// Solve for a rise or set of `body` on the civil day starting at `jd_ut0` (0h UT)
///
/// `latitude` and `longitude` are geographic degrees, east positive. A lunar
/// event that lands outside the day is searched once more from the opposite
/// side of local noon before giving up.
pub fn compute_rise_set(
    body: Body,
    event: RiseSetEvent,
    jd_ut0: f64,
    latitude: f64,
    longitude: f64,
) -> RiseSetResult {
    if !(jd_ut0.is_finite() && latitude.is_finite() && longitude.is_finite()) {
        return RiseSetResult::Indeterminate;
    }

    let noon = approximate_local_noon_jd(jd_ut0, longitude);
    let shift = event.sign() * 0.25;

    match body {
        Body::Sun => iterate_hour_angle(body, event, noon + shift, latitude, longitude),
        Body::Moon => {
            let in_window = |result: &RiseSetResult| match result.jd() {
                Some(jd) => (jd - noon).abs() <= LUNAR_WINDOW_DAYS,
                None => true,
            };

            let first = iterate_hour_angle(body, event, noon + shift, latitude, longitude);
            if in_window(&first) {
                return first;
            }

            let second = iterate_hour_angle(body, event, noon - shift, latitude, longitude);
            if in_window(&second) {
                second
            } else {
                RiseSetResult::OutOfWindow
            }
        }
    }
}

/// Solve for the first rise or set of `body` in the UT interval `[start_jd, end_jd)`
///
/// The iteration is seeded every [`WINDOW_SEED_DAYS`] across the interval;
/// each seed converges on its nearest event. Returns
/// [`RiseSetResult::OutOfWindow`] when the body has no such event inside the
/// interval, as happens to the Moon about once a month.
pub fn compute_rise_set_within(
    body: Body,
    event: RiseSetEvent,
    start_jd: f64,
    end_jd: f64,
    latitude: f64,
    longitude: f64,
) -> RiseSetResult {
    let finite = [start_jd, end_jd, latitude, longitude].iter().all(|v| v.is_finite());
    if !finite || end_jd <= start_jd {
        return RiseSetResult::Indeterminate;
    }

    let seeds = ((end_jd - start_jd) / WINDOW_SEED_DAYS).ceil() as usize;
    let mut first: Option<RiseSetResult> = None;
    let mut fallback = RiseSetResult::OutOfWindow;

    for i in 0..=seeds {
        let seed = start_jd + (end_jd - start_jd) * i as f64 / seeds as f64;
        let result = iterate_hour_angle(body, event, seed, latitude, longitude);
        match result.jd() {
            Some(jd) if (start_jd..end_jd).contains(&jd) => {
                if first.and_then(|f| f.jd()).map_or(true, |earliest| jd < earliest) {
                    first = Some(result);
                }
            }
            Some(_) => {}
            None => fallback = result,
        }
    }

    first.unwrap_or(fallback)
}

/// Fixed-budget hour-angle iteration from an initial estimate
fn iterate_hour_angle(
    body: Body,
    event: RiseSetEvent,
    start_jd: f64,
    latitude: f64,
    longitude: f64,
) -> RiseSetResult {
    let sign = event.sign();
    let rate = body.hour_angle_rate();
    let altitude = body.horizon_altitude();

    let mut jd = start_jd;
    let mut converged = false;

    for _ in 0..body.iterations() {
        let position = body.equatorial(ut_to_tt(jd));

        let cos_h0 = (sin_deg(altitude) - sin_deg(latitude) * sin_deg(position.dec))
            / (cos_deg(latitude) * cos_deg(position.dec));

        if !cos_h0.is_finite() {
            return RiseSetResult::Indeterminate;
        }
        if cos_h0 > 1.0 {
            return RiseSetResult::NeverRises;
        }
        if cos_h0 < -1.0 {
            return RiseSetResult::NeverSets;
        }

        let target = sign * cos_h0.acos().to_degrees();
        let actual = normalize_pm180(greenwich_mean_sidereal_time(jd) + longitude - position.ra);
        let step = normalize_pm180(target - actual) / rate;

        jd += step;
        if step.abs() < CONVERGENCE_DAYS {
            converged = true;
            break;
        }
    }

    if !converged {
        debug!(
            "{:?} {:?} did not converge within {} iterations (jd {:.5})",
            body,
            event,
            body.iterations(),
            jd
        );
    }

    RiseSetResult::Event {
        jd_ut: jd,
        converged,
    }
}

pub fn sunrise(jd_ut0: f64, latitude: f64, longitude: f64) -> RiseSetResult {
    compute_rise_set(Body::Sun, RiseSetEvent::Rise, jd_ut0, latitude, longitude)
}

pub fn sunset(jd_ut0: f64, latitude: f64, longitude: f64) -> RiseSetResult {
    compute_rise_set(Body::Sun, RiseSetEvent::Set, jd_ut0, latitude, longitude)
}

pub fn moonrise(jd_ut0: f64, latitude: f64, longitude: f64) -> RiseSetResult {
    compute_rise_set(Body::Moon, RiseSetEvent::Rise, jd_ut0, latitude, longitude)
}

pub fn moonset(jd_ut0: f64, latitude: f64, longitude: f64) -> RiseSetResult {
    compute_rise_set(Body::Moon, RiseSetEvent::Set, jd_ut0, latitude, longitude)
}
