//! Constants module for calendar and astronomical calculations

use std::f64::consts::PI;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Minutes in a day
pub const DAY_MIN: f64 = 1_440.0;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
/// Mean synodic month in days
pub const SYNODIC_MONTH_DAYS: f64 = 29.530_588_853;

// Angles
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;

// Panchang segment widths
/// Moon-Sun elongation spanned by one tithi
pub const TITHI_SEGMENT_DEG: f64 = 12.0;
/// Elongation spanned by one karana (half a tithi)
pub const KARANA_SEGMENT_DEG: f64 = 6.0;
/// Sidereal arc of one nakshatra (13°20′)
pub const NAKSHATRA_SEGMENT_DEG: f64 = 360.0 / 27.0;
/// Arc of one yoga (13°20′)
pub const YOGA_SEGMENT_DEG: f64 = 360.0 / 27.0;
/// Sidereal arc of one rashi
pub const RASHI_SEGMENT_DEG: f64 = 30.0;

// Mean angular rates in degrees per day
/// Moon minus Sun elongation rate
pub const ELONGATION_RATE_DEG_PER_DAY: f64 = 12.190_749;
/// Sidereal lunar rate
pub const MOON_RATE_DEG_PER_DAY: f64 = 13.176_358;
/// Solar rate
pub const SUN_RATE_DEG_PER_DAY: f64 = 0.985_647;
/// Sidereal rotation of the Earth relative to the vernal equinox
pub const SIDEREAL_RATE_DEG_PER_DAY: f64 = 360.985_647;

// Horizon altitude corrections
/// Sun altitude at rise/set: refraction plus semidiameter
pub const SUN_ALTITUDE_DEG: f64 = -0.8333;
/// Moon altitude at rise/set: horizontal parallax less refraction and semidiameter
pub const MOON_ALTITUDE_DEG: f64 = 0.125;
