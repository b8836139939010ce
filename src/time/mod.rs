//! Time module for Julian day arithmetic
//!
//! Conversions between civil Gregorian dates and continuous Julian days, the
//! UT↔TT offset (ΔT), and bridges to `chrono` date-times in IANA time zones.
//! Julian days are plain `f64` values; the time scale is carried by naming
//! (`jd_ut`, `jd_tt`) throughout the crate.

use crate::constants::{DAY_S, J2000, JULIAN_CENTURY_DAYS};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use thiserror::Error;

/// Julian day of the Unix epoch (1970-01-01T00:00:00 UTC)
const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Milliseconds in a day
const DAY_MS: f64 = 86_400_000.0;

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Time out of range: {0}")]
    OutOfRange(String),

    #[error("Calendar error: {0}")]
    CalendarError(String),

    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Calendar tuple for representing a date and time
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarTuple {
    /// The civil date part as a `NaiveDate`
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

/// Convert a Gregorian calendar date and fractional hour to a Julian day
///
/// January and February are counted as months 13 and 14 of the previous year
/// (Meeus, *Astronomical Algorithms*, ch. 7). The proleptic Gregorian calendar
/// is used for every date.
pub fn date_to_jd(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year as f64 - 1.0, month as f64 + 12.0)
    } else {
        (year as f64, month as f64)
    };

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour / 24.0
}

/// Julian day at 0h UT of a civil date
pub fn naive_date_to_jd(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    date_to_jd(date.year(), date.month(), date.day(), 0.0)
}

/// Convert a Julian day back to a Gregorian calendar tuple
pub fn jd_to_calendar(jd: f64) -> CalendarTuple {
    let jd_plus_half = jd + 0.5;
    let z = jd_plus_half.floor();
    let f = jd_plus_half - z;

    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = (b - d - (30.6001 * e).floor()) as u32;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 } as u32;
    let year = if month > 2 { c - 4716.0 } else { c - 4715.0 } as i32;

    let seconds_in_day = f * DAY_S;
    let hour = (seconds_in_day / 3600.0).floor() as u32;
    let minute = ((seconds_in_day - hour as f64 * 3600.0) / 60.0).floor() as u32;
    let second = seconds_in_day - hour as f64 * 3600.0 - minute as f64 * 60.0;

    CalendarTuple {
        year,
        month,
        day,
        hour,
        minute,
        second,
    }
}

/// Julian centuries of TT elapsed since J2000.0
pub fn julian_centuries(jd_tt: f64) -> f64 {
    (jd_tt - J2000) / JULIAN_CENTURY_DAYS
}

/// Decimal year for a Julian day, accurate enough to select a ΔT branch
pub fn decimal_year(jd: f64) -> f64 {
    2000.0 + (jd - J2000) / 365.25
}

/// ΔT = TT − UT in seconds for a decimal year
///
/// Espenak & Meeus polynomial fits. Years outside 1900–2150 fall back to the
/// long-term parabola.
pub fn delta_t(year: f64) -> f64 {
    if year < 1900.0 || year >= 2150.0 {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u
    } else if year < 1920.0 {
        let t = year - 1900.0;
        -2.79 + 1.494119 * t - 0.0598939 * t * t + 0.0061966 * t.powi(3) - 0.000197 * t.powi(4)
    } else if year < 1941.0 {
        let t = year - 1920.0;
        21.20 + 0.84493 * t - 0.076100 * t * t + 0.0020936 * t.powi(3)
    } else if year < 1961.0 {
        let t = year - 1950.0;
        29.07 + 0.407 * t - t * t / 233.0 + t.powi(3) / 2547.0
    } else if year < 1986.0 {
        let t = year - 1975.0;
        45.45 + 1.067 * t - t * t / 260.0 - t.powi(3) / 718.0
    } else if year < 2005.0 {
        let t = year - 2000.0;
        63.86 + 0.3345 * t - 0.060374 * t * t
            + 0.0017275 * t.powi(3)
            + 0.000651814 * t.powi(4)
            + 0.00002373599 * t.powi(5)
    } else if year < 2050.0 {
        let t = year - 2000.0;
        62.92 + 0.32217 * t + 0.005589 * t * t
    } else {
        let u = (year - 1820.0) / 100.0;
        -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - year)
    }
}

/// Convert a UT Julian day to TT
pub fn ut_to_tt(jd_ut: f64) -> f64 {
    jd_ut + delta_t(decimal_year(jd_ut)) / DAY_S
}

/// Convert a TT Julian day to UT
pub fn tt_to_ut(jd_tt: f64) -> f64 {
    jd_tt - delta_t(decimal_year(jd_tt)) / DAY_S
}

/// Convert a UT Julian day to a UTC date-time, rounded to the millisecond
pub fn jd_to_utc_datetime(jd_ut: f64) -> Result<DateTime<Utc>> {
    if !jd_ut.is_finite() {
        return Err(TimeError::OutOfRange(format!("non-finite Julian day {}", jd_ut)));
    }

    let millis = ((jd_ut - UNIX_EPOCH_JD) * DAY_MS).round();
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .ok_or_else(|| TimeError::OutOfRange(format!("Julian day {} not representable", jd_ut)))
}

/// Convert a UTC date-time to a UT Julian day
pub fn utc_datetime_to_jd<T: TimeZone>(dt: &DateTime<T>) -> f64 {
    dt.timestamp_millis() as f64 / DAY_MS + UNIX_EPOCH_JD
}

/// Convert a UT Julian day to a date-time in the given zone
pub fn jd_to_zoned(jd_ut: f64, tz: &Tz) -> Result<DateTime<Tz>> {
    Ok(jd_to_utc_datetime(jd_ut)?.with_timezone(tz))
}

/// Parse an IANA zone identifier
pub fn parse_timezone(id: &str) -> Result<Tz> {
    id.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimeZone(id.to_string()))
}

/// UT Julian day of local midnight starting `date` in `tz`
///
/// When midnight is skipped by a daylight-saving transition the first valid
/// local instant of the day is used.
pub fn local_midnight_jd(date: NaiveDate, tz: &Tz) -> Result<f64> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| TimeError::CalendarError(format!("invalid date {}", date)))?;

    (0..=2)
        .find_map(|hours| {
            tz.from_local_datetime(&(midnight + Duration::hours(hours)))
                .earliest()
        })
        .map(|dt| utc_datetime_to_jd(&dt))
        .ok_or_else(|| TimeError::CalendarError(format!("no local midnight for {} in {}", date, tz)))
}
