//! Weekday-dependent segments of daylight
//!
//! Daylight is split into eight equal parts; Rahu Kaal, Yamaghanda and Gulika
//! Kaal each occupy one of them according to a fixed weekday table. Offsets
//! are returned in minutes from sunrise so callers can anchor them to any
//! clock.

use chrono::Weekday;
use serde::Serialize;

use super::names::VAAR_NAMES;

/// 1-based eighth of the day, indexed from Sunday
const RAHU_KAAL_SEGMENTS: [u8; 7] = [8, 2, 7, 5, 6, 4, 3];
const YAMAGHANDA_SEGMENTS: [u8; 7] = [5, 4, 3, 2, 1, 7, 6];
const GULIKA_KAAL_SEGMENTS: [u8; 7] = [7, 6, 5, 4, 3, 2, 1];

/// Start and end of a period in minutes after sunrise
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodOffsets {
    pub start_minutes: f64,
    pub end_minutes: f64,
}

impl PeriodOffsets {
    pub fn duration_minutes(&self) -> f64 {
        self.end_minutes - self.start_minutes
    }
}

fn eighth_of_day(day_duration_minutes: f64, weekday: Weekday, table: &[u8; 7]) -> PeriodOffsets {
    let segment = day_duration_minutes / 8.0;
    let slot = f64::from(table[weekday.num_days_from_sunday() as usize] - 1);
    PeriodOffsets {
        start_minutes: slot * segment,
        end_minutes: (slot + 1.0) * segment,
    }
}

pub fn rahu_kaal(day_duration_minutes: f64, weekday: Weekday) -> PeriodOffsets {
    eighth_of_day(day_duration_minutes, weekday, &RAHU_KAAL_SEGMENTS)
}

pub fn yamaghanda(day_duration_minutes: f64, weekday: Weekday) -> PeriodOffsets {
    eighth_of_day(day_duration_minutes, weekday, &YAMAGHANDA_SEGMENTS)
}

pub fn gulika_kaal(day_duration_minutes: f64, weekday: Weekday) -> PeriodOffsets {
    eighth_of_day(day_duration_minutes, weekday, &GULIKA_KAAL_SEGMENTS)
}

/// The eighth of fifteen muhurtas, centred on local noon
pub fn abhijit_muhurta(day_duration_minutes: f64) -> PeriodOffsets {
    let noon = day_duration_minutes / 2.0;
    let half_width = day_duration_minutes / 30.0;
    PeriodOffsets {
        start_minutes: noon - half_width,
        end_minutes: noon + half_width,
    }
}

/// Sanskrit weekday name
pub fn vaar_name(weekday: Weekday) -> &'static str {
    VAAR_NAMES[weekday.num_days_from_sunday() as usize]
}
