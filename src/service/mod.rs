//! Day-level panchang assembly with caching
//!
//! [`PanchangService`] ties the pieces together: rise and set times from the
//! astronomy layer, the five elements as of sunrise, the Hindu date, the
//! Rahu Kaal family of day segments and the day's festivals. Computed days
//! are shared as `Arc<PanchangDay>` and kept in a bounded LRU cache owned by
//! the service.

pub mod cache;
pub mod config;

pub use cache::{CacheKey, CacheStats, PanchangCache};
pub use config::{FestivalReference, PanchangConfig, DEFAULT_CACHE_CAPACITY};

use chrono::{DateTime, Datelike, NaiveDate};
use chrono_tz::Tz;
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::astronomy::{Astronomy, Body, RiseSetEvent, RiseSetResult, TruncatedSeries};
use crate::constants::DAY_MIN;
use crate::festivals::{Festival, FestivalCatalog, FestivalOccurrence, FestivalRulesEngine};
use crate::panchang::{
    abhijit_muhurta, gulika_kaal, rahu_kaal, vaar_name, yamaghanda, HinduDate, Paksha,
    PanchangCalculator, PeriodOffsets, TimePeriod, Transition,
};
use crate::time::{
    jd_to_zoned, local_midnight_jd, naive_date_to_jd, parse_timezone, tt_to_ut, ut_to_tt,
};
use crate::tradition::Tradition;
use crate::{PanchangError, Result};

/// Offset from sunrise, in days, at which the evening Hindu date is taken
const EVENING_OFFSET_DAYS: f64 = 0.5;

/// An observer on the Earth's surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees, north positive
    pub latitude: f64,
    /// Degrees, east positive
    pub longitude: f64,
    /// IANA zone identifier such as `Asia/Kolkata`
    pub timezone: String,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, timezone: &str) -> Self {
        Self {
            latitude,
            longitude,
            timezone: timezone.to_string(),
        }
    }

    /// New Delhi, the reference location for Indian Standard festival dates
    pub fn delhi() -> Self {
        Self::new(28.6139, 77.2090, "Asia/Kolkata")
    }

    pub fn tz(&self) -> crate::time::Result<Tz> {
        parse_timezone(&self.timezone)
    }
}

/// One panchang limb with the local time at which it ends
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangElement {
    pub index: u8,
    pub name: &'static str,
    pub ends_at: Option<DateTime<Tz>>,
    /// False when the end-time search ran out of iterations
    pub converged: bool,
}

impl PanchangElement {
    fn new(index: u8, name: &'static str, end: Transition, tz: &Tz) -> Self {
        Self {
            index,
            name,
            ends_at: jd_to_zoned(tt_to_ut(end.jd_tt), tz).ok(),
            converged: end.converged,
        }
    }
}

/// Everything computed for one civil day at one location
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanchangDay {
    pub date: NaiveDate,
    pub location: Location,
    pub tradition: Tradition,
    pub vaar: &'static str,
    pub sunrise: Option<DateTime<Tz>>,
    pub sunset: Option<DateTime<Tz>>,
    pub moonrise: Option<DateTime<Tz>>,
    pub moonset: Option<DateTime<Tz>>,
    pub tithi: PanchangElement,
    pub nakshatra: PanchangElement,
    pub yoga: PanchangElement,
    pub karana: PanchangElement,
    pub paksha: Paksha,
    pub hindu_date: HinduDate,
    /// Rahu Kaal, Yamaghanda, Gulika Kaal and Abhijit Muhurta
    pub periods: Vec<TimePeriod>,
    pub festivals: Vec<FestivalOccurrence>,
}

impl PanchangDay {
    pub fn period(&self, name: &str) -> Option<&TimePeriod> {
        self.periods.iter().find(|p| p.name == name)
    }
}

/// Computes and caches panchang days
pub struct PanchangService {
    astronomy: Arc<dyn Astronomy>,
    calculator: PanchangCalculator,
    engine: FestivalRulesEngine,
    cache: PanchangCache,
    config: PanchangConfig,
}

impl Default for PanchangService {
    fn default() -> Self {
        Self::new(PanchangConfig::default())
    }
}

impl PanchangService {
    /// Production service: truncated-series astronomy and the configured
    /// festival rules (bundled rules when no path is set)
    pub fn new(config: PanchangConfig) -> Self {
        let catalog = match &config.festival_path {
            Some(path) => FestivalCatalog::load_or_empty(path),
            None => FestivalCatalog::bundled(),
        };
        Self::with_parts(Arc::new(TruncatedSeries), catalog.into_festivals(), config)
    }

    /// Service over an explicit astronomy source and festival list
    pub fn with_parts(
        astronomy: Arc<dyn Astronomy>,
        festivals: Vec<Festival>,
        config: PanchangConfig,
    ) -> Self {
        let engine = FestivalRulesEngine::new(festivals)
            .with_evening_festivals(config.evening_festivals.iter().cloned());
        Self {
            calculator: PanchangCalculator::new(astronomy.clone()),
            astronomy,
            engine,
            cache: PanchangCache::new(config.cache_capacity),
            config,
        }
    }

    pub fn config(&self) -> &PanchangConfig {
        &self.config
    }

    pub fn calculator(&self) -> &PanchangCalculator {
        &self.calculator
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Panchang for `date` at `location`, from cache when available
    pub fn compute_panchang(
        &self,
        date: NaiveDate,
        location: &Location,
        tradition: Tradition,
    ) -> Result<Arc<PanchangDay>> {
        let key = CacheKey::new(date, location, tradition);
        if let Some(day) = self.cache.get(&key) {
            return Ok(day);
        }

        let day = Arc::new(self.build_day(date, location, tradition)?);
        self.cache.put(key, day.clone());
        Ok(day)
    }

    /// Festivals on `date`, evaluated where `reference` says
    pub fn compute_festivals(
        &self,
        date: NaiveDate,
        location: &Location,
        tradition: Tradition,
        reference: FestivalReference,
    ) -> Result<Vec<FestivalOccurrence>> {
        let at = match reference {
            FestivalReference::Local => location,
            FestivalReference::IndianStandard => &self.config.reference_location,
        };
        Ok(self.compute_panchang(date, at, tradition)?.festivals.clone())
    }

    /// Festivals on `date` using the configured default reference
    pub fn festivals_on(
        &self,
        date: NaiveDate,
        location: &Location,
        tradition: Tradition,
    ) -> Result<Vec<FestivalOccurrence>> {
        self.compute_festivals(date, location, tradition, self.config.festival_reference)
    }

    /// Every day of a Gregorian month
    pub fn compute_monthly_panchang(
        &self,
        year: i32,
        month: u32,
        location: &Location,
        tradition: Tradition,
    ) -> Result<Vec<Arc<PanchangDay>>> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| PanchangError::InvalidDate(format!("{}-{:02}", year, month)))?;

        first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|d| self.compute_panchang(d, location, tradition))
            .collect()
    }

    fn build_day(&self, date: NaiveDate, location: &Location, tradition: Tradition) -> Result<PanchangDay> {
        let tz = location.tz()?;
        let jd_ut0 = naive_date_to_jd(date);
        let midnight = local_midnight_jd(date, &tz)?;
        let (lat, lon) = (location.latitude, location.longitude);

        let next_midnight = match date.succ_opt() {
            Some(next) => local_midnight_jd(next, &tz)?,
            None => return Err(PanchangError::InvalidDate(date.to_string())),
        };

        let sun = |event| self.astronomy.rise_set(Body::Sun, event, jd_ut0, lat, lon);
        // The Moon skips a civil day about once a month
        let moon = |event| {
            self.astronomy
                .rise_set_within(Body::Moon, event, midnight, next_midnight, lat, lon)
        };
        let sunrise = sun(RiseSetEvent::Rise);
        let sunset = sun(RiseSetEvent::Set);
        let moonrise = moon(RiseSetEvent::Rise);
        let moonset = moon(RiseSetEvent::Set);

        // Polar day or night: anchor the day at local midnight and noon
        let sunrise_jd = sunrise.jd().unwrap_or(midnight);
        let sunset_jd = sunset.jd().unwrap_or(midnight + 0.5);
        if !sunrise.is_event() || !sunset.is_event() {
            debug!(
                "No sunrise/sunset on {} at ({}, {}): {:?} / {:?}",
                date, lat, lon, sunrise, sunset
            );
        }

        let jd_tt = ut_to_tt(sunrise_jd);
        let calc = &self.calculator;

        let tithi = calc.calculate_tithi(jd_tt);
        let nakshatra = calc.calculate_nakshatra(jd_tt);
        let yoga = calc.calculate_yoga(jd_tt);
        let karana = calc.calculate_karana(jd_tt);

        let hindu_date = calc.hindu_date(jd_tt, date, tradition);
        let evening = calc.hindu_date(jd_tt + EVENING_OFFSET_DAYS, date, tradition);
        let next_sunrise_jd = self
            .astronomy
            .rise_set(Body::Sun, RiseSetEvent::Rise, jd_ut0 + 1.0, lat, lon)
            .jd()
            .unwrap_or(sunrise_jd + 1.0);
        let kshaya = calc.kshaya_tithi(jd_tt, ut_to_tt(next_sunrise_jd), date, tradition);

        let day_minutes = (sunset_jd - sunrise_jd) * DAY_MIN;
        let weekday = date.weekday();
        let period = |name: &str, offsets: PeriodOffsets| -> Result<TimePeriod> {
            Ok(TimePeriod {
                name: name.to_string(),
                start: jd_to_zoned(sunrise_jd + offsets.start_minutes / DAY_MIN, &tz)?,
                end: jd_to_zoned(sunrise_jd + offsets.end_minutes / DAY_MIN, &tz)?,
            })
        };
        let periods = vec![
            period("Rahu Kaal", rahu_kaal(day_minutes, weekday))?,
            period("Yamaghanda", yamaghanda(day_minutes, weekday))?,
            period("Gulika Kaal", gulika_kaal(day_minutes, weekday))?,
            period("Abhijit Muhurta", abhijit_muhurta(day_minutes))?,
        ];

        let festivals = self
            .engine
            .festivals_for(date, &hindu_date, &evening, kshaya.as_ref(), tradition, jd_tt);

        let zoned = |result: RiseSetResult| result.jd().and_then(|jd| jd_to_zoned(jd, &tz).ok());

        Ok(PanchangDay {
            date,
            location: location.clone(),
            tradition,
            vaar: vaar_name(weekday),
            sunrise: zoned(sunrise),
            sunset: zoned(sunset),
            moonrise: zoned(moonrise),
            moonset: zoned(moonset),
            tithi: PanchangElement::new(
                tithi.number,
                tithi.name,
                calc.find_tithi_transition(jd_tt, tithi.number),
                &tz,
            ),
            nakshatra: PanchangElement::new(
                nakshatra.index,
                nakshatra.name,
                calc.find_nakshatra_transition(jd_tt, nakshatra.index),
                &tz,
            ),
            yoga: PanchangElement::new(
                yoga.index,
                yoga.name,
                calc.find_yoga_transition(jd_tt, yoga.index),
                &tz,
            ),
            karana: PanchangElement::new(
                karana.index,
                karana.name,
                calc.find_karana_transition(jd_tt, karana.index),
                &tz,
            ),
            paksha: tithi.paksha,
            hindu_date,
            periods,
            festivals,
        })
    }
}

impl std::fmt::Debug for PanchangService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PanchangService")
            .field("festivals", &self.engine.festivals().len())
            .field("cache", &self.cache)
            .field("config", &self.config)
            .finish()
    }
}
