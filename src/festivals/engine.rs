//! Matching festival rules against computed Hindu dates

use chrono::NaiveDate;
use log::debug;
use std::collections::HashSet;

use super::recurring::{recurring_observances, GENERIC_EKADASHI_IDS};
use super::{Festival, FestivalOccurrence};
use crate::panchang::HinduDate;
use crate::tradition::Tradition;

/// Festivals observed at dusk or night, matched against the Hindu date in
/// force twelve hours after sunrise
pub const DEFAULT_EVENING_FESTIVALS: [&str; 9] = [
    "diwali",
    "lakshmi_puja",
    "dhanteras",
    "narak_chaturdashi",
    "maha_shivaratri",
    "janmashtami",
    "holika_dahan",
    "karva_chauth",
    "sharad_purnima",
];

/// Matches an injected festival list against Hindu dates
#[derive(Debug, Clone)]
pub struct FestivalRulesEngine {
    festivals: Vec<Festival>,
    evening_festivals: HashSet<String>,
}

impl Default for FestivalRulesEngine {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl FestivalRulesEngine {
    pub fn new(festivals: Vec<Festival>) -> Self {
        Self {
            festivals,
            evening_festivals: DEFAULT_EVENING_FESTIVALS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }

    /// Replace the set of festival ids matched at dusk
    pub fn with_evening_festivals<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.evening_festivals = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn festivals(&self) -> &[Festival] {
        &self.festivals
    }

    pub fn is_evening_festival(&self, id: &str) -> bool {
        self.evening_festivals.contains(id)
    }

    /// Festivals falling on `date`
    ///
    /// `sunrise` and `evening` are the Hindu dates at sunrise and twelve
    /// hours later. `kshaya` is the date of a tithi skipped between this
    /// sunrise and the next; lunar rules read at sunrise also try it. Named
    /// festivals come first, followed by the recurring monthly observances.
    /// Each id appears at most once.
    pub fn festivals_for(
        &self,
        date: NaiveDate,
        sunrise: &HinduDate,
        evening: &HinduDate,
        kshaya: Option<&HinduDate>,
        tradition: Tradition,
        jd_tt: f64,
    ) -> Vec<FestivalOccurrence> {
        let mut seen = HashSet::new();
        let mut occurrences = Vec::new();
        let mut named_ekadashi = false;

        for festival in self.festivals.iter().filter(|f| f.applies_to(tradition)) {
            let matched = if self.is_evening_festival(&festival.id) {
                festival.rule.matches(date, evening, tradition)
            } else {
                festival.rule.matches(date, sunrise, tradition)
                    || (festival.rule.is_lunar()
                        && kshaya.is_some_and(|k| festival.rule.matches(date, k, tradition)))
            };
            if !matched {
                continue;
            }
            if !seen.insert(festival.id.clone()) {
                continue;
            }
            named_ekadashi |= festival.is_named_ekadashi();
            occurrences.push(FestivalOccurrence::new(festival.clone(), date));
        }

        for occurrence in recurring_observances(date, sunrise, evening, kshaya) {
            if named_ekadashi && GENERIC_EKADASHI_IDS.iter().any(|id| *id == occurrence.id()) {
                continue;
            }
            if seen.insert(occurrence.festival.id.clone()) {
                occurrences.push(occurrence);
            }
        }

        debug!(
            "{} festival(s) on {} ({}, jd {:.4})",
            occurrences.len(),
            date,
            tradition,
            jd_tt
        );
        occurrences
    }
}
