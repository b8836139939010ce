//! Panchang: the Hindu lunisolar calendar computed from first principles
//!
//! This crate derives the daily panchang (tithi, nakshatra, yoga, karana,
//! Hindu month and era years) for any date, location and regional
//! tradition, along with sunrise, sunset, moonrise, moonset, the Rahu Kaal
//! family of day segments and the festivals that fall on the day.
//!
//! Solar and lunar positions come from truncated analytical series that are
//! good to about an arcminute, which is plenty for calendar work.
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use panchang::{Location, PanchangService, Tradition};
//!
//! let service = PanchangService::default();
//! let date = NaiveDate::from_ymd_opt(2026, 11, 8).unwrap();
//! let day = service
//!     .compute_panchang(date, &Location::delhi(), Tradition::NorthIndian)
//!     .unwrap();
//! println!("{}", day.hindu_date);
//! ```

use thiserror::Error;

pub mod astronomy;
pub mod constants;
pub mod coordinates;
pub mod festivals;
pub mod panchang;
pub mod service;
pub mod time;
pub mod tradition;

// Re-export commonly used types
pub use astronomy::{Astronomy, TruncatedSeries};
pub use festivals::{Festival, FestivalCatalog, FestivalOccurrence, FestivalRule, FestivalRulesEngine};
pub use panchang::{HinduDate, HinduMonth, Paksha, PanchangCalculator, Tithi};
pub use service::{FestivalReference, Location, PanchangConfig, PanchangDay, PanchangService};
pub use time::CalendarTuple;
pub use tradition::{MonthSystem, Tradition};

/// Main error type for the panchang library
#[derive(Debug, Error)]
pub enum PanchangError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Time error: {0}")]
    Time(#[from] time::TimeError),

    #[error("Festival data error: {0}")]
    FestivalData(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for panchang operations
pub type Result<T> = std::result::Result<T, PanchangError>;
