//! Panchang command-line tool
//!
//! Prints the panchang for a day, or a one-line summary per day for a whole
//! month, at a given location and tradition.
//!
//! Usage:
//!   cargo run --bin panchang -- --date 2026-11-08
//!   cargo run --bin panchang -- --month 2026-11 --tradition tamil --lat 13.08 --lon 80.27
//!   cargo run --bin panchang -- --date 2026-08-28 --json

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use clap::{ArgAction, Parser};

use panchang::festivals::FestivalOccurrence;
use panchang::service::PanchangElement;
use panchang::{Location, PanchangConfig, PanchangDay, PanchangService, Tradition};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Hindu calendar for a date and place
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Computes the Hindu panchang for a date or month at a location",
    long_about = None
)]
struct Args {
    /// Civil date (YYYY-MM-DD); defaults to today in the location's zone
    #[arg(short, long, conflicts_with = "month")]
    date: Option<NaiveDate>,

    /// Whole Gregorian month (YYYY-MM)
    #[arg(short, long)]
    month: Option<String>,

    /// Latitude in degrees, north positive
    #[arg(long, default_value_t = 28.6139, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive
    #[arg(long, default_value_t = 77.2090, allow_hyphen_values = true)]
    lon: f64,

    /// IANA time zone
    #[arg(long, default_value = "Asia/Kolkata")]
    tz: String,

    /// Regional tradition, e.g. north_indian, tamil, bengali
    #[arg(short, long, default_value = "north_indian")]
    tradition: Tradition,

    /// Language for festival names
    #[arg(long, default_value = "en")]
    lang: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Festival rule file overriding the bundled rules
    #[arg(long)]
    festivals: Option<String>,

    /// Print JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn format_time(time: &Option<DateTime<Tz>>) -> String {
    match time {
        Some(t) => t.format("%H:%M").to_string(),
        None => "--:--".to_string(),
    }
}

/// Prints a section header with a title and separator line
fn print_section_header(title: &str) {
    println!("\n{}:", title);
    println!("-------------------------------------------------------");
}

fn print_element(label: &str, element: &PanchangElement) {
    let until = match &element.ends_at {
        Some(t) => t.format("%d %b %H:%M").to_string(),
        None => "?".to_string(),
    };
    let flag = if element.converged { "" } else { " (approx.)" };
    println!("{:<10} {:<18} until {}{}", label, element.name, until, flag);
}

fn festival_names(festivals: &[FestivalOccurrence], lang: &str) -> Vec<String> {
    festivals
        .iter()
        .map(|o| o.festival.name(lang).to_string())
        .collect()
}

fn print_day(day: &PanchangDay, festivals: &[FestivalOccurrence], lang: &str) {
    println!(
        "{} ({}) at {:.4}, {:.4} [{}]",
        day.date, day.vaar, day.location.latitude, day.location.longitude, day.tradition
    );
    println!("{}", day.hindu_date);
    println!(
        "Shaka {}, Kali {}",
        day.hindu_date.era.shaka, day.hindu_date.era.kali
    );

    print_section_header("Sun and Moon");
    println!(
        "Sunrise {}  Sunset {}",
        format_time(&day.sunrise),
        format_time(&day.sunset)
    );
    println!(
        "Moonrise {}  Moonset {}",
        format_time(&day.moonrise),
        format_time(&day.moonset)
    );
    println!(
        "Sun in {} ({:.2}°)",
        day.hindu_date.solar_rashi, day.hindu_date.solar_longitude
    );

    print_section_header("Panchang");
    print_element("Tithi", &day.tithi);
    print_element("Nakshatra", &day.nakshatra);
    print_element("Yoga", &day.yoga);
    print_element("Karana", &day.karana);

    print_section_header("Periods");
    for period in &day.periods {
        println!(
            "{:<16} {} - {}",
            period.name,
            period.start.format("%H:%M"),
            period.end.format("%H:%M")
        );
    }

    if !festivals.is_empty() {
        print_section_header("Festivals");
        for name in festival_names(festivals, lang) {
            println!("{}", name);
        }
    }
}

fn parse_month(value: &str) -> Result<(i32, u32)> {
    let (year, month) = value
        .split_once('-')
        .ok_or_else(|| format!("expected YYYY-MM, got '{}'", value))?;
    Ok((year.parse()?, month.parse()?))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => PanchangConfig::from_file(path)?,
        None => PanchangConfig::default(),
    };
    if let Some(path) = &args.festivals {
        config = config.with_festival_path(path);
    }

    let service = PanchangService::new(config);
    let location = Location::new(args.lat, args.lon, &args.tz);
    let tz = location.tz()?;

    if let Some(month) = &args.month {
        let (year, month) = parse_month(month)?;
        let days = service.compute_monthly_panchang(year, month, &location, args.tradition)?;

        if args.json {
            let days: Vec<&PanchangDay> = days.iter().map(|d| d.as_ref()).collect();
            println!("{}", serde_json::to_string_pretty(&days)?);
            return Ok(());
        }

        for day in &days {
            let tithi = &day.hindu_date.tithi;
            let phase = if tithi.is_purnima() {
                "○"
            } else if tithi.is_amavasya() {
                "●"
            } else {
                " "
            };
            println!(
                "{} {:<11} {} {:<8} {} {:<12} {:<18} {}",
                day.date,
                day.vaar,
                format_time(&day.sunrise),
                day.hindu_date.month.name(),
                phase,
                day.tithi.name,
                day.nakshatra.name,
                festival_names(&day.festivals, &args.lang).join(", ")
            );
        }
        return Ok(());
    }

    let date = args
        .date
        .unwrap_or_else(|| chrono::Utc::now().with_timezone(&tz).date_naive());
    let day = service.compute_panchang(date, &location, args.tradition)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(day.as_ref())?);
    } else {
        // Festivals follow the configured reference location
        let festivals = service.festivals_on(date, &location, args.tradition)?;
        print_day(&day, &festivals, &args.lang);
    }

    Ok(())
}
