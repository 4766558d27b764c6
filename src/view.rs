//! Reading -> display strings
//!
//! Pure formatting only. The current date comes from the caller so renders
//! are reproducible in tests.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::state::WeatherReading;

/// Icon family chosen from the provider's icon code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconCategory {
    Sun,
    PartlyCloudy,
    Cloud,
    Rain,
    Thunderstorm,
    Snow,
    Fog,
}

/// Checked in order, first substring match wins.
const ICON_TABLE: [(&str, IconCategory); 9] = [
    ("01", IconCategory::Sun),
    ("02", IconCategory::PartlyCloudy),
    ("03", IconCategory::Cloud),
    ("04", IconCategory::Cloud),
    ("09", IconCategory::Rain),
    ("10", IconCategory::Rain),
    ("11", IconCategory::Thunderstorm),
    ("13", IconCategory::Snow),
    ("50", IconCategory::Fog),
];

impl IconCategory {
    /// Unknown codes fall back to `Cloud` so the icon is never blank.
    pub fn from_code(code: &str) -> Self {
        ICON_TABLE
            .iter()
            .find(|(needle, _)| code.contains(needle))
            .map(|&(_, category)| category)
            .unwrap_or(IconCategory::Cloud)
    }

    pub fn glyph(self) -> &'static str {
        match self {
            IconCategory::Sun => "\u{2600}\u{fe0f}",
            IconCategory::PartlyCloudy => "\u{26c5}",
            IconCategory::Cloud => "\u{2601}\u{fe0f}",
            IconCategory::Rain => "\u{1f327}\u{fe0f}",
            IconCategory::Thunderstorm => "\u{26c8}\u{fe0f}",
            IconCategory::Snow => "\u{2744}\u{fe0f}",
            IconCategory::Fog => "\u{1f32b}\u{fe0f}",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            IconCategory::Sun => "sun",
            IconCategory::PartlyCloudy => "cloud-sun",
            IconCategory::Cloud => "cloud",
            IconCategory::Rain => "cloud-rain",
            IconCategory::Thunderstorm => "cloud-lightning",
            IconCategory::Snow => "snow",
            IconCategory::Fog => "cloud-fog",
        }
    }
}

/// Every display slot of the result panel
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherView {
    pub location: String,
    pub date: String,
    pub temperature: String,
    pub description: String,
    pub feels_like: String,
    pub humidity: String,
    pub wind: String,
    pub pressure: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub icon: IconCategory,
    /// Unrounded, for the temperature gradient
    pub celsius: f64,
}

impl WeatherView {
    /// Project `reading` as seen at `now`; times use `now`'s zone.
    pub fn project<Tz>(reading: &WeatherReading, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let tz = now.timezone();
        Self {
            location: format!("{}, {}", reading.city, reading.country),
            date: format_date(now),
            temperature: format_temperature(reading.temperature),
            description: reading.description.clone(),
            feels_like: format_temperature(reading.feels_like),
            humidity: format!("{}%", reading.humidity),
            wind: format!("{} m/s", reading.wind_speed),
            pressure: format!("{} hPa", reading.pressure),
            visibility: format_visibility(reading.visibility),
            sunrise: format_clock(reading.sunrise, &tz),
            sunset: format_clock(reading.sunset, &tz),
            icon: IconCategory::from_code(&reading.icon),
            celsius: reading.temperature,
        }
    }
}

/// Nearest whole degree, halves rounding up.
pub fn round_degrees(celsius: f64) -> i64 {
    let whole = celsius.floor();
    if celsius - whole >= 0.5 {
        whole as i64 + 1
    } else {
        whole as i64
    }
}

pub fn format_temperature(celsius: f64) -> String {
    format!("{}°C", round_degrees(celsius))
}

/// Meters to kilometers with one decimal.
pub fn format_visibility(meters: Option<u32>) -> String {
    match meters {
        Some(m) => format!("{:.1} km", f64::from(m) / 1000.0),
        None => "n/a".to_string(),
    }
}

/// e.g. "Wednesday, October 14, 2026"
pub fn format_date<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%A, %B %-d, %Y").to_string()
}

/// Unix seconds to a 12-hour "06:42 AM" clock in `tz`.
pub fn format_clock<Tz>(unix_secs: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match tz.timestamp_opt(unix_secs, 0).single() {
        Some(time) => time.format("%I:%M %p").to_string(),
        None => "--:--".to_string(),
    }
}
