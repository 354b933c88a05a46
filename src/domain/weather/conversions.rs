use chrono::{DateTime, NaiveDateTime, TimeZone};

use super::Units;

#[must_use]
pub fn convert_temp(celsius: f32, units: Units) -> f32 {
    match units {
        Units::Celsius => celsius,
        Units::Fahrenheit => celsius * 1.8 + 32.0,
    }
}

#[must_use]
pub fn round_temp(value: f32) -> i32 {
    value.round() as i32
}

#[must_use]
pub fn ms_to_kmh(speed_ms: f32) -> i32 {
    (speed_ms * 3.6).round() as i32
}

#[must_use]
pub fn visibility_km(visibility_m: f32) -> i32 {
    (visibility_m / 1000.0).round() as i32
}

#[must_use]
pub fn visibility_label(visibility_m: f32) -> &'static str {
    if visibility_km(visibility_m) > 10 {
        "Good"
    } else {
        "Moderate"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

const COMPASS: [CompassPoint; 8] = [
    CompassPoint::North,
    CompassPoint::NorthEast,
    CompassPoint::East,
    CompassPoint::SouthEast,
    CompassPoint::South,
    CompassPoint::SouthWest,
    CompassPoint::West,
    CompassPoint::NorthWest,
];

impl CompassPoint {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::North => "North",
            Self::NorthEast => "North-East",
            Self::East => "East",
            Self::SouthEast => "South-East",
            Self::South => "South",
            Self::SouthWest => "South-West",
            Self::West => "West",
            Self::NorthWest => "North-West",
        }
    }
}

/// Quantizes a meteorological wind bearing onto 45° sectors.
#[must_use]
pub fn wind_direction(degrees: f32) -> CompassPoint {
    if !degrees.is_finite() {
        return CompassPoint::North;
    }
    let sector = (degrees / 45.0).round() as i64;
    COMPASS[sector.rem_euclid(8) as usize]
}

#[must_use]
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[must_use]
pub fn format_clock(time: NaiveDateTime) -> String {
    time.format("%H:%M:%S").to_string()
}

#[must_use]
pub fn format_long_date(time: NaiveDateTime) -> String {
    time.format("%A, %B %-d, %Y").to_string()
}

/// `HH:MM` label of a sample timestamp in the given zone.
#[must_use]
pub fn hour_label_in<Tz: TimeZone>(timestamp: i64, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(zone).format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_string())
}

/// Short weekday name ("Mon") of a timestamp in the given zone.
#[must_use]
pub fn day_name_in<Tz: TimeZone>(timestamp: i64, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(zone).format("%a").to_string())
        .unwrap_or_else(|| "---".to_string())
}
