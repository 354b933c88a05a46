use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod clock;
pub mod conditions;
pub mod conversions;
pub mod daily;

pub use clock::{is_night, is_night_at, is_night_hour, local_time, local_time_at};
pub use conditions::{
    ConditionGroup, Presentation, WeatherCategory, classify, match_condition, present, present_at,
    weather_icon,
};
pub use conversions::{
    CompassPoint, capitalize_words, convert_temp, day_name_in, format_clock, format_long_date,
    hour_label_in, ms_to_kmh, round_temp, visibility_km, visibility_label, wind_direction,
};
pub use daily::{MAX_DAILY_SUMMARIES, aggregate, aggregate_in};

/// Number of 3-hour samples shown in the hourly timeline (24 hours).
pub const HOURLY_SAMPLES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Units {
    Celsius,
    Fahrenheit,
}

impl Units {
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

/// One 3-hour forecast interval as delivered by the upstream API.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature_c: f32,
    pub icon: String,
    pub description: String,
    /// Probability of precipitation in `0.0..=1.0`.
    pub precipitation_probability: f32,
}

/// Aggregate of every sample that falls on one calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    /// Timestamp of the first sample seen for the day; used for the day name.
    pub timestamp: i64,
    pub temperature_max_c: f32,
    pub temperature_min_c: f32,
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub city: String,
    pub country: Option<String>,
    /// Short condition group reported by the API ("Clear", "Clouds", "Rain", ...).
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub temperature_c: f32,
    pub feels_like_c: f32,
    pub humidity: f32,
    pub pressure_hpa: f32,
    pub wind_speed_ms: f32,
    pub wind_direction_deg: f32,
    pub visibility_m: Option<f32>,
    pub timezone_offset_secs: i32,
}

impl CurrentConditions {
    #[must_use]
    pub fn display_name(&self) -> String {
        match &self.country {
            Some(country) if !country.is_empty() => format!("{}, {}", self.city, country),
            _ => self.city.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub hourly: Vec<ForecastSample>,
    pub daily: Vec<DailySummary>,
    pub fetched_at: DateTime<Utc>,
}

impl WeatherReport {
    /// Builds the render bundle from the two upstream payloads.
    #[must_use]
    pub fn assemble(current: CurrentConditions, samples: Vec<ForecastSample>) -> Self {
        let daily = aggregate(&samples);
        let mut hourly = samples;
        hourly.truncate(HOURLY_SAMPLES);

        Self {
            current,
            hourly,
            daily,
            fetched_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn presentation(&self) -> Presentation {
        present(&self.current.condition, self.current.timezone_offset_secs)
    }

    #[must_use]
    pub fn local_time(&self) -> NaiveDateTime {
        local_time(self.current.timezone_offset_secs)
    }

    #[must_use]
    pub fn current_temp(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current.temperature_c, units))
    }

    #[must_use]
    pub fn feels_like(&self, units: Units) -> i32 {
        round_temp(convert_temp(self.current.feels_like_c, units))
    }
}
