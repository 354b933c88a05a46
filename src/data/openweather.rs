use std::time::Duration;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::domain::weather::{CurrentConditions, ForecastSample, WeatherReport};

const OPENWEATHER_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Please enter a city name.")]
    EmptyCity,
    #[error("City not found. Please check the spelling and try again.")]
    CityNotFound,
    #[error("Invalid API key. Please check your configuration.")]
    InvalidApiKey,
    #[error("Unable to fetch weather data. Please try again later.")]
    Unavailable(StatusCode),
    #[error("Unable to fetch forecast data.")]
    ForecastUnavailable(StatusCode),
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_base_url(OPENWEATHER_URL, api_key)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Fetches current conditions and the 3-hour forecast concurrently.
    #[instrument(skip(self))]
    pub async fn fetch(&self, city: &str) -> Result<WeatherReport, FetchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        let (current, forecast) =
            tokio::try_join!(self.fetch_current(city), self.fetch_forecast(city))?;
        debug!(
            city = %current.name,
            samples = forecast.list.len(),
            "weather payloads received"
        );

        Ok(WeatherReport::assemble(
            current.into_conditions(),
            forecast.into_samples(),
        ))
    }

    async fn fetch_current(&self, city: &str) -> Result<CurrentResponse, FetchError> {
        let response = self.request("weather", city).send().await?;
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(FetchError::CityNotFound),
            StatusCode::UNAUTHORIZED => Err(FetchError::InvalidApiKey),
            status => {
                warn!(%status, "current weather request rejected");
                Err(FetchError::Unavailable(status))
            }
        }
    }

    async fn fetch_forecast(&self, city: &str) -> Result<ForecastResponse, FetchError> {
        let response = self.request("forecast", city).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "forecast request rejected");
            return Err(FetchError::ForecastUnavailable(status));
        }
        Ok(response.json().await?)
    }

    fn request(&self, endpoint: &str, city: &str) -> RequestBuilder {
        self.client
            .get(format!("{}/{endpoint}", self.base_url))
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "en"),
            ])
    }
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: WindBlock,
    #[serde(default)]
    sys: SysBlock,
    visibility: Option<f32>,
    #[serde(default)]
    timezone: i32,
}

impl CurrentResponse {
    fn into_conditions(self) -> CurrentConditions {
        let condition = self.weather.into_iter().next().unwrap_or_default();
        CurrentConditions {
            city: self.name,
            country: self.sys.country,
            condition: condition.main,
            description: condition.description,
            icon: condition.icon,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like.unwrap_or(self.main.temp),
            humidity: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed_ms: self.wind.speed,
            wind_direction_deg: self.wind.deg,
            visibility_m: self.visibility,
            timezone_offset_secs: self.timezone,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastEntry>,
}

impl ForecastResponse {
    fn into_samples(self) -> Vec<ForecastSample> {
        self.list
            .into_iter()
            .map(|entry| {
                let condition = entry.weather.into_iter().next().unwrap_or_default();
                ForecastSample {
                    timestamp: entry.dt,
                    temperature_c: entry.main.temp,
                    icon: condition.icon,
                    description: condition.description,
                    precipitation_probability: entry.pop.clamp(0.0, 1.0),
                }
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    pop: f32,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f32,
    feels_like: Option<f32>,
    #[serde(default)]
    humidity: f32,
    #[serde(default)]
    pressure: f32,
}

#[derive(Debug, Default, Deserialize)]
struct ConditionBlock {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f32,
    #[serde(default)]
    deg: f32,
}

#[derive(Debug, Default, Deserialize)]
struct SysBlock {
    country: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_entries_without_conditions_get_blank_icons() {
        let payload = serde_json::json!({
            "list": [
                { "dt": 1, "main": { "temp": 3.5 }, "weather": [], "pop": 1.4 },
                {
                    "dt": 2,
                    "main": { "temp": 4.0, "feels_like": 2.0, "humidity": 80, "pressure": 1001 },
                    "weather": [{ "main": "Rain", "description": "light rain", "icon": "10n" }]
                }
            ]
        });
        let parsed: ForecastResponse = serde_json::from_value(payload).unwrap();
        let samples = parsed.into_samples();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].icon, "");
        assert_eq!(samples[0].precipitation_probability, 1.0);
        assert_eq!(samples[1].icon, "10n");
        assert_eq!(samples[1].precipitation_probability, 0.0);
    }

    #[test]
    fn current_payload_maps_onto_conditions() {
        let payload = serde_json::json!({
            "name": "Reykjavik",
            "main": { "temp": -1.2, "humidity": 90, "pressure": 995 },
            "weather": [{ "main": "Snow", "description": "light snow", "icon": "13n" }],
            "wind": { "speed": 7.5, "deg": 40 },
            "sys": { "country": "IS" },
            "timezone": 0
        });
        let parsed: CurrentResponse = serde_json::from_value(payload).unwrap();
        let current = parsed.into_conditions();

        assert_eq!(current.display_name(), "Reykjavik, IS");
        assert_eq!(current.condition, "Snow");
        assert_eq!(current.feels_like_c, -1.2);
        assert_eq!(current.visibility_m, None);
        assert_eq!(current.wind_direction_deg, 40.0);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenWeatherClient::with_base_url("http://localhost:9/", "key").unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
    }
}
