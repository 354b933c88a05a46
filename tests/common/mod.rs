#![allow(clippy::cast_precision_loss)]
#![allow(dead_code)]

use clap::Parser;
use skycast::{
    app::{
        settings::{MotionSetting, RuntimeSettings},
        state::{AppMode, AppState},
    },
    cli::{Cli, IconMode},
    domain::weather::{CurrentConditions, ForecastSample, WeatherReport},
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

/// 2026-03-14T00:00:00Z
pub const DAY_ONE: i64 = 1_773_446_400;
pub const THREE_HOURS: i64 = 10_800;

pub fn cli_for(base_url: &str) -> Cli {
    Cli::parse_from([
        "skycast",
        "--api-key",
        "test-key",
        "--base-url",
        base_url,
        "--no-animation",
        "--no-flash",
    ])
}

pub fn quiet_settings() -> RuntimeSettings {
    RuntimeSettings {
        motion: MotionSetting::Off,
        no_flash: true,
        icon_mode: IconMode::Ascii,
        ..RuntimeSettings::default()
    }
}

pub fn current_payload(city: &str, main: &str, description: &str, icon: &str) -> serde_json::Value {
    serde_json::json!({
        "name": city,
        "main": { "temp": 7.2, "feels_like": 5.8, "humidity": 73, "pressure": 1009 },
        "weather": [{ "main": main, "description": description, "icon": icon }],
        "wind": { "speed": 3.4, "deg": 220 },
        "sys": { "country": "SE" },
        "visibility": 10000,
        "timezone": 3600
    })
}

/// Five days of 3-hour samples starting at [`DAY_ONE`].
pub fn forecast_payload() -> serde_json::Value {
    let list = (0..40)
        .map(|idx| {
            serde_json::json!({
                "dt": DAY_ONE + idx * THREE_HOURS,
                "main": { "temp": 2.0 + (idx % 8) as f32, "humidity": 70, "pressure": 1010 },
                "weather": [{ "main": "Rain", "description": "light rain", "icon": "10d" }],
                "pop": 0.4
            })
        })
        .collect::<Vec<_>>();
    serde_json::json!({ "cnt": list.len(), "list": list })
}

pub async fn mount_city(server: &MockServer, city: &str, main: &str, description: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(current_payload(city, main, description, "10d")),
        )
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_payload()))
        .mount(server)
        .await;
}

pub fn fixture_report(condition: &str, description: &str, icon: &str) -> WeatherReport {
    let current = CurrentConditions {
        city: "Stockholm".to_string(),
        country: Some("SE".to_string()),
        condition: condition.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        temperature_c: 7.2,
        feels_like_c: 5.8,
        humidity: 73.0,
        pressure_hpa: 1009.0,
        wind_speed_ms: 3.4,
        wind_direction_deg: 220.0,
        visibility_m: Some(10_000.0),
        timezone_offset_secs: 3_600,
    };
    let samples = (0..40)
        .map(|idx| ForecastSample {
            timestamp: DAY_ONE + idx * THREE_HOURS,
            temperature_c: 2.0 + (idx % 8) as f32,
            icon: icon.to_string(),
            description: description.to_string(),
            precipitation_probability: 0.4,
        })
        .collect();
    WeatherReport::assemble(current, samples)
}

pub fn ready_state(report: WeatherReport) -> AppState {
    let mut state = AppState::new(quiet_settings(), None);
    state.city = Some(report.current.city.clone());
    state.weather = Some(report);
    state.refresh_clock();
    state.mode = AppMode::Ready;
    state
}
