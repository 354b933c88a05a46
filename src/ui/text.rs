//! Plain-text report for `--one-shot`.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::{
    app::settings::RuntimeSettings,
    domain::weather::{
        WeatherReport, capitalize_words, convert_temp, format_clock, format_long_date,
        local_time_at, present_at, round_temp, weather_icon,
    },
    ui::widgets::{daily::day_label, details::detail_rows, hourly::hour_columns_in},
};

/// Renders `report` as seen at `now`, with sample times shown in `zone`.
pub fn render_report<Tz: TimeZone>(
    report: &WeatherReport,
    settings: &RuntimeSettings,
    now: DateTime<Utc>,
    zone: &Tz,
) -> String
where
    Tz::Offset: fmt::Display,
{
    TextReport {
        report,
        settings,
        now,
        zone,
    }
    .to_string()
}

struct TextReport<'a, Tz: TimeZone> {
    report: &'a WeatherReport,
    settings: &'a RuntimeSettings,
    now: DateTime<Utc>,
    zone: &'a Tz,
}

impl<Tz: TimeZone> fmt::Display for TextReport<'_, Tz>
where
    Tz::Offset: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let current = &report.current;
        let units = self.settings.units;
        let icon_mode = self.settings.icon_mode;
        let local = local_time_at(self.now, current.timezone_offset_secs);
        let presentation = present_at(self.now, &current.condition, current.timezone_offset_secs);

        writeln!(f, "{}", current.display_name())?;
        writeln!(f, "{}  {}", format_clock(local), format_long_date(local))?;
        writeln!(
            f,
            "{} {}{}  {} ({})",
            weather_icon(&current.icon, icon_mode),
            report.current_temp(units),
            units.symbol(),
            capitalize_words(&current.description),
            presentation.category.label(),
        )?;
        for (label, value) in detail_rows(report, units) {
            writeln!(f, "  {label:<12}{value}")?;
        }

        if !report.hourly.is_empty() {
            writeln!(f, "\nNext 24 hours")?;
            for column in hour_columns_in(&report.hourly, units, icon_mode, self.zone) {
                writeln!(
                    f,
                    "  {}  {:<4}{:>5}  {:>4}",
                    column.time, column.icon, column.temp, column.precipitation
                )?;
            }
        }

        if !report.daily.is_empty() {
            writeln!(f, "\n7-day forecast")?;
            for day in &report.daily {
                writeln!(
                    f,
                    "  {:<4}{:<4}{:>5}° /{:>4}°  {}",
                    day_label(day, self.zone),
                    weather_icon(&day.icon, icon_mode),
                    round_temp(convert_temp(day.temperature_min_c, units)),
                    round_temp(convert_temp(day.temperature_max_c, units)),
                    capitalize_words(&day.description),
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cli::IconMode,
        domain::weather::{CurrentConditions, ForecastSample, Units},
    };

    fn report() -> WeatherReport {
        let current = CurrentConditions {
            city: "Reykjavik".to_string(),
            country: Some("IS".to_string()),
            condition: "Clouds".to_string(),
            description: "broken clouds".to_string(),
            icon: "04n".to_string(),
            temperature_c: 1.2,
            feels_like_c: -3.1,
            humidity: 87.0,
            pressure_hpa: 998.0,
            wind_speed_ms: 7.5,
            wind_direction_deg: 225.0,
            visibility_m: Some(10_000.0),
            timezone_offset_secs: 0,
        };
        let samples = (0..10)
            .map(|idx| ForecastSample {
                timestamp: 1_773_446_400 + idx * 10_800,
                temperature_c: idx as f32,
                icon: "04n".to_string(),
                description: "broken clouds".to_string(),
                precipitation_probability: 0.2,
            })
            .collect();
        WeatherReport::assemble(current, samples)
    }

    fn settings() -> RuntimeSettings {
        RuntimeSettings {
            icon_mode: IconMode::Ascii,
            ..RuntimeSettings::default()
        }
    }

    #[test]
    fn report_lists_every_section() {
        // 2026-03-14T22:15:00Z
        let now = DateTime::<Utc>::from_timestamp(1_773_526_500, 0).unwrap();
        let text = render_report(&report(), &settings(), now, &Utc);

        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Reykjavik, IS"));
        assert_eq!(lines.next(), Some("22:15:00  Saturday, March 14, 2026"));
        let headline = lines.next().unwrap();
        assert!(headline.contains("1°C"), "{headline}");
        assert!(headline.contains("Broken Clouds (cloudy-night)"), "{headline}");
        assert!(text.contains("Wind        27 km/h South-West"));
        assert!(text.contains("Visibility  10 km (Moderate)"));
        assert!(text.contains("Next 24 hours"));
        assert_eq!(text.matches("20%").count(), 8);
        assert!(text.contains("  Sat "));
        assert!(text.contains("  Sun "));
    }

    #[test]
    fn report_follows_display_units() {
        let now = DateTime::<Utc>::from_timestamp(1_773_446_400, 0).unwrap();
        let settings = RuntimeSettings {
            units: Units::Fahrenheit,
            ..settings()
        };
        let text = render_report(&report(), &settings, now, &Utc);
        assert!(text.contains("34°F"));
        assert!(text.contains("Feels like  26°F"));
    }

    #[test]
    fn empty_forecast_leaves_out_its_sections() {
        let now = DateTime::<Utc>::from_timestamp(1_773_446_400, 0).unwrap();
        let mut bare = report();
        bare.hourly.clear();
        bare.daily.clear();
        let text = render_report(&bare, &settings(), now, &Utc);

        assert!(text.ends_with('\n'));
        assert!(!text.contains("Next 24 hours"));
        assert!(!text.contains("7-day forecast"));
        assert_eq!(text.lines().count(), 3 + detail_rows(&bare, Units::Celsius).len());
    }
}
