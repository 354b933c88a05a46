use chrono::{Local, TimeZone};
use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Cell, Row, Table},
};

use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::weather::{ForecastSample, Units, convert_temp, hour_label_in, round_temp, weather_icon},
    ui::{
        theme::{Theme, temp_color},
        widgets::panel,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourColumn {
    pub time: String,
    pub icon: &'static str,
    pub temp: String,
    pub precipitation: String,
}

pub fn hour_columns_in<Tz: TimeZone>(
    samples: &[ForecastSample],
    units: Units,
    icon_mode: IconMode,
    zone: &Tz,
) -> Vec<HourColumn>
where
    Tz::Offset: std::fmt::Display,
{
    samples
        .iter()
        .map(|sample| HourColumn {
            time: hour_label_in(sample.timestamp, zone),
            icon: weather_icon(&sample.icon, icon_mode),
            temp: format!("{}°", round_temp(convert_temp(sample.temperature_c, units))),
            precipitation: format!(
                "{}%",
                (sample.precipitation_probability * 100.0).round() as i32
            ),
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel(" Next 24 hours ", theme);
    let Some(report) = &state.weather else {
        frame.render_widget(block, area);
        return;
    };

    let columns = hour_columns_in(
        &report.hourly,
        state.settings.units,
        state.settings.icon_mode,
        &Local,
    );
    if columns.is_empty() {
        frame.render_widget(block, area);
        return;
    }

    let times = Row::new(columns.iter().map(|c| {
        Cell::from(c.time.clone()).style(Style::default().fg(theme.muted_text))
    }));
    let icons = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(c.icon).style(Style::default().fg(theme.accent))),
    );
    let temps = Row::new(report.hourly.iter().zip(&columns).map(|(sample, c)| {
        Cell::from(c.temp.clone()).style(
            Style::default()
                .fg(temp_color(theme, sample.temperature_c))
                .add_modifier(Modifier::BOLD),
        )
    }));
    let precip = Row::new(
        columns
            .iter()
            .map(|c| Cell::from(c.precipitation.clone()).style(Style::default().fg(theme.info))),
    );

    let widths = vec![Constraint::Ratio(1, columns.len() as u32); columns.len()];
    let table = Table::new(vec![times, icons, temps, precip], widths)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    fn sample(timestamp: i64, temperature_c: f32, pop: f32) -> ForecastSample {
        ForecastSample {
            timestamp,
            temperature_c,
            icon: "10n".to_string(),
            description: "light rain".to_string(),
            precipitation_probability: pop,
        }
    }

    #[test]
    fn columns_label_time_in_viewer_zone() {
        // 2026-03-14T23:30Z
        let samples = [sample(1_773_531_000, 11.6, 0.35)];
        let utc = hour_columns_in(&samples, Units::Celsius, IconMode::Ascii, &Utc);
        assert_eq!(
            utc[0],
            HourColumn {
                time: "23:30".to_string(),
                icon: weather_icon("10n", IconMode::Ascii),
                temp: "12°".to_string(),
                precipitation: "35%".to_string(),
            }
        );

        let Some(east) = FixedOffset::east_opt(2 * 3_600) else {
            panic!("valid offset");
        };
        let shifted = hour_columns_in(&samples, Units::Fahrenheit, IconMode::Ascii, &east);
        assert_eq!(shifted[0].time, "01:30");
        assert_eq!(shifted[0].temp, "53°");
    }
}
