use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::{
        CurrentConditions, Units, WeatherReport, ms_to_kmh, visibility_km, visibility_label,
        wind_direction,
    },
    ui::{theme::Theme, widgets::panel},
};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel(" Details ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(report) = &state.weather else {
        return;
    };

    let lines = detail_rows(report, state.settings.units)
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label:<12}"), Style::default().fg(theme.muted_text)),
                Span::styled(value, Style::default().fg(theme.text)),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

/// Label/value pairs shown in the details panel, shared with the plain-text report.
#[must_use]
pub fn detail_rows(report: &WeatherReport, units: Units) -> Vec<(&'static str, String)> {
    let current = &report.current;
    vec![
        ("Feels like", format!("{}{}", report.feels_like(units), units.symbol())),
        ("Humidity", format!("{}%", current.humidity.round() as i32)),
        ("Pressure", format!("{} hPa", current.pressure_hpa.round() as i32)),
        ("Wind", wind_text(current)),
        ("Visibility", visibility_text(current)),
    ]
}

fn wind_text(current: &CurrentConditions) -> String {
    format!(
        "{} km/h {}",
        ms_to_kmh(current.wind_speed_ms),
        wind_direction(current.wind_direction_deg).label()
    )
}

fn visibility_text(current: &CurrentConditions) -> String {
    match current.visibility_m {
        Some(metres) => format!("{} km ({})", visibility_km(metres), visibility_label(metres)),
        None => "n/a".to_string(),
    }
}
