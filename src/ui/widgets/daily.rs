use std::ops::Range;

use chrono::{Local, TimeZone};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    domain::weather::{DailySummary, Units, convert_temp, day_name_in, round_temp, weather_icon},
    ui::{
        theme::{Theme, temp_color},
        widgets::panel,
    },
};

const MIN_BAR_WIDTH: usize = 6;

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel(" 7-day forecast ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(report) = &state.weather else {
        return;
    };
    if report.daily.is_empty() {
        return;
    }

    let units = state.settings.units;
    let span = temperature_span(&report.daily);
    // day(4) icon(4) min(5) max(5) plus separators
    let bar_width = usize::from(inner.width)
        .saturating_sub(22)
        .max(MIN_BAR_WIDTH);

    let lines = report
        .daily
        .iter()
        .take(usize::from(inner.height))
        .map(|day| {
            let min = round_temp(convert_temp(day.temperature_min_c, units));
            let max = round_temp(convert_temp(day.temperature_max_c, units));
            let bar = bar_columns(day, span, bar_width);
            let start = bar.start;
            let filled = bar.len().max(1);
            let tail = bar_width.saturating_sub(start + filled);

            Line::from(vec![
                Span::styled(
                    format!("{:<4}", day_label(day, &Local)),
                    Style::default().fg(theme.text),
                ),
                Span::styled(
                    format!("{:<4}", weather_icon(&day.icon, state.settings.icon_mode)),
                    Style::default().fg(theme.accent),
                ),
                Span::styled(
                    format!("{min:>4}° "),
                    Style::default().fg(temp_color(theme, day.temperature_min_c)),
                ),
                Span::styled("─".repeat(start), Style::default().fg(theme.range_track)),
                Span::styled(
                    "━".repeat(filled),
                    Style::default().fg(temp_color(theme, day.temperature_max_c)),
                ),
                Span::styled("─".repeat(tail), Style::default().fg(theme.range_track)),
                Span::styled(
                    format!(" {max:>4}°"),
                    Style::default().fg(temp_color(theme, day.temperature_max_c)),
                ),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), inner);
}

pub fn day_label<Tz: TimeZone>(day: &DailySummary, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    day_name_in(day.timestamp, zone)
}

/// Lowest minimum and highest maximum across the listed days, in Celsius.
#[must_use]
pub fn temperature_span(days: &[DailySummary]) -> (f32, f32) {
    days.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), day| {
        (lo.min(day.temperature_min_c), hi.max(day.temperature_max_c))
    })
}

/// Columns of a `width`-wide track covered by one day, scaled so the
/// week's `span` fills the track. Spans under one degree are widened to one.
#[must_use]
pub fn bar_columns(day: &DailySummary, span: (f32, f32), width: usize) -> Range<usize> {
    let (low, high) = span;
    let scale = width as f32 / (high - low).max(1.0);
    let column = |temp: f32| ((temp - low) * scale).round().clamp(0.0, width as f32) as usize;
    let start = column(day.temperature_min_c);
    start..column(day.temperature_max_c).max(start)
}
