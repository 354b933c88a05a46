use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use crate::{
    app::state::{AppMode, AppState},
    domain::weather::{capitalize_words, format_clock, format_long_date, weather_icon},
    ui::{
        particles::{Particle, ParticleKind},
        theme::{Theme, condition_color, sky_color, temp_color},
        widgets::panel,
    },
};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let bg = SkyBackground {
        theme,
        particles: &state.particles.particles,
        flash: state.particles.flash_active(),
    };
    frame.render_widget(bg, area);

    let block = panel(" skycast ", theme);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match state.mode {
        AppMode::Ready => ready_lines(state, theme),
        AppMode::Loading => {
            let spin = SPINNER[(state.frame_tick / 4) as usize % SPINNER.len()];
            vec![Line::from(Span::styled(
                format!("{spin} {}", state.loading_message),
                Style::default().fg(theme.accent),
            ))]
        }
        AppMode::Error => vec![
            Line::from(Span::styled(
                state.last_error.clone().unwrap_or_default(),
                Style::default()
                    .fg(theme.danger)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Press / to search again",
                Style::default().fg(theme.muted_text),
            )),
        ],
        AppMode::Idle | AppMode::Quit => vec![Line::from(Span::styled(
            "Press / to search for a city",
            Style::default().fg(theme.muted_text),
        ))],
    };

    let top_pad = inner.height.saturating_sub(lines.len() as u16) / 2;
    let text_area = Rect {
        y: inner.y + top_pad,
        height: inner.height.saturating_sub(top_pad),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        text_area,
    );
}

fn ready_lines(state: &AppState, theme: &Theme) -> Vec<Line<'static>> {
    let Some(report) = &state.weather else {
        return Vec::new();
    };
    let current = &report.current;
    let units = state.settings.units;

    let mut lines = vec![Line::from(Span::styled(
        current.display_name(),
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    ))];
    if let Some(local) = state.local_time {
        lines.push(Line::from(Span::styled(
            format_clock(local),
            Style::default().fg(theme.accent),
        )));
        lines.push(Line::from(Span::styled(
            format_long_date(local),
            Style::default().fg(theme.muted_text),
        )));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(
            format!("{}  ", weather_icon(&current.icon, state.settings.icon_mode)),
            Style::default().fg(condition_color(theme, state.presentation.category)),
        ),
        Span::styled(
            format!("{}{}", report.current_temp(units), units.symbol()),
            Style::default()
                .fg(temp_color(theme, current.temperature_c))
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::from(Span::styled(
        capitalize_words(&current.description),
        Style::default().fg(condition_color(theme, state.presentation.category)),
    )));
    lines
}

struct SkyBackground<'a> {
    theme: &'a Theme,
    particles: &'a [Particle],
    flash: bool,
}

impl Widget for SkyBackground<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            let color = if self.flash {
                Color::White
            } else {
                sky_color(self.theme, y - area.y, area.height)
            };
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ").set_bg(color).set_fg(self.theme.text);
                }
            }
        }

        for p in self.particles {
            let x = area.x + (p.x.clamp(0.0, 1.0) * f32::from(area.width)) as u16;
            let y = area.y + (p.y.clamp(0.0, 1.0) * f32::from(area.height)) as u16;
            if x >= area.right() || y >= area.bottom() {
                continue;
            }
            let fg = match p.kind {
                ParticleKind::Star => self.theme.star,
                ParticleKind::Cloud | ParticleKind::Fog => self.theme.cloud,
                ParticleKind::Rain | ParticleKind::Snow => self.theme.particle,
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_char(p.glyph()).set_fg(fg);
            }
        }
    }
}
