pub mod particles;
pub mod text;
pub mod theme;
pub mod widgets;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

use crate::{
    app::state::AppState,
    ui::theme::{detect_color_capability, theme_for},
};

pub const MIN_WIDTH: u16 = 50;
pub const MIN_HEIGHT: u16 = 22;

const KEY_HINTS: &str = "/ search · r refresh · c/f units · q quit";

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .block(Block::default().borders(Borders::ALL).title("skycast"));
        frame.render_widget(warning, area);
        return;
    }

    let theme = theme_for(state.presentation, detect_color_capability());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(9),
            Constraint::Length(7),
            Constraint::Length(9),
            Constraint::Length(1),
        ])
        .split(area);
    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(0)])
        .split(rows[1]);

    widgets::hero::render(frame, rows[0], state, &theme);
    widgets::details::render(frame, middle[0], state, &theme);
    widgets::hourly::render(frame, middle[1], state, &theme);
    widgets::daily::render(frame, rows[2], state, &theme);
    frame.render_widget(
        Paragraph::new(Line::from(KEY_HINTS)).style(Style::default().fg(theme.muted_text)),
        rows[3],
    );

    if state.search.open {
        widgets::search::render(frame, centered_rect(60, 4, area), state, &theme);
    }
}

/// A `percent_x` wide, `height` tall rectangle centred in `r`.
fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
