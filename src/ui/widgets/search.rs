use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{app::state::AppState, ui::theme::Theme};

pub fn render(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Search city ")
        .style(Style::default().bg(theme.surface))
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(
                state.search.query.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled("_", Style::default().fg(theme.accent)),
        ]),
        Line::from(Span::styled(
            "Enter to search · Esc to cancel",
            Style::default().fg(theme.muted_text),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
