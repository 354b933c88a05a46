pub mod daily;
pub mod details;
pub mod hero;
pub mod hourly;
pub mod search;

use ratatui::{
    style::Style,
    widgets::{Block, Borders},
};

use crate::ui::theme::Theme;

pub(crate) fn panel(title: &'static str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.border))
}
