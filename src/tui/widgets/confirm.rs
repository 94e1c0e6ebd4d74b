//! Shared y/n confirmation dialog used by every destructive action.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::tui::app::centered_rect;
use crate::tui::theme::Theme;

pub fn render_confirm(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    title: &'static str,
    question: Vec<Span<'static>>,
) {
    let modal_area = centered_rect(40, 20, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::from(question),
        Line::raw(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("y/Enter", Style::default().fg(theme.success)),
            Span::raw(" to confirm, "),
            Span::styled("n/Esc", Style::default().fg(theme.error)),
            Span::raw(" to cancel"),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
