use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect;
use crate::theme::Theme;

/// Render the quit confirmation dialog as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme, submitting: bool) {
    let area = f.area();
    let popup = centered_rect(44, if submitting { 6 } else { 5 }, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Quit folio?",
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        )),
    ];
    if submitting {
        lines.push(Line::from(Span::styled(
            "  A message is still being sent.",
            Style::default().fg(theme.error),
        )));
    }
    lines.push(Line::from(vec![
        Span::styled(
            "  q",
            Style::default().fg(theme.error).add_modifier(Modifier::BOLD),
        ),
        Span::styled(": quit   ", Style::default().fg(theme.dim)),
        Span::styled(
            "Esc",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(": cancel", Style::default().fg(theme.dim)),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(" Confirm Quit "),
    );

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}
