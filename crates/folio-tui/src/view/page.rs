use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::{spinner_char, tail, truncate, wrap};
use crate::app::{App, FormField, InputMode};
use crate::content::{OWNER, ROLE, SECTIONS, TAGLINE};
use crate::theme::Theme;

/// Rows taken by the contact block at the end of the document.
pub const CONTACT_BLOCK_HEIGHT: u32 = 10;
/// Row (within the contact block) of the first form field.
const FIELD_ROW: usize = 3;
/// Row (within the contact block) of the send control.
const SEND_ROW: usize = 7;
const MARGIN: &str = "  ";
const LABEL_WIDTH: usize = 9;

const SEND_LABEL: &str = "[ Send Message ]";

fn text_width(width: u16) -> usize {
    (width as usize).saturating_sub(2 * MARGIN.len()).max(1)
}

fn push_wrapped(lines: &mut Vec<Line<'static>>, text: &str, width: usize, indent: &str, style: Style) {
    for row in wrap(text, width.saturating_sub(indent.len())) {
        lines.push(Line::from(Span::styled(format!("{MARGIN}{indent}{row}"), style)));
    }
}

/// The static part of the page (hero, about, skills, projects) wrapped to `width`.
pub fn static_lines(theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let w = text_width(width);
    let text = Style::default().fg(theme.text);
    let dim = Style::default().fg(theme.dim);
    let mut lines = Vec::new();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(format!("{MARGIN}Hello, I'm"), dim)));
    lines.push(Line::from(Span::styled(
        format!("{MARGIN}{OWNER}"),
        theme.heading_style(),
    )));
    lines.push(Line::from(Span::styled(
        format!("{MARGIN}{ROLE}"),
        Style::default().fg(theme.accent),
    )));
    push_wrapped(&mut lines, TAGLINE, w, "", text);
    lines.push(Line::from(""));

    for section in SECTIONS {
        lines.push(section_rule(section.title, w, theme));
        if !section.lead.is_empty() {
            push_wrapped(&mut lines, section.lead, w, "", dim);
        }
        lines.push(Line::from(""));
        for paragraph in section.paragraphs {
            push_wrapped(&mut lines, paragraph, w, "", text);
            lines.push(Line::from(""));
        }
        for card in section.cards {
            lines.push(Line::from(Span::styled(
                format!("{MARGIN}\u{25B8} {}", card.title),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            )));
            push_wrapped(&mut lines, card.text, w, "  ", text);
            if !card.tags.is_empty() {
                let tags: Vec<String> = card.tags.iter().map(|t| format!("[{t}]")).collect();
                push_wrapped(&mut lines, &tags.join(" "), w, "  ", dim);
            }
            for link in card.links {
                lines.push(Line::from(Span::styled(
                    format!("{MARGIN}  {}", truncate(link, w.saturating_sub(2))),
                    dim.add_modifier(Modifier::UNDERLINED),
                )));
            }
            lines.push(Line::from(""));
        }
    }

    lines
}

fn section_rule(title: &str, width: usize, theme: &Theme) -> Line<'static> {
    let head = format!("\u{2500}\u{2500} {title} ");
    let fill = width.saturating_sub(head.width());
    Line::from(vec![
        Span::styled(format!("{MARGIN}{head}"), theme.heading_style()),
        Span::styled("\u{2500}".repeat(fill), theme.border_style()),
    ])
}

/// Total document height at `width`, in rows.
pub fn document_height(theme: &Theme, width: u16) -> u32 {
    static_lines(theme, width).len() as u32 + CONTACT_BLOCK_HEIGHT
}

/// The contact section: heading, three fields, send control, status line.
/// Always exactly [`CONTACT_BLOCK_HEIGHT`] rows.
pub fn contact_lines(app: &App, width: u16) -> Vec<Line<'static>> {
    let theme = &app.theme;
    let w = text_width(width);
    let dim = Style::default().fg(theme.dim);
    let status = app.surface.submission();

    let mut lines = vec![
        section_rule("Get In Touch", w, theme),
        Line::from(Span::styled(
            format!("{MARGIN}{}", truncate("Have a project in mind? Let's work together.", w)),
            dim,
        )),
        Line::from(""),
    ];

    for field in FormField::ALL {
        lines.push(field_line(app, field, w));
    }

    lines.push(Line::from(""));

    let send = if status.is_submitting() {
        Span::styled(
            format!("{MARGIN}[ {} Sending\u{2026} ]", spinner_char(app.tick)),
            dim,
        )
    } else {
        Span::styled(
            format!("{MARGIN}{SEND_LABEL}"),
            Style::default()
                .fg(theme.affordance_fg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    };
    lines.push(Line::from(send));

    let feedback = status.message().unwrap_or_default();
    lines.push(Line::from(Span::styled(
        format!("{MARGIN}{}", truncate(feedback, w)),
        Style::default().fg(theme.status_color(status)),
    )));
    lines.push(Line::from(""));

    debug_assert_eq!(lines.len() as u32, CONTACT_BLOCK_HEIGHT);
    lines
}

fn field_line(app: &App, field: FormField, width: usize) -> Line<'static> {
    let theme = &app.theme;
    let focused = app.input_mode == InputMode::Form && app.focus == field;
    let value = field.value(app.surface.form());
    let avail = width.saturating_sub(LABEL_WIDTH + 1);

    let label = Span::styled(
        format!("{MARGIN}{:<LABEL_WIDTH$}", field.label()),
        if focused {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text)
        },
    );

    let body = if value.is_empty() && !focused {
        Span::styled(
            truncate(field.placeholder(), avail),
            Style::default().fg(theme.dim),
        )
    } else if focused {
        Span::styled(
            format!("{}\u{258F}", tail(value, avail.saturating_sub(1))),
            theme.highlight_style().fg(theme.text),
        )
    } else {
        Span::styled(tail(value, avail), Style::default().fg(theme.text))
    };

    Line::from(vec![label, body])
}

/// Render the visible slice of the document and record click targets.
pub fn render_in(f: &mut Frame, app: &mut App, area: Rect) {
    let mut lines = static_lines(&app.theme, area.width);
    let contact_start = lines.len();
    lines.extend(contact_lines(app, area.width));

    let offset = app.viewport.offset as usize;
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(offset)
        .take(area.height as usize)
        .collect();
    f.render_widget(Paragraph::new(visible), area);

    // Map document rows to screen rows for mouse hits.
    let row_on_screen = |doc_row: usize| -> Option<u16> {
        let rel = doc_row.checked_sub(offset)?;
        (rel < area.height as usize).then(|| area.y + rel as u16)
    };

    app.last_field_areas.clear();
    for (i, field) in FormField::ALL.into_iter().enumerate() {
        if let Some(y) = row_on_screen(contact_start + FIELD_ROW + i) {
            app.last_field_areas
                .push((field, Rect::new(area.x, y, area.width, 1)));
        }
    }

    app.last_send_area = row_on_screen(contact_start + SEND_ROW).map(|y| {
        let width = (MARGIN.len() + SEND_LABEL.width()) as u16;
        Rect::new(area.x, y, width.min(area.width), 1)
    });
}
