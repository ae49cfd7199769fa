mod update;

use std::time::Instant;

use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc;

use folio_core::{Config, ContactForm, ScrollMetrics, Surface};

use crate::theme::Theme;
use crate::tui_event::BackendCommand;

/// Input mode determines how keyboard input is interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Browse,
    Form,
}

/// Visible contact form inputs. The honeypot has no entry here: people never
/// see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Email,
            FormField::Email => FormField::Message,
            FormField::Message => FormField::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Name => FormField::Message,
            FormField::Email => FormField::Name,
            FormField::Message => FormField::Email,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Your name",
            FormField::Email => "your@email.com",
            FormField::Message => "Tell me about your project...",
        }
    }

    pub fn value(self, form: &ContactForm) -> &str {
        match self {
            FormField::Name => &form.name,
            FormField::Email => &form.email,
            FormField::Message => &form.message,
        }
    }

    pub fn value_mut(self, form: &mut ContactForm) -> &mut String {
        match self {
            FormField::Name => &mut form.name,
            FormField::Email => &mut form.email,
            FormField::Message => &mut form.message,
        }
    }
}

/// Geometry of the scrolling page.
#[derive(Debug, Clone)]
pub struct Viewport {
    pub width: u16,
    /// Rows available to the page (terminal height minus the footer).
    pub height: u32,
    pub offset: u32,
    pub document_height: u32,
    /// Destination of an in-progress smooth scroll.
    pub scroll_target: Option<u32>,
}

impl Viewport {
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.height, self.offset, self.document_height)
    }

    pub fn max_offset(&self) -> u32 {
        self.metrics().max_offset()
    }
}

/// Rows reserved for the footer bar.
const FOOTER_ROWS: u16 = 1;

/// Main application state.
pub struct App {
    /// Idle, scroll and submission state. Only mutated through its intents.
    pub surface: Surface,
    pub viewport: Viewport,
    pub input_mode: InputMode,
    pub focus: FormField,
    pub theme: Theme,
    pub tick: usize,
    pub should_quit: bool,
    pub confirm_quit: bool,
    pub show_help: bool,
    /// Channel to send commands to the backend listener.
    pub backend_cmd_tx: Option<mpsc::UnboundedSender<BackendCommand>>,
    /// Click targets from the last frame.
    pub last_affordance_area: Option<Rect>,
    pub last_send_area: Option<Rect>,
    pub last_field_areas: Vec<(FormField, Rect)>,
}

impl App {
    pub fn new(config: &Config, theme: Theme, width: u16, height: u16, now: Instant) -> Self {
        let viewport = Viewport {
            width,
            height: u32::from(height.saturating_sub(FOOTER_ROWS)),
            offset: 0,
            document_height: crate::view::page::document_height(&theme, width),
            scroll_target: None,
        };
        let surface = Surface::new(config, viewport.metrics(), now);

        Self {
            surface,
            viewport,
            input_mode: InputMode::Browse,
            focus: FormField::Name,
            theme,
            tick: 0,
            should_quit: false,
            confirm_quit: false,
            show_help: false,
            backend_cmd_tx: None,
            last_affordance_area: None,
            last_send_area: None,
            last_field_areas: Vec::new(),
        }
    }

    // update(), handle_backend_event() and the scroll helpers are in update.rs

    /// Cancel timers before the surface goes away.
    pub fn teardown(&mut self) {
        self.surface.teardown();
        self.viewport.scroll_target = None;
    }

    fn footer_line(&self) -> Line<'static> {
        let dim = Style::default().fg(self.theme.footer_fg);
        let hints = match self.input_mode {
            InputMode::Browse => " j/k scroll  c contact  ? help  q quit",
            InputMode::Form => " Tab next field  Enter next/send  Ctrl+s send  Esc leave form",
        };
        let mut spans = vec![Span::styled(hints, dim)];
        if self.surface.idle_visible() {
            spans.push(Span::styled(
                format!("  Space: {}", self.surface.glyph().label()),
                Style::default().fg(self.theme.accent),
            ));
        }
        Line::from(spans)
    }

    fn footer_right(&self) -> Line<'static> {
        let pct = if self.viewport.max_offset() == 0 {
            100
        } else {
            self.viewport.offset * 100 / self.viewport.max_offset()
        };
        Line::from(Span::styled(
            format!("{pct:>3}% "),
            Style::default().fg(self.theme.footer_fg),
        ))
        .alignment(Alignment::Right)
    }

    /// Render the current frame.
    pub fn view(&mut self, f: &mut ratatui::Frame) {
        let area = f.area();
        if area.width != self.viewport.width
            || u32::from(area.height.saturating_sub(FOOTER_ROWS)) != self.viewport.height
        {
            self.resize(area.width, area.height, Instant::now());
        }

        let footer_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(FOOTER_ROWS),
            width: area.width,
            height: FOOTER_ROWS.min(area.height),
        };
        let page_area = Rect {
            height: area.height.saturating_sub(FOOTER_ROWS),
            ..area
        };

        crate::view::page::render_in(f, self, page_area);
        crate::view::affordance::render(f, self, page_area);

        f.render_widget(
            Paragraph::new(self.footer_line()).style(self.theme.footer_style()),
            footer_area,
        );
        f.render_widget(Paragraph::new(vec![self.footer_right()]), footer_area);

        if self.show_help {
            crate::view::help::render(f, &self.theme);
        }

        if self.confirm_quit {
            crate::view::quit_confirm::render(
                f,
                &self.theme,
                self.surface.submission().is_submitting(),
            );
        }
    }
}

#[cfg(test)]
mod tests;
