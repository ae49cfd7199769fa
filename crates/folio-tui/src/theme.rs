use ratatui::style::{Color, Modifier, Style};

use folio_core::SubmissionStatus;

/// Color theme for the portfolio surface.
pub struct Theme {
    pub name: &'static str,

    pub text: Color,
    pub dim: Color,
    pub heading: Color,
    pub accent: Color,
    pub border: Color,
    pub highlight_bg: Color,

    pub success: Color,
    pub error: Color,

    pub affordance_fg: Color,
    pub affordance_bg: Color,

    pub footer_fg: Color,
    pub footer_bg: Color,
}

impl Theme {
    /// Light-on-dark slate palette.
    pub fn slate() -> Self {
        Self {
            name: "slate",
            text: Color::Rgb(226, 232, 240),
            dim: Color::Rgb(100, 116, 139),
            heading: Color::White,
            accent: Color::Rgb(56, 189, 248),
            border: Color::Rgb(51, 65, 85),
            highlight_bg: Color::Rgb(30, 41, 59),
            success: Color::Rgb(74, 222, 128),
            error: Color::Rgb(248, 113, 113),
            affordance_fg: Color::White,
            affordance_bg: Color::Rgb(15, 23, 42),
            footer_fg: Color::Rgb(100, 116, 139),
            footer_bg: Color::Reset,
        }
    }

    /// Plain terminal colors, for terminals without truecolor.
    pub fn ink() -> Self {
        Self {
            name: "ink",
            text: Color::White,
            dim: Color::DarkGray,
            heading: Color::Yellow,
            accent: Color::Cyan,
            border: Color::DarkGray,
            highlight_bg: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            affordance_fg: Color::Black,
            affordance_bg: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    /// Look up a theme by name, falling back to slate.
    pub fn by_name(name: &str) -> Self {
        match name {
            "ink" => Self::ink(),
            _ => Self::slate(),
        }
    }

    pub fn status_color(&self, status: &SubmissionStatus) -> Color {
        match status {
            SubmissionStatus::Success(_) => self.success,
            SubmissionStatus::Error(_) => self.error,
            SubmissionStatus::Submitting => self.accent,
            SubmissionStatus::Idle => self.dim,
        }
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }

    pub fn affordance_style(&self) -> Style {
        Style::default()
            .fg(self.affordance_fg)
            .bg(self.affordance_bg)
            .add_modifier(Modifier::BOLD)
    }
}
