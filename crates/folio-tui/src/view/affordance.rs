use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::app::App;

const WIDTH: u16 = 5;
const HEIGHT: u16 = 3;

/// Where the affordance sits: bottom-right of `area`, inset by one cell.
pub fn placement(area: Rect) -> Option<Rect> {
    if area.width < WIDTH + 2 || area.height < HEIGHT + 1 {
        return None;
    }
    Some(Rect::new(
        area.right() - WIDTH - 2,
        area.bottom() - HEIGHT - 1,
        WIDTH,
        HEIGHT,
    ))
}

/// Draw the floating scroll affordance when the surface says it is visible.
/// Its rect is recorded for click handling; a hidden affordance takes no clicks.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if !app.surface.idle_visible() {
        app.last_affordance_area = None;
        return;
    }
    let Some(rect) = placement(area) else {
        app.last_affordance_area = None;
        return;
    };

    let glyph = app.surface.glyph();
    let style = app.theme.affordance_style();
    let button = Paragraph::new(glyph.symbol())
        .alignment(Alignment::Center)
        .style(style)
        .block(Block::default().borders(Borders::ALL).border_style(style));

    f.render_widget(Clear, rect);
    f.render_widget(button, rect);
    app.last_affordance_area = Some(rect);
}
