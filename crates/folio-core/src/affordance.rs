use crate::scroll::ScrollMetrics;

/// What the floating affordance asks the surface to do when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAction {
    /// Smooth-scroll back to offset 0.
    ToTop,
    /// Smooth-scroll to the given offset (one viewport further down).
    To(u32),
}

impl ScrollAction {
    /// Destination offset, clamped the way a document clamps overscroll.
    pub fn target(&self, metrics: ScrollMetrics) -> u32 {
        match *self {
            ScrollAction::ToTop => 0,
            ScrollAction::To(offset) => offset.min(metrics.max_offset()),
        }
    }
}

/// Icon shown on the affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    GoToTop,
    ScrollDown,
}

impl Glyph {
    pub fn for_position(at_bottom: bool) -> Self {
        if at_bottom {
            Glyph::GoToTop
        } else {
            Glyph::ScrollDown
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Glyph::GoToTop => "\u{2191}",
            Glyph::ScrollDown => "\u{2193}",
        }
    }

    /// Accessible label.
    pub fn label(&self) -> &'static str {
        match self {
            Glyph::GoToTop => "Back to top",
            Glyph::ScrollDown => "Scroll down",
        }
    }
}

/// Decide the scroll that follows an activation.
pub fn plan_activation(at_bottom: bool, metrics: ScrollMetrics) -> ScrollAction {
    if at_bottom {
        ScrollAction::ToTop
    } else {
        ScrollAction::To(metrics.offset.saturating_add(metrics.viewport_height))
    }
}
