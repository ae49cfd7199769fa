/// A snapshot of the viewport geometry, in whatever unit the rendering
/// surface scrolls by (rows in a terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub viewport_height: u32,
    pub offset: u32,
    pub document_height: u32,
}

impl ScrollMetrics {
    pub fn new(viewport_height: u32, offset: u32, document_height: u32) -> Self {
        Self {
            viewport_height,
            offset,
            document_height,
        }
    }

    /// Largest offset that still fills the viewport.
    pub fn max_offset(&self) -> u32 {
        self.document_height.saturating_sub(self.viewport_height)
    }
}

/// `viewport + offset >= document - tolerance`.
pub fn is_at_bottom(metrics: ScrollMetrics, tolerance: u32) -> bool {
    let scrolled = u64::from(metrics.viewport_height) + u64::from(metrics.offset);
    let max_scroll = u64::from(metrics.document_height.saturating_sub(tolerance));
    scrolled >= max_scroll
}

/// Publishes whether the viewport sits at the bottom of the document.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    tolerance: u32,
    at_bottom: bool,
}

impl ScrollTracker {
    /// Create a tracker and compute the initial flag.
    pub fn new(tolerance: u32, metrics: ScrollMetrics) -> Self {
        Self {
            tolerance,
            at_bottom: is_at_bottom(metrics, tolerance),
        }
    }

    pub fn at_bottom(&self) -> bool {
        self.at_bottom
    }

    /// Recompute after a scroll. Returns `true` if the flag changed.
    pub fn update(&mut self, metrics: ScrollMetrics) -> bool {
        let at_bottom = is_at_bottom(metrics, self.tolerance);
        let changed = at_bottom != self.at_bottom;
        self.at_bottom = at_bottom;
        if changed {
            tracing::trace!(at_bottom, offset = metrics.offset, "scroll: bottom flag changed");
        }
        changed
    }
}
