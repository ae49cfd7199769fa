use std::time::Duration;

use thiserror::Error;

pub mod affordance;
pub mod config_file;
pub mod contact;
pub mod idle;
pub mod scroll;
pub mod surface;

// Re-export for convenience
pub use affordance::{Glyph, ScrollAction, plan_activation};
pub use contact::transport::{
    ContactTransport, HttpTransport, ResponseMode, TransportError, TransportResponse,
};
pub use contact::{
    ContactForm, ContactPayload, ContactPipeline, SubmissionStatus, SubmitDecision,
};
pub use idle::IdleMonitor;
pub use scroll::{ScrollMetrics, ScrollTracker, is_at_bottom};
pub use surface::Surface;

/// Upstream endpoint the contact form posts to when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbybTAKDzwJP1AcdlqxV-sK6dhcTVx5iCeLqQPyK1oWCF8XSYPoLV-yOSMG4PrxHOypN9Q/exec";

/// Inactivity period after which the scroll affordance is shown.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Slack (in rows/pixels) absorbed when deciding whether the viewport is at the bottom.
pub const DEFAULT_SCROLL_TOLERANCE: u32 = 4;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Resolved runtime configuration for the behavioral core.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the contact form is posted.
    pub endpoint: String,
    /// Shared secret sent with every submission. `None` is a deployment
    /// misconfiguration that the pipeline reports to the user.
    pub secret: Option<String>,
    pub response_mode: ResponseMode,
    pub idle_timeout: Duration,
    pub scroll_tolerance: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            secret: None,
            response_mode: ResponseMode::Opaque,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            scroll_tolerance: DEFAULT_SCROLL_TOLERANCE,
        }
    }
}
