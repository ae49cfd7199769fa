//! Contact form validation, submission state and outcome interpretation.
//!
//! The pipeline is split so the rendering surface never blocks: [`ContactPipeline::begin`]
//! runs the synchronous checks and hands back a payload to send, and
//! [`ContactPipeline::finish`] folds the transport outcome back into state.
//! [`ContactPipeline::submit`] chains both for callers that can simply await.

#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod transport;

use std::fmt;

use serde::Serialize;

use crate::Config;
use transport::{ContactTransport, TransportError, TransportResponse};

pub const MSG_SENT: &str = "Message sent! I will get back to you soon.";
pub const MSG_MISSING_SECRET: &str = "Missing secret key configuration.";
pub const MSG_EMPTY_FIELDS: &str = "Please fill in all fields before sending.";
pub const MSG_SEND_FAILED: &str = "Failed to send message.";
pub const MSG_GENERIC_FAILURE: &str = "Something went wrong. Please try again later.";

/// Raw form contents as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    /// Honeypot. Never shown to people, so anything in it came from a bot.
    pub website: String,
}

impl ContactForm {
    /// Clear every input.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// JSON body posted to the endpoint.
#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    pub secret: String,
}

impl fmt::Debug for ContactPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContactPayload")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("message_len", &self.message.len())
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Where the current (or last) submission stands.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success(String),
    Error(String),
}

impl SubmissionStatus {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionStatus::Submitting)
    }

    /// Feedback text to display, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Success(m) | SubmissionStatus::Error(m) => Some(m),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }
    }
}

/// Result of the synchronous half of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// A submission is already in flight; nothing happened.
    Ignored,
    /// Honeypot tripped; dropped without feedback.
    Dropped,
    /// Rejected locally; the status now carries the reason.
    Rejected,
    /// Accepted; send this payload exactly once, then call `finish`.
    Dispatch(ContactPayload),
}

pub struct ContactPipeline {
    endpoint: String,
    secret: Option<String>,
    status: SubmissionStatus,
}

impl ContactPipeline {
    pub fn new(endpoint: impl Into<String>, secret: Option<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            // An empty secret is as good as none.
            secret: secret.filter(|s| !s.is_empty()),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.endpoint.clone(), config.secret.clone())
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_submitting(&self) -> bool {
        self.status.is_submitting()
    }

    /// Run the pre-flight checks for a submit intent.
    pub fn begin(&mut self, form: &ContactForm) -> SubmitDecision {
        if self.status.is_submitting() {
            tracing::debug!("contact: submit ignored, already in flight");
            return SubmitDecision::Ignored;
        }

        if !form.website.is_empty() {
            tracing::debug!("contact: honeypot filled, dropping submission");
            return SubmitDecision::Dropped;
        }

        let Some(secret) = self.secret.clone() else {
            tracing::warn!("contact: no secret configured");
            self.status = SubmissionStatus::Error(MSG_MISSING_SECRET.to_string());
            return SubmitDecision::Rejected;
        };

        let name = form.name.trim();
        let email = form.email.trim();
        let message = form.message.trim();
        if name.is_empty() || email.is_empty() || message.is_empty() {
            self.status = SubmissionStatus::Error(MSG_EMPTY_FIELDS.to_string());
            return SubmitDecision::Rejected;
        }

        self.status = SubmissionStatus::Submitting;
        tracing::info!(endpoint = %self.endpoint, "contact: dispatching submission");
        SubmitDecision::Dispatch(ContactPayload {
            name: name.to_string(),
            email: email.to_string(),
            message: message.to_string(),
            secret,
        })
    }

    /// Leave `Submitting` with the status implied by `outcome`. Clears the
    /// form on success.
    pub fn finish(
        &mut self,
        outcome: Result<TransportResponse, TransportError>,
        form: &mut ContactForm,
    ) -> &SubmissionStatus {
        if !self.status.is_submitting() {
            tracing::warn!(status = ?self.status, "contact: outcome arrived with nothing in flight");
            return &self.status;
        }

        self.status = match interpret(outcome) {
            Ok(()) => {
                form.reset();
                tracing::info!("contact: submission delivered");
                SubmissionStatus::Success(MSG_SENT.to_string())
            }
            Err(message) => {
                tracing::warn!(%message, "contact: submission failed");
                SubmissionStatus::Error(message)
            }
        };
        &self.status
    }

    /// Validate, send through `transport`, and record the outcome.
    pub async fn submit(
        &mut self,
        form: &mut ContactForm,
        transport: &dyn ContactTransport,
    ) -> &SubmissionStatus {
        let payload = match self.begin(form) {
            SubmitDecision::Dispatch(payload) => payload,
            _ => return &self.status,
        };
        let outcome = transport.send(&self.endpoint, &payload).await;
        self.finish(outcome, form)
    }
}

/// Map a transport outcome to success or the message to display.
pub fn interpret(outcome: Result<TransportResponse, TransportError>) -> Result<(), String> {
    let (status, body) = match outcome {
        Ok(TransportResponse::Opaque) => return Ok(()),
        Ok(TransportResponse::Readable { status, body }) => (status, body),
        Err(err) => {
            return Err(err.message().unwrap_or_else(|| MSG_GENERIC_FAILURE.to_string()));
        }
    };

    // Unparseable bodies are treated as no result at all.
    let result: Option<serde_json::Value> = serde_json::from_str(&body).ok();
    let server_message = result
        .as_ref()
        .and_then(|r| r.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    if !(200..300).contains(&status) {
        return Err(server_message.unwrap_or_else(|| format!("Request failed ({status}).")));
    }

    let reported = result
        .as_ref()
        .and_then(|r| r.get("status"))
        .and_then(|s| s.as_str());
    if reported != Some("success") {
        return Err(server_message.unwrap_or_else(|| MSG_SEND_FAILED.to_string()));
    }

    Ok(())
}
