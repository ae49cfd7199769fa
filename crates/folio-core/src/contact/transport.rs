//! Delivery of a contact payload to the remote endpoint.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::ContactPayload;
use crate::CoreError;

/// How the response to a submission is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Fire-and-forget: the response is never inspected and any completed
    /// send counts as delivered.
    #[default]
    Opaque,
    /// Read the status and body and let the endpoint decide success.
    Readable,
}

impl ResponseMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "opaque" => Some(ResponseMode::Opaque),
            "readable" => Some(ResponseMode::Readable),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Opaque => "opaque",
            ResponseMode::Readable => "readable",
        }
    }
}

/// What came back from the endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportResponse {
    /// The request went out; nothing about the reply is known.
    Opaque,
    Readable { status: u16, body: String },
}

impl TransportResponse {
    /// Drain a reqwest response into a readable result.
    pub async fn read(resp: reqwest::Response) -> Result<Self, TransportError> {
        let status = resp.status().as_u16();
        let body = resp.text().await?;
        Ok(TransportResponse::Readable { status, body })
    }
}

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// The human-readable failure text, if there is any.
    pub fn message(&self) -> Option<String> {
        let msg = self.to_string();
        if msg.trim().is_empty() { None } else { Some(msg) }
    }
}

/// Sends a contact payload somewhere. Exactly one call per accepted submission.
pub trait ContactTransport: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    fn send<'a>(
        &'a self,
        endpoint: &'a str,
        payload: &'a ContactPayload,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>>;
}

/// Real transport: a single JSON POST over reqwest. No retry, no timeout.
pub struct HttpTransport {
    client: reqwest::Client,
    mode: ResponseMode,
}

impl HttpTransport {
    pub fn new(mode: ResponseMode) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, mode })
    }
}

impl ContactTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    fn send<'a>(
        &'a self,
        endpoint: &'a str,
        payload: &'a ContactPayload,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let resp = self.client.post(endpoint).json(payload).send().await?;

            match self.mode {
                ResponseMode::Opaque => {
                    tracing::debug!(status = resp.status().as_u16(), "response not inspected (opaque mode)");
                    Ok(TransportResponse::Opaque)
                }
                ResponseMode::Readable => TransportResponse::read(resp).await,
            }
        })
    }
}
