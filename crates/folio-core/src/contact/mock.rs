//! Mock contact transport for testing.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::ContactPayload;
use super::transport::{ContactTransport, TransportError, TransportResponse};

/// A configurable mock response for [`MockTransport`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    /// The request went out; the reply is unreadable.
    Opaque,
    /// A readable reply with the given status and body.
    Readable { status: u16, body: String },
    /// Transport-level failure with the given message (may be empty).
    Fail(String),
}

/// A hand-rolled mock implementing [`ContactTransport`] for tests.
///
/// Supports:
/// - A fixed response (used for every call), **or**
/// - A sequence of responses (one per call, repeating the last if exhausted).
/// - Optional per-call latency.
/// - Call counting and capture of the last payload.
pub struct MockTransport {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    delay: Option<Duration>,
    call_count: AtomicUsize,
    last: Mutex<Option<(String, ContactPayload)>>,
}

impl MockTransport {
    /// Create a mock that always returns `response`.
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            call_count: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Create a mock that returns responses in order, repeating the last one.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(
            !responses.is_empty(),
            "sequence must have at least one response"
        );
        // Reverse so we can pop() from the front cheaply.
        responses.reverse();
        let fallback = responses.first().cloned().unwrap();
        Self {
            responses: Mutex::new(responses),
            fallback,
            delay: None,
            call_count: AtomicUsize::new(0),
            last: Mutex::new(None),
        }
    }

    /// Set simulated network latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// How many times `send()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn last_payload(&self) -> Option<ContactPayload> {
        self.last.lock().unwrap().as_ref().map(|(_, p)| p.clone())
    }

    pub fn last_endpoint(&self) -> Option<String> {
        self.last.lock().unwrap().as_ref().map(|(e, _)| e.clone())
    }

    fn next_response(&self) -> MockResponse {
        let mut seq = self.responses.lock().unwrap();
        if let Some(resp) = seq.pop() {
            resp
        } else {
            self.fallback.clone()
        }
    }
}

impl ContactTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    fn send<'a>(
        &'a self,
        endpoint: &'a str,
        payload: &'a ContactPayload,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some((endpoint.to_string(), payload.clone()));
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }

            match response {
                MockResponse::Opaque => Ok(TransportResponse::Opaque),
                MockResponse::Readable { status, body } => {
                    Ok(TransportResponse::Readable { status, body })
                }
                MockResponse::Fail(msg) => Err(TransportError::Other(msg)),
            }
        })
    }
}
