use folio_core::{ContactPayload, TransportError, TransportResponse};

/// Commands sent from the surface to the backend.
pub enum BackendCommand {
    /// Deliver one accepted contact submission.
    Submit {
        endpoint: String,
        payload: ContactPayload,
    },
}

/// Events flowing from the backend to the surface.
#[derive(Debug)]
pub enum BackendEvent {
    /// The single in-flight submission resolved, one way or another.
    SubmissionFinished(Result<TransportResponse, TransportError>),
}
