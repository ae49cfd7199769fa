use std::sync::Arc;

use folio_core::ContactTransport;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::tui_event::{BackendCommand, BackendEvent};

/// Listen for commands from the surface until the channel closes or
/// `cancel` fires. Each submission runs as its own task so the listener
/// stays responsive while a request is outstanding.
pub async fn run(
    transport: Arc<dyn ContactTransport>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => match cmd {
                Some(cmd) => cmd,
                None => break,
            },
        };

        match cmd {
            BackendCommand::Submit { endpoint, payload } => {
                let transport = Arc::clone(&transport);
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    tracing::debug!(transport = transport.name(), "sending contact submission");
                    let outcome = transport.send(&endpoint, &payload).await;
                    // The surface may already be gone on shutdown.
                    let _ = tx.send(BackendEvent::SubmissionFinished(outcome));
                });
            }
        }
    }
    tracing::debug!("backend listener stopped");
}
