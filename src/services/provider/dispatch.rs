use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::RoastProvider;
use crate::kernel::event::Event;
use crate::kernel::form::SubmissionRecord;
use crate::kernel::time::RequestId;

/// Runs provider calls off the session task and posts the outcome back.
pub struct RoastDispatcher {
    provider: Arc<dyn RoastProvider>,
    tx: mpsc::Sender<Event>,
}

impl RoastDispatcher {
    pub fn new(provider: Arc<dyn RoastProvider>, tx: mpsc::Sender<Event>) -> Self {
        Self { provider, tx }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Fire-and-forget. The outcome comes back as `Event::RoastResolved` tagged with
    /// `request`; the session decides whether it still matters.
    pub fn dispatch(&self, request: RequestId, record: SubmissionRecord) {
        let provider = self.provider.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let outcome = provider.generate(&record).await;
            if let Err(e) = &outcome {
                warn!("Roast request {} failed: {}", request.seq, e);
            }

            // Session gone: nothing to report to
            if tx.send(Event::RoastResolved(request, outcome)).await.is_err() {
                debug!("Roast response {} arrived after teardown", request.seq);
            }
        });
    }
}
