#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

use roastme::error::{CapabilityError, ProviderError, ShareError};
use roastme::kernel::form::{FormDraft, FormField, RoastIntensity, SubmissionRecord};
use roastme::kernel::roast::{LiveRoast, RoastResult};
use roastme::kernel::time::RequestId;
use roastme::services::capability::{
    ClipboardCapability, ShareCapability, SharePayload, SpeechCapability, SpeechDone, Utterance,
};
use roastme::services::provider::RoastProvider;

pub fn alex_draft() -> FormDraft {
    FormDraft::new()
        .with(FormField::Name, "Alex")
        .with(FormField::Age, "30")
        .with_intensity(RoastIntensity::Savage)
}

pub fn alex() -> SubmissionRecord {
    alex_draft().submit().expect("complete draft")
}

pub fn live(seq: u64, roast: &str) -> LiveRoast {
    LiveRoast {
        id: RequestId { seq },
        result: RoastResult::new(roast, alex()),
    }
}

// --- Speech ---

pub struct FakeSpeech {
    available: bool,
    pub spoken: Mutex<Vec<Utterance>>,
    pub cancels: AtomicUsize,
    pending: Mutex<Vec<oneshot::Sender<Result<(), CapabilityError>>>>,
}

impl FakeSpeech {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            available: true,
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
            pending: Mutex::new(Vec::new()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            available: false,
            spoken: Mutex::new(Vec::new()),
            cancels: AtomicUsize::new(0),
            pending: Mutex::new(Vec::new()),
        })
    }

    /// Ends the oldest utterance still pending.
    pub fn finish_oldest(&self) {
        self.end_oldest(Ok(()));
    }

    /// The engine gives up on the oldest utterance still pending.
    pub fn fail_oldest(&self, reason: &str) {
        self.end_oldest(Err(CapabilityError::Failed {
            capability: "speech",
            reason: reason.to_string(),
        }));
    }

    fn end_oldest(&self, outcome: Result<(), CapabilityError>) {
        let mut pending = self.pending.lock().unwrap();
        if !pending.is_empty() {
            let done = pending.remove(0);
            let _ = done.send(outcome);
        }
    }

    pub fn spoken_count(&self) -> usize {
        self.spoken.lock().unwrap().len()
    }

    pub fn cancel_count(&self) -> usize {
        self.cancels.load(Ordering::SeqCst)
    }
}

impl SpeechCapability for FakeSpeech {
    fn is_available(&self) -> bool {
        self.available
    }

    fn speak(&self, utterance: Utterance) -> Result<SpeechDone, CapabilityError> {
        if !self.available {
            return Err(CapabilityError::Unavailable("speech"));
        }
        let (tx, rx) = oneshot::channel();
        self.spoken.lock().unwrap().push(utterance);
        self.pending.lock().unwrap().push(tx);
        Ok(rx)
    }

    fn cancel(&self) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
    }
}

// --- Clipboard ---

pub struct FakeClipboard {
    available: bool,
    fail: bool,
    pub writes: Mutex<Vec<String>>,
}

impl FakeClipboard {
    pub fn working() -> Arc<Self> {
        Arc::new(Self { available: true, fail: false, writes: Mutex::new(Vec::new()) })
    }

    pub fn denied() -> Arc<Self> {
        Arc::new(Self { available: true, fail: true, writes: Mutex::new(Vec::new()) })
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClipboardCapability for FakeClipboard {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn write_text(&self, text: &str) -> Result<(), CapabilityError> {
        if self.fail {
            return Err(CapabilityError::Failed {
                capability: "clipboard",
                reason: "permission denied".to_string(),
            });
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

// --- Share ---

#[derive(Clone)]
pub enum ShareBehaviour {
    Accept,
    Cancel,
    Fail,
}

pub struct FakeShare {
    behaviour: ShareBehaviour,
    pub shared: Mutex<Vec<SharePayload>>,
}

impl FakeShare {
    pub fn new(behaviour: ShareBehaviour) -> Arc<Self> {
        Arc::new(Self { behaviour, shared: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl ShareCapability for FakeShare {
    fn is_available(&self) -> bool {
        true
    }

    async fn share(&self, payload: SharePayload) -> Result<(), ShareError> {
        self.shared.lock().unwrap().push(payload);
        match self.behaviour {
            ShareBehaviour::Accept => Ok(()),
            ShareBehaviour::Cancel => Err(ShareError::Cancelled),
            ShareBehaviour::Fail => Err(CapabilityError::Failed {
                capability: "share",
                reason: "sheet crashed".to_string(),
            }
            .into()),
        }
    }
}

// --- Provider ---

pub struct FakeProvider {
    roast: Result<String, ProviderError>,
    delay: Duration,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn returning(roast: &str) -> Arc<Self> {
        Arc::new(Self { roast: Ok(roast.to_string()), delay: Duration::ZERO, calls: AtomicUsize::new(0) })
    }

    pub fn failing(error: ProviderError) -> Arc<Self> {
        Arc::new(Self { roast: Err(error), delay: Duration::ZERO, calls: AtomicUsize::new(0) })
    }

    pub fn slow(roast: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self { roast: Ok(roast.to_string()), delay, calls: AtomicUsize::new(0) })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoastProvider for FakeProvider {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn generate(&self, record: &SubmissionRecord) -> Result<RoastResult, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.roast
            .clone()
            .map(|roast| RoastResult::new(roast, record.clone()))
    }
}
