use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{CapabilityError, ShareError};
use crate::kernel::cancel::RevealTimer;
use crate::kernel::event::Event;
use crate::kernel::notice::Notification;
use crate::kernel::roast::LiveRoast;
use crate::kernel::time::{reveal_interval, RequestId};
use crate::services::capability::{Capabilities, SharePayload, Utterance, VoiceParams};

pub const SHARE_TITLE: &str = "AI Roast Me - I got roasted!";

#[derive(Debug, Clone)]
pub struct PresenterConfig {
    pub reveal_interval: Duration,
    /// Page reference handed to the share sheet.
    pub page_url: String,
    pub voice: VoiceParams,
}

impl Default for PresenterConfig {
    fn default() -> Self {
        Self {
            reveal_interval: reveal_interval(),
            page_url: "http://localhost:3000/".to_string(),
            voice: VoiceParams::default(),
        }
    }
}

/// Presentation state of the one live result.
#[derive(Debug)]
struct Presented {
    live: LiveRoast,
    lines: Vec<String>,
    visible: usize,
    timer: Option<RevealTimer>,
    /// Utterance currently playing, if any.
    playing: Option<u64>,
}

/// Shows a result line by line and offers read-aloud, copy and share over it.
///
/// A function of the live result plus local state (reveal progress, playback).
/// Timers and speech belong to the result they were started for and die with it.
pub struct ResultPresenter {
    capabilities: Capabilities,
    tx: mpsc::Sender<Event>,
    config: PresenterConfig,
    current: Option<Presented>,
    next_utterance: u64,
}

impl ResultPresenter {
    pub fn new(capabilities: Capabilities, tx: mpsc::Sender<Event>, config: PresenterConfig) -> Self {
        Self {
            capabilities,
            tx,
            config,
            current: None,
            next_utterance: 1,
        }
    }

    pub fn current(&self) -> Option<&LiveRoast> {
        self.current.as_ref().map(|p| &p.live)
    }

    pub fn lines(&self) -> &[String] {
        self.current.as_ref().map(|p| p.lines.as_slice()).unwrap_or_default()
    }

    pub fn visible_lines(&self) -> &[String] {
        match &self.current {
            Some(p) => &p.lines[..p.visible],
            None => &[],
        }
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.current
            .as_ref()
            .map(|p| p.visible == p.lines.len())
            .unwrap_or(false)
    }

    pub fn is_playing(&self) -> bool {
        self.current.as_ref().is_some_and(|p| p.playing.is_some())
    }

    /// Whether a reveal timer is still attached to the live result.
    pub fn has_pending_reveal(&self) -> bool {
        self.current
            .as_ref()
            .and_then(|p| p.timer.as_ref())
            .is_some_and(|t| !t.is_finished())
    }

    /// Takes over a new result. Whatever was shown before is torn down first.
    pub fn present(&mut self, live: LiveRoast) {
        self.clear();

        let lines: Vec<String> = live.result.lines().into_iter().map(str::to_string).collect();
        let timer = (!lines.is_empty()).then(|| {
            RevealTimer::start(live.id, lines.len(), self.config.reveal_interval, self.tx.clone())
        });

        info!("Presenting result {} ({} lines)", live.id.seq, lines.len());
        self.current = Some(Presented {
            live,
            lines,
            visible: 0,
            timer,
            playing: None,
        });
    }

    /// Applies one reveal tick. Returns the line it uncovered.
    /// Ticks for any other result, or out of order, are ignored.
    pub fn on_reveal_step(&mut self, result: RequestId, step: usize) -> Option<(usize, &str)> {
        let presented = self.current.as_mut()?;
        if presented.live.id != result {
            debug!("Dropped reveal step {} for stale result {}", step, result.seq);
            return None;
        }
        if step != presented.visible || presented.visible >= presented.lines.len() {
            return None;
        }

        presented.visible += 1;
        if presented.visible == presented.lines.len() {
            presented.timer = None;
        }
        presented
            .lines
            .get(step)
            .map(|line| (step, line.as_str()))
    }

    /// Clears the playing flag if `utterance` is still the one playing.
    /// Returns whether the flag changed.
    pub fn on_playback_finished(&mut self, result: RequestId, utterance: u64) -> bool {
        match self.current.as_mut() {
            Some(p) if p.live.id == result && p.playing == Some(utterance) => {
                p.playing = None;
                true
            }
            _ => false,
        }
    }

    /// Read-aloud toggle: starts speech, or stops it when already playing.
    pub fn toggle_playback(&mut self) -> Option<Notification> {
        let speech = self.capabilities.speech.clone();
        let presented = self.current.as_mut()?;

        if !speech.is_available() {
            return Some(Notification::speech_unsupported());
        }

        if presented.playing.take().is_some() {
            speech.cancel();
            debug!("Playback stopped for result {}", presented.live.id.seq);
            return None;
        }

        let utterance = Utterance {
            text: presented.live.result.roast.clone(),
            voice: self.config.voice,
        };

        match speech.speak(utterance) {
            Ok(done) => {
                let id = self.next_utterance;
                self.next_utterance += 1;
                presented.playing = Some(id);

                let result = presented.live.id;
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let error = match done.await {
                        Ok(Err(e)) => Some(e.to_string()),
                        // Sender dropped counts as finished too
                        Ok(Ok(())) | Err(_) => None,
                    };
                    let _ = tx
                        .send(Event::PlaybackFinished {
                            result,
                            utterance: id,
                            error,
                        })
                        .await;
                });
                None
            }
            Err(CapabilityError::Unavailable(_)) => Some(Notification::speech_unsupported()),
            Err(e) => {
                warn!("Speech failed: {}", e);
                Some(Notification::speech_failed(&e.to_string()))
            }
        }
    }

    /// Copies the full roast text.
    pub async fn copy(&self) -> Option<Notification> {
        let text = &self.current.as_ref()?.live.result.roast;
        let clipboard = &self.capabilities.clipboard;

        if !clipboard.is_available() {
            return Some(Notification::copy_failed());
        }

        match clipboard.write_text(text).await {
            Ok(()) => Some(Notification::copied()),
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                Some(Notification::copy_failed())
            }
        }
    }

    /// Opens the share sheet, or copies when there is none.
    pub async fn share(&self) -> Option<Notification> {
        let presented = self.current.as_ref()?;
        let share = &self.capabilities.share;

        if !share.is_available() {
            debug!("No share capability, copying instead");
            return self.copy().await;
        }

        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: presented.live.result.roast.clone(),
            url: self.config.page_url.clone(),
        };

        match share.share(payload).await {
            Ok(()) => None,
            Err(ShareError::Cancelled) => {
                debug!("Share cancelled");
                None
            }
            Err(ShareError::Capability(CapabilityError::Unavailable(_))) => self.copy().await,
            Err(ShareError::Capability(e)) => {
                warn!("Share failed: {}", e);
                Some(Notification::share_failed(&e.to_string()))
            }
        }
    }

    /// Drops the live result: reveal timer cancelled, speech stopped.
    pub fn clear(&mut self) {
        if let Some(presented) = self.current.take() {
            if let Some(timer) = &presented.timer {
                timer.cancel();
            }
            if presented.playing.is_some() {
                self.capabilities.speech.cancel();
            }
            debug!("Cleared result {}", presented.live.id.seq);
        }
    }

    pub fn teardown(&mut self) {
        self.clear();
    }
}

impl Drop for ResultPresenter {
    fn drop(&mut self) {
        self.clear();
    }
}
