//! Optional platform features the presenter leans on.
//!
//! Each capability answers `is_available` before it is asked to act, and every
//! failure comes back as a value. Nothing here may take the session down.

pub mod system;

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::oneshot;

use crate::error::{CapabilityError, ShareError};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceParams {
    /// 1.0 is the engine's normal speed.
    pub rate: f32,
    /// 1.0 is the engine's normal pitch.
    pub pitch: f32,
    /// 0.0 - 1.0
    pub volume: f32,
}

impl Default for VoiceParams {
    fn default() -> Self {
        Self {
            rate: 0.9,
            pitch: 1.2,
            volume: 0.8,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub voice: VoiceParams,
}

/// Resolves once when the utterance ends or is cancelled (`Ok`), or when the
/// engine gave up on it (`Err`).
pub type SpeechDone = oneshot::Receiver<Result<(), CapabilityError>>;

pub trait SpeechCapability: Send + Sync {
    fn is_available(&self) -> bool;
    /// Starts speaking. Any utterance already playing is cut off.
    fn speak(&self, utterance: Utterance) -> Result<SpeechDone, CapabilityError>;
    fn cancel(&self);
}

#[async_trait]
pub trait ClipboardCapability: Send + Sync {
    fn is_available(&self) -> bool;
    async fn write_text(&self, text: &str) -> Result<(), CapabilityError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

#[async_trait]
pub trait ShareCapability: Send + Sync {
    fn is_available(&self) -> bool;
    async fn share(&self, payload: SharePayload) -> Result<(), ShareError>;
}

/// Stand-in for a feature the platform lacks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Missing;

impl SpeechCapability for Missing {
    fn is_available(&self) -> bool {
        false
    }

    fn speak(&self, _utterance: Utterance) -> Result<SpeechDone, CapabilityError> {
        Err(CapabilityError::Unavailable("speech"))
    }

    fn cancel(&self) {}
}

#[async_trait]
impl ClipboardCapability for Missing {
    fn is_available(&self) -> bool {
        false
    }

    async fn write_text(&self, _text: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unavailable("clipboard"))
    }
}

#[async_trait]
impl ShareCapability for Missing {
    fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, _payload: SharePayload) -> Result<(), ShareError> {
        Err(CapabilityError::Unavailable("share").into())
    }
}

/// The set of capabilities handed to the presenter.
#[derive(Clone)]
pub struct Capabilities {
    pub speech: Arc<dyn SpeechCapability>,
    pub clipboard: Arc<dyn ClipboardCapability>,
    pub share: Arc<dyn ShareCapability>,
}

impl Capabilities {
    pub fn none() -> Self {
        Self {
            speech: Arc::new(Missing),
            clipboard: Arc::new(Missing),
            share: Arc::new(Missing),
        }
    }

    /// Looks on the host for speech and clipboard commands. Terminals have no share sheet.
    pub fn detect() -> Self {
        Self {
            speech: Arc::new(system::CommandSpeech::detect()),
            clipboard: Arc::new(system::CommandClipboard::detect()),
            share: Arc::new(Missing),
        }
    }

    pub fn with_speech(mut self, speech: Arc<dyn SpeechCapability>) -> Self {
        self.speech = speech;
        self
    }

    pub fn with_clipboard(mut self, clipboard: Arc<dyn ClipboardCapability>) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn with_share(mut self, share: Arc<dyn ShareCapability>) -> Self {
        self.share = share;
        self
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("speech", &self.speech.is_available())
            .field("clipboard", &self.clipboard.is_available())
            .field("share", &self.share.is_available())
            .finish()
    }
}
