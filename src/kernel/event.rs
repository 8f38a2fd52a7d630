use super::form::FormDraft;
use super::roast::RoastResult;
use super::time::RequestId;
use crate::error::ProviderError;

#[derive(Debug, Clone)]
pub enum Event {
    /// Something the user did.
    Input(UserAction),
    /// A provider call finished. Tagged with the request that started it.
    RoastResolved(RequestId, Result<RoastResult, ProviderError>),
    /// The reveal timer for `result` fired its `step`-th tick (0-based).
    RevealStep { result: RequestId, step: usize },
    /// Speech for `result` ended (finished, errored or cut off). `utterance`
    /// tells apart back-to-back playbacks of the same result.
    PlaybackFinished {
        result: RequestId,
        utterance: u64,
        error: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub enum UserAction {
    Submit(FormDraft),
    NewRoast,
    TogglePlayback,
    Copy,
    Share,
    Quit,
}

impl Event {
    pub fn submit(draft: FormDraft) -> Self {
        Event::Input(UserAction::Submit(draft))
    }
}
