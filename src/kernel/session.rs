use tracing::{debug, info};

use super::event::{Event, UserAction};
use super::form::{FormDraft, SubmissionRecord};
use super::phase::{PhaseGraph, PhaseRequest, SessionPhase};
use super::roast::{LiveRoast, RoastResult};
use super::scheduler::{Scheduler, SideEffect};
use super::time::RequestId;
use crate::error::ProviderError;

/// Sequences form -> provider -> presenter. Holds the phase and nothing else.
///
/// Every method is a pure step: it updates the phase and returns the side
/// effects the driver must carry out. Nothing here awaits.
#[derive(Debug)]
pub struct SessionController {
    phase: SessionPhase,
    scheduler: Scheduler,
    next_request: RequestId,
    /// Bumped on every accepted transition.
    pub version: u64,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionController {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Idle,
            scheduler: Scheduler,
            next_request: RequestId::first(),
            version: 0,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn form_visible(&self) -> bool {
        self.phase.form_visible()
    }

    pub fn current_result(&self) -> Option<&LiveRoast> {
        self.phase.result()
    }

    /// Routes session-level events. Presenter actions and timer ticks are not
    /// the controller's business and yield nothing.
    pub fn step(&mut self, event: Event) -> Vec<SideEffect> {
        match event {
            Event::Input(UserAction::Submit(draft)) => self.submit(&draft),
            Event::Input(UserAction::NewRoast) => self.new_roast(),
            Event::RoastResolved(request, outcome) => self.resolve(request, outcome),
            _ => Vec::new(),
        }
    }

    /// Form hand-off. An incomplete draft leaves the submit control inert.
    pub fn submit(&mut self, draft: &FormDraft) -> Vec<SideEffect> {
        let Some(record) = draft.submit() else {
            debug!("Submit ignored: name and age are required");
            return Vec::new();
        };

        let request = self.next_request;
        match PhaseGraph::transition(&self.phase, PhaseRequest::Submit(request)) {
            Some(next) => {
                self.next_request = request.next();
                info!("Submitting roast request {} for {}", request.seq, record.name);
                self.apply(next, Some(&record))
            }
            None => {
                debug!("Submit ignored in phase {}", self.phase.name());
                Vec::new()
            }
        }
    }

    /// Provider completion. Anything not matching the request in flight is dropped.
    pub fn resolve(
        &mut self,
        request: RequestId,
        outcome: Result<RoastResult, ProviderError>,
    ) -> Vec<SideEffect> {
        let phase_request = match outcome {
            Ok(result) => PhaseRequest::Succeeded(request, result),
            Err(e) => PhaseRequest::Failed(request, e.to_string()),
        };

        match PhaseGraph::transition(&self.phase, phase_request) {
            Some(next) => self.apply(next, None),
            None => {
                debug!(
                    "Discarded stale roast response {} in phase {}",
                    request.seq,
                    self.phase.name()
                );
                Vec::new()
            }
        }
    }

    pub fn new_roast(&mut self) -> Vec<SideEffect> {
        match PhaseGraph::transition(&self.phase, PhaseRequest::NewRoast) {
            Some(next) => self.apply(next, None),
            None => Vec::new(),
        }
    }

    fn apply(
        &mut self,
        next: SessionPhase,
        record: Option<&SubmissionRecord>,
    ) -> Vec<SideEffect> {
        let effects = self.scheduler.schedule(&self.phase, &next, record);
        debug!("Phase {} -> {}", self.phase.name(), next.name());
        self.phase = next;
        self.version += 1;
        effects
    }
}
