use super::roast::{LiveRoast, RoastResult};
use super::time::RequestId;

/// Where the session is. Lives only in memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Form shown, nothing in flight.
    #[default]
    Idle,
    /// Provider call in flight. Form hidden, loading shown.
    Submitting { request: RequestId },
    /// Result shown, form hidden.
    Ready(LiveRoast),
    /// Error shown and the form is back.
    Failed { message: String },
}

impl SessionPhase {
    pub fn form_visible(&self) -> bool {
        matches!(self, SessionPhase::Idle | SessionPhase::Failed { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionPhase::Submitting { .. })
    }

    pub fn result(&self) -> Option<&LiveRoast> {
        match self {
            SessionPhase::Ready(live) => Some(live),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "Idle",
            SessionPhase::Submitting { .. } => "Submitting",
            SessionPhase::Ready(_) => "Ready",
            SessionPhase::Failed { .. } => "Failed",
        }
    }
}

/// Requests for a phase change. The graph decides whether they apply.
#[derive(Debug, Clone)]
pub enum PhaseRequest {
    Submit(RequestId),
    Succeeded(RequestId, RoastResult),
    Failed(RequestId, String),
    NewRoast,
}

pub struct PhaseGraph;

impl PhaseGraph {
    /// Pure function: (Current Phase, Request) -> New Phase.
    /// `None` means the request is ignored and the phase stays put.
    pub fn transition(current: &SessionPhase, request: PhaseRequest) -> Option<SessionPhase> {
        use SessionPhase::*;

        match (current, request) {
            // Submit only where the form is visible
            (Idle, PhaseRequest::Submit(request)) => Some(Submitting { request }),
            (Failed { .. }, PhaseRequest::Submit(request)) => Some(Submitting { request }),

            // Resolutions only for the request in flight
            (Submitting { request: pending }, PhaseRequest::Succeeded(id, result)) if *pending == id => {
                Some(Ready(LiveRoast { id, result }))
            }
            (Submitting { request: pending }, PhaseRequest::Failed(id, message)) if *pending == id => {
                Some(Failed { message })
            }

            (Ready(_), PhaseRequest::NewRoast) => Some(Idle),
            (Failed { .. }, PhaseRequest::NewRoast) => Some(Idle),

            // Double submits, stale resolutions, resets mid-flight
            _ => None,
        }
    }
}
