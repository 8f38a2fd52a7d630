use super::form::SubmissionRecord;
use super::notice::Notification;
use super::phase::SessionPhase;
use super::roast::LiveRoast;
use super::time::RequestId;

#[derive(Debug, Default)]
pub struct Scheduler;

/// Work the session asks its driver to do. The session itself never awaits.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    Log(String),
    /// Call the provider once for this request.
    RequestRoast { request: RequestId, record: SubmissionRecord },
    /// Drop whatever result is on screen, along with its timer and speech.
    ClearResult,
    /// Hand a fresh result to the presenter.
    Present(LiveRoast),
    Notify(Notification),
}

impl Scheduler {
    /// Pure Projection: (Previous Phase, Next Phase, Record) -> SideEffects
    pub fn schedule(
        &self,
        previous: &SessionPhase,
        next: &SessionPhase,
        record: Option<&SubmissionRecord>,
    ) -> Vec<SideEffect> {
        let mut effects = Vec::new();

        match next {
            SessionPhase::Submitting { request } => {
                effects.push(SideEffect::ClearResult);
                if let Some(record) = record {
                    effects.push(SideEffect::RequestRoast {
                        request: *request,
                        record: record.clone(),
                    });
                }
            }
            SessionPhase::Ready(live) => {
                effects.push(SideEffect::Present(live.clone()));
                effects.push(SideEffect::Notify(Notification::roast_ready(
                    &live.result.user_data.name,
                )));
            }
            SessionPhase::Failed { message } => {
                effects.push(SideEffect::ClearResult);
                effects.push(SideEffect::Log(format!("Roast request failed: {}", message)));
                effects.push(SideEffect::Notify(Notification::roast_failed()));
            }
            SessionPhase::Idle => {
                if previous.result().is_some() {
                    effects.push(SideEffect::ClearResult);
                }
            }
        }

        effects
    }
}
