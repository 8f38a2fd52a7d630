use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::event::{Event, UserAction};
use super::notice::Notification;
use super::phase::SessionPhase;
use super::scheduler::SideEffect;
use super::session::SessionController;
use crate::outputs::presenter::{PresenterConfig, ResultPresenter};
use crate::outputs::text::UiUpdate;
use crate::services::capability::Capabilities;
use crate::services::provider::{RoastDispatcher, RoastProvider};

/// Single owner of all session state.
///
/// Other tasks (provider calls, reveal timers, speech waiters, the input
/// reader) only post `Event`s into `receiver`; every state change happens on
/// the task running `run`.
pub struct Reactor {
    pub receiver: mpsc::Receiver<Event>,
    pub controller: SessionController,
    pub presenter: ResultPresenter,
    dispatcher: RoastDispatcher,
    ui: mpsc::UnboundedSender<UiUpdate>,
    /// Provider calls issued so far.
    pub dispatched: u64,
}

impl Reactor {
    pub fn new(
        receiver: mpsc::Receiver<Event>,
        tx: mpsc::Sender<Event>,
        provider: Arc<dyn RoastProvider>,
        capabilities: Capabilities,
        ui: mpsc::UnboundedSender<UiUpdate>,
        config: PresenterConfig,
    ) -> Self {
        Self {
            receiver,
            controller: SessionController::new(),
            presenter: ResultPresenter::new(capabilities, tx.clone(), config),
            dispatcher: RoastDispatcher::new(provider, tx),
            ui,
            dispatched: 0,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        self.controller.phase()
    }

    /// One event, fully applied. Returns `false` once the session should close.
    pub async fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Input(UserAction::Quit) => return false,

            Event::Input(UserAction::TogglePlayback) => {
                if self.presenter.current().is_some() {
                    let notice = self.presenter.toggle_playback();
                    self.emit(UiUpdate::Playback(self.presenter.is_playing()));
                    self.notify(notice);
                }
            }
            Event::Input(UserAction::Copy) => {
                let notice = self.presenter.copy().await;
                self.notify(notice);
            }
            Event::Input(UserAction::Share) => {
                let notice = self.presenter.share().await;
                self.notify(notice);
            }

            Event::RevealStep { result, step } => {
                if let Some((index, text)) = self.presenter.on_reveal_step(result, step) {
                    let update = UiUpdate::Line {
                        index,
                        text: text.to_string(),
                    };
                    self.emit(update);
                }
            }
            Event::PlaybackFinished {
                result,
                utterance,
                error,
            } => {
                if self.presenter.on_playback_finished(result, utterance) {
                    self.emit(UiUpdate::Playback(false));
                    self.notify(error.map(|reason| Notification::speech_failed(&reason)));
                }
            }

            // Submit, NewRoast, RoastResolved
            session_event => {
                let version = self.controller.version;
                let effects = self.controller.step(session_event);
                self.execute(effects);

                if self.controller.version != version {
                    match self.controller.phase() {
                        SessionPhase::Idle | SessionPhase::Failed { .. } => self.emit(UiUpdate::ShowForm),
                        SessionPhase::Submitting { .. } => self.emit(UiUpdate::Loading),
                        SessionPhase::Ready(_) => {}
                    }
                }
            }
        }
        true
    }

    fn execute(&mut self, effects: Vec<SideEffect>) {
        for effect in effects {
            match effect {
                SideEffect::Log(msg) => info!("[SESSION] {}", msg),
                SideEffect::RequestRoast { request, record } => {
                    debug!(
                        "Dispatching request {} to {} provider",
                        request.seq,
                        self.dispatcher.provider_name()
                    );
                    self.dispatched += 1;
                    self.dispatcher.dispatch(request, record);
                }
                SideEffect::ClearResult => self.presenter.clear(),
                SideEffect::Present(live) => {
                    self.emit(UiUpdate::ResultHeader {
                        name: live.result.user_data.name.clone(),
                        intensity: live.result.user_data.roast_intensity,
                        lines: live.result.lines().len(),
                    });
                    self.presenter.present(live);
                }
                SideEffect::Notify(notice) => self.notify(Some(notice)),
            }
        }
    }

    fn emit(&self, update: UiUpdate) {
        // Front end gone is not our problem
        let _ = self.ui.send(update);
    }

    fn notify(&self, notice: Option<Notification>) {
        if let Some(notice) = notice {
            self.emit(UiUpdate::Notice(notice));
        }
    }

    /// Drains events until `Quit`. The reactor holds senders of its own, so the
    /// channel never closes underneath it.
    pub async fn run(&mut self) {
        info!("Session started with {} provider", self.dispatcher.provider_name());
        self.emit(UiUpdate::ShowForm);

        while let Some(event) = self.receiver.recv().await {
            if !self.handle(event).await {
                break;
            }
        }

        self.teardown();
    }

    pub fn teardown(&mut self) {
        self.presenter.teardown();
        self.receiver.close();
        self.emit(UiUpdate::Closed);
        info!("Session closed");
    }
}
