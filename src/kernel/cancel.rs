use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::event::Event;
use super::time::RequestId;

/// Owned handle to the reveal ticker of one result.
///
/// Dropping or cancelling the handle stops the ticker. The ticker also stamps
/// every step with its result id, so the receiver can reject a step that
/// races with cancellation.
#[derive(Debug)]
pub struct RevealTimer {
    result: RequestId,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl RevealTimer {
    /// Emits `steps` ticks for `result`: step 0 immediately, then one per `interval`.
    pub fn start(
        result: RequestId,
        steps: usize,
        interval: Duration,
        tx: mpsc::Sender<Event>,
    ) -> Self {
        let token = CancellationToken::new();
        let child = token.child_token();

        // tokio rejects a zero period
        let interval = interval.max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            let mut cadence = tokio::time::interval(interval);
            cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            for step in 0..steps {
                tokio::select! {
                    biased;
                    _ = child.cancelled() => return,
                    _ = cadence.tick() => {}
                }

                // Receiver gone means the session is torn down
                if tx.send(Event::RevealStep { result, step }).await.is_err() {
                    return;
                }
            }
            debug!("Reveal timer for result {} finished after {} steps", result.seq, steps);
        });

        Self { result, token, task }
    }

    pub fn result(&self) -> RequestId {
        self.result
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    pub fn cancel(&self) {
        self.token.cancel();
        self.task.abort();
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
