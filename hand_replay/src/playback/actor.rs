//! Replay actor implementation with async message handling.

use super::{
    config::ReplayConfig,
    engine::ReplayEngine,
    errors::{ReplayError, ReplayResult},
    messages::ReplayMessage,
    state_machine::{Command, PlaybackSpeed, PlaybackState},
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{Instant, sleep_until},
};

/// Replay actor handle for sending commands
#[derive(Clone, Debug)]
pub struct ReplayHandle {
    sender: mpsc::Sender<ReplayMessage>,
    state: watch::Receiver<PlaybackState>,
}

impl ReplayHandle {
    /// Send a playback command
    pub async fn send(&self, command: Command) -> ReplayResult<()> {
        self.sender
            .send(ReplayMessage::Command(command))
            .await
            .map_err(|_| ReplayError::Closed)
    }

    pub async fn play(&self) -> ReplayResult<()> {
        self.send(Command::Play).await
    }

    pub async fn pause(&self) -> ReplayResult<()> {
        self.send(Command::Pause).await
    }

    pub async fn stop(&self) -> ReplayResult<()> {
        self.send(Command::Stop).await
    }

    pub async fn step_forward(&self) -> ReplayResult<()> {
        self.send(Command::StepForward).await
    }

    pub async fn step_backward(&self) -> ReplayResult<()> {
        self.send(Command::StepBackward).await
    }

    pub async fn set_speed(&self, speed: PlaybackSpeed) -> ReplayResult<()> {
        self.send(Command::SetSpeed(speed)).await
    }

    pub async fn jump_to(&self, index: i64) -> ReplayResult<()> {
        self.send(Command::JumpTo(index)).await
    }

    pub async fn finish(&self) -> ReplayResult<()> {
        self.send(Command::Finish).await
    }

    /// Ask the actor for its state. Ordered after every command sent
    /// before it through this handle.
    pub async fn state(&self) -> ReplayResult<PlaybackState> {
        let (response, receiver) = oneshot::channel();
        self.sender
            .send(ReplayMessage::GetState { response })
            .await
            .map_err(|_| ReplayError::Closed)?;
        receiver.await.map_err(|_| ReplayError::Closed)
    }

    /// Latest published state, without a round trip.
    #[must_use]
    pub fn current(&self) -> PlaybackState {
        *self.state.borrow()
    }

    /// Receiver notified after every state change
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PlaybackState> {
        self.state.clone()
    }

    /// Close the replay
    pub async fn shutdown(&self) -> ReplayResult<()> {
        self.sender
            .send(ReplayMessage::Shutdown)
            .await
            .map_err(|_| ReplayError::Closed)
    }
}

/// Actor running a single replay.
///
/// Each open replay gets its own actor, engine and timer; nothing is
/// shared between replays.
pub struct ReplayActor {
    engine: ReplayEngine,
    inbox: mpsc::Receiver<ReplayMessage>,
    publisher: watch::Sender<PlaybackState>,
}

impl ReplayActor {
    /// Create a new replay actor over `total` actions
    ///
    /// # Returns
    ///
    /// * `(ReplayActor, ReplayHandle)` - Actor and handle for sending commands
    pub fn new(total: usize, config: ReplayConfig) -> (Self, ReplayHandle) {
        let (sender, inbox) = mpsc::channel(64);
        let engine = ReplayEngine::new(total, &config);
        let (publisher, state) = watch::channel(engine.state());

        let actor = Self {
            engine,
            inbox,
            publisher,
        };
        let handle = ReplayHandle { sender, state };

        (actor, handle)
    }

    /// Run the replay actor event loop
    pub async fn run(mut self) {
        log::info!(
            "Replay starting with {} actions",
            self.engine.state().total()
        );

        loop {
            let deadline = self.engine.deadline();
            let token = self.engine.pending_token();

            tokio::select! {
                biased;

                message = self.inbox.recv() => match message {
                    Some(ReplayMessage::Command(command)) => {
                        self.engine.dispatch(command, Instant::now());
                        self.publish();
                    }
                    Some(ReplayMessage::GetState { response }) => {
                        let _ = response.send(self.engine.state());
                    }
                    Some(ReplayMessage::Shutdown) | None => break,
                },

                () = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(token) = token {
                        self.engine.on_timer(token, Instant::now());
                        self.publish();
                    }
                }
            }
        }

        self.engine.teardown();
        log::info!("Replay closed at {}", self.engine.state());
    }

    fn publish(&self) {
        let state = self.engine.state();
        self.publisher.send_if_modified(|current| {
            if *current == state {
                false
            } else {
                *current = state;
                true
            }
        });
    }
}
