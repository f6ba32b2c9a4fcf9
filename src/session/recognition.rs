//! Recognition session lifecycle and event stream.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::defaults;
use crate::engine::translator::TranslationEngine;
use crate::error::{ParloError, Result};
use crate::session::event::RecognitionEvent;

/// Wraps the translation engine's stream behind a start/stop lifecycle.
///
/// `start` returns the single ordered consumer of the stream. The session
/// brackets the engine's events with synthetic `SessionStarted` and
/// `SessionStopped` markers: downstream logic tracks liveness from the stream
/// itself instead of polling state. The receiver yielding `None` is the
/// definitive end of the session.
pub struct RecognitionSession {
    engine: Arc<dyn TranslationEngine>,
    capacity: usize,
    running: bool,
}

impl RecognitionSession {
    /// Create a session over `engine` with the default event buffer.
    pub fn new(engine: Arc<dyn TranslationEngine>) -> Self {
        Self {
            engine,
            capacity: defaults::EVENT_CHANNEL_CAPACITY,
            running: false,
        }
    }

    /// Override the event channel capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    /// Begin continuous recognition and return the event stream.
    ///
    /// Fails with `SessionAlreadyRunning` while a run is active. If the
    /// engine rejects its configuration the error propagates and no stream
    /// exists; the session can be started again afterwards.
    pub async fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>> {
        if self.running {
            return Err(ParloError::SessionAlreadyRunning);
        }

        let (raw_tx, raw_rx) = mpsc::channel(self.capacity);
        let (event_tx, event_rx) = mpsc::channel(self.capacity);
        self.engine.start_continuous(raw_tx).await?;
        tokio::spawn(relay_events(raw_rx, event_tx));
        self.running = true;
        Ok(event_rx)
    }

    /// Request shutdown and wait until the engine confirms the stream ended.
    ///
    /// The synthetic `SessionStopped` is delivered through the stream, not
    /// here; the caller drains the receiver to observe it. Fails with
    /// `SessionNotRunning` when no run is active.
    pub async fn stop(&mut self) -> Result<()> {
        if !self.running {
            return Err(ParloError::SessionNotRunning);
        }
        // one stop per run, even if the engine errors out of it
        self.running = false;
        self.engine.stop_continuous().await
    }

    /// True while a run is active.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Name of the underlying engine, for diagnostics.
    pub fn engine_name(&self) -> &str {
        self.engine.name()
    }
}

/// Bridge the engine's raw channel to the public stream, adding the
/// lifecycle markers. Exits when either side goes away.
async fn relay_events(
    mut raw_rx: mpsc::Receiver<RecognitionEvent>,
    event_tx: mpsc::Sender<RecognitionEvent>,
) {
    if event_tx.send(RecognitionEvent::SessionStarted).await.is_err() {
        return;
    }
    while let Some(event) = raw_rx.recv().await {
        if event_tx.send(event).await.is_err() {
            return;
        }
    }
    event_tx.send(RecognitionEvent::SessionStopped).await.ok();
}
