//! Translation engine boundary.
//!
//! The external speech-translation service sits behind [`TranslationEngine`]:
//! audio goes in on the service side, recognition/translation events come out
//! here. The crate never sees audio; it only consumes the event stream.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify, mpsc};
use tokio::task::JoinHandle;

use crate::defaults;
use crate::error::{ParloError, Result};
use crate::session::event::RecognitionEvent;

/// Options the engine consumes at construction time.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Recognition input language, BCP-47 form ("ja-JP").
    pub source_language: String,
    /// Translation targets, bare language codes ("de").
    pub target_languages: Vec<String>,
    /// Voice name handed to the synthesis side of the service.
    pub voice: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            source_language: defaults::SOURCE_LANGUAGE.to_string(),
            target_languages: vec![defaults::TARGET_LANGUAGE.to_string()],
            voice: defaults::SYNTHESIS_VOICE.to_string(),
        }
    }
}

/// Trait for continuous speech recognition with translation.
///
/// This trait allows swapping implementations (real service client, scripted
/// replay, mock). The engine owns the stream: it pushes events into the
/// channel handed to [`start_continuous`](TranslationEngine::start_continuous)
/// and drops its sender when the stream terminates, which is the only
/// end-of-stream signal.
#[async_trait]
pub trait TranslationEngine: Send + Sync {
    /// Begin continuous recognition, delivering events into `events` in
    /// production order until the stream ends.
    ///
    /// Returns an error if the engine rejects its configuration; in that case
    /// no events are ever delivered.
    async fn start_continuous(&self, events: mpsc::Sender<RecognitionEvent>) -> Result<()>;

    /// Request stream shutdown. Resolves once the engine confirms the stream
    /// has ended; calling it when no stream is active is a no-op.
    ///
    /// Confirmation must not depend on the consumer draining the stream:
    /// events not yet delivered when stop lands may be dropped.
    async fn stop_continuous(&self) -> Result<()>;

    /// Engine name for diagnostics.
    fn name(&self) -> &str;
}

/// Mock translation engine for testing.
///
/// Emits a scripted event sequence on start, optionally spaced by a fixed
/// gap, then either closes the stream or holds it open until
/// `stop_continuous` is called. Call counts are shared across clones so tests
/// can keep a handle for assertions.
#[derive(Clone)]
pub struct MockTranslator {
    name: String,
    events: Vec<RecognitionEvent>,
    event_gap: Option<Duration>,
    hold_open: bool,
    fail_start: bool,
    fail_stop: bool,
    start_calls: Arc<AtomicUsize>,
    stop_calls: Arc<AtomicUsize>,
    stop_requested: Arc<Notify>,
    emitter: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl MockTranslator {
    /// Create a new mock engine with default settings.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            events: Vec::new(),
            event_gap: None,
            hold_open: false,
            fail_start: false,
            fail_stop: false,
            start_calls: Arc::new(AtomicUsize::new(0)),
            stop_calls: Arc::new(AtomicUsize::new(0)),
            stop_requested: Arc::new(Notify::new()),
            emitter: Arc::new(Mutex::new(None)),
        }
    }

    /// Configure the events emitted after start.
    pub fn with_events(mut self, events: Vec<RecognitionEvent>) -> Self {
        self.events = events;
        self
    }

    /// Configure a fixed pause between emitted events.
    pub fn with_event_gap(mut self, gap: Duration) -> Self {
        self.event_gap = Some(gap);
        self
    }

    /// Keep the stream open after the scripted events until stop is called.
    /// Without this the stream closes once the script is exhausted, which
    /// models an engine terminating on its own.
    pub fn with_hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Configure the mock to reject start_continuous.
    pub fn with_start_failure(mut self) -> Self {
        self.fail_start = true;
        self
    }

    /// Configure the mock to fail stop_continuous.
    pub fn with_stop_failure(mut self) -> Self {
        self.fail_stop = true;
        self
    }

    /// Number of times start_continuous was called.
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Number of times stop_continuous was called.
    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationEngine for MockTranslator {
    async fn start_continuous(&self, events: mpsc::Sender<RecognitionEvent>) -> Result<()> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_start {
            return Err(ParloError::Engine {
                message: "mock engine rejected configuration".to_string(),
            });
        }

        let script = self.events.clone();
        let gap = self.event_gap;
        let hold_open = self.hold_open;
        let stop_requested = Arc::clone(&self.stop_requested);
        let handle = tokio::spawn(async move {
            for event in script {
                if let Some(gap) = gap {
                    tokio::time::sleep(gap).await;
                }
                // stop also interrupts a send blocked on a full channel;
                // undelivered events are abandoned
                tokio::select! {
                    result = events.send(event) => {
                        if result.is_err() {
                            return;
                        }
                    }
                    _ = stop_requested.notified() => return,
                }
            }
            if hold_open {
                stop_requested.notified().await;
            }
            // sender drops here, ending the stream
        });
        *self.emitter.lock().await = Some(handle);
        Ok(())
    }

    async fn stop_continuous(&self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_stop {
            return Err(ParloError::Engine {
                message: "mock engine failed to stop".to_string(),
            });
        }
        // notify_one stores a permit, so a stop that lands before the emitter
        // reaches its wait is not lost
        self.stop_requested.notify_one();
        if let Some(handle) = self.emitter.lock().await.take() {
            handle.await.ok();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
