//! Speech synthesis engine boundary.
//!
//! The external text-to-speech engine sits behind [`Synthesizer`]: text and a
//! voice name go in, audio playback happens on the service side. `speak`
//! resolves only when playback has finished, which is what makes serialized
//! execution observable to the queue above it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::defaults;
use crate::error::{ParloError, Result};
use crate::synthesis::types::SynthesisOutcome;

/// Trait for speech synthesis.
///
/// This trait allows swapping implementations (real service client, paced
/// stand-in, mock). An in-band cancellation is reported through the returned
/// outcome; `Err` means the engine itself failed.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    /// Render `text` with `voice` through the audio output, resolving when
    /// playback finishes.
    async fn speak(&self, text: &str, voice: &str) -> Result<SynthesisOutcome>;

    /// Engine name for diagnostics.
    fn name(&self) -> &str;
}

/// One recorded `speak` call with its execution window.
#[derive(Debug, Clone)]
pub struct SpeakCall {
    pub text: String,
    pub voice: String,
    pub started: Instant,
    pub finished: Instant,
}

/// Mock synthesizer for testing.
///
/// Records every call with its execution window and tracks the peak number
/// of concurrent executions, so tests can assert both what was spoken and
/// that executions never overlapped. Shared state survives cloning.
#[derive(Clone)]
pub struct MockSynthesizer {
    name: String,
    latency: Duration,
    fail_all: bool,
    fail_text: Option<String>,
    cancel_all: bool,
    calls: Arc<Mutex<Vec<SpeakCall>>>,
    active: Arc<AtomicUsize>,
    peak_active: Arc<AtomicUsize>,
}

impl MockSynthesizer {
    /// Create a new mock synthesizer with default settings.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            latency: Duration::ZERO,
            fail_all: false,
            fail_text: None,
            cancel_all: false,
            calls: Arc::new(Mutex::new(Vec::new())),
            active: Arc::new(AtomicUsize::new(0)),
            peak_active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Configure how long each speak call takes.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Configure the mock to fail every call.
    pub fn with_failure(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Configure the mock to fail only calls with this exact text.
    pub fn with_failure_for(mut self, text: &str) -> Self {
        self.fail_text = Some(text.to_string());
        self
    }

    /// Configure the mock to report cancellation for every call.
    pub fn with_cancellation(mut self) -> Self {
        self.cancel_all = true;
        self
    }

    /// All recorded calls in execution order.
    pub fn calls(&self) -> Vec<SpeakCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Peak number of concurrently executing speak calls.
    pub fn peak_active(&self) -> usize {
        self.peak_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Synthesizer for MockSynthesizer {
    async fn speak(&self, text: &str, voice: &str) -> Result<SynthesisOutcome> {
        let started = Instant::now();
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_active.fetch_max(now_active, Ordering::SeqCst);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.active.fetch_sub(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(SpeakCall {
                text: text.to_string(),
                voice: voice.to_string(),
                started,
                finished: Instant::now(),
            });
        }

        let fails = self.fail_all || self.fail_text.as_deref() == Some(text);
        if fails {
            return Err(ParloError::Synthesis {
                message: format!("mock synthesis failure for \"{}\"", text),
            });
        }
        if self.cancel_all {
            return Ok(SynthesisOutcome::Canceled {
                reason: "user".to_string(),
                error_details: None,
            });
        }
        Ok(SynthesisOutcome::Completed)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Synthesizer stand-in that renders nothing but paces itself like a voice.
///
/// Sleeps proportionally to the text length so demo sessions show the same
/// queueing and serialization behavior a real voice would, without an audio
/// device or a service connection.
#[derive(Debug, Clone)]
pub struct PacedSynthesizer {
    chars_per_sec: u64,
}

impl PacedSynthesizer {
    /// Create a paced synthesizer at the default speaking rate.
    pub fn new() -> Self {
        Self {
            chars_per_sec: defaults::PACED_SYNTH_CHARS_PER_SEC,
        }
    }

    /// Configure the simulated speaking rate in characters per second.
    pub fn with_rate(mut self, chars_per_sec: u64) -> Self {
        self.chars_per_sec = chars_per_sec.max(1);
        self
    }

    fn playback_duration(&self, text: &str) -> Duration {
        let chars = text.chars().count() as u64;
        Duration::from_millis(chars * 1000 / self.chars_per_sec)
    }
}

impl Default for PacedSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Synthesizer for PacedSynthesizer {
    async fn speak(&self, text: &str, _voice: &str) -> Result<SynthesisOutcome> {
        tokio::time::sleep(self.playback_duration(text)).await;
        Ok(SynthesisOutcome::Completed)
    }

    fn name(&self) -> &str {
        "paced"
    }
}
