//! Routing of final translations into the synthesis queue.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::error::ParloError;
use crate::session::event::RecognitionEvent;
use crate::synthesis::report::SynthesisReporter;
use crate::synthesis::types::{SynthesisOutcome, SynthesisRequest};

/// Forwards qualifying final translations to the synthesis queue.
///
/// Dispatch is fire-and-forget: the enqueue happens on a spawned task, so a
/// queue at capacity can never stall the recognition event loop. A submission
/// that fails because the queue is closed is reported as a failed outcome and
/// goes no further; nothing propagates back to the stream.
pub struct SynthesisDispatcher {
    speak_language: String,
    voice: String,
    queue_tx: mpsc::Sender<SynthesisRequest>,
    reporter: Arc<dyn SynthesisReporter>,
}

impl SynthesisDispatcher {
    /// Create a dispatcher that speaks `speak_language` translations with
    /// `voice`, submitting into `queue_tx`.
    pub fn new(
        speak_language: impl Into<String>,
        voice: impl Into<String>,
        queue_tx: mpsc::Sender<SynthesisRequest>,
        reporter: Arc<dyn SynthesisReporter>,
    ) -> Self {
        Self {
            speak_language: speak_language.into(),
            voice: voice.into(),
            queue_tx,
            reporter,
        }
    }

    /// The request `event` qualifies for, if any.
    ///
    /// Only `Final` events qualify, and only when their translation map
    /// contains the speak language. Translation keys are unique, so an event
    /// produces at most one request.
    pub fn request_for(&self, event: &RecognitionEvent) -> Option<SynthesisRequest> {
        match event {
            RecognitionEvent::Final { translations, .. } => translations
                .get(&self.speak_language)
                .map(|text| SynthesisRequest::new(text, &self.voice)),
            _ => None,
        }
    }

    /// Inspect `event` and submit its qualifying translation, if any.
    /// Returns immediately; the enqueue itself runs on a spawned task.
    pub fn dispatch(&self, event: &RecognitionEvent) {
        let Some(request) = self.request_for(event) else {
            return;
        };
        let tx = self.queue_tx.clone();
        let reporter = Arc::clone(&self.reporter);
        tokio::spawn(async move {
            if tx.send(request.clone()).await.is_err() {
                reporter.finished(
                    &request,
                    &SynthesisOutcome::Failed {
                        error: ParloError::QueueClosed,
                    },
                );
            }
        });
    }
}
