//! Data types for the synthesis side of the pipeline.

use crate::error::ParloError;

/// One utterance to render with one named voice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    /// Text to speak, already in the target language.
    pub text: String,
    /// Service-defined voice name, e.g. "de-DE-KatjaNeural".
    pub voice: String,
}

impl SynthesisRequest {
    /// Creates a new synthesis request.
    pub fn new(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: voice.into(),
        }
    }
}

/// Terminal classification of one synthesis execution.
///
/// Outcomes are reported and then dropped; there is no retry and a failed
/// request never affects any other request.
#[derive(Debug)]
pub enum SynthesisOutcome {
    /// The audio was fully rendered.
    Completed,
    /// The engine reported an in-band cancellation.
    Canceled {
        reason: String,
        error_details: Option<String>,
    },
    /// The engine returned a hard error.
    Failed { error: ParloError },
}

impl SynthesisOutcome {
    /// Short lowercase label for diagnostics and verbose logs.
    pub fn label(&self) -> &'static str {
        match self {
            SynthesisOutcome::Completed => "completed",
            SynthesisOutcome::Canceled { .. } => "canceled",
            SynthesisOutcome::Failed { .. } => "failed",
        }
    }

    /// True when the audio was fully rendered.
    pub fn is_completed(&self) -> bool {
        matches!(self, SynthesisOutcome::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_creation() {
        let request = SynthesisRequest::new("Hallo Welt", "de-DE-KatjaNeural");
        assert_eq!(request.text, "Hallo Welt");
        assert_eq!(request.voice, "de-DE-KatjaNeural");
    }

    #[test]
    fn test_requests_compare_by_value() {
        let a = SynthesisRequest::new("Hallo", "de-DE-KatjaNeural");
        let b = SynthesisRequest::new("Hallo", "de-DE-KatjaNeural");
        let c = SynthesisRequest::new("Hallo", "de-DE-ConradNeural");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(SynthesisOutcome::Completed.label(), "completed");
        assert_eq!(
            SynthesisOutcome::Canceled {
                reason: "user".to_string(),
                error_details: None,
            }
            .label(),
            "canceled"
        );
        assert_eq!(
            SynthesisOutcome::Failed {
                error: ParloError::Synthesis {
                    message: "voice not available".to_string(),
                },
            }
            .label(),
            "failed"
        );
    }

    #[test]
    fn test_is_completed() {
        assert!(SynthesisOutcome::Completed.is_completed());
        assert!(
            !SynthesisOutcome::Canceled {
                reason: "user".to_string(),
                error_details: None,
            }
            .is_completed()
        );
    }
}
