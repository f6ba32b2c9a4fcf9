//! Recognition event stream data types.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Translated text keyed by target language code.
///
/// Keys are bare language codes ("de", "fr"); values are the translation of
/// the source text into that language. Keys are unique and order carries no
/// meaning.
pub type Translations = HashMap<String, String>;

/// Why a recognition stream was canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationReason {
    /// The service or transport failed; code and details accompany the event.
    Error,
    /// The audio input ran out.
    EndOfStream,
    /// The stream was canceled deliberately.
    User,
}

impl fmt::Display for CancellationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancellationReason::Error => write!(f, "error"),
            CancellationReason::EndOfStream => write!(f, "end of stream"),
            CancellationReason::User => write!(f, "user"),
        }
    }
}

/// One event on the recognition stream.
///
/// Events arrive in the exact order the engine produced them. `SessionStarted`
/// and `SessionStopped` are synthesized by the session wrapper around the
/// engine's stream lifecycle; engines emit only the other variants.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionEvent {
    /// Interim hypothesis for the utterance currently being spoken.
    /// Superseded by later partials or by the final result.
    Partial {
        /// Source-language text recognized so far.
        source_text: String,
        /// Interim translations of that text.
        translations: Translations,
    },
    /// Stable result for one complete utterance.
    Final {
        /// Source-language text of the utterance.
        source_text: String,
        /// Final translations of the utterance.
        translations: Translations,
    },
    /// Audio was received but no speech could be recognized in it.
    NoMatch,
    /// The stream was canceled; `error_code` and `error_details` are set when
    /// the reason is an error.
    Canceled {
        reason: CancellationReason,
        error_code: Option<String>,
        error_details: Option<String>,
    },
    /// First event of every session, emitted once recognition is live.
    SessionStarted,
    /// Last event of every session, emitted after the stream ended.
    SessionStopped,
}

impl RecognitionEvent {
    /// Creates a partial (interim) recognition event.
    pub fn recognizing(source_text: impl Into<String>, translations: Translations) -> Self {
        RecognitionEvent::Partial {
            source_text: source_text.into(),
            translations,
        }
    }

    /// Creates a final recognition event.
    pub fn recognized(source_text: impl Into<String>, translations: Translations) -> Self {
        RecognitionEvent::Final {
            source_text: source_text.into(),
            translations,
        }
    }

    /// Creates an error cancellation with the service's code and details.
    pub fn canceled_error(
        error_code: impl Into<String>,
        error_details: impl Into<String>,
    ) -> Self {
        RecognitionEvent::Canceled {
            reason: CancellationReason::Error,
            error_code: Some(error_code.into()),
            error_details: Some(error_details.into()),
        }
    }

    /// Short lowercase label for diagnostics and verbose logs.
    pub fn label(&self) -> &'static str {
        match self {
            RecognitionEvent::Partial { .. } => "partial",
            RecognitionEvent::Final { .. } => "final",
            RecognitionEvent::NoMatch => "no_match",
            RecognitionEvent::Canceled { .. } => "canceled",
            RecognitionEvent::SessionStarted => "session_started",
            RecognitionEvent::SessionStopped => "session_stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr(pairs: &[(&str, &str)]) -> Translations {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_recognizing_constructor() {
        let event = RecognitionEvent::recognizing("こんにちは", tr(&[("de", "Hallo")]));

        match event {
            RecognitionEvent::Partial {
                source_text,
                translations,
            } => {
                assert_eq!(source_text, "こんにちは");
                assert_eq!(translations.get("de").map(String::as_str), Some("Hallo"));
            }
            other => panic!("expected Partial, got {:?}", other),
        }
    }

    #[test]
    fn test_recognized_constructor() {
        let event = RecognitionEvent::recognized("こんにちは世界", tr(&[("de", "Hallo Welt")]));

        match event {
            RecognitionEvent::Final {
                source_text,
                translations,
            } => {
                assert_eq!(source_text, "こんにちは世界");
                assert_eq!(
                    translations.get("de").map(String::as_str),
                    Some("Hallo Welt")
                );
            }
            other => panic!("expected Final, got {:?}", other),
        }
    }

    #[test]
    fn test_canceled_error_constructor() {
        let event = RecognitionEvent::canceled_error("AuthenticationFailure", "401 from service");

        match event {
            RecognitionEvent::Canceled {
                reason,
                error_code,
                error_details,
            } => {
                assert_eq!(reason, CancellationReason::Error);
                assert_eq!(error_code.as_deref(), Some("AuthenticationFailure"));
                assert_eq!(error_details.as_deref(), Some("401 from service"));
            }
            other => panic!("expected Canceled, got {:?}", other),
        }
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(
            RecognitionEvent::recognizing("a", Translations::new()).label(),
            "partial"
        );
        assert_eq!(
            RecognitionEvent::recognized("a", Translations::new()).label(),
            "final"
        );
        assert_eq!(RecognitionEvent::NoMatch.label(), "no_match");
        assert_eq!(RecognitionEvent::SessionStarted.label(), "session_started");
        assert_eq!(RecognitionEvent::SessionStopped.label(), "session_stopped");
    }

    #[test]
    fn test_cancellation_reason_display() {
        assert_eq!(CancellationReason::Error.to_string(), "error");
        assert_eq!(CancellationReason::EndOfStream.to_string(), "end of stream");
        assert_eq!(CancellationReason::User.to_string(), "user");
    }

    #[test]
    fn test_cancellation_reason_serde_round_trip() {
        let json = serde_json::to_string(&CancellationReason::EndOfStream).unwrap();
        assert_eq!(json, "\"end_of_stream\"");
        let back: CancellationReason = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CancellationReason::EndOfStream);
    }

    #[test]
    fn test_events_compare_by_value() {
        let a = RecognitionEvent::recognized("text", tr(&[("de", "Text")]));
        let b = RecognitionEvent::recognized("text", tr(&[("de", "Text")]));
        assert_eq!(a, b);
        assert_ne!(a, RecognitionEvent::NoMatch);
    }
}
