//! Scripted replay engine.
//!
//! Stands in for the external speech-translation service: instead of audio it
//! consumes a session script and emits the scripted events over the same
//! boundary a real client would. Used by the demo binary and by integration
//! tests; a service client plugs in behind the same trait.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify, mpsc};
use tokio::task::JoinHandle;

use crate::defaults;
use crate::engine::translator::{EngineConfig, TranslationEngine};
use crate::error::{ParloError, Result};
use crate::session::event::{CancellationReason, RecognitionEvent, Translations};

/// One line of a session script.
///
/// Scripts are JSON lines, one tagged object per line:
///
/// ```text
/// {"type":"partial","text":"こんにちは","translations":{"de":"Hallo"}}
/// {"type":"final","text":"こんにちは世界","translations":{"de":"Hallo Welt"}}
/// {"type":"no_match"}
/// {"type":"canceled","reason":"error","code":"AuthenticationFailure"}
/// {"type":"pause","ms":500}
/// ```
///
/// Blank lines and lines starting with `#` are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Partial {
        text: String,
        #[serde(default)]
        translations: Translations,
    },
    Final {
        text: String,
        #[serde(default)]
        translations: Translations,
    },
    NoMatch,
    Canceled {
        reason: CancellationReason,
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        details: Option<String>,
    },
    Pause {
        ms: u64,
    },
}

/// Parse a session script, one event per line.
///
/// Errors carry the 1-based line number of the offending line.
pub fn parse_script(source: &str) -> Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|e| ParloError::Script {
            line: index + 1,
            message: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Translation engine that replays a session script.
///
/// Events are paced: explicit `pause` entries sleep their duration, every
/// other entry is preceded by the default pace. Translations are filtered to
/// the configured target languages, the way a real engine only produces the
/// targets it was configured for. The stream ends when the script is
/// exhausted or stop is requested; a stop cuts the replay wherever it stands,
/// mid-wait or mid-delivery, and the rest of the script is abandoned.
pub struct ReplayTranslator {
    script: Vec<ScriptEvent>,
    config: EngineConfig,
    pace: Duration,
    stop: Arc<Notify>,
    emitter: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl ReplayTranslator {
    /// Create a replay engine over an already-parsed script.
    pub fn new(script: Vec<ScriptEvent>, config: EngineConfig) -> Self {
        Self {
            script,
            config,
            pace: Duration::from_millis(defaults::REPLAY_PACE_MS),
            stop: Arc::new(Notify::new()),
            emitter: Arc::new(Mutex::new(None)),
        }
    }

    /// Parse `source` and create a replay engine from it.
    pub fn from_script_str(source: &str, config: EngineConfig) -> Result<Self> {
        Ok(Self::new(parse_script(source)?, config))
    }

    /// Override the default pause applied before unpaced entries.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// The configuration this engine was constructed with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Convert a script entry to its stream event, keeping only translations for
/// the configured targets. `pause` entries produce no event.
fn to_event(entry: ScriptEvent, targets: &[String]) -> Option<RecognitionEvent> {
    let filter = |translations: Translations| -> Translations {
        translations
            .into_iter()
            .filter(|(language, _)| targets.iter().any(|t| t == language))
            .collect()
    };
    match entry {
        ScriptEvent::Partial { text, translations } => Some(RecognitionEvent::Partial {
            source_text: text,
            translations: filter(translations),
        }),
        ScriptEvent::Final { text, translations } => Some(RecognitionEvent::Final {
            source_text: text,
            translations: filter(translations),
        }),
        ScriptEvent::NoMatch => Some(RecognitionEvent::NoMatch),
        ScriptEvent::Canceled {
            reason,
            code,
            details,
        } => Some(RecognitionEvent::Canceled {
            reason,
            error_code: code,
            error_details: details,
        }),
        ScriptEvent::Pause { .. } => None,
    }
}

#[async_trait]
impl TranslationEngine for ReplayTranslator {
    async fn start_continuous(&self, events: mpsc::Sender<RecognitionEvent>) -> Result<()> {
        let script = self.script.clone();
        let targets = self.config.target_languages.clone();
        let pace = self.pace;
        let stop = Arc::clone(&self.stop);

        let handle = tokio::spawn(async move {
            let mut explicitly_paced = false;
            for entry in script {
                let wait = match &entry {
                    ScriptEvent::Pause { ms } => Duration::from_millis(*ms),
                    _ if explicitly_paced => Duration::ZERO,
                    _ => pace,
                };
                if !wait.is_zero() {
                    tokio::select! {
                        _ = tokio::time::sleep(wait) => {}
                        _ = stop.notified() => return,
                    }
                }
                if matches!(entry, ScriptEvent::Pause { .. }) {
                    explicitly_paced = true;
                    continue;
                }
                explicitly_paced = false;
                if let Some(event) = to_event(entry, &targets) {
                    // stop also interrupts a send blocked on a full channel;
                    // undelivered events are abandoned
                    tokio::select! {
                        result = events.send(event) => {
                            if result.is_err() {
                                return;
                            }
                        }
                        _ = stop.notified() => return,
                    }
                }
            }
            // sender drops here, ending the stream
        });
        *self.emitter.lock().await = Some(handle);
        Ok(())
    }

    async fn stop_continuous(&self) -> Result<()> {
        self.stop.notify_one();
        if let Some(handle) = self.emitter.lock().await.take() {
            handle.await.ok();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "replay"
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
    fn test_parse_script_event_forms() {
        let source = concat!(
            "# demo session\n",
            "{\"type\":\"partial\",\"text\":\"こんにちは\",\"translations\":{\"de\":\"Hallo\"}}\n",
            "\n",
            "{\"type\":\"final\",\"text\":\"こんにちは世界\",\"translations\":{\"de\":\"Hallo Welt\"}}\n",
            "{\"type\":\"no_match\"}\n",
            "{\"type\":\"canceled\",\"reason\":\"error\",\"code\":\"AuthenticationFailure\"}\n",
            "{\"type\":\"pause\",\"ms\":500}\n",
        );

        let script = parse_script(source).unwrap();
        assert_eq!(script.len(), 5);
        assert_eq!(
            script[0],
            ScriptEvent::Partial {
                text: "こんにちは".to_string(),
                translations: tr(&[("de", "Hallo")]),
            }
        );
        assert_eq!(script[2], ScriptEvent::NoMatch);
        assert_eq!(
            script[3],
            ScriptEvent::Canceled {
                reason: CancellationReason::Error,
                code: Some("AuthenticationFailure".to_string()),
                details: None,
            }
        );
        assert_eq!(script[4], ScriptEvent::Pause { ms: 500 });
    }

    #[test]
    fn test_parse_script_reports_line_numbers() {
        let source = "{\"type\":\"no_match\"}\n{\"type\":\"bogus\"}\n";

        let error = parse_script(source).unwrap_err();
        match error {
            ParloError::Script { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Script error, got {:?}", other),
        }
    }

    #[test]
    fn test_script_event_serialization_shape() {
        let event = ScriptEvent::Pause { ms: 250 };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, "{\"type\":\"pause\",\"ms\":250}");
    }

    #[tokio::test]
    async fn test_replay_emits_script_in_order() {
        let source = concat!(
            "{\"type\":\"partial\",\"text\":\"こん\",\"translations\":{\"de\":\"Hal\"}}\n",
            "{\"type\":\"final\",\"text\":\"こんにちは\",\"translations\":{\"de\":\"Hallo\"}}\n",
        );
        let engine = ReplayTranslator::from_script_str(source, EngineConfig::default())
            .unwrap()
            .with_pace(Duration::ZERO);

        let (tx, mut rx) = mpsc::channel(8);
        engine.start_continuous(tx).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().label(), "partial");
        assert_eq!(rx.recv().await.unwrap().label(), "final");
        assert!(rx.recv().await.is_none(), "stream ends with the script");
    }

    #[tokio::test]
    async fn test_replay_filters_translations_to_targets() {
        let source =
            "{\"type\":\"final\",\"text\":\"hallo\",\"translations\":{\"de\":\"Hallo\",\"fr\":\"Bonjour\"}}\n";
        let config = EngineConfig {
            target_languages: vec!["de".to_string()],
            ..EngineConfig::default()
        };
        let engine = ReplayTranslator::from_script_str(source, config)
            .unwrap()
            .with_pace(Duration::ZERO);

        let (tx, mut rx) = mpsc::channel(8);
        engine.start_continuous(tx).await.unwrap();

        match rx.recv().await.unwrap() {
            RecognitionEvent::Final { translations, .. } => {
                assert_eq!(translations.len(), 1);
                assert!(translations.contains_key("de"));
            }
            other => panic!("expected Final, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_pause_entries_delay_the_next_event() {
        let source = "{\"type\":\"pause\",\"ms\":60}\n{\"type\":\"no_match\"}\n";
        let engine = ReplayTranslator::from_script_str(source, EngineConfig::default())
            .unwrap()
            .with_pace(Duration::ZERO);

        let (tx, mut rx) = mpsc::channel(8);
        let before = std::time::Instant::now();
        engine.start_continuous(tx).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), RecognitionEvent::NoMatch);
        assert!(before.elapsed() >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_stop_cuts_replay_short() {
        let source = concat!(
            "{\"type\":\"no_match\"}\n",
            "{\"type\":\"pause\",\"ms\":5000}\n",
            "{\"type\":\"final\",\"text\":\"nie\",\"translations\":{\"de\":\"nie\"}}\n",
        );
        let engine = ReplayTranslator::from_script_str(source, EngineConfig::default())
            .unwrap()
            .with_pace(Duration::ZERO);

        let (tx, mut rx) = mpsc::channel(8);
        engine.start_continuous(tx).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), RecognitionEvent::NoMatch);

        // stop lands inside the long pause; the final event never arrives
        engine.stop_continuous().await.unwrap();
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_stop_interrupts_a_blocked_send() {
        // more zero-pace events than the channel holds and nobody consuming:
        // the emitter wedges mid-send, and stop must still get its join back
        let source = "{\"type\":\"no_match\"}\n".repeat(32);
        let engine = ReplayTranslator::from_script_str(&source, EngineConfig::default())
            .unwrap()
            .with_pace(Duration::ZERO);

        let (tx, _rx) = mpsc::channel(1);
        engine.start_continuous(tx).await.unwrap();

        tokio::time::timeout(Duration::from_secs(1), engine.stop_continuous())
            .await
            .expect("stop must not wait for the full channel to drain")
            .unwrap();
    }

    #[test]
    fn test_replay_keeps_its_config() {
        let engine = ReplayTranslator::new(Vec::new(), EngineConfig::default());
        assert_eq!(engine.config().source_language, "ja-JP");
        assert_eq!(engine.name(), "replay");
    }
}
