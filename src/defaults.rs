//! Default configuration constants for parlo.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default source language for recognition.
///
/// Language codes follow the BCP-47 form the speech service expects for
/// recognition input (language plus region, e.g. "ja-JP").
pub const SOURCE_LANGUAGE: &str = "ja-JP";

/// Default translation target language.
///
/// Translation targets use the bare language code form (e.g. "de", "fr"),
/// which is also how they appear as keys in translation maps.
pub const TARGET_LANGUAGE: &str = "de";

/// Default synthesis voice name.
///
/// Voice names are service-defined; this one is a German neural voice that
/// pairs with the default "de" target.
pub const SYNTHESIS_VOICE: &str = "de-DE-KatjaNeural";

/// Recognition event channel capacity.
///
/// Bounds how many undelivered events the session buffers between the engine
/// and the consumer. Recognition events are small and consumed quickly, so a
/// modest buffer absorbs bursts without masking a stuck consumer.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Synthesis queue capacity.
///
/// Bounds how many pending synthesis requests may wait behind the in-flight
/// one. Spoken output runs far behind speech input by nature, so a deep queue
/// only grows latency; requests past this bound wait in their submit task.
pub const SYNTHESIS_QUEUE_CAPACITY: usize = 16;

/// Default pause between replayed script events in milliseconds.
///
/// Applied between entries of a session script that carry no explicit pause,
/// so replayed sessions pace roughly like live speech.
pub const REPLAY_PACE_MS: u64 = 300;

/// Environment variable holding the speech service subscription key.
pub const SPEECH_KEY_VAR: &str = "PARLO_SPEECH_KEY";

/// Environment variable holding the speech service region.
pub const SPEECH_REGION_VAR: &str = "PARLO_SPEECH_REGION";

/// Characters per second simulated by the paced synthesizer.
///
/// Roughly matches unhurried human speech so demo sessions exhibit the same
/// overlap behavior a real voice would.
pub const PACED_SYNTH_CHARS_PER_SEC: u64 = 15;
