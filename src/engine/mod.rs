//! Engine boundaries to the external speech-translation service.
//!
//! Recognition and synthesis are black boxes behind traits: the service
//! client, the scripted replay engine, and the mocks are interchangeable
//! from the pipeline's point of view.

pub mod replay;
pub mod synthesizer;
pub mod translator;

pub use replay::{ReplayTranslator, ScriptEvent, parse_script};
pub use synthesizer::{MockSynthesizer, PacedSynthesizer, SpeakCall, Synthesizer};
pub use translator::{EngineConfig, MockTranslator, TranslationEngine};
