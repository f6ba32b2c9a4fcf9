//! parlo - Live speech translation sessions
//!
//! Recognizes speech in one language, translates it into several, and speaks
//! one chosen translation aloud, one utterance at a time.

// Error handling discipline: no unwrap/expect outside tests
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod engine;
pub mod error;
pub mod output;
pub mod session;
pub mod synthesis;

// Core traits (recognize → translate → speak)
pub use engine::{EngineConfig, Synthesizer, TranslationEngine};

// Session pipeline
pub use session::{
    RecognitionEvent, RecognitionSession, SessionController, SessionState, Translations,
};

// Synthesis side
pub use synthesis::{
    SynthesisDispatcher, SynthesisOutcome, SynthesisQueue, SynthesisReporter, SynthesisRequest,
};

// Error handling
pub use error::{ParloError, Result};

// Config
pub use config::{Config, Credentials};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
