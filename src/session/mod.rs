//! Recognition session: event stream, lifecycle, and orchestration.
//!
//! A session turns the engine's continuous recognition into one ordered
//! event stream with a single consumer, and the controller drives that
//! stream through its state machine while feeding final translations to the
//! synthesis side.

pub mod controller;
pub mod event;
pub mod recognition;

pub use controller::{SessionController, SessionState};
pub use event::{CancellationReason, RecognitionEvent, Translations};
pub use recognition::RecognitionSession;
