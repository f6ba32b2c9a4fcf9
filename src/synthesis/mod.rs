//! Serialized speech synthesis behind the recognition stream.
//!
//! Final translations are routed by the dispatcher into a bounded queue whose
//! single worker executes one synthesis at a time. Failures are classified
//! into per-request outcomes and reported; they never reach the recognition
//! side.

pub mod dispatcher;
pub mod queue;
pub mod report;
pub mod types;

pub use dispatcher::SynthesisDispatcher;
pub use queue::SynthesisQueue;
pub use report::{ConsoleReporter, SynthesisReporter};
pub use types::{SynthesisOutcome, SynthesisRequest};
