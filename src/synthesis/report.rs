//! Reporting of synthesis progress and outcomes.

use crate::output;
use crate::synthesis::types::{SynthesisOutcome, SynthesisRequest};

/// Trait for observing synthesis executions.
///
/// The queue worker calls `speaking` when a request starts executing and
/// `finished` with the terminal outcome. Outcomes are reported here and
/// nowhere else; a failed request is dropped after the call.
pub trait SynthesisReporter: Send + Sync {
    /// A request has started executing.
    fn speaking(&self, request: &SynthesisRequest);

    /// A request finished with the given outcome.
    fn finished(&self, request: &SynthesisRequest, outcome: &SynthesisOutcome);
}

/// Reporter that renders progress lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter {
    quiet: bool,
}

impl ConsoleReporter {
    /// Create a console reporter; `quiet` suppresses all output.
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl SynthesisReporter for ConsoleReporter {
    fn speaking(&self, request: &SynthesisRequest) {
        if !self.quiet {
            output::render_speaking(request);
        }
    }

    fn finished(&self, _request: &SynthesisRequest, outcome: &SynthesisOutcome) {
        if !self.quiet {
            output::render_synthesis_outcome(outcome);
        }
    }
}
