//! Session lifecycle orchestration.

use std::fmt;
use std::time::Duration;

use crate::error::{ParloError, Result};
use crate::output;
use crate::session::event::RecognitionEvent;
use crate::session::recognition::RecognitionSession;
use crate::synthesis::dispatcher::SynthesisDispatcher;
use crate::synthesis::queue::SynthesisQueue;

/// How long to keep draining a stream whose engine failed to confirm stop.
const STOP_DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Lifecycle of one controller run.
///
/// Transitions move strictly forward and only the controller performs them.
/// `Stopped` is terminal: a controller is not restartable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    Running,
    StopRequested,
    Stopped,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::NotStarted => write!(f, "not started"),
            SessionState::Running => write!(f, "running"),
            SessionState::StopRequested => write!(f, "stop requested"),
            SessionState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Drives one full session: recognition events in, console lines and
/// serialized synthesis out.
///
/// The controller owns all the moving parts, including the synthesis queue,
/// so a finished run leaves no shared state behind. Shutdown is graceful by
/// construction: the recognition stream is drained to its end and queued
/// synthesis work is allowed to finish or fail on its own terms.
pub struct SessionController {
    session: RecognitionSession,
    dispatcher: Option<SynthesisDispatcher>,
    queue: Option<SynthesisQueue>,
    state: SessionState,
    quiet: bool,
    verbosity: u8,
}

impl SessionController {
    /// Compose a controller from its parts.
    pub fn new(
        session: RecognitionSession,
        dispatcher: SynthesisDispatcher,
        queue: SynthesisQueue,
    ) -> Self {
        Self {
            session,
            dispatcher: Some(dispatcher),
            queue: Some(queue),
            state: SessionState::NotStarted,
            quiet: false,
            verbosity: 0,
        }
    }

    /// Suppress console rendering of events.
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Raise diagnostic detail; 1 logs state transitions, 2 also logs every
    /// event label.
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run one session until `stop_signal` fires or the engine ends the
    /// stream, then shut everything down in order.
    ///
    /// Fails with `SessionAlreadyStopped` when called on a controller that
    /// has already run, and with the engine's error when startup is rejected.
    pub async fn run<F>(&mut self, stop_signal: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        // a failed startup stays NotStarted but consumes the queue, so the
        // queue's presence is part of the rerun guard
        if self.state != SessionState::NotStarted || self.queue.is_none() {
            return Err(ParloError::SessionAlreadyStopped);
        }

        let mut events = match self.session.start().await {
            Ok(events) => events,
            Err(error) => {
                // nothing ran, but the queue worker is already up
                self.settle_queue().await;
                return Err(error);
            }
        };
        self.advance(SessionState::Running);

        tokio::pin!(stop_signal);

        // live phase: route events while watching for the stop trigger
        let engine_ended = loop {
            tokio::select! {
                maybe_event = events.recv() => match maybe_event {
                    Some(event) => self.route(&event),
                    None => break true,
                },
                _ = &mut stop_signal => break false,
            }
        };
        if self.verbosity >= 1 && !self.quiet {
            if engine_ended {
                eprintln!("parlo: engine ended the stream");
            } else {
                eprintln!("parlo: stop requested");
            }
        }

        self.advance(SessionState::StopRequested);
        match self.session.stop().await {
            Ok(()) => {
                // drain to the end of the stream, synthetic stop included
                while let Some(event) = events.recv().await {
                    self.route(&event);
                }
            }
            Err(error) => {
                eprintln!("parlo: engine stop failed: {}", error);
                // the stream may never close now; drain what arrives in time
                tokio::time::timeout(STOP_DRAIN_TIMEOUT, async {
                    while let Some(event) = events.recv().await {
                        self.route(&event);
                    }
                })
                .await
                .ok();
            }
        }
        self.advance(SessionState::Stopped);

        // in-flight and queued synthesis finishes on its own terms
        self.settle_queue().await;
        Ok(())
    }

    /// Render and dispatch one event. Bookkeeping only; never waits on
    /// synthesis.
    fn route(&self, event: &RecognitionEvent) {
        if self.verbosity >= 2 {
            eprintln!("parlo: event {}", event.label());
        }
        if !self.quiet {
            output::render_event(event);
        }
        if let Some(dispatcher) = &self.dispatcher {
            dispatcher.dispatch(event);
        }
    }

    fn advance(&mut self, to: SessionState) {
        if self.verbosity >= 1 && !self.quiet {
            eprintln!("parlo: session state {} -> {}", self.state, to);
        }
        self.state = to;
    }

    /// Close the synthesis intake and wait for queued work to settle.
    async fn settle_queue(&mut self) {
        self.dispatcher = None;
        if let Some(queue) = self.queue.take() {
            queue.shutdown().await;
        }
    }
}
