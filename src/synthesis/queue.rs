//! Serialized execution of synthesis requests.
//!
//! A single worker task drains a bounded channel and executes one request at
//! a time, which is what guarantees that at most one synthesis operation is
//! in flight at any instant. Submission only ever waits for channel capacity,
//! never for a synthesis to finish.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::engine::synthesizer::Synthesizer;
use crate::error::{ParloError, Result};
use crate::synthesis::report::SynthesisReporter;
use crate::synthesis::types::{SynthesisOutcome, SynthesisRequest};

/// Owns the synthesis worker and the intake channel.
///
/// Requests already in the channel are executed in submission order. That
/// FIFO behavior is a property of this queue, not a promise of the pipeline:
/// callers that enqueue from concurrent tasks race each other at the intake.
pub struct SynthesisQueue {
    tx: mpsc::Sender<SynthesisRequest>,
    worker: JoinHandle<()>,
}

impl SynthesisQueue {
    /// Spawn the worker. `capacity` bounds how many requests may wait behind
    /// the in-flight one.
    pub fn spawn(
        synthesizer: Arc<dyn Synthesizer>,
        reporter: Arc<dyn SynthesisReporter>,
        capacity: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let worker = tokio::spawn(run_worker(rx, synthesizer, reporter));
        Self { tx, worker }
    }

    /// Enqueue a request and return without waiting for its execution.
    /// Suspends only while the queue is at capacity.
    pub async fn submit(&self, request: SynthesisRequest) -> Result<()> {
        self.tx
            .send(request)
            .await
            .map_err(|_| ParloError::QueueClosed)
    }

    /// A detached intake handle for fire-and-forget submitters.
    pub fn sender(&self) -> mpsc::Sender<SynthesisRequest> {
        self.tx.clone()
    }

    /// Close the intake and wait for already-queued work to finish.
    ///
    /// Outstanding sender clones keep the intake open, so submitters must be
    /// dropped first; work they managed to enqueue is still executed, never
    /// force-killed.
    pub async fn shutdown(self) {
        let SynthesisQueue { tx, worker } = self;
        drop(tx);
        worker.await.ok();
    }
}

async fn run_worker(
    mut rx: mpsc::Receiver<SynthesisRequest>,
    synthesizer: Arc<dyn Synthesizer>,
    reporter: Arc<dyn SynthesisReporter>,
) {
    while let Some(request) = rx.recv().await {
        reporter.speaking(&request);
        let outcome = execute_one(synthesizer.as_ref(), &request).await;
        reporter.finished(&request, &outcome);
    }
}

/// Run one request to completion and classify the result.
///
/// Engine errors are contained here: they become a `Failed` outcome for this
/// request and nothing else.
async fn execute_one(synthesizer: &dyn Synthesizer, request: &SynthesisRequest) -> SynthesisOutcome {
    match synthesizer.speak(&request.text, &request.voice).await {
        Ok(outcome) => outcome,
        Err(error) => SynthesisOutcome::Failed { error },
    }
}
