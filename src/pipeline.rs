use std::fmt;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::api::{ApiError, WordApi};
use crate::transcript::{Transcript, Word};

/// Lifecycle of a pipeline run
///
/// Transitions are monotonic: `Ready → Processing → Complete`, with
/// `Failed` reachable only from `Processing`. A run never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Count loaded, pipeline not started
    Ready,
    /// Fetches in progress, exactly one in flight
    Processing,
    /// Final index processed
    Complete,
    /// A fetch failed and the run was aborted
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ready => "ready",
            Self::Processing => "processing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Owned state for one pipeline run
///
/// Mutated in place by [`run`]; no ambient globals. A fresh `RunState` is
/// created per run, so the transcript always starts empty.
#[derive(Debug, Clone)]
pub struct RunState {
    count: usize,
    transcript: Transcript,
    status: RunStatus,
}

impl RunState {
    /// Start a new run for `count` words
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            transcript: Transcript::new(),
            status: RunStatus::Ready,
        }
    }

    /// Upper bound obtained from the count loader
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Transcript built so far (observable mid-run for progressive rendering)
    #[must_use]
    pub const fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Current lifecycle status
    #[must_use]
    pub const fn status(&self) -> RunStatus {
        self.status
    }

    /// Advance the status, enforcing monotonicity
    fn advance(&mut self, next: RunStatus) {
        let allowed = matches!(
            (self.status, next),
            (RunStatus::Ready, RunStatus::Processing)
                | (RunStatus::Processing, RunStatus::Complete | RunStatus::Failed)
        );

        if allowed {
            info!(from = %self.status, to = %next, "status transition");
            self.status = next;
        } else {
            warn!(from = %self.status, to = %next, "ignoring invalid status transition");
        }
    }
}

/// Observer of incremental pipeline updates
///
/// Drives progressive rendering: called after each response is processed,
/// while the run is still in flight.
pub trait ProgressSink {
    /// The run moved to a new lifecycle status
    fn status_changed(&mut self, status: RunStatus);

    /// A word was appended to the current paragraph
    fn word_added(&mut self, word: &Word);

    /// A sentinel arrived and opened a new paragraph
    fn paragraph_started(&mut self);
}

/// A fetch failed partway through a run
#[derive(Debug, Error)]
#[error("fetch for word {index} failed")]
pub struct PipelineError {
    /// Index whose fetch failed
    pub index: usize,
    /// Underlying API error
    #[source]
    pub source: ApiError,
}

/// Run the sequential fetch pipeline to completion.
///
/// Issues one GET per index from 0 to `state.count() - 1`, strictly
/// sequentially: each request starts only after the previous response has
/// been fully processed. Latency measurement depends on this — exactly one
/// request is in flight at any time, so each duration isolates one round
/// trip.
///
/// On the first error the run aborts: status moves to [`RunStatus::Failed`]
/// and the partial transcript remains observable on `state`.
///
/// # Errors
/// Returns [`PipelineError`] naming the failing index; wraps the API error
pub async fn run<A, S>(api: &A, state: &mut RunState, sink: &mut S) -> Result<(), PipelineError>
where
    A: WordApi + ?Sized,
    S: ProgressSink + ?Sized,
{
    state.advance(RunStatus::Processing);
    sink.status_changed(state.status());

    for index in 0..state.count() {
        let started = Instant::now();
        let text = match api.fetch_word(index).await {
            Ok(text) => text,
            Err(source) => {
                state.advance(RunStatus::Failed);
                sink.status_changed(state.status());
                return Err(PipelineError { index, source });
            }
        };
        let duration = started.elapsed();

        debug!(
            index,
            duration_ms = duration.as_millis() as u64,
            "word fetched"
        );

        match state.transcript.record(index, text, duration) {
            Some(word) => sink.word_added(word),
            None => sink.paragraph_started(),
        }
    }

    state.advance(RunStatus::Complete);
    sink.status_changed(state.status());
    Ok(())
}
