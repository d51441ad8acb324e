use std::io::{self, Write};
use tracing::info;

use crate::pipeline::{ProgressSink, RunState, RunStatus};
use crate::transcript::Word;

/// Progress sink that prints the transcript to stdout as it grows
///
/// Words appear one by one as each response is processed; a paragraph break
/// renders as a blank line.
#[derive(Debug, Default)]
pub struct ConsoleRenderer {
    words_printed: bool,
}

impl ConsoleRenderer {
    /// Create a renderer with nothing printed yet
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[allow(clippy::print_stdout)]
impl ProgressSink for ConsoleRenderer {
    fn status_changed(&mut self, status: RunStatus) {
        info!(%status, "run status changed");
        if matches!(status, RunStatus::Complete | RunStatus::Failed) && self.words_printed {
            println!();
        }
    }

    fn word_added(&mut self, word: &Word) {
        if self.words_printed {
            print!(" ");
        }
        print!("{}", word.text);
        self.words_printed = true;
        // Flush so each word is visible before the next fetch starts
        let _ = io::stdout().flush();
    }

    fn paragraph_started(&mut self) {
        if self.words_printed {
            println!();
            println!();
        }
        self.words_printed = false;
    }
}

/// Print the latency summary for a finished (or aborted) run
#[allow(clippy::print_stdout)]
pub fn print_summary(state: &RunState) {
    let transcript = state.transcript();

    let average = transcript.average_latency().map_or_else(
        || "n/a".to_owned(),
        |avg| format!("{:.1}ms", avg.as_secs_f64() * 1000.0),
    );

    println!();
    println!("Status:          {}", state.status());
    println!("Words fetched:   {}", transcript.word_count());
    println!("Average latency: {average}");
    println!(
        "Total run time:  {:.2}s",
        transcript.total_run_time().as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_renderer_tracks_printed_state() {
        let mut renderer = ConsoleRenderer::new();
        assert!(!renderer.words_printed);

        let word = Word {
            index: 0,
            text: "hello".to_owned(),
            duration: Duration::from_millis(5),
        };
        renderer.word_added(&word);
        assert!(renderer.words_printed);

        renderer.paragraph_started();
        assert!(!renderer.words_printed);
    }

    #[test]
    fn test_summary_handles_empty_run() {
        // Smoke test: must not panic on the pre-run display state
        let state = RunState::new(0);
        print_summary(&state);
    }
}
