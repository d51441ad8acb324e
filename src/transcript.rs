use std::time::Duration;

/// Sentinel text marking a paragraph boundary in the word stream.
///
/// The sentinel itself is never stored in the transcript and its request
/// duration is not recorded.
pub const PARAGRAPH_BREAK: &str = "**Break**";

/// A single fetched word with its measured round-trip latency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Position in the fetch sequence (0..count)
    pub index: usize,
    /// Word text as returned by the API
    pub text: String,
    /// Wall-clock duration measured around the request
    pub duration: Duration,
}

/// An ordered run of words between paragraph breaks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Words in arrival order
    pub words: Vec<Word>,
}

/// The ordered collection of paragraphs produced by a pipeline run
///
/// Starts with a single empty paragraph and grows monotonically as results
/// arrive. Analytics are derived views recomputed on demand, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    paragraphs: Vec<Paragraph>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Create an empty transcript with one open paragraph
    #[must_use]
    pub fn new() -> Self {
        Self {
            paragraphs: vec![Paragraph::default()],
        }
    }

    /// Record one fetched result.
    ///
    /// A sentinel opens a new empty paragraph and returns `None`; anything
    /// else is appended to the last paragraph and returned as the stored word.
    pub fn record(&mut self, index: usize, text: String, duration: Duration) -> Option<&Word> {
        if text == PARAGRAPH_BREAK {
            self.paragraphs.push(Paragraph::default());
            return None;
        }

        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::default());
        }

        let last = self.paragraphs.last_mut()?;
        last.words.push(Word {
            index,
            text,
            duration,
        });
        last.words.last()
    }

    /// Paragraphs in order, including empty ones
    #[must_use]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All words flattened across paragraphs, preserving order
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.paragraphs.iter().flat_map(|p| p.words.iter())
    }

    /// Number of stored words (sentinels excluded)
    #[must_use]
    pub fn word_count(&self) -> usize {
        self.paragraphs.iter().map(|p| p.words.len()).sum()
    }

    /// Arithmetic mean of all recorded durations
    ///
    /// `None` when no words have been recorded yet (pre-run display state).
    #[must_use]
    pub fn average_latency(&self) -> Option<Duration> {
        let len = u32::try_from(self.word_count()).ok()?;
        if len == 0 {
            return None;
        }
        Some(self.total_run_time() / len)
    }

    /// Sum of all recorded durations
    #[must_use]
    pub fn total_run_time(&self) -> Duration {
        self.words().map(|w| w.duration).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_new_transcript_has_one_empty_paragraph() {
        let transcript = Transcript::new();
        assert_eq!(transcript.paragraphs().len(), 1);
        assert_eq!(transcript.word_count(), 0);
    }

    #[test]
    fn test_record_appends_to_last_paragraph() {
        let mut transcript = Transcript::new();
        let word = transcript.record(0, "hello".to_owned(), ms(10)).unwrap();
        assert_eq!(word.text, "hello");
        assert_eq!(word.index, 0);

        transcript.record(1, "world".to_owned(), ms(20));
        assert_eq!(transcript.paragraphs().len(), 1);
        assert_eq!(transcript.paragraphs()[0].words.len(), 2);
    }

    #[test]
    fn test_sentinel_opens_new_paragraph() {
        let mut transcript = Transcript::new();
        transcript.record(0, "a".to_owned(), ms(5));
        let stored = transcript.record(1, PARAGRAPH_BREAK.to_owned(), ms(5));
        assert!(stored.is_none());
        transcript.record(2, "b".to_owned(), ms(5));

        let texts: Vec<Vec<&str>> = transcript
            .paragraphs()
            .iter()
            .map(|p| p.words.iter().map(|w| w.text.as_str()).collect())
            .collect();
        assert_eq!(texts, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn test_sentinel_never_stored_as_word() {
        let mut transcript = Transcript::new();
        transcript.record(0, PARAGRAPH_BREAK.to_owned(), ms(5));
        assert_eq!(transcript.word_count(), 0);
        assert_eq!(transcript.paragraphs().len(), 2);
    }

    #[test]
    fn test_consecutive_sentinels_produce_empty_paragraphs() {
        let mut transcript = Transcript::new();
        transcript.record(0, "a".to_owned(), ms(5));
        transcript.record(1, PARAGRAPH_BREAK.to_owned(), ms(5));
        transcript.record(2, PARAGRAPH_BREAK.to_owned(), ms(5));
        transcript.record(3, "b".to_owned(), ms(5));

        assert_eq!(transcript.paragraphs().len(), 3);
        assert!(transcript.paragraphs()[1].words.is_empty());
        assert_eq!(transcript.word_count(), 2);
    }

    #[test]
    fn test_words_flatten_preserves_order() {
        let mut transcript = Transcript::new();
        transcript.record(0, "a".to_owned(), ms(1));
        transcript.record(1, PARAGRAPH_BREAK.to_owned(), ms(1));
        transcript.record(2, "b".to_owned(), ms(1));
        transcript.record(3, "c".to_owned(), ms(1));

        let indices: Vec<usize> = transcript.words().map(|w| w.index).collect();
        assert_eq!(indices, vec![0, 2, 3]);
    }

    #[test]
    fn test_average_latency_is_mean_of_durations() {
        let mut transcript = Transcript::new();
        transcript.record(0, "a".to_owned(), ms(10));
        transcript.record(1, "b".to_owned(), ms(20));
        transcript.record(2, "c".to_owned(), ms(30));

        assert_eq!(transcript.average_latency(), Some(ms(20)));
        assert_eq!(transcript.total_run_time(), ms(60));
    }

    #[test]
    fn test_average_latency_undefined_when_empty() {
        let transcript = Transcript::new();
        assert_eq!(transcript.average_latency(), None);
        assert_eq!(transcript.total_run_time(), Duration::ZERO);
    }

    #[test]
    fn test_sentinel_duration_not_counted() {
        let mut transcript = Transcript::new();
        transcript.record(0, "a".to_owned(), ms(10));
        transcript.record(1, PARAGRAPH_BREAK.to_owned(), ms(500));

        assert_eq!(transcript.total_run_time(), ms(10));
        assert_eq!(transcript.average_latency(), Some(ms(10)));
    }
}
