//! Document statistics for editor chrome and CLI reporting.

use serde::{Deserialize, Serialize};

const WORDS_PER_MINUTE: usize = 200;

/// Counters derived from a Markdown source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub words: usize,
    pub characters: usize,
    pub lines: usize,
    /// Estimated reading time at 200 words per minute, rounded up.
    /// Zero only for documents with no words at all.
    pub reading_time_minutes: usize,
}

impl DocumentStats {
    /// Measure a document. Counting is whitespace-based and makes no attempt
    /// to strip Markdown syntax from the word count.
    pub fn measure(text: &str) -> Self {
        let words = count_words(text);
        Self {
            words,
            characters: text.chars().count(),
            lines: count_lines(text),
            reading_time_minutes: estimate_reading_time(words),
        }
    }
}

fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn count_lines(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    text.split('\n').count()
}

fn estimate_reading_time(words: usize) -> usize {
    if words == 0 {
        return 0;
    }
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}
