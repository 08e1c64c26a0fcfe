use std::collections::HashSet;

use regex::Regex;

use crate::config::DEFAULT_JUNK_PATTERN;

/// Number of words kept in a display summary
pub const MAX_SUMMARY_WORDS: usize = 35;

/// Deduplication stops once this many distinct words are kept
pub const MAX_DISTINCT_WORDS: usize = 200;

/// Turns noisy generated summaries into short display strings
///
/// The output is lossy: repeated words are dropped wherever they occur, so it is
/// only fit for display, never for matching.
#[derive(Debug, Clone)]
pub struct SummaryCleaner {
    junk: Regex,
    max_words: usize,
    max_distinct_words: usize,
}

impl SummaryCleaner {
    /// Creates a cleaner that strips every match of `junk_pattern`
    pub fn new(junk_pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            junk: Regex::new(junk_pattern)?,
            max_words: MAX_SUMMARY_WORDS,
            max_distinct_words: MAX_DISTINCT_WORDS,
        })
    }

    pub fn with_default_pattern() -> Self {
        Self::new(DEFAULT_JUNK_PATTERN).expect("default junk pattern is a valid regex")
    }

    /// Cleans `text`. Empty input (or input that is all junk) yields an empty string.
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let trimmed = lowered.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let stripped = self.junk.replace_all(trimmed, " ");

        let mut seen = HashSet::new();
        let mut kept: Vec<&str> = Vec::new();
        for word in stripped.split_whitespace() {
            if kept.len() >= self.max_distinct_words {
                break;
            }
            if seen.insert(word) {
                kept.push(word);
            }
        }

        kept.truncate(self.max_words);
        if kept.is_empty() {
            return String::new();
        }

        format!("{}...", capitalize_first(&kept.join(" ")))
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
