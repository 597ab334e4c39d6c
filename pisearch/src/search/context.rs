use crate::corpus::Corpus;
use crate::results::{ContextWindow, FoundMatch, MatchReport, MatchResult};

/// Digits shown on each side of a match unless configured otherwise
pub const DEFAULT_CONTEXT_RADIUS: usize = 25;

/// Slices up to `radius` digits either side of a match, shrinking at the corpus edges
pub fn format_context(
    corpus: &Corpus,
    position: usize,
    matched_len: usize,
    radius: usize,
) -> ContextWindow {
    let end = position + matched_len;
    ContextWindow {
        before: corpus
            .slice(position.saturating_sub(radius)..position)
            .to_string(),
        matched: corpus.slice(position..end).to_string(),
        after: corpus.slice(end..end.saturating_add(radius)).to_string(),
    }
}

/// How far into the corpus `position` lies, in percent
pub fn percentage(position: usize, corpus_len: usize) -> f64 {
    if corpus_len == 0 {
        return 0.0;
    }
    position as f64 / corpus_len as f64 * 100.0
}

/// `percentage` rounded to two decimals for display
pub fn percentage_label(position: usize, corpus_len: usize) -> String {
    format!("{:.2}", percentage(position, corpus_len))
}

/// Enriches a search outcome with its context window and offset
pub fn build_report(corpus: &Corpus, result: MatchResult, radius: usize) -> MatchReport {
    match result {
        MatchResult::Found {
            candidate,
            position,
            corpus_len,
            tried,
        } => {
            let context = format_context(corpus, position, candidate.len(), radius);
            MatchReport::Found(FoundMatch {
                percentage: percentage(position, corpus_len),
                candidate,
                position,
                corpus_len,
                tried,
                context,
            })
        }
        MatchResult::NotFound { tried } => MatchReport::NotFound { tried },
    }
}
