use tracing::{debug, trace};

use crate::corpus::Corpus;
use crate::results::MatchResult;

/// Runs `candidates` against `corpus` in order and stops at the first one that occurs.
///
/// The first candidate in the list that appears anywhere wins, even if a later
/// candidate would appear earlier in the corpus. For the winner, the leftmost
/// occurrence is reported. An empty list is simply not found; callers reject
/// empty lists before getting here.
pub fn search(corpus: &Corpus, candidates: &[String]) -> MatchResult {
    for candidate in candidates {
        trace!("Looking for candidate {}", candidate);
        if candidate.is_empty() {
            continue;
        }
        if let Some(position) = corpus.find(candidate) {
            debug!("Candidate {} found at offset {}", candidate, position);
            return MatchResult::Found {
                candidate: candidate.clone(),
                position,
                corpus_len: corpus.len(),
                tried: candidates.to_vec(),
            };
        }
    }

    debug!("None of {} candidates found", candidates.len());
    MatchResult::NotFound {
        tried: candidates.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(digits: &str) -> Corpus {
        Corpus::from_raw(digits).unwrap()
    }

    fn owned(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_first_listed_candidate_wins() {
        // "555" sits at 5, "999" at 11; "999" is listed first
        let digits = corpus("1234055512399900");
        let result = search(&digits, &owned(&["999", "555"]));
        assert_eq!(result.candidate(), Some("999"));
        assert_eq!(result.position(), Some(11));
    }

    #[test]
    fn test_skips_missing_candidates() {
        let digits = corpus("0000055500000000777");
        let result = search(&digits, &owned(&["777777", "555"]));
        assert_eq!(
            result,
            MatchResult::Found {
                candidate: "555".to_string(),
                position: 5,
                corpus_len: 19,
                tried: owned(&["777777", "555"]),
            }
        );
    }

    #[test]
    fn test_reports_leftmost_occurrence() {
        let digits = corpus("12121212");
        let result = search(&digits, &owned(&["21"]));
        assert_eq!(result.position(), Some(1));
    }

    #[test]
    fn test_match_fits_inside_corpus() {
        let digits = corpus("31415926535");
        let result = search(&digits, &owned(&["535"]));
        match result {
            MatchResult::Found {
                candidate,
                position,
                corpus_len,
                ..
            } => {
                assert_eq!(position, 8);
                assert!(position + candidate.len() <= corpus_len);
            }
            other => panic!("expected a match, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_lists_everything_tried() {
        let digits = corpus("31415926535");
        let tried = owned(&["07201991", "7201991", "072091", "72091"]);
        assert_eq!(
            search(&digits, &tried),
            MatchResult::NotFound {
                tried: tried.clone()
            }
        );
    }

    #[test]
    fn test_empty_candidate_list_is_not_found() {
        let digits = corpus("31415926535");
        assert_eq!(search(&digits, &[]), MatchResult::NotFound { tried: vec![] });
    }
}
