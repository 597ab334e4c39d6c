/// Result types handed from the engine to whatever renders them.
///
/// A search either found something or it did not; the two outcomes are separate
/// enum variants rather than one struct with optional fields, so a caller can
/// never read a position off a failed search.
///
/// ```rust,ignore
/// match result {
///     MatchResult::Found { candidate, position, .. } => println!("{candidate} at {position}"),
///     MatchResult::NotFound { tried } => println!("tried {}", tried.join(", ")),
/// }
/// ```
use serde::ser::{Serialize, SerializeStruct, Serializer};

/// Outcome of running a candidate list against the corpus
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    Found {
        /// The candidate that matched
        candidate: String,
        /// Zero-based offset of its leftmost occurrence
        position: usize,
        /// Length of the corpus that was searched
        corpus_len: usize,
        /// Every candidate the request carried, in order
        tried: Vec<String>,
    },
    NotFound {
        tried: Vec<String>,
    },
}

impl MatchResult {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Candidates that were part of the request
    pub fn tried(&self) -> &[String] {
        match self {
            Self::Found { tried, .. } | Self::NotFound { tried } => tried,
        }
    }

    pub fn candidate(&self) -> Option<&str> {
        match self {
            Self::Found { candidate, .. } => Some(candidate),
            Self::NotFound { .. } => None,
        }
    }

    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Found { position, .. } => Some(*position),
            Self::NotFound { .. } => None,
        }
    }
}

/// Digits around a match: at most `radius` before and after, clipped at the edges
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ContextWindow {
    pub before: String,
    #[serde(rename = "match")]
    pub matched: String,
    pub after: String,
}

/// A found match with everything needed for display
#[derive(Debug, Clone, PartialEq)]
pub struct FoundMatch {
    pub candidate: String,
    pub position: usize,
    pub corpus_len: usize,
    pub tried: Vec<String>,
    /// `position / corpus_len * 100`, unrounded
    pub percentage: f64,
    pub context: ContextWindow,
}

impl FoundMatch {
    /// One-based position, the way people count digits
    pub fn display_position(&self) -> usize {
        self.position + 1
    }

    /// Digits after the decimal point; the corpus keeps the leading "3"
    pub fn decimal_digits(&self) -> usize {
        self.corpus_len.saturating_sub(1)
    }

    /// Percentage rounded to two decimals
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage)
    }
}

/// What the presentation layer consumes
#[derive(Debug, Clone, PartialEq)]
pub enum MatchReport {
    Found(FoundMatch),
    NotFound { tried: Vec<String> },
}

impl MatchReport {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn tried(&self) -> &[String] {
        match self {
            Self::Found(found) => &found.tried,
            Self::NotFound { tried } => tried,
        }
    }
}

impl Serialize for MatchReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Found(found) => {
                let mut state = serializer.serialize_struct("MatchReport", 8)?;
                state.serialize_field("found", &true)?;
                state.serialize_field("position", &found.position)?;
                state.serialize_field("display_position", &found.display_position())?;
                state.serialize_field("matched_candidate", &found.candidate)?;
                state.serialize_field("corpus_length", &found.corpus_len)?;
                state.serialize_field("tried", &found.tried)?;
                state.serialize_field("percentage", &found.percentage_label())?;
                state.serialize_field("context", &found.context)?;
                state.end()
            }
            Self::NotFound { tried } => {
                let mut state = serializer.serialize_struct("MatchReport", 2)?;
                state.serialize_field("found", &false)?;
                state.serialize_field("tried", tried)?;
                state.end()
            }
        }
    }
}
