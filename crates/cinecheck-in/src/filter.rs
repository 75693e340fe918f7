//! Non-factual sentence filtering.

use crate::normalizer::word_count;
use crate::shape::ClaimShape;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

lazy_static! {
    static ref HEDGES: Regex = Regex::new(
        r"(?i)\b(?:i\s+think|i\s+believe|i\s+guess|i\s+feel|i\s+suppose|maybe|perhaps|probably|possibly|might|may\s+have|could\s+have|could\s+be|it\s+seems|seems\s+to|apparently|allegedly|reportedly|rumou?red|in\s+my\s+opinion|if\s+i\s+recall|not\s+sure)\b"
    ).unwrap();

    static ref BOILERPLATE: Regex = Regex::new(
        r"(?i)^(?:sure|certainly|of\s+course|absolutely|okay|ok|great\s+question|here\s+(?:are|is)|here's|let\s+me|feel\s+free|i\s+hope|hope\s+this|as\s+an\s+ai|note\s+that|in\s+summary|to\s+summarize|enjoy)\b"
    ).unwrap();

    static ref SUBJECTIVE: Regex = Regex::new(
        r"(?i)\b(?:amazing|awesome|great|greatest|best|worst|beautiful|beautifully|masterpiece|wonderful|brilliant|boring|awful|terrible|stunning|loved?|favou?rite|incredible|must-see|timeless|iconic|classic|breathtaking|overrated|underrated|fantastic|excellent|gripping|moving|powerful|unforgettable)\b"
    ).unwrap();

    static ref HAS_DIGIT: Regex = Regex::new(r"\d").unwrap();
}

/// Why a sentence or clause was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Question,
    Hedge,
    Boilerplate,
    Fragment,
    Subjective,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Rejection::Question => "question",
            Rejection::Hedge => "hedge",
            Rejection::Boilerplate => "boilerplate",
            Rejection::Fragment => "fragment",
            Rejection::Subjective => "subjective",
        };
        f.write_str(s)
    }
}

/// Sentence-level checks, applied before clause splitting.
pub fn sentence_rejection(sentence: &str) -> Option<Rejection> {
    let trimmed = sentence.trim().trim_end_matches(['"', '\'', ')']);
    if trimmed.ends_with('?') {
        return Some(Rejection::Question);
    }
    if HEDGES.is_match(trimmed) {
        return Some(Rejection::Hedge);
    }
    if BOILERPLATE.is_match(trimmed) || trimmed.ends_with(':') {
        return Some(Rejection::Boilerplate);
    }
    None
}

/// Clause-level checks, applied to the canonical claim text.
pub fn clause_rejection(clause: &str, shape: &ClaimShape) -> Option<Rejection> {
    if word_count(clause) < 3 {
        return Some(Rejection::Fragment);
    }
    // opinion with nothing to check against a reference source
    if shape.is_freeform() && !HAS_DIGIT.is_match(clause) && SUBJECTIVE.is_match(clause) {
        return Some(Rejection::Subjective);
    }
    None
}
