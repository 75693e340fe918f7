//! Cinecheck-IN: free text to atomic movie claims
//!
//! This crate turns generated prose into the ordered claims the verification
//! pipeline checks, and parses a claim into its movie / attribute / value
//! shape for lookups and verifiers.
//!
//! # Example
//!
//! ```
//! use cinecheck_core::ClaimExtractor;
//! use cinecheck_in::HeuristicExtractor;
//!
//! let claims = HeuristicExtractor::new()
//!     .extract("Braveheart was released in 1995 and won three Oscars.")
//!     .unwrap();
//! assert_eq!(claims[1].text, "Braveheart won three Oscars");
//! ```

pub mod clauses;
pub mod entities;
pub mod filter;
pub mod fuzzy;
pub mod normalizer;
pub mod segmenter;
pub mod shape;

pub use shape::{parse_claim, ClaimShape, ClaimValue};

use cinecheck_core::{Claim, ClaimExtractor, ExtractionError};
use clauses::{split_compound, Referents};
use filter::{clause_rejection, sentence_rejection};
use normalizer::{clean_clause, normalize_chars};
use segmenter::segment;
use tracing::debug;

/// Rule-based claim extractor. Stateless; every call starts with fresh
/// pronoun referents.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicExtractor;

impl HeuristicExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ClaimExtractor for HeuristicExtractor {
    fn extract(&self, text: &str) -> Result<Vec<Claim>, ExtractionError> {
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let prepared = normalize_chars(text);
        let mut referents = Referents::default();
        let mut claims: Vec<Claim> = Vec::new();

        for sentence in segment(&prepared) {
            if let Some(reason) = sentence_rejection(&sentence.text) {
                debug!(%reason, sentence = %sentence.text, "sentence skipped");
                continue;
            }

            for clause in split_compound(&sentence.text) {
                let canonical = clean_clause(&referents.resolve(&clause.text));
                let shape = parse_claim(&canonical);
                if let Some(reason) = clause_rejection(&canonical, &shape) {
                    debug!(%reason, clause = %canonical, "clause skipped");
                    continue;
                }
                referents.observe(&shape);

                let position = sentence.start + sentence.text[..clause.offset].chars().count();
                claims.push(Claim::new(claims.len(), canonical, position));
            }
        }

        if claims.is_empty() {
            return Err(ExtractionError::NoFactualStatements);
        }
        Ok(claims)
    }
}
