//! Offline lookup against a curated YAML catalog of movies.
//!
//! ```yaml
//! movies:
//!   - title: Braveheart
//!     year: 1995
//!     directors: [Mel Gibson]
//!     oscar_wins: 5
//! ```

use crate::error::CatalogError;
use crate::record::{evidence_for, MovieRecord};
use async_trait::async_trait;
use cinecheck_core::{Claim, Evidence, KnowledgeLookup, LookupError};
use cinecheck_in::fuzzy::{title_similarity, tokens};
use cinecheck_in::{parse_claim, ClaimShape};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Minimum title similarity for a catalog entry to count as the claimed movie
pub const TITLE_MATCH_THRESHOLD: f64 = 0.80;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    movies: Vec<MovieRecord>,
}

#[derive(Debug, Clone)]
pub struct CatalogLookup {
    movies: Vec<MovieRecord>,
}

impl CatalogLookup {
    pub fn new(movies: Vec<MovieRecord>) -> Self {
        Self { movies }
    }

    pub fn from_yaml(source: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(source)?;
        if let Some(untitled) = file.movies.iter().position(|m| m.title.trim().is_empty()) {
            return Err(CatalogError::Invalid(format!("movie #{} has no title", untitled + 1)));
        }
        Ok(Self::new(file.movies))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let lookup = Self::from_yaml(&std::fs::read_to_string(path)?)?;
        info!(path = %path.display(), movies = lookup.len(), "catalog loaded");
        Ok(lookup)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Best fuzzy title match. Ties keep the earlier entry.
    pub fn find(&self, title: &str) -> Option<&MovieRecord> {
        let mut best: Option<(f64, &MovieRecord)> = None;
        for movie in &self.movies {
            let score = title_similarity(title, &movie.title);
            if score >= TITLE_MATCH_THRESHOLD && best.map_or(true, |(s, _)| score > s) {
                best = Some((score, movie));
            }
        }
        best.map(|(_, movie)| movie)
    }

    /// Movie whose title appears word for word in free text. The longest
    /// mentioned title wins ("The Dark Knight Rises" over "The Dark Knight").
    pub fn mentioned_in(&self, text: &str) -> Option<&MovieRecord> {
        let words = tokens(text);
        let mut best: Option<(usize, &MovieRecord)> = None;
        for movie in &self.movies {
            let title = tokens(&movie.title);
            if title.is_empty() || best.map_or(false, |(len, _)| len >= title.len()) {
                continue;
            }
            if words.windows(title.len()).any(|w| w == title.as_slice()) {
                best = Some((title.len(), movie));
            }
        }
        best.map(|(_, movie)| movie)
    }
}

#[async_trait]
impl KnowledgeLookup for CatalogLookup {
    async fn lookup(&self, claim: &Claim) -> Result<Vec<Evidence>, LookupError> {
        let shape = parse_claim(&claim.text);
        let record = match &shape {
            ClaimShape::Movie { movie, .. } => self.find(movie),
            ClaimShape::Freeform => self.mentioned_in(&claim.text),
        };
        let Some(record) = record else {
            return Err(LookupError::NotFound(format!(
                "no catalog entry for \"{}\"",
                shape.movie().unwrap_or(&claim.text)
            )));
        };

        let source_ref = format!("catalog:{}", record.slug());
        debug!(claim_id = claim.id, source = %source_ref, "catalog hit");
        Ok(evidence_for(record, &shape, claim.id, &source_ref))
    }
}
